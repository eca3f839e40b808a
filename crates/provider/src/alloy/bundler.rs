// This file is part of Claimer.
//
// Claimer is free software: you can redistribute it and/or modify it under the
// terms of the GNU Lesser General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version.
//
// Claimer is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with Claimer.
// If not, see https://www.gnu.org/licenses/.

use std::marker::PhantomData;

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_provider::Provider as AlloyProvider;
use alloy_transport::Transport;
use claim_types::{v0_6::UserOperation, GasEstimate, UserOperationReceipt};
use serde::{Deserialize, Serialize};

use crate::{BundlerProvider, ProviderResult};

/// Bundler Provider implementation using [alloy-provider](https://github.com/alloy-rs/alloy-rs)
///
/// Speaks the `eth_*UserOperation*` bundler namespace and the `pm_sponsorUserOperation`
/// paymaster method, which thirdweb serves from the same endpoint.
pub struct AlloyBundlerProvider<AP, T> {
    inner: AP,
    _marker: PhantomData<T>,
}

impl<AP, T> AlloyBundlerProvider<AP, T> {
    /// Create a new `AlloyBundlerProvider`
    pub fn new(inner: AP) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<AP: Clone, T> Clone for AlloyBundlerProvider<AP, T> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

#[async_trait::async_trait]
impl<AP, T> BundlerProvider for AlloyBundlerProvider<AP, T>
where
    T: Transport + Clone,
    AP: AlloyProvider<T>,
{
    async fn sponsor_user_operation(
        &self,
        op: &UserOperation,
        entry_point: Address,
    ) -> ProviderResult<Bytes> {
        let response: SponsorResponse = self
            .inner
            .raw_request(
                "pm_sponsorUserOperation".into(),
                (RpcUserOperation::from(op), entry_point),
            )
            .await?;
        Ok(response.into_paymaster_and_data())
    }

    async fn estimate_user_operation_gas(
        &self,
        op: &UserOperation,
        entry_point: Address,
    ) -> ProviderResult<GasEstimate> {
        Ok(self
            .inner
            .raw_request(
                "eth_estimateUserOperationGas".into(),
                (RpcUserOperation::from(op), entry_point),
            )
            .await?)
    }

    async fn send_user_operation(
        &self,
        op: &UserOperation,
        entry_point: Address,
    ) -> ProviderResult<B256> {
        let hash: B256 = self
            .inner
            .raw_request(
                "eth_sendUserOperation".into(),
                (RpcUserOperation::from(op), entry_point),
            )
            .await?;
        tracing::debug!("bundler accepted user operation {hash:?}");
        Ok(hash)
    }

    async fn get_user_operation_receipt(
        &self,
        user_op_hash: B256,
    ) -> ProviderResult<Option<UserOperationReceipt>> {
        Ok(self
            .inner
            .raw_request("eth_getUserOperationReceipt".into(), (user_op_hash,))
            .await?)
    }
}

/// User operation definition for RPC
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct RpcUserOperation {
    sender: Address,
    nonce: U256,
    init_code: Bytes,
    call_data: Bytes,
    call_gas_limit: U256,
    verification_gas_limit: U256,
    pre_verification_gas: U256,
    max_fee_per_gas: U256,
    max_priority_fee_per_gas: U256,
    paymaster_and_data: Bytes,
    signature: Bytes,
}

impl From<&UserOperation> for RpcUserOperation {
    fn from(op: &UserOperation) -> Self {
        RpcUserOperation {
            sender: op.sender,
            nonce: op.nonce,
            init_code: op.initCode.clone(),
            call_data: op.callData.clone(),
            call_gas_limit: op.callGasLimit,
            verification_gas_limit: op.verificationGasLimit,
            pre_verification_gas: op.preVerificationGas,
            max_fee_per_gas: op.maxFeePerGas,
            max_priority_fee_per_gas: op.maxPriorityFeePerGas,
            paymaster_and_data: op.paymasterAndData.clone(),
            signature: op.signature.clone(),
        }
    }
}

/// Paymasters answer either with the raw `paymasterAndData` or with an object holding it
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SponsorResponse {
    Raw(Bytes),
    #[serde(rename_all = "camelCase")]
    Object { paymaster_and_data: Bytes },
}

impl SponsorResponse {
    fn into_paymaster_and_data(self) -> Bytes {
        match self {
            SponsorResponse::Raw(data) => data,
            SponsorResponse::Object { paymaster_and_data } => paymaster_and_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Read, sync::mpsc, thread};

    use alloy_primitives::{address, bytes};
    use secrecy::SecretString;
    use serde_json::{json, Value};
    use tiny_http::{Header, Response, Server};

    use super::*;
    use crate::new_alloy_bundler_provider;

    /// Serve `responses` in order, reporting each request's method and secret key header
    fn serve(responses: Vec<Value>) -> (String, mpsc::Receiver<(String, Option<String>, Value)>) {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for result in responses {
                let mut request = server.recv().unwrap();
                let mut body = String::new();
                request.as_reader().read_to_string(&mut body).unwrap();
                let body: Value = serde_json::from_str(&body).unwrap();
                let secret = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("x-secret-key"))
                    .map(|h| h.value.as_str().to_string());
                tx.send((
                    body["method"].as_str().unwrap().to_string(),
                    secret,
                    body["params"].clone(),
                ))
                .unwrap();

                let response = json!({"jsonrpc": "2.0", "id": body["id"], "result": result});
                let _ = request.respond(
                    Response::from_string(response.to_string()).with_header(
                        Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                            .unwrap(),
                    ),
                );
            }
        });

        (format!("http://{addr}"), rx)
    }

    fn op() -> UserOperation {
        UserOperation {
            sender: address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"),
            nonce: U256::from(1),
            callData: bytes!("deadbeef"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_send_user_operation() {
        let hash = B256::repeat_byte(0x42);
        let (url, rx) = serve(vec![json!(hash)]);
        let secret = SecretString::from("test-secret".to_string());
        let provider = new_alloy_bundler_provider(&url, Some(&secret), 5).unwrap();

        let entry_point = address!("5FF137D4b0FDCD49DcA30c7CF57E578a026d2789");
        let sent = provider.send_user_operation(&op(), entry_point).await.unwrap();
        assert_eq!(sent, hash);

        let (method, secret, params) = rx.recv().unwrap();
        assert_eq!(method, "eth_sendUserOperation");
        assert_eq!(secret.as_deref(), Some("test-secret"));
        assert_eq!(params[0]["callData"], "0xdeadbeef");
        assert_eq!(params[0]["nonce"], "0x1");
        assert_eq!(
            params[1].as_str().unwrap().to_lowercase(),
            "0x5ff137d4b0fdcd49dca30c7cf57e578a026d2789"
        );
    }

    #[tokio::test]
    async fn test_sponsor_response_shapes() {
        let (url, rx) = serve(vec![
            json!({"paymasterAndData": "0xaaaa"}),
            json!("0xbbbb"),
        ]);
        let provider = new_alloy_bundler_provider(&url, None, 5).unwrap();

        let object = provider
            .sponsor_user_operation(&op(), Address::ZERO)
            .await
            .unwrap();
        assert_eq!(object, bytes!("aaaa"));
        let raw = provider
            .sponsor_user_operation(&op(), Address::ZERO)
            .await
            .unwrap();
        assert_eq!(raw, bytes!("bbbb"));

        let (method, secret, _) = rx.recv().unwrap();
        assert_eq!(method, "pm_sponsorUserOperation");
        assert_eq!(secret, None);
    }

    #[tokio::test]
    async fn test_pending_receipt() {
        let (url, _rx) = serve(vec![Value::Null]);
        let provider = new_alloy_bundler_provider(&url, None, 5).unwrap();

        let receipt = provider
            .get_user_operation_receipt(B256::repeat_byte(1))
            .await
            .unwrap();
        assert!(receipt.is_none());
    }
}
