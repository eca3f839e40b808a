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

use std::sync::Arc;

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::SolCall;
use anyhow::{bail, Context};
use claim_contracts::drop::{
    AllowlistProof, ClaimCondition, IDropERC1155, IDropERC20, NATIVE_TOKEN_ADDRESS,
};
use claim_provider::EvmProvider;
use claim_types::{BatchReceipt, PreparedTransaction};
use claim_wallet::SmartWallet;

use crate::{ClaimError, PrepareClaim};

/// Claim from an ERC-20 drop
pub struct TokenDrop<P> {
    provider: Arc<P>,
    address: Address,
    quantity: U256,
}

impl<P> TokenDrop<P> {
    /// Claim `quantity` whole tokens from the drop at `address`
    pub fn new(provider: Arc<P>, address: Address, quantity: U256) -> Self {
        Self {
            provider,
            address,
            quantity,
        }
    }
}

#[async_trait::async_trait]
impl<P: EvmProvider> PrepareClaim for TokenDrop<P> {
    async fn prepare(&self, receiver: Address) -> anyhow::Result<PreparedTransaction> {
        let provider = self.provider.as_ref();
        let decimals = read(provider, self.address, IDropERC20::decimalsCall {})
            .await?
            ._0;
        let condition_id = read(
            provider,
            self.address,
            IDropERC20::getActiveClaimConditionIdCall {},
        )
        .await
        .context("no active claim condition")?
        ._0;
        let condition = read(
            provider,
            self.address,
            IDropERC20::getClaimConditionByIdCall {
                conditionId: condition_id,
            },
        )
        .await?
        .condition;

        let quantity = U256::from(10)
            .checked_pow(U256::from(decimals))
            .and_then(|unit| unit.checked_mul(self.quantity))
            .context("claim quantity overflows uint256")?;
        // price is per whole token
        let value = native_value(&condition, self.quantity)?;

        let call = IDropERC20::claimCall {
            receiver,
            quantity,
            currency: condition.currency,
            pricePerToken: condition.pricePerToken,
            allowlistProof: open_allowlist_proof(),
            data: Bytes::new(),
        };

        Ok(PreparedTransaction {
            to: self.address,
            value,
            data: call.abi_encode().into(),
            description: format!("claim {} ERC-20 from {:?}", self.quantity, self.address),
        })
    }
}

/// Claim from an ERC-1155 drop
pub struct EditionDrop<P> {
    provider: Arc<P>,
    address: Address,
    token_id: U256,
    quantity: U256,
}

impl<P> EditionDrop<P> {
    /// Claim `quantity` of `token_id` from the drop at `address`
    pub fn new(provider: Arc<P>, address: Address, token_id: U256, quantity: U256) -> Self {
        Self {
            provider,
            address,
            token_id,
            quantity,
        }
    }
}

#[async_trait::async_trait]
impl<P: EvmProvider> PrepareClaim for EditionDrop<P> {
    async fn prepare(&self, receiver: Address) -> anyhow::Result<PreparedTransaction> {
        let provider = self.provider.as_ref();
        let condition_id = read(
            provider,
            self.address,
            IDropERC1155::getActiveClaimConditionIdCall {
                tokenId: self.token_id,
            },
        )
        .await
        .with_context(|| format!("no active claim condition for token {}", self.token_id))?
        ._0;
        let condition = read(
            provider,
            self.address,
            IDropERC1155::getClaimConditionByIdCall {
                tokenId: self.token_id,
                conditionId: condition_id,
            },
        )
        .await?
        .condition;

        let value = native_value(&condition, self.quantity)?;

        let call = IDropERC1155::claimCall {
            receiver,
            tokenId: self.token_id,
            quantity: self.quantity,
            currency: condition.currency,
            pricePerToken: condition.pricePerToken,
            allowlistProof: open_allowlist_proof(),
            data: Bytes::new(),
        };

        Ok(PreparedTransaction {
            to: self.address,
            value,
            data: call.abi_encode().into(),
            description: format!(
                "claim {} of ERC-1155 token {} from {:?}",
                self.quantity, self.token_id, self.address
            ),
        })
    }
}

/// Prepare the configured claims and submit them as one batch
///
/// Claims are prepared in order, token first. Nothing is submitted if any
/// preparation fails, and nothing is submitted if there is nothing to claim.
pub async fn perform_claims(
    wallet: &dyn SmartWallet,
    token: Option<&dyn PrepareClaim>,
    edition: Option<&dyn PrepareClaim>,
) -> Result<Option<BatchReceipt>, ClaimError> {
    let receiver = wallet.address();

    let mut txs = vec![];
    for claim in [token, edition].into_iter().flatten() {
        let tx = claim
            .prepare(receiver)
            .await
            .map_err(ClaimError::ClaimFailed)?;
        tracing::debug!("Prepared {}", tx.description);
        txs.push(tx);
    }

    if txs.is_empty() {
        tracing::info!("no operations to perform");
        return Ok(None);
    }

    let receipt = wallet
        .execute_batch(txs)
        .await
        .map_err(|e| ClaimError::ClaimFailed(e.into()))?;
    Ok(Some(receipt))
}

async fn read<P, C>(provider: &P, to: Address, call: C) -> anyhow::Result<C::Return>
where
    P: EvmProvider + ?Sized,
    C: SolCall,
{
    let ret = provider
        .call(to, call.abi_encode().into())
        .await
        .with_context(|| format!("{} on {to:?}", C::SIGNATURE))?;
    Ok(C::abi_decode_returns(&ret, true)?)
}

// Public claim phase: the proof is not checked against a merkle root.
fn open_allowlist_proof() -> AllowlistProof {
    AllowlistProof {
        proof: vec![B256::ZERO],
        quantityLimitPerWallet: U256::ZERO,
        pricePerToken: U256::MAX,
        currency: Address::ZERO,
    }
}

fn native_value(condition: &ClaimCondition, quantity: U256) -> anyhow::Result<U256> {
    if condition.pricePerToken.is_zero() {
        return Ok(U256::ZERO);
    }
    if condition.currency != NATIVE_TOKEN_ADDRESS {
        bail!(
            "claims priced in ERC-20 currency {:?} are not supported",
            condition.currency
        );
    }
    condition
        .pricePerToken
        .checked_mul(quantity)
        .context("claim price overflows uint256")
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, utils::parse_ether};
    use claim_provider::MockEvmProvider;
    use claim_wallet::MockSmartWallet;
    use mockall::predicate::eq;

    use super::*;
    use crate::MockPrepareClaim;

    const SMART: Address = address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");
    const TOKEN: Address = address!("c54414e0E2DBE7E9565B75EFdC495c7eD12D3823");
    const EDITION: Address = address!("8096C71f400984C3C1B7F3a79Ab0C0EaC417b91c");

    fn condition(price: U256, currency: Address) -> ClaimCondition {
        ClaimCondition {
            maxClaimableSupply: U256::MAX,
            pricePerToken: price,
            currency,
            ..Default::default()
        }
    }

    fn drop_provider(decimals: u8, condition: ClaimCondition) -> Arc<MockEvmProvider> {
        let mut provider = MockEvmProvider::new();
        provider.expect_call().returning(move |_, data| {
            let selector = &data[..4];
            let ret = if selector == IDropERC20::decimalsCall::SELECTOR {
                IDropERC20::decimalsCall::abi_encode_returns(&(decimals,))
            } else if selector == IDropERC20::getActiveClaimConditionIdCall::SELECTOR
                || selector == IDropERC1155::getActiveClaimConditionIdCall::SELECTOR
            {
                IDropERC20::getActiveClaimConditionIdCall::abi_encode_returns(&(U256::from(2),))
            } else if selector == IDropERC20::getClaimConditionByIdCall::SELECTOR
                || selector == IDropERC1155::getClaimConditionByIdCall::SELECTOR
            {
                IDropERC20::getClaimConditionByIdCall::abi_encode_returns(&(condition.clone(),))
            } else {
                panic!("unexpected selector {selector:?}");
            };
            Ok(ret.into())
        });
        Arc::new(provider)
    }

    fn tx(description: &str) -> PreparedTransaction {
        PreparedTransaction {
            description: description.to_string(),
            ..Default::default()
        }
    }

    fn claim(description: &'static str) -> MockPrepareClaim {
        let mut claim = MockPrepareClaim::new();
        claim
            .expect_prepare()
            .with(eq(SMART))
            .times(1)
            .returning(move |_| Ok(tx(description)));
        claim
    }

    fn smart_wallet() -> MockSmartWallet {
        let mut wallet = MockSmartWallet::new();
        wallet.expect_address().return_const(SMART);
        wallet
    }

    #[tokio::test]
    async fn test_token_drop_free_claim() {
        let drop = TokenDrop::new(
            drop_provider(18, condition(U256::ZERO, NATIVE_TOKEN_ADDRESS)),
            TOKEN,
            U256::from(1),
        );
        let tx = drop.prepare(SMART).await.unwrap();

        assert_eq!(tx.to, TOKEN);
        assert_eq!(tx.value, U256::ZERO);
        let call = IDropERC20::claimCall::abi_decode(&tx.data, true).unwrap();
        assert_eq!(call.receiver, SMART);
        assert_eq!(call.quantity, parse_ether("1").unwrap());
        assert_eq!(call.currency, NATIVE_TOKEN_ADDRESS);
        assert_eq!(call.allowlistProof, open_allowlist_proof());
        assert!(call.data.is_empty());
    }

    #[tokio::test]
    async fn test_token_drop_native_price() {
        let price = parse_ether("0.01").unwrap();
        let drop = TokenDrop::new(
            drop_provider(6, condition(price, NATIVE_TOKEN_ADDRESS)),
            TOKEN,
            U256::from(3),
        );
        let tx = drop.prepare(SMART).await.unwrap();

        assert_eq!(tx.value, price * U256::from(3));
        let call = IDropERC20::claimCall::abi_decode(&tx.data, true).unwrap();
        assert_eq!(call.quantity, U256::from(3_000_000));
        assert_eq!(call.pricePerToken, price);
    }

    #[tokio::test]
    async fn test_token_drop_erc20_price_rejected() {
        let drop = TokenDrop::new(
            drop_provider(
                18,
                condition(U256::from(5), Address::repeat_byte(0x42)),
            ),
            TOKEN,
            U256::from(1),
        );
        let err = drop.prepare(SMART).await.unwrap_err();
        assert!(err.to_string().contains("not supported"));
    }

    #[tokio::test]
    async fn test_edition_drop() {
        let price = parse_ether("0.001").unwrap();
        let drop = EditionDrop::new(
            drop_provider(0, condition(price, NATIVE_TOKEN_ADDRESS)),
            EDITION,
            U256::ZERO,
            U256::from(2),
        );
        let tx = drop.prepare(SMART).await.unwrap();

        assert_eq!(tx.to, EDITION);
        assert_eq!(tx.value, price * U256::from(2));
        let call = IDropERC1155::claimCall::abi_decode(&tx.data, true).unwrap();
        assert_eq!(call.receiver, SMART);
        assert_eq!(call.tokenId, U256::ZERO);
        assert_eq!(call.quantity, U256::from(2));
    }

    #[tokio::test]
    async fn test_no_claims_is_noop() {
        let mut wallet = smart_wallet();
        wallet.expect_execute_batch().never();

        let receipt = perform_claims(&wallet, None, None).await.unwrap();
        assert!(receipt.is_none());
    }

    #[tokio::test]
    async fn test_single_claim() {
        let edition = claim("edition");
        let mut wallet = smart_wallet();
        wallet
            .expect_execute_batch()
            .withf(|txs| txs.len() == 1 && txs[0].description == "edition")
            .times(1)
            .returning(|txs| {
                Ok(BatchReceipt {
                    calls: txs.len(),
                    ..Default::default()
                })
            });

        let receipt = perform_claims(&wallet, None, Some(&edition))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(receipt.calls, 1);
    }

    #[tokio::test]
    async fn test_claims_batched_token_first() {
        let token = claim("token");
        let edition = claim("edition");
        let mut wallet = smart_wallet();
        wallet
            .expect_execute_batch()
            .withf(|txs| {
                txs.iter().map(|tx| tx.description.as_str()).collect::<Vec<_>>()
                    == ["token", "edition"]
            })
            .times(1)
            .returning(|txs| {
                Ok(BatchReceipt {
                    transaction_hash: B256::repeat_byte(0x33),
                    calls: txs.len(),
                    ..Default::default()
                })
            });

        let receipt = perform_claims(&wallet, Some(&token), Some(&edition))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(receipt.calls, 2);
        assert_eq!(receipt.transaction_hash, B256::repeat_byte(0x33));
    }

    #[tokio::test]
    async fn test_prepare_failure_submits_nothing() {
        let token = claim("token");
        let mut edition = MockPrepareClaim::new();
        edition
            .expect_prepare()
            .returning(|_| Err(anyhow::anyhow!("claim condition not started")));
        let mut wallet = smart_wallet();
        wallet.expect_execute_batch().times(0);

        let err = perform_claims(&wallet, Some(&token), Some(&edition))
            .await
            .unwrap_err();
        assert!(err
            .to_string()
            .starts_with("failed to claim tokens: claim condition not started"));
    }

    #[tokio::test]
    async fn test_submit_failure() {
        let token = claim("token");
        let mut wallet = smart_wallet();
        wallet
            .expect_execute_batch()
            .returning(|_| Err(claim_wallet::Error::EmptyBatch));

        let err = perform_claims(&wallet, Some(&token), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::ClaimFailed);
    }
}
