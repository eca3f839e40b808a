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

use alloy_primitives::{aliases::U192, Address, Bytes, B256, U256};
use alloy_sol_types::SolCall;
use claim_contracts::{account::IAccountFactory, v0_6::IEntryPoint};
use claim_provider::{BundlerProvider, EvmProvider};
use claim_signer::PersonalWallet;
use claim_types::{
    v0_6::UserOperation, BatchReceipt, GasFees, PreparedTransaction, UserOperationExt,
    UserOperationReceipt, DUMMY_SIGNATURE,
};

use crate::{encode_execute_batch, encode_init_code, Error, Result, SmartWallet, SmartWalletSettings};

/// ERC-4337 v0.6 smart account owned by a personal wallet
///
/// Reads go through the chain provider, user operations go through the bundler.
/// When gasless is enabled the bundler's paymaster is asked to sponsor every
/// operation.
pub struct AccountAbstractionWallet<P, B> {
    settings: SmartWalletSettings,
    provider: P,
    bundler: B,
    personal: Arc<dyn PersonalWallet>,
    address: Address,
}

impl<P, B> AccountAbstractionWallet<P, B>
where
    P: EvmProvider,
    B: BundlerProvider,
{
    /// Bind `personal` to the account factory and resolve the account address
    pub async fn connect(
        settings: SmartWalletSettings,
        provider: P,
        bundler: B,
        personal: Arc<dyn PersonalWallet>,
    ) -> Result<Self> {
        let chain_id = provider.get_chain_id().await?;
        if chain_id != settings.chain_spec.id {
            return Err(Error::ChainIdMismatch {
                expected: settings.chain_spec.id,
                actual: chain_id,
            });
        }

        let call = IAccountFactory::getAddressCall {
            adminSigner: personal.address(),
            data: settings.factory_data.clone(),
        };
        let ret = provider
            .call(settings.factory_address, call.abi_encode().into())
            .await?;
        let address = IAccountFactory::getAddressCall::abi_decode_returns(&ret, true)?._0;
        if address.is_zero() {
            return Err(Error::ContractError(format!(
                "factory {:?} returned the zero address",
                settings.factory_address
            )));
        }

        tracing::debug!(
            "Resolved smart account {address:?} for owner {:?} (gasless: {})",
            personal.address(),
            settings.gasless
        );

        Ok(Self {
            settings,
            provider,
            bundler,
            personal,
            address,
        })
    }

    /// True once the account contract has been deployed by its first user operation
    pub async fn is_deployed(&self) -> Result<bool> {
        Ok(!self.provider.get_code(self.address).await?.is_empty())
    }

    fn entry_point(&self) -> Address {
        self.settings.chain_spec.entry_point_address_v0_6
    }

    async fn get_nonce(&self) -> Result<U256> {
        let call = IEntryPoint::getNonceCall {
            sender: self.address,
            key: U192::ZERO,
        };
        let ret = self
            .provider
            .call(self.entry_point(), call.abi_encode().into())
            .await?;
        Ok(IEntryPoint::getNonceCall::abi_decode_returns(&ret, true)?.nonce)
    }

    async fn get_fees(&self) -> Result<GasFees> {
        let base_fee = self.provider.get_pending_base_fee().await?;
        let priority_fee = self
            .provider
            .get_max_priority_fee()
            .await?
            .max(u128::from(
                self.settings.chain_spec.min_max_priority_fee_per_gas,
            ));
        Ok(GasFees::from_base_fee(
            base_fee,
            priority_fee,
            u128::from(self.settings.chain_spec.base_fee_multiplier),
        ))
    }

    async fn build_user_operation(&self, call_data: Bytes) -> Result<UserOperation> {
        let init_code = if self.is_deployed().await? {
            Bytes::new()
        } else {
            tracing::info!(
                "Smart account {:?} not deployed yet, deploying with this operation",
                self.address
            );
            encode_init_code(
                self.settings.factory_address,
                self.personal.address(),
                &self.settings.factory_data,
            )
        };
        let nonce = self.get_nonce().await?;
        let fees = self.get_fees().await?;

        Ok(UserOperation {
            sender: self.address,
            nonce,
            initCode: init_code,
            callData: call_data,
            maxFeePerGas: U256::from(fees.max_fee_per_gas),
            maxPriorityFeePerGas: U256::from(fees.max_priority_fee_per_gas),
            signature: DUMMY_SIGNATURE,
            ..Default::default()
        })
    }

    async fn estimate_and_sponsor(&self, op: &mut UserOperation) -> Result<()> {
        let entry_point = self.entry_point();

        // paymaster data must be present for estimation to account for its validation
        if self.settings.gasless {
            op.paymasterAndData = self.bundler.sponsor_user_operation(op, entry_point).await?;
        }

        let estimate = self
            .bundler
            .estimate_user_operation_gas(op, entry_point)
            .await?;
        op.callGasLimit = estimate.call_gas_limit;
        op.verificationGasLimit = estimate.verification_gas_limit;
        op.preVerificationGas = estimate.pre_verification_gas;

        // the paymaster signs over the gas limits, so sponsor again with the final values
        if self.settings.gasless {
            op.paymasterAndData = self.bundler.sponsor_user_operation(op, entry_point).await?;
        }

        Ok(())
    }

    async fn sign(&self, op: &mut UserOperation) -> Result<()> {
        let hash = op.hash(self.entry_point(), self.settings.chain_spec.id);
        op.signature = self.personal.sign_message(hash.as_slice()).await?;
        Ok(())
    }

    async fn wait_for_receipt(&self, user_op_hash: B256) -> Result<UserOperationReceipt> {
        for attempt in 0..self.settings.receipt_poll_max_attempts {
            if let Some(receipt) = self
                .bundler
                .get_user_operation_receipt(user_op_hash)
                .await?
            {
                return Ok(receipt);
            }
            tracing::debug!("User operation {user_op_hash:?} pending, attempt {attempt}");
            if attempt + 1 < self.settings.receipt_poll_max_attempts {
                tokio::time::sleep(self.settings.receipt_poll_interval).await;
            }
        }

        Err(Error::ReceiptTimeout(
            user_op_hash,
            self.settings.receipt_poll_max_attempts,
        ))
    }
}

#[async_trait::async_trait]
impl<P, B> SmartWallet for AccountAbstractionWallet<P, B>
where
    P: EvmProvider,
    B: BundlerProvider,
{
    fn address(&self) -> Address {
        self.address
    }

    fn owner(&self) -> Address {
        self.personal.address()
    }

    async fn execute_batch(&self, txs: Vec<PreparedTransaction>) -> Result<BatchReceipt> {
        if txs.is_empty() {
            return Err(Error::EmptyBatch);
        }
        for tx in &txs {
            tracing::info!("Batching {} -> {:?}", tx.description, tx.to);
        }

        let mut op = self.build_user_operation(encode_execute_batch(&txs)).await?;
        self.estimate_and_sponsor(&mut op).await?;
        self.sign(&mut op).await?;

        let user_op_hash = self
            .bundler
            .send_user_operation(&op, self.entry_point())
            .await?;
        tracing::info!("Sent user operation {user_op_hash:?}, waiting for inclusion");

        let receipt = self.wait_for_receipt(user_op_hash).await?;
        if !receipt.success {
            return Err(Error::Reverted(
                user_op_hash,
                receipt.receipt.transaction_hash,
            ));
        }

        Ok(receipt.into_batch_receipt(txs.len()))
    }
}
