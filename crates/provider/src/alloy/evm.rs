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

use alloy_primitives::{Address, Bytes, U256};
use alloy_provider::{network::TransactionBuilder, Provider as AlloyProvider};
use alloy_rpc_types_eth::{BlockId, BlockTransactionsKind, TransactionRequest};
use alloy_transport::Transport;
use anyhow::Context;

use crate::{EvmProvider, ProviderResult};

/// Evm Provider implementation using [alloy-provider](https://github.com/alloy-rs/alloy-rs)
pub struct AlloyEvmProvider<AP, T> {
    inner: AP,
    _marker: PhantomData<T>,
}

impl<AP, T> AlloyEvmProvider<AP, T> {
    /// Create a new `AlloyEvmProvider`
    pub fn new(inner: AP) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<AP: Clone, T> Clone for AlloyEvmProvider<AP, T> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

impl<AP, T> From<AP> for AlloyEvmProvider<AP, T>
where
    T: Transport + Clone,
    AP: AlloyProvider<T>,
{
    fn from(inner: AP) -> Self {
        Self::new(inner)
    }
}

#[async_trait::async_trait]
impl<AP, T> EvmProvider for AlloyEvmProvider<AP, T>
where
    T: Transport + Clone,
    AP: AlloyProvider<T>,
{
    async fn get_chain_id(&self) -> ProviderResult<u64> {
        Ok(self.inner.get_chain_id().await?)
    }

    async fn call(&self, to: Address, data: Bytes) -> ProviderResult<Bytes> {
        let tx = TransactionRequest::default().with_to(to).with_input(data);
        Ok(self.inner.call(&tx).await?)
    }

    async fn get_balance(&self, address: Address) -> ProviderResult<U256> {
        Ok(self.inner.get_balance(address).await?)
    }

    async fn get_code(&self, address: Address) -> ProviderResult<Bytes> {
        Ok(self.inner.get_code_at(address).await?)
    }

    async fn get_pending_base_fee(&self) -> ProviderResult<u128> {
        Ok(self
            .inner
            .get_block(BlockId::pending(), BlockTransactionsKind::Hashes)
            .await?
            .context("pending block should exist")?
            .header
            .base_fee_per_gas
            .context("pending block should have a nonempty base fee")?
            .into())
    }

    async fn get_max_priority_fee(&self) -> ProviderResult<u128> {
        Ok(self.inner.get_max_priority_fee_per_gas().await?)
    }
}
