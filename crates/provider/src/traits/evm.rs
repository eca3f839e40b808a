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

//! Trait for interacting with chain data and contracts.

use alloy_primitives::{Address, Bytes, U256};
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::error::ProviderResult;

/// Trait for interacting with chain data and contracts.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait::async_trait]
pub trait EvmProvider: Send + Sync {
    /// Get the chain id reported by the node
    async fn get_chain_id(&self) -> ProviderResult<u64>;

    /// Simulate a call to `to` with `data` via an eth_call against the latest block
    async fn call(&self, to: Address, data: Bytes) -> ProviderResult<Bytes>;

    /// Get the balance of an address
    async fn get_balance(&self, address: Address) -> ProviderResult<U256>;

    /// Get the code at an address
    async fn get_code(&self, address: Address) -> ProviderResult<Bytes>;

    /// Get the base fee per gas of the pending block
    async fn get_pending_base_fee(&self) -> ProviderResult<u128>;

    /// Get the max fee per gas as reported by the node's RPC
    async fn get_max_priority_fee(&self) -> ProviderResult<u128>;
}
