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

//! Trait for interacting with an ERC-4337 bundler and its paymaster.

use alloy_primitives::{Address, Bytes, B256};
use claim_types::{v0_6::UserOperation, GasEstimate, UserOperationReceipt};
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::error::ProviderResult;

/// Trait for submitting user operations to a bundler
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait::async_trait]
pub trait BundlerProvider: Send + Sync {
    /// Ask the paymaster to sponsor a user operation, returns `paymasterAndData`
    async fn sponsor_user_operation(
        &self,
        op: &UserOperation,
        entry_point: Address,
    ) -> ProviderResult<Bytes>;

    /// Estimate the gas limits of a user operation
    async fn estimate_user_operation_gas(
        &self,
        op: &UserOperation,
        entry_point: Address,
    ) -> ProviderResult<GasEstimate>;

    /// Send a signed user operation, returns its hash
    async fn send_user_operation(
        &self,
        op: &UserOperation,
        entry_point: Address,
    ) -> ProviderResult<B256>;

    /// Get the receipt of a user operation, `None` while it is pending
    async fn get_user_operation_receipt(
        &self,
        user_op_hash: B256,
    ) -> ProviderResult<Option<UserOperationReceipt>>;
}
