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

#![warn(missing_docs, unreachable_pub, unused_crate_dependencies)]
#![deny(unused_must_use, rust_2018_idioms)]
#![doc(test(
    no_crate_inject,
    attr(deny(warnings, rust_2018_idioms), allow(dead_code, unused_variables))
))]
//! Account abstraction (ERC-4337 v0.6) smart wallet for Claimer

use std::time::Duration;

use alloy_primitives::{Address, Bytes};
use claim_types::{chain::ChainSpec, BatchReceipt, PreparedTransaction};
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

mod account;
pub use account::AccountAbstractionWallet;

mod calldata;
pub use calldata::{encode_execute_batch, encode_init_code};

mod error;
pub use error::{Error, Result};

/// Settings for connecting a smart wallet
#[derive(Debug, Clone)]
pub struct SmartWalletSettings {
    /// Chain the account lives on
    pub chain_spec: ChainSpec,
    /// Factory that derives and deploys the account
    pub factory_address: Address,
    /// Data passed to the factory alongside the admin signer
    pub factory_data: Bytes,
    /// Request gas sponsorship from the paymaster
    pub gasless: bool,
    /// Delay between user operation receipt polls
    pub receipt_poll_interval: Duration,
    /// Receipt polls before giving up on inclusion
    pub receipt_poll_max_attempts: u64,
}

/// A contract account that executes batches on behalf of its personal wallet
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait::async_trait]
pub trait SmartWallet: Send + Sync {
    /// Counterfactual address of the account
    fn address(&self) -> Address;

    /// Address of the personal wallet that owns the account
    fn owner(&self) -> Address;

    /// Execute `txs` atomically in one user operation and wait for its inclusion
    async fn execute_batch(&self, txs: Vec<PreparedTransaction>) -> Result<BatchReceipt>;
}
