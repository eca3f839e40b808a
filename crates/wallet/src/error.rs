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

use alloy_primitives::B256;
use claim_provider::ProviderError;

/// Error type for the smart wallet crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Provider error
    #[error("provider error: {0}")]
    ProviderError(#[from] ProviderError),
    /// Signer error
    #[error("signer error: {0}")]
    SignerError(#[from] claim_signer::Error),
    /// Contract returned data that could not be decoded
    #[error("contract error: {0}")]
    ContractError(String),
    /// Node is connected to a different chain than configured
    #[error("chain id mismatch: configured {expected}, node reports {actual}")]
    ChainIdMismatch {
        /// Configured chain id
        expected: u64,
        /// Chain id reported by the node
        actual: u64,
    },
    /// Batch without calls
    #[error("batch must contain at least one transaction")]
    EmptyBatch,
    /// Receipt not available after polling
    #[error("user operation {0:?} not included after {1} receipt polls")]
    ReceiptTimeout(B256, u64),
    /// Included, but the account's call phase reverted
    #[error("user operation {0:?} reverted in transaction {1:?}")]
    Reverted(B256, B256),
}

/// Result type for the smart wallet crate
pub type Result<T> = std::result::Result<T, Error>;

impl From<alloy_sol_types::Error> for Error {
    fn from(value: alloy_sol_types::Error) -> Self {
        Error::ContractError(value.to_string())
    }
}
