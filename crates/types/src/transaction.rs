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

use alloy_primitives::{Address, Bytes, B256, U256, U64};
use serde::{Deserialize, Serialize};

/// An unsigned call to be executed by the smart account
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreparedTransaction {
    /// Target contract
    pub to: Address,
    /// Native value attached to the call
    pub value: U256,
    /// ABI encoded calldata
    pub data: Bytes,
    /// Human readable summary, used for logging
    pub description: String,
}

/// Result of a batched user operation that was included on chain
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReceipt {
    /// Hash of the user operation
    pub user_op_hash: B256,
    /// Hash of the bundle transaction that included the user operation
    pub transaction_hash: B256,
    /// Block the bundle transaction was included in
    pub block_number: Option<u64>,
    /// Number of calls executed in the batch
    pub calls: usize,
}

/// Receipt returned by `eth_getUserOperationReceipt`
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationReceipt {
    /// The hash of the user operation
    pub user_op_hash: B256,
    /// The sender of the user operation
    pub sender: Address,
    /// The nonce of the user operation
    pub nonce: U256,
    /// True if the call phase of the user operation succeeded
    pub success: bool,
    /// Actual gas cost charged for the user operation
    pub actual_gas_cost: U256,
    /// Actual gas used by the user operation
    pub actual_gas_used: U256,
    /// The bundle transaction receipt
    pub receipt: ReceiptSummary,
}

/// The fields of a transaction receipt that Claimer reports
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptSummary {
    /// Transaction hash
    pub transaction_hash: B256,
    /// Block number, missing on some bundlers for pending receipts
    #[serde(default)]
    pub block_number: Option<U64>,
}

impl UserOperationReceipt {
    /// Convert into a batch receipt for a batch of `calls` calls
    pub fn into_batch_receipt(self, calls: usize) -> BatchReceipt {
        BatchReceipt {
            user_op_hash: self.user_op_hash,
            transaction_hash: self.receipt.transaction_hash,
            block_number: self.receipt.block_number.map(|n| n.to::<u64>()),
            calls,
        }
    }
}
