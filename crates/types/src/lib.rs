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

//! Claimer common types

pub mod chain;

mod gas;
pub use gas::{GasEstimate, GasFees};

mod transaction;
pub use transaction::{BatchReceipt, PreparedTransaction, ReceiptSummary, UserOperationReceipt};

mod user_operation;
pub use user_operation::{UserOperationExt, DUMMY_SIGNATURE};

/// User operation types for entry point v0.6
pub mod v0_6 {
    pub use claim_contracts::v0_6::UserOperation;
}
