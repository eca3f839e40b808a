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
//! Claimer SDK
//!
//! Binds a smart wallet to a chain, prepares drop claims and submits them as a
//! single batched user operation. The [`run_pipeline`] driver sequences the
//! whole flow on top of a [`WalletStack`].

mod claims;
pub use claims::{perform_claims, EditionDrop, TokenDrop};

mod config;
pub use config::{ClaimConfig, ClaimParams, SecretKey, SECRET_KEY_ENV};

mod error;
pub use error::{ClaimError, ErrorKind};

mod pipeline;
pub use pipeline::{
    initialize_personal_wallet, initialize_sdk, report, run, run_pipeline, setup_smart_wallet,
    ClaimOutcome,
};

mod sdk;
#[cfg(any(test, feature = "test-utils"))]
pub use sdk::{MockClaimSdk, MockPrepareClaim};
pub use sdk::{Balance, ClaimSdk, ContractHandle, PrepareClaim, Sdk};

mod stack;
#[cfg(any(test, feature = "test-utils"))]
pub use stack::MockWalletStack;
pub use stack::{LocalWalletStack, WalletStack};
