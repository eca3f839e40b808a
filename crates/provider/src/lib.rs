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

#![warn(missing_docs, unreachable_pub)]
#![deny(unused_must_use, rust_2018_idioms)]
#![doc(test(
    no_crate_inject,
    attr(deny(warnings, rust_2018_idioms), allow(dead_code, unused_variables))
))]

//! Claimer providers
//! A provider is a type that provides access to blockchain data and to the
//! ERC-4337 bundler and paymaster services

mod alloy;
pub use alloy::{
    bundler::AlloyBundlerProvider, evm::AlloyEvmProvider, new_alloy_bundler_provider,
    new_alloy_evm_provider, new_alloy_provider,
};

mod traits;
pub use traits::*;
