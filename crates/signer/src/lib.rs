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
//! Personal wallet implementations for Claimer
//!
//! The personal wallet is the EOA that owns the smart account. It signs user
//! operation hashes and nothing else.

use std::path::PathBuf;

use alloy_primitives::{Address, Bytes};
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;
use secrecy::SecretString;

mod error;
pub use error::{Error, Result};

mod local;
pub use local::LocalPersonalWallet;

/// Where and how the personal wallet key is stored
#[derive(Debug, Clone)]
pub struct KeystoreSettings {
    /// Directory holding the keystore file
    pub dir: PathBuf,
    /// File name of the keystore inside `dir`
    pub name: String,
    /// Password protecting the keystore
    pub password: SecretString,
}

impl KeystoreSettings {
    /// Full path of the keystore file
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }
}

/// A locally controlled key that owns a smart account
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait::async_trait]
pub trait PersonalWallet: Send + Sync {
    /// Address of the key
    fn address(&self) -> Address;

    /// Sign `message` with an EIP-191 personal signature, returning the 65 byte `r || s || v`
    async fn sign_message(&self, message: &[u8]) -> Result<Bytes>;
}
