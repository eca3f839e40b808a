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

use std::time::Duration;

use alloy_primitives::{Address, Bytes, U256};
use claim_signer::KeystoreSettings;
use claim_types::chain::ChainSpec;
use claim_wallet::SmartWalletSettings;
use secrecy::SecretString;

use crate::ClaimError;

/// Environment variable holding the API secret key
pub const SECRET_KEY_ENV: &str = "THIRDWEB_SECRET_KEY";

/// API secret key, guaranteed non-empty
#[derive(Clone, Debug)]
pub struct SecretKey(SecretString);

impl SecretKey {
    /// Validate a raw secret key, usually read from [`SECRET_KEY_ENV`]
    pub fn new(value: Option<String>) -> Result<Self, ClaimError> {
        match value {
            Some(value) if !value.trim().is_empty() => Ok(Self(SecretString::from(value))),
            _ => Err(ClaimError::ConfigMissing),
        }
    }

    /// The key, for attaching to requests
    pub fn as_secret(&self) -> &SecretString {
        &self.0
    }
}

/// What to claim from each drop contract
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimParams {
    /// Whole ERC-20 tokens to claim, scaled by the token's decimals
    pub token_quantity: U256,
    /// ERC-1155 token id to claim
    pub edition_token_id: U256,
    /// ERC-1155 tokens to claim
    pub edition_quantity: U256,
}

impl Default for ClaimParams {
    fn default() -> Self {
        Self {
            token_quantity: U256::from(1),
            edition_token_id: U256::ZERO,
            edition_quantity: U256::from(1),
        }
    }
}

/// Settings for a claim run, fixed once built
#[derive(Clone, Debug)]
pub struct ClaimConfig {
    /// API secret key sent to the RPC and bundler endpoints
    pub secret_key: SecretKey,
    /// Chain to claim on
    pub chain_spec: ChainSpec,
    /// Smart account factory
    pub factory_address: Address,
    /// Data passed to the factory alongside the admin signer
    pub factory_data: Bytes,
    /// Sponsor user operations through the paymaster
    pub gasless: bool,
    /// ERC-20 drop to claim from, skipped when unset
    pub token_contract: Option<Address>,
    /// ERC-1155 drop to claim from, skipped when unset
    pub edition_contract: Option<Address>,
    /// Claim quantities
    pub claim: ClaimParams,
    /// Personal wallet keystore
    pub keystore: KeystoreSettings,
    /// HTTP client timeout for RPC and bundler requests
    pub provider_client_timeout_seconds: u64,
    /// Delay between user operation receipt polls
    pub receipt_poll_interval: Duration,
    /// Receipt polls before giving up
    pub receipt_poll_max_attempts: u64,
}

impl ClaimConfig {
    /// Smart wallet settings derived from this config
    pub fn smart_wallet_settings(&self) -> SmartWalletSettings {
        SmartWalletSettings {
            chain_spec: self.chain_spec.clone(),
            factory_address: self.factory_address,
            factory_data: self.factory_data.clone(),
            gasless: self.gasless,
            receipt_poll_interval: self.receipt_poll_interval,
            receipt_poll_max_attempts: self.receipt_poll_max_attempts,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::path::PathBuf;

    use secrecy::ExposeSecret;

    use super::*;
    use crate::ErrorKind;

    pub(crate) fn config() -> ClaimConfig {
        ClaimConfig {
            secret_key: SecretKey::new(Some("sk".to_string())).unwrap(),
            chain_spec: ChainSpec {
                id: 5,
                name: "Goerli".to_string(),
                ..Default::default()
            },
            factory_address: Address::repeat_byte(0xfa),
            factory_data: Bytes::new(),
            gasless: true,
            token_contract: Some(Address::repeat_byte(0x20)),
            edition_contract: Some(Address::repeat_byte(0x11)),
            claim: ClaimParams::default(),
            keystore: KeystoreSettings {
                dir: PathBuf::from(".wallet"),
                name: "personal-wallet.json".to_string(),
                password: SecretString::from("password".to_string()),
            },
            provider_client_timeout_seconds: 10,
            receipt_poll_interval: Duration::ZERO,
            receipt_poll_max_attempts: 1,
        }
    }

    #[test]
    fn test_secret_key_required() {
        for value in [None, Some(String::new()), Some("  \n".to_string())] {
            let err = SecretKey::new(value).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ConfigMissing);
            assert_eq!(
                err.to_string(),
                "No API Key found. Get one from https://thirdweb.com/dashboard"
            );
        }
    }

    #[test]
    fn test_secret_key_redacted() {
        let key = SecretKey::new(Some("super-secret".to_string())).unwrap();
        assert_eq!(key.as_secret().expose_secret(), "super-secret");
        assert!(!format!("{key:?}").contains("super-secret"));
    }

    #[test]
    fn test_default_claim_params() {
        let params = ClaimParams::default();
        assert_eq!(params.token_quantity, U256::from(1));
        assert_eq!(params.edition_token_id, U256::ZERO);
        assert_eq!(params.edition_quantity, U256::from(1));
    }

    #[test]
    fn test_smart_wallet_settings() {
        let settings = config().smart_wallet_settings();
        assert_eq!(settings.chain_spec.id, 5);
        assert_eq!(settings.factory_address, Address::repeat_byte(0xfa));
        assert!(settings.gasless);
    }
}
