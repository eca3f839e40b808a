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

use std::sync::Arc;

use claim_provider::{new_alloy_bundler_provider, new_alloy_evm_provider};
use claim_signer::{LocalPersonalWallet, PersonalWallet};
use claim_wallet::{AccountAbstractionWallet, SmartWallet};
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use crate::{ClaimConfig, ClaimSdk, Sdk};

/// Constructs the wallets and SDK client the claim pipeline runs on
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait::async_trait]
pub trait WalletStack: Send + Sync {
    /// Load or create the personal wallet
    async fn personal_wallet(&self, config: &ClaimConfig)
        -> anyhow::Result<Arc<dyn PersonalWallet>>;

    /// Bind `personal` to the account factory
    async fn smart_wallet(
        &self,
        config: &ClaimConfig,
        personal: Arc<dyn PersonalWallet>,
    ) -> anyhow::Result<Arc<dyn SmartWallet>>;

    /// Build an SDK client bound to `wallet`
    async fn sdk(
        &self,
        config: &ClaimConfig,
        wallet: Arc<dyn SmartWallet>,
    ) -> anyhow::Result<Arc<dyn ClaimSdk>>;
}

/// Keystore on disk, Alloy HTTP providers for the chain and the bundler
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalWalletStack;

#[async_trait::async_trait]
impl WalletStack for LocalWalletStack {
    async fn personal_wallet(
        &self,
        config: &ClaimConfig,
    ) -> anyhow::Result<Arc<dyn PersonalWallet>> {
        let wallet = LocalPersonalWallet::load_or_create(config.keystore.clone()).await?;
        Ok(Arc::new(wallet))
    }

    async fn smart_wallet(
        &self,
        config: &ClaimConfig,
        personal: Arc<dyn PersonalWallet>,
    ) -> anyhow::Result<Arc<dyn SmartWallet>> {
        let secret_key = Some(config.secret_key.as_secret());
        let provider = new_alloy_evm_provider(
            &config.chain_spec.rpc_url(),
            secret_key,
            config.provider_client_timeout_seconds,
        )?;
        let bundler = new_alloy_bundler_provider(
            &config.chain_spec.bundler_url(),
            secret_key,
            config.provider_client_timeout_seconds,
        )?;

        let wallet = AccountAbstractionWallet::connect(
            config.smart_wallet_settings(),
            provider,
            bundler,
            personal,
        )
        .await?;
        Ok(Arc::new(wallet))
    }

    async fn sdk(
        &self,
        config: &ClaimConfig,
        wallet: Arc<dyn SmartWallet>,
    ) -> anyhow::Result<Arc<dyn ClaimSdk>> {
        let provider = new_alloy_evm_provider(
            &config.chain_spec.rpc_url(),
            Some(config.secret_key.as_secret()),
            config.provider_client_timeout_seconds,
        )?;
        let sdk = Sdk::connect(config.chain_spec.clone(), provider, wallet).await?;
        Ok(Arc::new(sdk))
    }
}

#[cfg(test)]
mod tests {
    use claim_signer::KeystoreSettings;
    use secrecy::SecretString;

    use super::*;
    use crate::config::tests::config;

    #[tokio::test]
    async fn test_local_personal_wallet_persists() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClaimConfig {
            keystore: KeystoreSettings {
                dir: dir.path().join(".wallet"),
                name: "personal-wallet.json".to_string(),
                password: SecretString::from("password".to_string()),
            },
            ..config()
        };

        let first = LocalWalletStack.personal_wallet(&config).await.unwrap();
        let second = LocalWalletStack.personal_wallet(&config).await.unwrap();

        assert!(config.keystore.path().exists());
        assert_eq!(first.address(), second.address());
    }

    #[tokio::test]
    async fn test_invalid_rpc_url() {
        let mut config = config();
        config.chain_spec.rpc_url = Some("not a url".to_string());

        let mut owner = claim_signer::MockPersonalWallet::new();
        owner.expect_address().never();

        let err = LocalWalletStack
            .smart_wallet(&config, Arc::new(owner))
            .await
            .err()
            .unwrap();
        assert!(err.to_string().contains("invalid rpc url"));
    }
}
