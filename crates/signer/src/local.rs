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

use alloy_primitives::{Address, Bytes};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use anyhow::Context;
use secrecy::ExposeSecret;

use crate::{KeystoreSettings, PersonalWallet, Result};

/// Personal wallet backed by an encrypted JSON keystore on disk
#[derive(Debug, Clone)]
pub struct LocalPersonalWallet {
    signer: PrivateKeySigner,
}

impl LocalPersonalWallet {
    /// Decrypt the keystore described by `settings`, creating it with a fresh random key
    /// if it does not exist yet.
    ///
    /// Key derivation is CPU bound, so it runs on the blocking pool.
    pub async fn load_or_create(settings: KeystoreSettings) -> Result<Self> {
        tokio::task::spawn_blocking(move || Self::load_or_create_blocking(&settings))
            .await
            .context("keystore task panicked")?
    }

    fn load_or_create_blocking(settings: &KeystoreSettings) -> Result<Self> {
        let path = settings.path();
        let password = settings.password.expose_secret();

        let signer = if path.exists() {
            tracing::debug!("Loading personal wallet from {}", path.display());
            PrivateKeySigner::decrypt_keystore(&path, password)?
        } else {
            tracing::info!("Creating new personal wallet at {}", path.display());
            std::fs::create_dir_all(&settings.dir)?;
            let (signer, _) = PrivateKeySigner::new_keystore(
                &settings.dir,
                &mut rand::thread_rng(),
                password,
                Some(settings.name.as_str()),
            )?;
            signer
        };

        Ok(Self { signer })
    }
}

#[async_trait::async_trait]
impl PersonalWallet for LocalPersonalWallet {
    fn address(&self) -> Address {
        self.signer.address()
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Bytes> {
        let signature = self.signer.sign_message(message).await?;
        Ok(Bytes::copy_from_slice(&signature.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::Signature;
    use secrecy::SecretString;

    use super::*;

    fn settings(dir: &std::path::Path, password: &str) -> KeystoreSettings {
        KeystoreSettings {
            dir: dir.join("wallet"),
            name: "personal-wallet.json".to_string(),
            password: SecretString::from(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_load_or_create_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();

        let created = LocalPersonalWallet::load_or_create(settings(dir.path(), "password"))
            .await
            .unwrap();
        assert!(settings(dir.path(), "password").path().exists());

        let loaded = LocalPersonalWallet::load_or_create(settings(dir.path(), "password"))
            .await
            .unwrap();
        assert_eq!(created.address(), loaded.address());
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let dir = tempfile::tempdir().unwrap();
        LocalPersonalWallet::load_or_create(settings(dir.path(), "password"))
            .await
            .unwrap();

        let err = LocalPersonalWallet::load_or_create(settings(dir.path(), "not-the-password"))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::Error::KeystoreError(_)));
    }

    #[tokio::test]
    async fn test_corrupt_keystore() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path(), "password");
        std::fs::create_dir_all(&settings.dir).unwrap();
        std::fs::write(settings.path(), "not a keystore").unwrap();

        assert!(LocalPersonalWallet::load_or_create(settings).await.is_err());
    }

    #[tokio::test]
    async fn test_sign_message_recovers_owner() {
        let dir = tempfile::tempdir().unwrap();
        let wallet = LocalPersonalWallet::load_or_create(settings(dir.path(), "password"))
            .await
            .unwrap();

        let signature = wallet.sign_message(b"user op hash").await.unwrap();
        assert_eq!(signature.len(), 65);

        let signature = Signature::try_from(signature.as_ref()).unwrap();
        let recovered = signature
            .recover_address_from_msg(b"user op hash")
            .unwrap();
        assert_eq!(recovered, wallet.address());
    }
}
