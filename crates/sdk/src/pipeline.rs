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

use claim_signer::PersonalWallet;
use claim_types::BatchReceipt;
use claim_wallet::SmartWallet;

use crate::{perform_claims, ClaimConfig, ClaimError, ClaimSdk, SecretKey, WalletStack};

/// How a claim run ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The claims were included on chain
    Submitted(BatchReceipt),
    /// No drop contract configured, nothing sent
    NoOperations,
}

/// Load or create the personal wallet
pub async fn initialize_personal_wallet(
    stack: &dyn WalletStack,
    config: &ClaimConfig,
) -> Result<Arc<dyn PersonalWallet>, ClaimError> {
    stack
        .personal_wallet(config)
        .await
        .map_err(ClaimError::PersonalWalletInitFailed)
}

/// Bind the personal wallet to the account factory
pub async fn setup_smart_wallet(
    stack: &dyn WalletStack,
    config: &ClaimConfig,
    personal: Arc<dyn PersonalWallet>,
) -> Result<Arc<dyn SmartWallet>, ClaimError> {
    stack
        .smart_wallet(config, personal)
        .await
        .map_err(ClaimError::SmartWalletSetupFailed)
}

/// Build the SDK client for the smart wallet
pub async fn initialize_sdk(
    stack: &dyn WalletStack,
    config: &ClaimConfig,
    wallet: Arc<dyn SmartWallet>,
) -> Result<Arc<dyn ClaimSdk>, ClaimError> {
    stack
        .sdk(config, wallet)
        .await
        .map_err(ClaimError::SdkInitFailed)
}

/// Validate the secret key, then run the pipeline with the config built from it
///
/// Nothing on `stack` is touched when the key is missing.
pub async fn run<F>(
    stack: &dyn WalletStack,
    secret_key: Option<String>,
    build_config: F,
) -> Result<ClaimOutcome, ClaimError>
where
    F: FnOnce(SecretKey) -> ClaimConfig,
{
    let secret_key = SecretKey::new(secret_key)?;
    run_pipeline(stack, &build_config(secret_key)).await
}

/// Set up the wallets and SDK, then claim from the configured drops in one batch
pub async fn run_pipeline(
    stack: &dyn WalletStack,
    config: &ClaimConfig,
) -> Result<ClaimOutcome, ClaimError> {
    tracing::info!(
        "Network: {} (chain id {})",
        config.chain_spec.name,
        config.chain_spec.id
    );
    tracing::info!("Account factory: {:?}", config.factory_address);

    let personal = initialize_personal_wallet(stack, config).await?;
    tracing::info!("Personal wallet address: {:?}", personal.address());

    let smart_wallet = setup_smart_wallet(stack, config, personal).await?;
    let sdk = initialize_sdk(stack, config, Arc::clone(&smart_wallet)).await?;
    tracing::info!("Smart wallet address: {:?}", sdk.wallet_address());
    let balance = sdk.balance().await.map_err(ClaimError::SdkInitFailed)?;
    tracing::info!("Smart wallet balance: {balance}");

    let token = match config.token_contract {
        Some(address) => {
            let contract = sdk
                .get_contract(address)
                .await
                .map_err(ClaimError::SdkInitFailed)?;
            Some(sdk.erc20(&contract, config.claim.token_quantity))
        }
        None => None,
    };
    let edition = match config.edition_contract {
        Some(address) => {
            let contract = sdk
                .get_contract(address)
                .await
                .map_err(ClaimError::SdkInitFailed)?;
            Some(sdk.erc1155(
                &contract,
                config.claim.edition_token_id,
                config.claim.edition_quantity,
            ))
        }
        None => None,
    };

    let receipt =
        perform_claims(smart_wallet.as_ref(), token.as_deref(), edition.as_deref()).await?;
    Ok(match receipt {
        Some(receipt) => ClaimOutcome::Submitted(receipt),
        None => ClaimOutcome::NoOperations,
    })
}

/// Final console line for a claim run
pub fn report(result: &Result<ClaimOutcome, ClaimError>) -> String {
    match result {
        Ok(ClaimOutcome::Submitted(receipt)) => format!(
            "Claimed {} drop(s) in one user operation, tx hash: {:?}",
            receipt.calls, receipt.transaction_hash
        ),
        Ok(ClaimOutcome::NoOperations) => "no operations to perform".to_string(),
        Err(err) => err.to_string(),
    }
}
