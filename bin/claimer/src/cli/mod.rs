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

use std::{convert::Infallible, path::PathBuf, time::Duration};

use alloy_primitives::{Address, Bytes, U256};
use anyhow::Context;
use clap::{builder::PossibleValuesParser, Args, Parser};
use claim_sdk::{ClaimConfig, ClaimParams, LocalWalletStack, SecretKey, SECRET_KEY_ENV};
use claim_signer::KeystoreSettings;
use secrecy::SecretString;

mod chain_spec;
mod tracing;

/// Main entry point for the CLI
///
/// Parses the CLI arguments, checks the secret key, resolves the chain spec and
/// runs one claim. A missing secret key or invalid options are returned as
/// errors, claim failures are only reported.
pub async fn run() -> anyhow::Result<()> {
    let opt = Cli::parse();
    let config = claim_config(&opt, std::env::var(SECRET_KEY_ENV).ok())?;
    let guard = tracing::configure_logging(&opt.logs)?;
    tracing::debug!("Parsed CLI options: {:#?}", opt);
    tracing::debug!("Chain spec: {:#?}", config.chain_spec);

    let result = claim_sdk::run_pipeline(&LocalWalletStack, &config).await;
    if let Err(err) = &result {
        tracing::debug!("Claim failed at stage {:?}", err.kind());
    }

    // flush pending log lines so the report is the last line on the console
    drop(guard);
    println!("{}", claim_sdk::report(&result));

    Ok(())
}

/// CLI options
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[clap(flatten)]
    network: NetworkArgs,

    #[clap(flatten)]
    wallet: WalletArgs,

    #[clap(flatten)]
    claim: ClaimArgs,

    #[clap(flatten)]
    logs: LogsArgs,
}

/// Network options
#[derive(Debug, Args)]
#[command(next_help_heading = "NETWORK")]
pub struct NetworkArgs {
    /// Network flag
    #[arg(
        long = "network",
        name = "network",
        env = "NETWORK",
        default_value = "goerli",
        value_parser = PossibleValuesParser::new(chain_spec::HARDCODED_CHAIN_SPECS)
    )]
    network: String,

    /// Chain spec file path
    #[arg(long = "chain_spec", name = "chain_spec", env = "CHAIN_SPEC")]
    chain_spec: Option<String>,

    /// ETH Node HTTP URL to connect to
    ///
    /// Defaults to the thirdweb RPC edge for the chain
    #[arg(long = "node_http", name = "node_http", env = "NODE_HTTP")]
    node_http: Option<String>,

    /// Bundler and paymaster HTTP URL to connect to
    ///
    /// Defaults to the thirdweb bundler for the chain
    #[arg(long = "bundler_http", name = "bundler_http", env = "BUNDLER_HTTP")]
    bundler_http: Option<String>,

    /// Timeout for requests to the node and the bundler
    #[arg(
        long = "provider_client_timeout_seconds",
        name = "provider_client_timeout_seconds",
        env = "PROVIDER_CLIENT_TIMEOUT_SECONDS",
        default_value = "10"
    )]
    provider_client_timeout_seconds: u64,
}

/// Wallet options
#[derive(Debug, Args)]
#[command(next_help_heading = "WALLET")]
pub struct WalletArgs {
    /// Smart account factory, overrides the network's factory
    #[arg(long = "factory", name = "factory", env = "FACTORY")]
    factory: Option<Address>,

    /// Directory holding the personal wallet keystore
    #[arg(
        long = "keystore.dir",
        name = "keystore.dir",
        env = "KEYSTORE_DIR",
        default_value = ".wallet"
    )]
    keystore_dir: PathBuf,

    /// Personal wallet keystore file name
    #[arg(
        long = "keystore.name",
        name = "keystore.name",
        env = "KEYSTORE_NAME",
        default_value = "personal-wallet.json"
    )]
    keystore_name: String,

    /// Password encrypting the personal wallet keystore
    #[arg(
        long = "keystore.password",
        name = "keystore.password",
        env = "KEYSTORE_PASSWORD",
        default_value = "password",
        hide_env_values = true,
        hide_default_value = true,
        value_parser = parse_secret
    )]
    keystore_password: SecretString,

    /// Pay for gas from the smart account instead of the paymaster
    #[arg(long = "no_gasless", name = "no_gasless", env = "NO_GASLESS")]
    no_gasless: bool,
}

/// Claim options
#[derive(Debug, Args)]
#[command(next_help_heading = "CLAIM")]
pub struct ClaimArgs {
    /// ERC-20 drop to claim from, overrides the network's token contract
    #[arg(long = "token", name = "token", env = "TOKEN_CONTRACT")]
    token: Option<Address>,

    /// Skip the ERC-20 claim
    #[arg(long = "no_token", name = "no_token", env = "NO_TOKEN")]
    no_token: bool,

    /// Whole ERC-20 tokens to claim
    #[arg(
        long = "token.quantity",
        name = "token.quantity",
        env = "TOKEN_QUANTITY",
        default_value = "1"
    )]
    token_quantity: U256,

    /// ERC-1155 drop to claim from, overrides the network's edition contract
    #[arg(long = "edition", name = "edition", env = "EDITION_CONTRACT")]
    edition: Option<Address>,

    /// Skip the ERC-1155 claim
    #[arg(long = "no_edition", name = "no_edition", env = "NO_EDITION")]
    no_edition: bool,

    /// ERC-1155 token id to claim
    #[arg(
        long = "edition.token_id",
        name = "edition.token_id",
        env = "EDITION_TOKEN_ID",
        default_value = "0"
    )]
    edition_token_id: U256,

    /// ERC-1155 tokens to claim
    #[arg(
        long = "edition.quantity",
        name = "edition.quantity",
        env = "EDITION_QUANTITY",
        default_value = "1"
    )]
    edition_quantity: U256,

    /// Delay between user operation receipt polls
    #[arg(
        long = "receipt_poll_interval_millis",
        name = "receipt_poll_interval_millis",
        env = "RECEIPT_POLL_INTERVAL_MILLIS",
        default_value = "2000"
    )]
    receipt_poll_interval_millis: u64,

    /// Receipt polls before giving up on a sent user operation
    #[arg(
        long = "receipt_poll_max_attempts",
        name = "receipt_poll_max_attempts",
        env = "RECEIPT_POLL_MAX_ATTEMPTS",
        default_value = "60"
    )]
    receipt_poll_max_attempts: u64,
}

/// CLI options for logging
#[derive(Debug, Args)]
#[command(next_help_heading = "Logging")]
pub struct LogsArgs {
    /// Log file
    ///
    /// If not provided, logs will be written to stdout
    #[arg(
        long = "log.file",
        name = "log.file",
        env = "LOG_FILE",
        default_value = None
    )]
    file: Option<String>,

    /// Log JSON
    ///
    /// If set, logs will be written in JSON format
    #[arg(
        long = "log.json",
        name = "log.json",
        env = "LOG_JSON",
        required = false,
        num_args = 0
    )]
    json: bool,
}

fn parse_secret(value: &str) -> Result<SecretString, Infallible> {
    Ok(SecretString::from(value.to_string()))
}

/// Build the claim config, the secret key is checked before anything else
fn claim_config(opt: &Cli, secret_key: Option<String>) -> anyhow::Result<ClaimConfig> {
    let secret_key = SecretKey::new(secret_key)?;

    let mut chain_spec =
        chain_spec::resolve_chain_spec(&opt.network.network, &opt.network.chain_spec)?;
    if let Some(node_http) = &opt.network.node_http {
        chain_spec.rpc_url = Some(node_http.clone());
    }
    if let Some(bundler_http) = &opt.network.bundler_http {
        chain_spec.bundler_url = Some(bundler_http.clone());
    }

    let factory_address = opt
        .wallet
        .factory
        .or(chain_spec.factory_address)
        .with_context(|| {
            format!(
                "no account factory known for {}, set one with --factory",
                chain_spec.name
            )
        })?;
    let token_contract = if opt.claim.no_token {
        None
    } else {
        opt.claim.token.or(chain_spec.token_contract_address)
    };
    let edition_contract = if opt.claim.no_edition {
        None
    } else {
        opt.claim.edition.or(chain_spec.edition_contract_address)
    };

    Ok(ClaimConfig {
        secret_key,
        factory_address,
        factory_data: Bytes::new(),
        gasless: !opt.wallet.no_gasless,
        token_contract,
        edition_contract,
        claim: ClaimParams {
            token_quantity: opt.claim.token_quantity,
            edition_token_id: opt.claim.edition_token_id,
            edition_quantity: opt.claim.edition_quantity,
        },
        keystore: KeystoreSettings {
            dir: opt.wallet.keystore_dir.clone(),
            name: opt.wallet.keystore_name.clone(),
            password: opt.wallet.keystore_password.clone(),
        },
        provider_client_timeout_seconds: opt.network.provider_client_timeout_seconds,
        receipt_poll_interval: Duration::from_millis(opt.claim.receipt_poll_interval_millis),
        receipt_poll_max_attempts: opt.claim.receipt_poll_max_attempts,
        chain_spec,
    })
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use claim_sdk::{ClaimError, ErrorKind};
    use secrecy::ExposeSecret;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from([&["claimer"][..], args].concat()).unwrap()
    }

    fn settings(args: &[&str]) -> anyhow::Result<ClaimConfig> {
        claim_config(&cli(args), Some("sk".to_string()))
    }

    #[test]
    fn test_defaults() {
        let settings = settings(&[]).unwrap();

        assert_eq!(settings.chain_spec.id, 5);
        assert!(settings.gasless);
        assert_eq!(
            settings.factory_address,
            address!("0EDfbA441f630E0D38F8d92C486EF0e9119E100a")
        );
        assert!(settings.token_contract.is_some());
        assert!(settings.edition_contract.is_some());
        assert_eq!(settings.claim, ClaimParams::default());
        assert_eq!(settings.keystore.path(), PathBuf::from(".wallet/personal-wallet.json"));
        assert_eq!(settings.keystore.password.expose_secret(), "password");
        assert_eq!(settings.receipt_poll_interval, Duration::from_secs(2));
    }

    #[test]
    fn test_overrides() {
        let settings = settings(&[
            "--network",
            "base_sepolia",
            "--factory",
            "0x1111111111111111111111111111111111111111",
            "--edition",
            "0x2222222222222222222222222222222222222222",
            "--edition.token_id",
            "4",
            "--node_http",
            "http://localhost:8545",
            "--no_gasless",
        ])
        .unwrap();

        assert_eq!(settings.chain_spec.id, 84532);
        assert_eq!(settings.chain_spec.rpc_url(), "http://localhost:8545");
        assert_eq!(settings.chain_spec.bundler_url(), "https://84532.bundler.thirdweb.com");
        assert!(!settings.gasless);
        assert!(settings.token_contract.is_none());
        assert_eq!(
            settings.edition_contract,
            Some(address!("2222222222222222222222222222222222222222"))
        );
        assert_eq!(settings.claim.edition_token_id, U256::from(4));
    }

    #[test]
    fn test_skip_claims() {
        let settings = settings(&["--no_token", "--no_edition"]).unwrap();
        assert!(settings.token_contract.is_none());
        assert!(settings.edition_contract.is_none());
    }

    #[test]
    fn test_factory_required() {
        let err = settings(&["--network", "sepolia"]).unwrap_err();
        assert!(err.to_string().contains("--factory"));
    }

    #[test]
    fn test_secret_key_in_config() {
        let config = settings(&[]).unwrap();
        assert_eq!(config.secret_key.as_secret().expose_secret(), "sk");
        assert!(config.factory_data.is_empty());
    }

    #[test]
    fn test_missing_secret_key_checked_first() {
        for secret_key in [None, Some(" ".to_string())] {
            // sepolia has no preset factory, the key error must still win
            let err = claim_config(&cli(&["--network", "sepolia"]), secret_key).unwrap_err();
            let err = err.downcast_ref::<ClaimError>().unwrap();
            assert_eq!(err.kind(), ErrorKind::ConfigMissing);
            assert_eq!(
                err.to_string(),
                "No API Key found. Get one from https://thirdweb.com/dashboard"
            );
        }
    }
}
