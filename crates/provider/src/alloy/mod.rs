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

use alloy_provider::{Provider as AlloyProvider, ProviderBuilder};
use alloy_rpc_client::ClientBuilder;
use alloy_transport::layers::RetryBackoffService;
use alloy_transport_http::Http;
use anyhow::Context;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::{BundlerProvider, EvmProvider};

pub(crate) mod bundler;
pub(crate) mod evm;

/// Header carrying the API secret key on every request to thirdweb endpoints
const SECRET_KEY_HEADER: &str = "x-secret-key";

/// Create a new alloy evm provider from a given RPC URL
pub fn new_alloy_evm_provider(
    rpc_url: &str,
    secret_key: Option<&SecretString>,
    provider_client_timeout_seconds: u64,
) -> anyhow::Result<impl EvmProvider + Clone> {
    let provider = new_alloy_provider(rpc_url, secret_key, provider_client_timeout_seconds)?;
    Ok(evm::AlloyEvmProvider::<_, RetryBackoffService<Http<Client>>>::new(provider))
}

/// Create a new alloy bundler provider from a given bundler URL
pub fn new_alloy_bundler_provider(
    bundler_url: &str,
    secret_key: Option<&SecretString>,
    provider_client_timeout_seconds: u64,
) -> anyhow::Result<impl BundlerProvider + Clone> {
    let provider = new_alloy_provider(bundler_url, secret_key, provider_client_timeout_seconds)?;
    Ok(bundler::AlloyBundlerProvider::<_, RetryBackoffService<Http<Client>>>::new(provider))
}

/// Create a new alloy provider from a given RPC URL
///
/// When a secret key is given it is attached to every request, marked as sensitive
/// so it never shows up in debug output.
pub fn new_alloy_provider(
    rpc_url: &str,
    secret_key: Option<&SecretString>,
    provider_client_timeout_seconds: u64,
) -> anyhow::Result<impl AlloyProvider<RetryBackoffService<Http<Client>>> + Clone> {
    let url = Url::parse(rpc_url).context("invalid rpc url")?;

    let mut headers = HeaderMap::new();
    if let Some(secret_key) = secret_key {
        let mut value = HeaderValue::from_str(secret_key.expose_secret())
            .context("secret key is not a valid header value")?;
        value.set_sensitive(true);
        headers.insert(SECRET_KEY_HEADER, value);
    }
    let http_client = Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(provider_client_timeout_seconds))
        .build()
        .context("failed to build http client")?;

    let transport = Http::with_client(http_client, url);
    let is_local = transport.guess_local();
    // rate limited responses are retried with backoff, compute units are not tracked
    let retry_layer = alloy_transport::layers::RetryBackoffLayer::new(10, 500, 1_000_000);
    let client = ClientBuilder::default()
        .layer(retry_layer)
        .transport(transport, is_local);
    let provider = ProviderBuilder::new().on_client(client);
    Ok(provider)
}
