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

use std::{fmt, sync::Arc};

use alloy_primitives::{utils::format_ether, Address, U256};
use anyhow::{bail, Context};
use claim_provider::EvmProvider;
use claim_types::{chain::ChainSpec, PreparedTransaction};
use claim_wallet::SmartWallet;
#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use crate::{EditionDrop, TokenDrop};

/// Native currency balance of the smart wallet
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Balance {
    /// Balance in wei
    pub value: U256,
    /// Balance in ether, e.g. "0.500000000000000000"
    pub display_value: String,
    /// Native currency symbol
    pub symbol: String,
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.display_value, self.symbol)
    }
}

/// A contract known to be deployed on the SDK's chain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContractHandle {
    /// Contract address
    pub address: Address,
}

/// A claim that can be turned into a transaction for the smart wallet
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait::async_trait]
pub trait PrepareClaim: Send + Sync {
    /// Build the claim transaction, minting to `receiver`
    async fn prepare(&self, receiver: Address) -> anyhow::Result<PreparedTransaction>;
}

/// Client bound to a smart wallet
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait::async_trait]
pub trait ClaimSdk: Send + Sync {
    /// Address of the bound smart wallet
    fn wallet_address(&self) -> Address;

    /// Native balance of the bound smart wallet
    async fn balance(&self) -> anyhow::Result<Balance>;

    /// Resolve a contract handle, failing if nothing is deployed at `address`
    async fn get_contract(&self, address: Address) -> anyhow::Result<ContractHandle>;

    /// Claim `quantity` whole tokens from an ERC-20 drop
    fn erc20(&self, contract: &ContractHandle, quantity: U256) -> Box<dyn PrepareClaim>;

    /// Claim `quantity` of `token_id` from an ERC-1155 drop
    fn erc1155(
        &self,
        contract: &ContractHandle,
        token_id: U256,
        quantity: U256,
    ) -> Box<dyn PrepareClaim>;
}

/// [`ClaimSdk`] reading chain state through an [`EvmProvider`]
pub struct Sdk<P> {
    chain_spec: ChainSpec,
    provider: Arc<P>,
    wallet: Arc<dyn SmartWallet>,
}

impl<P> Sdk<P>
where
    P: EvmProvider + 'static,
{
    /// Bind `wallet` to the chain behind `provider`
    pub async fn connect(
        chain_spec: ChainSpec,
        provider: P,
        wallet: Arc<dyn SmartWallet>,
    ) -> anyhow::Result<Self> {
        let chain_id = provider
            .get_chain_id()
            .await
            .context("should get chain id")?;
        if chain_id != chain_spec.id {
            bail!(
                "provider is connected to chain {chain_id}, expected {} ({})",
                chain_spec.id,
                chain_spec.name
            );
        }

        Ok(Self {
            chain_spec,
            provider: Arc::new(provider),
            wallet,
        })
    }
}

#[async_trait::async_trait]
impl<P> ClaimSdk for Sdk<P>
where
    P: EvmProvider + 'static,
{
    fn wallet_address(&self) -> Address {
        self.wallet.address()
    }

    async fn balance(&self) -> anyhow::Result<Balance> {
        let value = self
            .provider
            .get_balance(self.wallet.address())
            .await
            .context("should get wallet balance")?;
        Ok(Balance {
            value,
            display_value: format_ether(value),
            symbol: self.chain_spec.native_currency_symbol.clone(),
        })
    }

    async fn get_contract(&self, address: Address) -> anyhow::Result<ContractHandle> {
        let code = self
            .provider
            .get_code(address)
            .await
            .with_context(|| format!("should get code at {address:?}"))?;
        if code.is_empty() {
            bail!(
                "no contract deployed at {address:?} on {}",
                self.chain_spec.name
            );
        }
        Ok(ContractHandle { address })
    }

    fn erc20(&self, contract: &ContractHandle, quantity: U256) -> Box<dyn PrepareClaim> {
        Box::new(TokenDrop::new(
            Arc::clone(&self.provider),
            contract.address,
            quantity,
        ))
    }

    fn erc1155(
        &self,
        contract: &ContractHandle,
        token_id: U256,
        quantity: U256,
    ) -> Box<dyn PrepareClaim> {
        Box::new(EditionDrop::new(
            Arc::clone(&self.provider),
            contract.address,
            token_id,
            quantity,
        ))
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::bytes;
    use claim_provider::MockEvmProvider;
    use claim_wallet::MockSmartWallet;

    use super::*;

    const SMART: Address = Address::repeat_byte(0xbb);

    fn wallet() -> Arc<dyn SmartWallet> {
        let mut wallet = MockSmartWallet::new();
        wallet.expect_address().return_const(SMART);
        Arc::new(wallet)
    }

    fn chain_spec() -> ChainSpec {
        ChainSpec {
            id: 5,
            name: "Goerli".to_string(),
            native_currency_symbol: "GOR".to_string(),
            ..Default::default()
        }
    }

    fn provider() -> MockEvmProvider {
        let mut provider = MockEvmProvider::new();
        provider.expect_get_chain_id().returning(|| Ok(5));
        provider
    }

    #[tokio::test]
    async fn test_connect_wrong_chain() {
        let mut provider = MockEvmProvider::new();
        provider.expect_get_chain_id().returning(|| Ok(1));

        let err = Sdk::connect(chain_spec(), provider, wallet())
            .await
            .err()
            .unwrap();
        assert!(err.to_string().contains("expected 5 (Goerli)"));
    }

    #[tokio::test]
    async fn test_balance() {
        let mut provider = provider();
        provider
            .expect_get_balance()
            .withf(|address| *address == SMART)
            .returning(|_| Ok(U256::from(500_000_000_000_000_000_u64)));

        let sdk = Sdk::connect(chain_spec(), provider, wallet()).await.unwrap();
        let balance = sdk.balance().await.unwrap();

        assert_eq!(sdk.wallet_address(), SMART);
        assert_eq!(balance.display_value, "0.500000000000000000");
        assert_eq!(balance.to_string(), "0.500000000000000000 GOR");
    }

    #[tokio::test]
    async fn test_get_contract() {
        let deployed = Address::repeat_byte(0x20);
        let mut provider = provider();
        provider.expect_get_code().returning(move |address| {
            Ok(if address == deployed {
                bytes!("6080604052")
            } else {
                Default::default()
            })
        });

        let sdk = Sdk::connect(chain_spec(), provider, wallet()).await.unwrap();
        assert_eq!(
            sdk.get_contract(deployed).await.unwrap(),
            ContractHandle { address: deployed }
        );

        let err = sdk
            .get_contract(Address::repeat_byte(0x99))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("no contract deployed at"));
    }
}
