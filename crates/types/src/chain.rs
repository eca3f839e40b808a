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

//! Chain specification for Claimer

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

/// Canonical entry point v0.6 deployment, identical on every supported chain
pub const ENTRY_POINT_ADDRESS_V0_6: Address = address!("5FF137D4b0FDCD49DcA30c7CF57E578a026d2789");

/// Chain specification for Claimer
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ChainSpec {
    /*
     * Chain constants
     */
    /// name for logging purposes, e.g. "Goerli", no logic is performed on this
    pub name: String,
    /// short network identifier, e.g. "goerli"
    pub slug: String,
    /// chain id
    pub id: u64,
    /// symbol of the native currency, used when displaying balances
    pub native_currency_symbol: String,
    /// entry point address for v0_6
    pub entry_point_address_v0_6: Address,

    /*
     * Endpoints
     */
    /// JSON-RPC endpoint for chain reads, defaults to the thirdweb RPC edge
    pub rpc_url: Option<String>,
    /// ERC-4337 bundler and paymaster endpoint, defaults to the thirdweb bundler
    pub bundler_url: Option<String>,

    /*
     * Deployments
     */
    /// smart account factory deployed on this chain
    pub factory_address: Option<Address>,
    /// ERC-20 drop contract to claim from
    pub token_contract_address: Option<Address>,
    /// ERC-1155 drop contract to claim from
    pub edition_contract_address: Option<Address>,

    /*
     * Fee estimation
     */
    /// Multiplier applied to the latest base fee when computing the max fee per gas
    pub base_fee_multiplier: u64,
    /// Minimum max priority fee per gas for the network
    pub min_max_priority_fee_per_gas: u64,
}

impl ChainSpec {
    /// JSON-RPC endpoint for this chain
    pub fn rpc_url(&self) -> String {
        self.rpc_url
            .clone()
            .unwrap_or_else(|| format!("https://{}.rpc.thirdweb.com", self.id))
    }

    /// Bundler endpoint for this chain, also serves the paymaster methods
    pub fn bundler_url(&self) -> String {
        self.bundler_url
            .clone()
            .unwrap_or_else(|| format!("https://{}.bundler.thirdweb.com", self.id))
    }
}

impl Default for ChainSpec {
    fn default() -> Self {
        Self {
            name: "Unknown".to_string(),
            slug: "unknown".to_string(),
            id: 0,
            native_currency_symbol: "ETH".to_string(),
            entry_point_address_v0_6: ENTRY_POINT_ADDRESS_V0_6,
            rpc_url: None,
            bundler_url: None,
            factory_address: None,
            token_contract_address: None,
            edition_contract_address: None,
            base_fee_multiplier: 2,
            min_max_priority_fee_per_gas: 0,
        }
    }
}
