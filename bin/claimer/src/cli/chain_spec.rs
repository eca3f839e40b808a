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

use anyhow::{bail, Context};
use claim_types::chain::ChainSpec;
use config::{Config, Environment, File, FileFormat};
use paste::paste;

/// Resolve the chain spec from the network flag and a chain spec file
pub fn resolve_chain_spec(network: &str, file: &Option<String>) -> anyhow::Result<ChainSpec> {
    // construct the config from the hierarchy of
    // - ENV
    // - file
    // - network flag
    // - defaults

    let default =
        serde_json::to_string(&ChainSpec::default()).context("should serialize to string")?;
    let mut config_builder = Config::builder()
        .add_source(File::from_str(default.as_str(), FileFormat::Json))
        .add_source(File::from_str(
            get_hardcoded_chain_spec(network.to_lowercase().as_str())?,
            FileFormat::Toml,
        ));
    if let Some(file) = &file {
        config_builder = config_builder.add_source(File::with_name(file.as_str()));
    }
    let c = config_builder
        .add_source(Environment::with_prefix("CHAIN"))
        .build()
        .context("should build config")?;

    match c.get::<u64>("id") {
        Ok(0) => bail!("chain id must be non-zero"),
        Ok(_) => {}
        Err(_) => bail!("chain id must be defined"),
    }

    c.try_deserialize().context("should deserialize config")
}

macro_rules! define_hardcoded_chain_specs {
    ($($network:ident),+) => {
        paste! {
            $(
                const [< $network:upper _SPEC >]: &str = include_str!(concat!("../../chain_specs/", stringify!($network), ".toml"));
            )+

            fn get_hardcoded_chain_spec(network: &str) -> anyhow::Result<&'static str> {
                match network {
                    $(
                        stringify!($network) => Ok([< $network:upper _SPEC >]),
                    )+
                    _ => bail!("unknown hardcoded network: {}", network),
                }
            }

            pub const HARDCODED_CHAIN_SPECS: &[&'static str] = &[$(stringify!($network),)+];
        }
    };
}

define_hardcoded_chain_specs!(goerli, sepolia, base_goerli, base_sepolia);

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use claim_types::chain::ENTRY_POINT_ADDRESS_V0_6;

    use super::*;

    #[test]
    fn test_goerli_preset() {
        let cs = resolve_chain_spec("goerli", &None).unwrap();
        assert_eq!(cs.id, 5);
        assert_eq!(cs.name, "Goerli");
        assert_eq!(cs.entry_point_address_v0_6, ENTRY_POINT_ADDRESS_V0_6);
        assert_eq!(
            cs.factory_address,
            Some(address!("0EDfbA441f630E0D38F8d92C486EF0e9119E100a"))
        );
        assert_eq!(
            cs.token_contract_address,
            Some(address!("c54414e0E2DBE7E9565B75EFdC495c7eD12D3823"))
        );
        assert_eq!(
            cs.edition_contract_address,
            Some(address!("8096C71f400984C3C1B7F3a79Ab0C0EaC417b91c"))
        );
        assert_eq!(cs.rpc_url(), "https://5.rpc.thirdweb.com");
    }

    #[test]
    fn test_all_presets_parse() {
        for network in HARDCODED_CHAIN_SPECS {
            let cs = resolve_chain_spec(network, &None).unwrap();
            assert_ne!(cs.id, 0, "{network}");
            assert_eq!(cs.base_fee_multiplier, 2, "{network}");
        }
    }

    #[test]
    fn test_base_sepolia_has_no_contracts() {
        let cs = resolve_chain_spec("BASE_SEPOLIA", &None).unwrap();
        assert_eq!(cs.id, 84532);
        assert_eq!(cs.min_max_priority_fee_per_gas, 100_000);
        assert!(cs.factory_address.is_none());
        assert!(cs.token_contract_address.is_none());
    }

    #[test]
    fn test_unknown_network() {
        let err = resolve_chain_spec("mainnet", &None).unwrap_err();
        assert_eq!(err.to_string(), "unknown hardcoded network: mainnet");
    }
}
