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

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// Gas fees for a user operation
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GasFees {
    /// EIP-1559 max fee per gas
    pub max_fee_per_gas: u128,
    /// EIP-1559 max priority fee per gas
    pub max_priority_fee_per_gas: u128,
}

impl GasFees {
    /// Derive fees from the current base fee and a priority fee.
    ///
    /// The max fee leaves room for `base_fee_multiplier` consecutive base fee
    /// increases before the operation becomes unincludable.
    pub fn from_base_fee(
        base_fee: u128,
        max_priority_fee_per_gas: u128,
        base_fee_multiplier: u128,
    ) -> Self {
        Self {
            max_fee_per_gas: base_fee
                .saturating_mul(base_fee_multiplier)
                .saturating_add(max_priority_fee_per_gas),
            max_priority_fee_per_gas,
        }
    }
}

/// Gas limits returned by `eth_estimateUserOperationGas`
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GasEstimate {
    /// Pre verification gas
    pub pre_verification_gas: U256,
    /// Verification gas limit
    pub verification_gas_limit: U256,
    /// Call gas limit
    pub call_gas_limit: U256,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fees_from_base_fee() {
        let fees = GasFees::from_base_fee(100, 7, 2);
        assert_eq!(fees.max_fee_per_gas, 207);
        assert_eq!(fees.max_priority_fee_per_gas, 7);
    }

    #[test]
    fn test_fees_saturate() {
        let fees = GasFees::from_base_fee(u128::MAX, 1, 2);
        assert_eq!(fees.max_fee_per_gas, u128::MAX);
    }

    #[test]
    fn test_deserialize_estimate() {
        let estimate: GasEstimate = serde_json::from_str(
            r#"{"preVerificationGas":"0xb8fc","verificationGasLimit":"0x5f5e1","callGasLimit":"0x1a0b1","paymasterVerificationGasLimit":null}"#,
        )
        .unwrap();
        assert_eq!(estimate.pre_verification_gas, U256::from(0xb8fc));
        assert_eq!(estimate.verification_gas_limit, U256::from(0x5f5e1));
        assert_eq!(estimate.call_gas_limit, U256::from(0x1a0b1));
    }
}
