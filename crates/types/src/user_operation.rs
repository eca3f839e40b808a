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

use alloy_primitives::{bytes, keccak256, Address, Bytes, B256, U256};
use alloy_sol_types::SolValue;
use claim_contracts::v0_6::{UserOperation, UserOperationPackedForHash};

/// Signature placeholder accepted by ECDSA-validating accounts during sponsorship
/// and gas estimation. It recovers to a valid (but unrelated) address so the
/// account's validation runs its full code path.
pub const DUMMY_SIGNATURE: Bytes = bytes!("fffffffffffffffffffffffffffffff0000000000000000000000000000000007aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1c");

/// Helpers for entry point v0.6 user operations
pub trait UserOperationExt {
    /// Hash a user operation with the given entry point and chain ID.
    ///
    /// The hash is used to uniquely identify a user operation in the entry point
    /// and is the message signed by the account owner. It does not include the
    /// signature field.
    fn hash(&self, entry_point: Address, chain_id: u64) -> B256;

    /// Factory encoded in the init code, if any
    fn factory(&self) -> Option<Address>;

    /// Paymaster encoded in `paymasterAndData`, if any
    fn paymaster(&self) -> Option<Address>;
}

impl UserOperationExt for UserOperation {
    fn hash(&self, entry_point: Address, chain_id: u64) -> B256 {
        let packed = UserOperationPackedForHash {
            sender: self.sender,
            nonce: self.nonce,
            hashInitCode: keccak256(&self.initCode),
            hashCallData: keccak256(&self.callData),
            callGasLimit: self.callGasLimit,
            verificationGasLimit: self.verificationGasLimit,
            preVerificationGas: self.preVerificationGas,
            maxFeePerGas: self.maxFeePerGas,
            maxPriorityFeePerGas: self.maxPriorityFeePerGas,
            hashPaymasterAndData: keccak256(&self.paymasterAndData),
        };

        keccak256(
            (
                keccak256(packed.abi_encode()),
                entry_point,
                U256::from(chain_id),
            )
                .abi_encode(),
        )
    }

    fn factory(&self) -> Option<Address> {
        get_address_from_field(&self.initCode)
    }

    fn paymaster(&self) -> Option<Address> {
        get_address_from_field(&self.paymasterAndData)
    }
}

fn get_address_from_field(data: &Bytes) -> Option<Address> {
    if data.len() < 20 {
        None
    } else {
        Some(Address::from_slice(&data[..20]))
    }
}
