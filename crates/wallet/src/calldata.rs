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
use alloy_sol_types::SolCall;
use claim_contracts::account::{IAccount, IAccountFactory};
use claim_types::PreparedTransaction;

/// Encode `txs` as a single `executeBatch` call on the account, preserving order
pub fn encode_execute_batch(txs: &[PreparedTransaction]) -> Bytes {
    let call = IAccount::executeBatchCall {
        target: txs.iter().map(|tx| tx.to).collect(),
        value: txs.iter().map(|tx| tx.value).collect(),
        data: txs.iter().map(|tx| tx.data.clone()).collect(),
    };
    call.abi_encode().into()
}

/// Init code deploying the account for `admin` through `factory`
pub fn encode_init_code(factory: Address, admin: Address, factory_data: &Bytes) -> Bytes {
    let call = IAccountFactory::createAccountCall {
        admin,
        data: factory_data.clone(),
    };
    [factory.as_slice(), call.abi_encode().as_slice()]
        .concat()
        .into()
}
