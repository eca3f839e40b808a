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

//! Smart account and account factory interfaces (thirdweb `AccountFactory` / `Account`)

use alloy_sol_macro::sol;

sol! {
    #[allow(missing_docs)]
    interface IAccountFactory {
        function getAddress(address adminSigner, bytes calldata data) external view returns (address);

        function createAccount(address admin, bytes calldata data) external returns (address);
    }

    #[allow(missing_docs)]
    interface IAccount {
        function execute(address target, uint256 value, bytes calldata data) external;

        function executeBatch(
            address[] calldata target,
            uint256[] calldata value,
            bytes[] calldata data
        ) external;
    }
}
