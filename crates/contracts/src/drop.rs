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

//! Drop contracts (thirdweb `DropERC20` / `DropERC1155`)

use alloy_primitives::{address, Address};
use alloy_sol_macro::sol;

/// Currency sentinel used by drop contracts for the chain's native token
pub const NATIVE_TOKEN_ADDRESS: Address = address!("EeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

sol! {
    #[allow(missing_docs)]
    #[derive(Default, Debug, PartialEq, Eq)]
    struct AllowlistProof {
        bytes32[] proof;
        uint256 quantityLimitPerWallet;
        uint256 pricePerToken;
        address currency;
    }

    #[allow(missing_docs)]
    #[derive(Default, Debug, PartialEq, Eq)]
    struct ClaimCondition {
        uint256 startTimestamp;
        uint256 maxClaimableSupply;
        uint256 supplyClaimed;
        uint256 quantityLimitPerWallet;
        bytes32 merkleRoot;
        uint256 pricePerToken;
        address currency;
        string metadata;
    }

    #[allow(missing_docs)]
    interface IDropERC20 {
        function decimals() external view returns (uint8);

        function getActiveClaimConditionId() external view returns (uint256);

        function getClaimConditionById(uint256 conditionId)
            external
            view
            returns (ClaimCondition memory condition);

        function claim(
            address receiver,
            uint256 quantity,
            address currency,
            uint256 pricePerToken,
            AllowlistProof calldata allowlistProof,
            bytes memory data
        ) external payable;
    }

    #[allow(missing_docs)]
    interface IDropERC1155 {
        function getActiveClaimConditionId(uint256 tokenId) external view returns (uint256);

        function getClaimConditionById(uint256 tokenId, uint256 conditionId)
            external
            view
            returns (ClaimCondition memory condition);

        function claim(
            address receiver,
            uint256 tokenId,
            uint256 quantity,
            address currency,
            uint256 pricePerToken,
            AllowlistProof calldata allowlistProof,
            bytes memory data
        ) external payable;
    }
}
