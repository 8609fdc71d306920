//! ERC20 metadata bindings.

use alloy_primitives::Bytes;
use alloy_sol_types::{sol, SolCall};

sol! {
    /// Minimal ERC20 metadata interface: the three view functions the token
    /// reader calls.
    interface IERC20Metadata {
        /// Get token name
        function name() external view returns (string memory);

        /// Get token symbol
        function symbol() external view returns (string memory);

        /// Get total supply
        function totalSupply() external view returns (uint256);
    }
}

/// Calldata for a call without arguments: the bare 4-byte selector.
pub fn selector_calldata<C: SolCall>() -> Bytes {
    Bytes::copy_from_slice(&C::SELECTOR)
}
