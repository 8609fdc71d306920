//! Conversion between base-unit integers and display strings.

use alloy_primitives::{
    utils::{self, UnitsError},
    U256,
};
use serde::Deserialize;
use serde_json::Value;

/// Decimals of the native currency and of the token read by the dApp.
pub const ETHER_DECIMALS: u8 = 18;

/// Decode a JSON-RPC quantity (`"0x1bc16d674ec80000"`).
pub fn parse_quantity(quantity: &Value) -> Option<U256> {
    U256::deserialize(quantity).ok()
}

/// Format a base-unit amount as a whole-unit decimal string.
///
/// Trailing fractional zeros are dropped but at least one fractional digit is
/// kept: `10^18` with 18 decimals formats as `"1.0"`.
pub fn format_units(amount: U256, decimals: u8) -> Result<String, UnitsError> {
    utils::format_units(amount, decimals).map(trim_fraction)
}

pub fn format_ether(amount: U256) -> String {
    trim_fraction(utils::format_ether(amount))
}

fn trim_fraction(mut formatted: String) -> String {
    if formatted.contains('.') {
        let len = formatted.trim_end_matches('0').len();
        formatted.truncate(len);
        if formatted.ends_with('.') {
            formatted.push('0');
        }
    } else {
        formatted.push_str(".0");
    }
    formatted
}
