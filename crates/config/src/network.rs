//! Network labels for the chain ids a wallet may report.
//!
//! Wallets report the chain id as a hex quantity (`"0x1"`). Known chains get a
//! human-readable label; anything else is rendered by its decimal id.

use alloy_primitives::U64;
use serde_json::Value;

/// A network with a fixed display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownNetwork {
    /// Chain ID
    pub chain_id: u64,
    /// Display label
    pub label: &'static str,
}

impl KnownNetwork {
    const fn new(chain_id: u64, label: &'static str) -> Self {
        Self { chain_id, label }
    }

    /// Find the known network for a chain id.
    pub fn lookup(chain_id: u64) -> Option<Self> {
        KNOWN_NETWORKS
            .iter()
            .copied()
            .find(|network| network.chain_id == chain_id)
    }
}

/// Networks with a fixed label.
pub const KNOWN_NETWORKS: [KnownNetwork; 8] = [
    KnownNetwork::new(0x1, "Ethereum Mainnet"),
    KnownNetwork::new(0x3, "Ropsten Testnet"),
    KnownNetwork::new(0x4, "Rinkeby Testnet"),
    KnownNetwork::new(0x5, "Goerli Testnet"),
    KnownNetwork::new(0x2a, "Kovan Testnet"),
    KnownNetwork::new(0x539, "Localhost 8545"),
    KnownNetwork::new(0x89, "Polygon Mainnet"),
    KnownNetwork::new(0x13881, "Mumbai Testnet"),
];

/// Parse a hex chain id quantity (`"0x2a"`) into its integer value.
pub fn parse_chain_id(chain_id: &str) -> Option<u64> {
    serde_json::from_value::<U64>(Value::from(chain_id))
        .ok()
        .map(|id| id.to())
}

/// Label a chain id for display.
///
/// Unknown chains render as `"Chain ID: <decimal>"`. A chain id that is not a
/// hex quantity at all is shown as reported.
pub fn network_label(chain_id: &str) -> String {
    match parse_chain_id(chain_id) {
        Some(id) => KnownNetwork::lookup(id).map_or_else(
            || format!("Chain ID: {}", id),
            |network| network.label.to_string(),
        ),
        None => format!("Chain ID: {}", chain_id),
    }
}
