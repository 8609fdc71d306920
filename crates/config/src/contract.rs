//! Deployed contract descriptor.
//!
//! The deploy step writes `contract-address.json`:
//!
//! ```json
//! { "address": "0x…", "name": "Test Token", "symbol": "TEST", "totalSupply": "1000000.0" }
//! ```
//!
//! Only `address` drives the dApp. The other fields are what the deployer saw
//! at deploy time and are kept for display alongside live values.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::{fmt, path::Path};
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Error, Debug)]
pub enum ContractConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid contract descriptor: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid contract address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },
}

/// Address of the deployed token contract, as configured.
///
/// Kept as the configured string and only parsed when a read needs it. Empty
/// means the contract has not been deployed yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ContractAddress(String);

impl ContractAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into().trim().to_string())
    }

    /// The "not yet deployed" address.
    pub const fn empty() -> Self {
        Self(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse into a 20-byte address.
    pub fn parse(&self) -> Result<Address, ContractConfigError> {
        self.0
            .parse()
            .map_err(|e| ContractConfigError::InvalidAddress {
                address: self.0.clone(),
                reason: format!("{}", e),
            })
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ContractAddress {
    fn from(address: String) -> Self {
        Self::new(address)
    }
}

impl From<ContractAddress> for String {
    fn from(address: ContractAddress) -> Self {
        address.0
    }
}

impl From<Address> for ContractAddress {
    fn from(address: Address) -> Self {
        Self(address.to_string())
    }
}

/// Contents of `contract-address.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractConfig {
    /// Deployed contract address
    #[serde(default)]
    pub address: ContractAddress,

    /// Token name recorded at deploy time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Token symbol recorded at deploy time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,

    /// Total supply (whole units) recorded at deploy time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_supply: Option<String>,
}

impl ContractConfig {
    pub fn from_json(contents: &str) -> Result<Self, ContractConfigError> {
        let config: Self = serde_json::from_str(contents)?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ContractConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ContractConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_json(&contents)
    }

    /// Load the descriptor, falling back to an empty one.
    ///
    /// A missing or unreadable descriptor is not fatal: it is logged and the
    /// dApp starts without a contract address, which surfaces to the user only
    /// once a token read is attempted.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading contract descriptor");

        match Self::from_file(path) {
            Ok(config) => {
                info!(address = %config.address, "Contract address loaded");
                config
            }
            Err(e) => {
                error!(error = %e, "Failed to load contract address");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_full_descriptor() {
        let config = ContractConfig::from_json(
            r#"{
                "address": "0x5FbDB2315678afecb367f032d93F642f64180aa3",
                "name": "Test Token",
                "symbol": "TEST",
                "totalSupply": "1000000.0"
            }"#,
        )
        .unwrap();

        assert_eq!(
            config.address.as_str(),
            "0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
        assert_eq!(config.name.as_deref(), Some("Test Token"));
        assert_eq!(config.symbol.as_deref(), Some("TEST"));
        assert_eq!(config.total_supply.as_deref(), Some("1000000.0"));
        assert_eq!(
            config.address.parse().unwrap(),
            address!("5FbDB2315678afecb367f032d93F642f64180aa3")
        );
    }

    #[test]
    fn test_address_only_descriptor() {
        let config = ContractConfig::from_json(
            r#"{ "address": "0x5FbDB2315678afecb367f032d93F642f64180aa3" }"#,
        )
        .unwrap();
        assert!(!config.address.is_empty());
        assert_eq!(config.name, None);
        assert_eq!(config.total_supply, None);
    }

    #[test]
    fn test_missing_address_is_empty() {
        let config = ContractConfig::from_json(r#"{ "name": "Test Token" }"#).unwrap();
        assert!(config.address.is_empty());
    }

    #[test]
    fn test_malformed_descriptor() {
        let result = ContractConfig::from_json("{ not json");
        assert!(matches!(result, Err(ContractConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_falls_back_to_empty() {
        let config = ContractConfig::load_or_default("does/not/exist/contract-address.json");
        assert_eq!(config, ContractConfig::default());
        assert!(config.address.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "contract-address-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"{ "address": "0x5FbDB2315678afecb367f032d93F642f64180aa3", "symbol": "TEST" }"#,
        )
        .unwrap();

        let config = ContractConfig::load_or_default(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.symbol.as_deref(), Some("TEST"));
        assert!(!config.address.is_empty());
    }

    #[test]
    fn test_address_is_trimmed() {
        let address = ContractAddress::new("  0x5FbDB2315678afecb367f032d93F642f64180aa3\n");
        assert_eq!(address.as_str(), "0x5FbDB2315678afecb367f032d93F642f64180aa3");
        assert!(ContractAddress::new("   ").is_empty());
    }

    #[test]
    fn test_descriptor_address_is_trimmed() {
        let config = ContractConfig::from_json(r#"{ "address": "  " }"#).unwrap();
        assert!(config.address.is_empty());

        let config = ContractConfig::from_json(
            r#"{ "address": " 0x5FbDB2315678afecb367f032d93F642f64180aa3\n" }"#,
        )
        .unwrap();
        assert_eq!(
            config.address.as_str(),
            "0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
    }

    #[test]
    fn test_invalid_address() {
        let address = ContractAddress::new("0x1234");
        assert!(matches!(
            address.parse(),
            Err(ContractConfigError::InvalidAddress { .. })
        ));
    }
}
