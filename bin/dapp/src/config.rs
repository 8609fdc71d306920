use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the deploy-time contract descriptor.
pub const DEFAULT_CONTRACT_FILE: &str = "contract-address.json";

/// Top-level dApp configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Wallet RPC endpoint url. Without one no wallet provider is detected.
    #[serde(default)]
    pub rpc_url: Option<String>,

    /// Path of the contract descriptor written by the deploy step
    #[serde(default = "default_contract_file")]
    pub contract_file: PathBuf,

    /// Accounts the wallet authorizes, first one active
    #[serde(default)]
    pub accounts: Vec<Address>,
}

fn default_contract_file() -> PathBuf {
    PathBuf::from(DEFAULT_CONTRACT_FILE)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: None,
            contract_file: default_contract_file(),
            accounts: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_full_config() {
        let config: Config = toml::from_str(
            r#"
            rpc_url = "http://127.0.0.1:8545"
            contract_file = "public/contract-address.json"
            accounts = ["0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"]
            "#,
        )
        .unwrap();

        assert_eq!(config.rpc_url.as_deref(), Some("http://127.0.0.1:8545"));
        assert_eq!(
            config.contract_file,
            PathBuf::from("public/contract-address.json")
        );
        assert_eq!(
            config.accounts,
            vec![address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")]
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.rpc_url, None);
        assert_eq!(config.contract_file, PathBuf::from(DEFAULT_CONTRACT_FILE));
        assert!(config.accounts.is_empty());
    }

    #[test]
    fn test_missing_file() {
        assert!(Config::from_file("does/not/exist.toml").is_err());
    }
}
