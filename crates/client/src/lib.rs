//! Wallet provider boundary.
//!
//! The dApp talks to a wallet the way a browser page talks to an injected
//! EIP-1193 provider: a single `request(method, params)` entry point returning
//! JSON. [`WalletProvider`] is that seam; [`RpcWallet`] implements it over an
//! alloy HTTP provider, and tests substitute scripted fakes.

mod rpc_wallet;

use alloy_primitives::Address;
use alloy_provider::{Provider, ProviderBuilder};
use alloy_signer_local::PrivateKeySigner;
use alloy_transport::TransportError;
pub use rpc_wallet::RpcWallet;
use serde_json::Value;
use std::future::Future;
use thiserror::Error;
use tracing::{debug, warn};

/// EIP-1193 error code for a request the user declined.
pub const USER_REJECTED_CODE: i64 = 4001;

/// Failure of a single provider request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Error response returned by the wallet or the node behind it
    #[error("{message}")]
    Rpc { code: i64, message: String },

    /// Request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response arrived but does not have the expected shape
    #[error("Invalid response to {method}: {reason}")]
    InvalidResponse { method: String, reason: String },
}

impl ProviderError {
    /// Whether the wallet reported that the user declined the request.
    pub const fn is_user_rejected(&self) -> bool {
        matches!(self, Self::Rpc { code, .. } if *code == USER_REJECTED_CODE)
    }

    pub fn invalid_response(method: &str, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            method: method.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<TransportError> for ProviderError {
    fn from(err: TransportError) -> Self {
        match err.as_error_resp() {
            Some(payload) => Self::Rpc {
                code: payload.code,
                message: payload.message.to_string(),
            },
            None => Self::Transport(err.to_string()),
        }
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    /// Error parsing or validating URLs
    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),

    /// Error with private key
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),
}

/// An EIP-1193 style wallet provider.
pub trait WalletProvider: Send + Sync {
    /// Send a request and wait for the wallet to answer.
    ///
    /// May stay pending for as long as the wallet waits on its user; there is
    /// no timeout and no way to withdraw the request once issued.
    fn request(
        &self,
        method: &str,
        params: Value,
    ) -> impl Future<Output = Result<Value, ProviderError>> + Send;
}

/// Convenience function to create an ethereum rpc provider from url.
pub fn create_provider(rpc_url: &str) -> Result<impl Provider + Clone, ClientError> {
    let url = rpc_url
        .parse()
        .map_err(|e| ClientError::InvalidUrl(format!("{}", e)))?;
    let provider = ProviderBuilder::new().connect_http(url);

    Ok(provider)
}

/// Detect a usable wallet provider.
///
/// Runs once at startup. Returns `None` when no endpoint is configured or the
/// configured one is unusable; absence is an ordinary outcome the connection
/// flow reports to the user, not an error here.
pub fn detect_provider(
    rpc_url: Option<&str>,
    accounts: Vec<Address>,
) -> Option<RpcWallet<impl Provider + Clone>> {
    let Some(rpc_url) = rpc_url.map(str::trim).filter(|url| !url.is_empty()) else {
        debug!("No wallet provider endpoint configured");
        return None;
    };

    match create_provider(rpc_url) {
        Ok(provider) => {
            debug!(rpc_url, accounts = accounts.len(), "Wallet provider detected");
            Some(RpcWallet::new(provider, accounts))
        }
        Err(e) => {
            warn!(rpc_url, error = %e, "Wallet provider endpoint unusable");
            None
        }
    }
}

/// Derive the account address controlled by a local private key.
pub fn signer_address(private_key: &str) -> Result<Address, ClientError> {
    let signer: PrivateKeySigner = private_key
        .parse()
        .map_err(|e| ClientError::InvalidPrivateKey(format!("{}", e)))?;

    Ok(signer.address())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use alloy_transport::TransportErrorKind;

    #[test]
    fn test_invalid_url() {
        let result = create_provider("not a url");
        assert!(result.is_err());
    }

    #[test]
    fn test_detect_without_endpoint() {
        assert!(detect_provider(None, vec![]).is_none());
        assert!(detect_provider(Some("   "), vec![]).is_none());
    }

    #[test]
    fn test_detect_with_invalid_endpoint() {
        assert!(detect_provider(Some("not a url"), vec![]).is_none());
    }

    #[tokio::test]
    async fn test_detect_with_endpoint() {
        let wallet = detect_provider(
            Some("http://127.0.0.1:8545"),
            vec![Address::repeat_byte(1)],
        )
        .expect("provider should be detected");
        assert_eq!(wallet.accounts(), &[Address::repeat_byte(1)]);
    }

    #[test]
    fn test_signer_address() {
        // First well-known dev node account.
        let key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
        assert_eq!(
            signer_address(key).unwrap(),
            address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );
    }

    #[test]
    fn test_invalid_private_key() {
        let result = signer_address("0xnothex");
        assert!(matches!(result, Err(ClientError::InvalidPrivateKey(_))));
    }

    #[test]
    fn test_user_rejected_code() {
        let rejected = ProviderError::Rpc {
            code: USER_REJECTED_CODE,
            message: "User rejected the request.".to_string(),
        };
        assert!(rejected.is_user_rejected());
        assert_eq!(rejected.to_string(), "User rejected the request.");

        let other = ProviderError::Rpc {
            code: -32000,
            message: "header not found".to_string(),
        };
        assert!(!other.is_user_rejected());
    }

    #[test]
    fn test_transport_error_conversion() {
        let err: ProviderError = TransportErrorKind::custom_str("connection refused").into();
        assert!(matches!(
            err,
            ProviderError::Transport(ref msg) if msg.contains("connection refused")
        ));
    }
}
