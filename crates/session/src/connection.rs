//! Wallet connection.
//!
//! Connecting is a fixed sequence of provider requests: account access, chain
//! id, then the native balance of the first authorized account. The session is
//! only replaced once every step has succeeded.

use crate::{
    error::DappError,
    units::{format_ether, parse_quantity},
};
use alloy_primitives::Address;
use client::{ProviderError, WalletProvider};
use config::network_label;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

const REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
const CHAIN_ID: &str = "eth_chainId";
const GET_BALANCE: &str = "eth_getBalance";

/// An established wallet connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletSession {
    /// Active account (the first one the wallet authorized)
    pub address: Address,
    /// Chain id as reported by the wallet, hex encoded
    pub chain_id: String,
    /// Display label for the chain
    pub network: String,
    /// Native balance in whole units
    pub native_balance: String,
}

impl WalletSession {
    /// Abbreviated checksummed address, `0x1234...abcd`.
    pub fn short_address(&self) -> String {
        let full = self.address.to_string();
        format!("{}...{}", &full[..6], &full[full.len() - 4..])
    }
}

/// Owns the detected provider handle and the current session.
pub struct ConnectionManager<W> {
    provider: Option<W>,
    session: Option<WalletSession>,
}

impl<W> ConnectionManager<W>
where
    W: WalletProvider,
{
    /// `provider` is the result of provider detection; `None` is a valid
    /// starting point that makes every connect attempt fail with
    /// [`DappError::NoProvider`].
    pub const fn new(provider: Option<W>) -> Self {
        Self {
            provider,
            session: None,
        }
    }

    pub const fn provider(&self) -> Option<&W> {
        self.provider.as_ref()
    }

    pub const fn session(&self) -> Option<&WalletSession> {
        self.session.as_ref()
    }

    /// Connect and replace the current session.
    ///
    /// On failure the current session is left as it was.
    pub async fn connect(&mut self) -> Result<&WalletSession, DappError> {
        let session = self.establish().await?;
        Ok(&*self.session.insert(session))
    }

    /// Drop the current session. The wallet keeps its authorization.
    pub fn disconnect(&mut self) -> Option<WalletSession> {
        let session = self.session.take();
        if let Some(session) = &session {
            debug!(address = %session.address, "Session discarded");
        }
        session
    }

    /// Run the connection sequence without touching the current session.
    pub async fn establish(&self) -> Result<WalletSession, DappError> {
        let Some(provider) = self.provider.as_ref() else {
            warn!("No wallet provider detected");
            return Err(DappError::NoProvider);
        };

        debug!("Requesting account access");
        let accounts = provider
            .request(REQUEST_ACCOUNTS, json!([]))
            .await
            .map_err(|e| {
                if e.is_user_rejected() {
                    DappError::UserRejected(e.to_string())
                } else {
                    DappError::request_failed(REQUEST_ACCOUNTS, e)
                }
            })?;
        let address = first_account(&accounts)?;

        debug!(%address, "Querying chain id");
        let chain_id = provider
            .request(CHAIN_ID, json!([]))
            .await
            .map_err(|e| DappError::request_failed(CHAIN_ID, e))?;
        let chain_id = chain_id
            .as_str()
            .ok_or_else(|| {
                DappError::request_failed(
                    CHAIN_ID,
                    ProviderError::invalid_response(CHAIN_ID, "expected a hex string"),
                )
            })?
            .to_string();

        debug!(%address, "Querying native balance");
        let balance = provider
            .request(GET_BALANCE, json!([address, "latest"]))
            .await
            .map_err(|e| DappError::request_failed(GET_BALANCE, e))?;
        let balance = parse_quantity(&balance).ok_or_else(|| {
            DappError::request_failed(
                GET_BALANCE,
                ProviderError::invalid_response(
                    GET_BALANCE,
                    format!("expected a hex quantity, got {}", balance),
                ),
            )
        })?;

        let session = WalletSession {
            address,
            network: network_label(&chain_id),
            chain_id,
            native_balance: format_ether(balance),
        };

        info!(
            address = %session.address,
            chain_id = %session.chain_id,
            network = %session.network,
            balance = %session.native_balance,
            "Wallet connected"
        );

        Ok(session)
    }
}

/// Pick the active account: always index 0 of what the wallet authorized.
fn first_account(accounts: &Value) -> Result<Address, DappError> {
    let accounts = accounts.as_array().ok_or_else(|| {
        DappError::request_failed(
            REQUEST_ACCOUNTS,
            ProviderError::invalid_response(REQUEST_ACCOUNTS, "expected an array of accounts"),
        )
    })?;

    let Some(first) = accounts.first() else {
        return Err(DappError::UserRejected(
            "No account was authorized by the wallet.".to_string(),
        ));
    };

    first
        .as_str()
        .and_then(|account| account.parse().ok())
        .ok_or_else(|| {
            DappError::request_failed(
                REQUEST_ACCOUNTS,
                ProviderError::invalid_response(
                    REQUEST_ACCOUNTS,
                    format!("invalid account {}", first),
                ),
            )
        })
}
