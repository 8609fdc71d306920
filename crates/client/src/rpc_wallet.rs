//! Wallet provider backed by a JSON-RPC node.
//!
//! Account authorization is the one request a node cannot answer the way a
//! browser wallet does, so `eth_requestAccounts` is served from the accounts
//! configured up front, falling back to the node's own `eth_accounts`.
//! Everything else is forwarded verbatim.

use crate::{ProviderError, WalletProvider};
use alloy_primitives::Address;
use alloy_provider::Provider;
use serde_json::Value;
use tracing::debug;

const REQUEST_ACCOUNTS: &str = "eth_requestAccounts";

#[derive(Debug, Clone)]
pub struct RpcWallet<P> {
    provider: P,
    accounts: Vec<Address>,
}

impl<P> RpcWallet<P> {
    pub const fn new(provider: P, accounts: Vec<Address>) -> Self {
        Self { provider, accounts }
    }

    /// Accounts authorized up front, in the order they were configured.
    pub fn accounts(&self) -> &[Address] {
        &self.accounts
    }
}

impl<P> RpcWallet<P>
where
    P: Provider + Clone,
{
    async fn forward(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        debug!(method, "Forwarding wallet request");

        let response = self
            .provider
            .raw_request::<Value, Value>(method.to_owned().into(), params)
            .await?;

        Ok(response)
    }

    async fn request_accounts(&self) -> Result<Value, ProviderError> {
        if self.accounts.is_empty() {
            return self.forward("eth_accounts", Value::Array(Vec::new())).await;
        }

        Ok(Value::Array(
            self.accounts
                .iter()
                .map(|account| Value::String(account.to_string()))
                .collect(),
        ))
    }
}

impl<P> WalletProvider for RpcWallet<P>
where
    P: Provider + Clone,
{
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        if method == REQUEST_ACCOUNTS {
            return self.request_accounts().await;
        }

        self.forward(method, params).await
    }
}
