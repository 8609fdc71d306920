//! Wallet connection and token reads.
//!
//! Two components drive the dApp:
//! - [`ConnectionManager`] acquires account, network and native balance from a
//!   wallet provider and holds the resulting [`WalletSession`]
//! - [`TokenReader`] verifies a contract is deployed and reads its name, symbol
//!   and total supply into a [`TokenSummary`]
//!
//! Both talk to the wallet only through [`client::WalletProvider`].

pub mod connection;
pub mod error;
pub mod reader;
pub mod units;

pub use connection::{ConnectionManager, WalletSession};
pub use error::{DappError, ErrorKind, OperationError};
pub use reader::{check_preconditions, TokenReader, TokenSummary};

#[cfg(test)]
pub(crate) mod test_utils {
    use client::{ProviderError, WalletProvider};
    use serde_json::{json, Value};
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    /// Scripted wallet provider for unit tests.
    ///
    /// Answers each method with the configured response; `eth_call` responses
    /// are keyed by the calldata so each view function can be scripted on its
    /// own.
    #[derive(Clone, Default)]
    pub struct FakeWallet {
        responses: Arc<Mutex<HashMap<String, Result<Value, ProviderError>>>>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl FakeWallet {
        pub fn respond(&self, key: &str, value: Value) -> &Self {
            self.responses
                .lock()
                .unwrap()
                .insert(key.to_string(), Ok(value));
            self
        }

        pub fn fail(&self, key: &str, error: ProviderError) -> &Self {
            self.responses
                .lock()
                .unwrap()
                .insert(key.to_string(), Err(error));
            self
        }

        /// Methods requested so far, in order.
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        /// A wallet on a dev chain with a single funded account.
        pub fn connected() -> Self {
            let wallet = Self::default();
            wallet
                .respond(
                    "eth_requestAccounts",
                    json!(["0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"]),
                )
                .respond("eth_chainId", json!("0x7a69"))
                .respond("eth_getBalance", json!("0x21e19e0c9bab2400000"));
            wallet
        }

        fn key(method: &str, params: &Value) -> String {
            match params[0]["data"].as_str() {
                Some(data) if method == "eth_call" => format!("eth_call:{}", data),
                _ => method.to_string(),
            }
        }
    }

    impl WalletProvider for FakeWallet {
        async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
            let key = Self::key(method, &params);
            self.calls.lock().unwrap().push(key.clone());

            self.responses
                .lock()
                .unwrap()
                .get(&key)
                .cloned()
                .unwrap_or_else(|| {
                    Err(ProviderError::Rpc {
                        code: -32601,
                        message: format!("the method {} does not exist", key),
                    })
                })
        }
    }
}
