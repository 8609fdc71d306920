//! The dApp facade: one connection, one contract, one visible error.
//!
//! [`Dapp`] wires the [`ConnectionManager`] and [`TokenReader`] together and
//! owns everything a front end renders: the session, the token summary, the
//! error slot, the loading flag and the current [`Phase`].
//!
//! The loading flag and phase are also published as a [`Progress`] value on
//! a `watch` channel, so a renderer holding a [`Dapp::subscribe`] receiver
//! sees `Connecting` and `Reading` while a request is still pending.

pub mod config;
pub mod metrics;

use crate::metrics::Metrics;
use ::config::ContractAddress;
use client::WalletProvider;
use serde::Serialize;
use session::{
    check_preconditions, ConnectionManager, DappError, OperationError, TokenReader, TokenSummary,
    WalletSession,
};
use std::{fmt, time::Instant};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Where the dApp is in its connect/read lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Disconnected,
    Connecting,
    Connected,
    Reading,
    TokenLoaded,
}

/// Lifecycle state as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub phase: Phase,
    pub loading: bool,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            phase: Phase::Disconnected,
            loading: false,
        }
    }
}

pub struct Dapp<W> {
    connection: ConnectionManager<W>,
    reader: Option<TokenReader<W>>,
    contract: ContractAddress,
    token: Option<TokenSummary>,
    error: Option<OperationError>,
    progress: watch::Sender<Progress>,
    metrics: Metrics,
}

impl<W> Dapp<W>
where
    W: WalletProvider + Clone,
{
    /// `provider` is the outcome of provider detection, done once by the caller.
    pub fn new(provider: Option<W>, contract: ContractAddress) -> Self {
        let reader = provider.clone().map(TokenReader::new);

        Self {
            connection: ConnectionManager::new(provider),
            reader,
            contract,
            token: None,
            error: None,
            progress: watch::Sender::new(Progress::default()),
            metrics: Metrics::new(),
        }
    }

    pub const fn session(&self) -> Option<&WalletSession> {
        self.connection.session()
    }

    /// The token summary, if it was read from the current contract on the
    /// current chain.
    ///
    /// After a failed re-read this is the previous, still matching, summary.
    pub fn token(&self) -> Option<&TokenSummary> {
        let session = self.connection.session()?;
        self.token
            .as_ref()
            .filter(|token| token.is_current(&self.contract, session))
    }

    pub const fn error(&self) -> Option<&OperationError> {
        self.error.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.progress.borrow().loading
    }

    pub fn phase(&self) -> Phase {
        self.progress.borrow().phase
    }

    /// A receiver that observes every phase and loading change, including
    /// those made while `connect` or `read_token` is awaiting the wallet.
    pub fn subscribe(&self) -> watch::Receiver<Progress> {
        self.progress.subscribe()
    }

    pub const fn contract(&self) -> &ContractAddress {
        &self.contract
    }

    pub const fn has_provider(&self) -> bool {
        self.connection.provider().is_some()
    }

    /// Point the dApp at another contract. A summary read from the previous
    /// address is discarded.
    pub fn set_contract_address(&mut self, contract: ContractAddress) {
        if contract == self.contract {
            return;
        }

        debug!(from = %self.contract, to = %contract, "Contract address changed");
        self.contract = contract;
        self.token = None;
        if self.phase() == Phase::TokenLoaded {
            self.transition(Phase::Connected);
        }
    }

    /// Connect the wallet, replacing any current session.
    ///
    /// A failed attempt leaves the session and phase as they were.
    pub async fn connect(&mut self) -> Result<(), DappError> {
        let started = Instant::now();
        let previous = self.phase();

        self.error = None;
        self.set_loading(true);
        self.transition(Phase::Connecting);

        let result = self
            .connection
            .connect()
            .await
            .map(|session| session.address);
        self.set_loading(false);

        match result {
            Ok(address) => {
                debug!(%address, "Session replaced");
                self.token = None;
                self.transition(Phase::Connected);
                self.metrics.record_connect(true, started.elapsed());
                self.metrics.set_connected(true);
                Ok(())
            }
            Err(e) => {
                self.transition(previous);
                self.metrics.record_connect(false, started.elapsed());
                Err(self.fail(e))
            }
        }
    }

    /// Read the token at the configured address.
    ///
    /// Precondition failures (no address, no session) are reported without
    /// entering [`Phase::Reading`]. A failed read returns to
    /// [`Phase::Connected`] and keeps any earlier summary.
    pub async fn read_token(&mut self) -> Result<(), DappError> {
        let started = Instant::now();
        self.error = None;

        let session = check_preconditions(&self.contract, self.connection.session()).cloned();
        let session = match session {
            Ok(session) => session,
            Err(e) => return Err(self.fail(e)),
        };

        self.set_loading(true);
        self.transition(Phase::Reading);

        let result = match self.reader.as_ref() {
            Some(reader) => reader.read_token(&self.contract, Some(&session)).await,
            None => Err(DappError::NoProvider),
        };
        self.set_loading(false);

        match result {
            Ok(summary) => {
                self.token = Some(summary);
                self.transition(Phase::TokenLoaded);
                self.metrics.record_read(true, started.elapsed());
                Ok(())
            }
            Err(e) => {
                self.transition(Phase::Connected);
                self.metrics.record_read(false, started.elapsed());
                Err(self.fail(e))
            }
        }
    }

    /// Forget the session, the token summary and any error.
    pub fn disconnect(&mut self) {
        self.connection.disconnect();
        self.token = None;
        self.error = None;
        self.set_loading(false);
        self.transition(Phase::Disconnected);
        self.metrics.set_connected(false);
    }

    pub fn status(&self) -> Status {
        Status {
            connected: self.connection.session().is_some(),
            contract_loaded: !self.contract.is_empty(),
            network: self.connection.session().map(|s| s.network.clone()),
        }
    }

    fn transition(&self, next: Phase) {
        self.progress.send_if_modified(|progress| {
            if progress.phase == next {
                return false;
            }
            debug!(from = ?progress.phase, to = ?next, "Phase transition");
            progress.phase = next;
            true
        });
    }

    fn set_loading(&self, loading: bool) {
        self.progress.send_if_modified(|progress| {
            let changed = progress.loading != loading;
            progress.loading = loading;
            changed
        });
    }

    fn fail(&mut self, err: DappError) -> DappError {
        warn!(kind = ?err.kind(), error = %err, "Operation failed");
        self.error = Some(OperationError::from(&err));
        err
    }
}

/// Snapshot of what is connected and configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub connected: bool,
    pub contract_loaded: bool,
    pub network: Option<String>,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Connected: {}", if self.connected { "Yes" } else { "No" })?;
        writeln!(
            f,
            "Contract: {}",
            if self.contract_loaded { "Loaded" } else { "Not Found" }
        )?;
        write!(f, "Network: {}", self.network.as_deref().unwrap_or("Unknown"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let status = Status {
            connected: false,
            contract_loaded: false,
            network: None,
        };
        assert_eq!(
            status.to_string(),
            "Connected: No\nContract: Not Found\nNetwork: Unknown"
        );

        let status = Status {
            connected: true,
            contract_loaded: true,
            network: Some("Localhost 8545".to_string()),
        };
        assert_eq!(
            status.to_string(),
            "Connected: Yes\nContract: Loaded\nNetwork: Localhost 8545"
        );
    }
}
