//! Prometheus metrics for the dApp.
//!
//! All metrics are aggregated in the [`Metrics`] struct. Without an installed
//! recorder every call is a no-op, so one-shot commands pay nothing for them.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Metrics {
    _private: (),
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics instance and register all metric descriptions.
    pub fn new() -> Self {
        Self::register_descriptions();
        Self { _private: () }
    }

    fn register_descriptions() {
        describe_counter!(
            "dapp_connect_attempts_total",
            "Total number of wallet connect attempts by outcome"
        );
        describe_histogram!(
            "dapp_connect_duration_seconds",
            "Duration of wallet connect attempts in seconds"
        );
        describe_counter!(
            "dapp_token_reads_total",
            "Total number of token reads by outcome"
        );
        describe_histogram!(
            "dapp_token_read_duration_seconds",
            "Duration of token reads in seconds"
        );
        describe_gauge!(
            "dapp_wallet_connected",
            "1 while a wallet session is established"
        );
    }

    /// Record a finished connect attempt.
    pub fn record_connect(&self, success: bool, duration: Duration) {
        counter!("dapp_connect_attempts_total", "outcome" => outcome(success)).increment(1);
        histogram!("dapp_connect_duration_seconds").record(duration.as_secs_f64());
    }

    /// Record a finished token read. Precondition failures are not reads.
    pub fn record_read(&self, success: bool, duration: Duration) {
        counter!("dapp_token_reads_total", "outcome" => outcome(success)).increment(1);
        histogram!("dapp_token_read_duration_seconds").record(duration.as_secs_f64());
    }

    pub fn set_connected(&self, connected: bool) {
        gauge!("dapp_wallet_connected").set(if connected { 1.0 } else { 0.0 });
    }
}

const fn outcome(success: bool) -> &'static str {
    if success {
        "success"
    } else {
        "failure"
    }
}

/// Install the Prometheus metrics exporter and start the HTTP server.
///
/// Returns an error if the server fails to bind to the specified port.
pub fn install_prometheus_exporter(port: u16) -> eyre::Result<()> {
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::net::SocketAddr;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| eyre::eyre!("Failed to install Prometheus exporter: {}", e))?;

    Ok(())
}
