//! Token metadata reads.
//!
//! A read never trusts earlier results: every call re-checks that code is
//! deployed at the configured address and re-reads all three fields.

use crate::{connection::WalletSession, error::DappError, units::format_ether};
use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolCall;
use binding::token::{selector_calldata, IERC20Metadata};
use client::WalletProvider;
use config::ContractAddress;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

/// Token metadata read from a deployed contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenSummary {
    pub name: String,
    pub symbol: String,
    /// Total supply in whole units
    pub total_supply: String,
    /// Contract the summary was read from
    pub contract: ContractAddress,
    /// Chain the summary was read on
    pub chain_id: String,
}

impl TokenSummary {
    /// Whether this summary belongs to the given contract on the session's chain.
    pub fn is_current(&self, contract: &ContractAddress, session: &WalletSession) -> bool {
        &self.contract == contract && self.chain_id == session.chain_id
    }
}

pub struct TokenReader<W> {
    provider: W,
}

impl<W> TokenReader<W>
where
    W: WalletProvider,
{
    pub const fn new(provider: W) -> Self {
        Self { provider }
    }

    /// Read name, symbol and total supply of the token at `contract`.
    ///
    /// Fails before any request when the address is empty or there is no
    /// session. Either all three fields are read or no summary is returned.
    pub async fn read_token(
        &self,
        contract: &ContractAddress,
        session: Option<&WalletSession>,
    ) -> Result<TokenSummary, DappError> {
        let session = check_preconditions(contract, session)?;

        let address = contract.parse().map_err(DappError::read_failed)?;
        self.ensure_deployed(contract, address).await?;

        debug!(%address, "Calling token view functions");
        let (name, symbol, total_supply) = tokio::try_join!(
            self.call::<IERC20Metadata::nameCall>(address),
            self.call::<IERC20Metadata::symbolCall>(address),
            self.call::<IERC20Metadata::totalSupplyCall>(address),
        )?;

        let summary = TokenSummary {
            name,
            symbol,
            total_supply: format_ether(total_supply),
            contract: contract.clone(),
            chain_id: session.chain_id.clone(),
        };

        info!(
            contract = %summary.contract,
            name = %summary.name,
            symbol = %summary.symbol,
            total_supply = %summary.total_supply,
            "Token info loaded"
        );

        Ok(summary)
    }

    async fn ensure_deployed(
        &self,
        contract: &ContractAddress,
        address: Address,
    ) -> Result<(), DappError> {
        debug!(%address, "Checking contract code");

        let code = self
            .provider
            .request("eth_getCode", json!([address, "latest"]))
            .await
            .map_err(DappError::read_failed)?;
        let code = decode_bytes("eth_getCode", code)?;

        if code.is_empty() {
            warn!(%address, "No contract code at address");
            return Err(DappError::NoContractAtAddress {
                address: contract.to_string(),
            });
        }

        Ok(())
    }

    async fn call<C: SolCall>(&self, to: Address) -> Result<C::Return, DappError> {
        let data = selector_calldata::<C>();

        let output = self
            .provider
            .request("eth_call", json!([{ "to": to, "data": data }, "latest"]))
            .await
            .map_err(DappError::read_failed)?;
        let output = decode_bytes("eth_call", output)?;

        C::abi_decode_returns(&output)
            .map_err(|e| DappError::ReadFailed(format!("{}: {}", C::SIGNATURE, e)))
    }
}

/// Checks a read can be attempted at all, before any request is made.
///
/// The address is checked first: with nothing deployed there is nothing to
/// connect for.
pub fn check_preconditions<'a>(
    contract: &ContractAddress,
    session: Option<&'a WalletSession>,
) -> Result<&'a WalletSession, DappError> {
    if contract.is_empty() {
        return Err(DappError::NotDeployed);
    }

    session.ok_or(DappError::NotConnected)
}

fn decode_bytes(method: &str, value: Value) -> Result<Bytes, DappError> {
    serde_json::from_value(value)
        .map_err(|e| DappError::ReadFailed(format!("invalid {} response: {}", method, e)))
}
