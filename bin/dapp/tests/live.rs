//! Integration test against a local dev node.
//!
//! Requires a node at the url in `tests/test-config.toml` with the test token
//! deployed at the address in `tests/contract-address.json`.
//!
//! Run with:
//! ```bash
//! cargo test --package dapp --test live -- --ignored
//! ```


use config::ContractConfig;
use dapp::{Dapp, Phase};
use setup::load_test_config;

#[tokio::test]
#[ignore = "requires a local dev node with the token deployed"]
async fn test_connect_and_read_token() {
    let config = load_test_config();
    let contract = ContractConfig::from_file(&config.contract_file)
        .expect("Failed to load contract descriptor");

    let provider = client::detect_provider(config.rpc_url.as_deref(), config.accounts.clone());
    assert!(provider.is_some(), "No wallet provider detected");

    let mut app = Dapp::new(provider, contract.address.clone());

    app.connect().await.expect("Failed to connect");
    let session = app.session().unwrap();
    println!("✓ Connected: {} on {}", session.address, session.network);
    println!("  Balance: {} ETH", session.native_balance);
    assert_eq!(Some(&session.address), config.accounts.first());

    app.read_token().await.expect("Failed to read token");
    let token = app.token().unwrap();
    println!("✓ Token: {} ({})", token.name, token.symbol);
    println!("  Total Supply: {}", token.total_supply);

    assert_eq!(app.phase(), Phase::TokenLoaded);
    if let Some(name) = &contract.name {
        assert_eq!(&token.name, name);
    }
    if let Some(symbol) = &contract.symbol {
        assert_eq!(&token.symbol, symbol);
    }
}
