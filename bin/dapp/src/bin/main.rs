//! Command line front end for the token dApp.
//!
//! - `status`: show provider detection and contract configuration
//! - `connect`: connect the wallet and print the session
//! - `token`: connect, then read the configured token
//! - `shell`: line-driven session re-running operations on command

use alloy_primitives::Address;
use clap::{Parser, Subcommand};
use client::WalletProvider;
use config::ContractConfig;
use dapp::{config::Config, metrics::install_prometheus_exporter, Dapp};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

const DEFAULT_CONFIG_FILE: &str = "dapp.toml";

#[derive(Parser)]
#[command(name = "dapp")]
#[command(about = "Connect a wallet and read token metadata")]
struct Cli {
    /// Path to the configuration file (defaults to dapp.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Wallet RPC endpoint, overrides the configuration file
    #[arg(long, env = "DAPP_RPC_URL")]
    rpc_url: Option<String>,

    /// Contract descriptor written by the deploy step
    #[arg(long)]
    contract_file: Option<PathBuf>,

    /// Authorized account; repeat for more, the first one is active
    #[arg(long = "account")]
    accounts: Vec<Address>,

    /// Private key whose address is authorized ahead of any other account
    #[arg(short = 'k', long, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show provider detection and contract configuration
    Status,

    /// Connect the wallet and print the session
    Connect,

    /// Connect the wallet and read the configured token
    Token,

    /// Interactive session: connect, read, disconnect, status, quit
    Shell {
        /// Serve Prometheus metrics on this port while the shell runs
        #[arg(long)]
        metrics_port: Option<u16>,
    },
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(path: Option<&Path>) -> eyre::Result<Config> {
    match path {
        Some(path) => Config::from_file(path),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => Config::from_file(DEFAULT_CONFIG_FILE),
        None => Ok(Config::default()),
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json);

    let mut config = load_config(cli.config.as_deref())?;
    if cli.rpc_url.is_some() {
        config.rpc_url = cli.rpc_url;
    }
    if let Some(contract_file) = cli.contract_file {
        config.contract_file = contract_file;
    }
    if !cli.accounts.is_empty() {
        config.accounts = cli.accounts;
    }
    if let Some(private_key) = &cli.private_key {
        let signer = client::signer_address(private_key)?;
        config.accounts.retain(|account| *account != signer);
        config.accounts.insert(0, signer);
    }

    info!(
        rpc_url = config.rpc_url.as_deref().unwrap_or("<none>"),
        contract_file = %config.contract_file.display(),
        accounts = config.accounts.len(),
        "Loaded config"
    );

    let contract = ContractConfig::load_or_default(&config.contract_file);
    let provider = client::detect_provider(config.rpc_url.as_deref(), config.accounts.clone());
    let mut app = Dapp::new(provider, contract.address.clone());

    match cli.command {
        Command::Status => {
            print_status(&app, &contract);
        }
        Command::Connect => {
            app.connect().await?;
            print_session(&app);
        }
        Command::Token => {
            app.connect().await?;
            print_session(&app);
            app.read_token().await?;
            print_token(&app, &contract);
        }
        Command::Shell { metrics_port } => {
            if let Some(port) = metrics_port {
                install_prometheus_exporter(port)?;
                info!(port, "Serving Prometheus metrics");
            }
            run_shell(&mut app, &contract).await?;
        }
    }

    Ok(())
}

async fn run_shell<W>(app: &mut Dapp<W>, contract: &ContractConfig) -> eyre::Result<()>
where
    W: WalletProvider + Clone,
{
    println!("Commands: connect, read, disconnect, status, quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" => continue,
            "connect" => {
                if app.connect().await.is_ok() {
                    print_session(app);
                }
            }
            "read" => {
                if app.read_token().await.is_ok() {
                    print_token(app, contract);
                }
            }
            "disconnect" => {
                app.disconnect();
                println!("Disconnected");
            }
            "status" => print_status(app, contract),
            "quit" | "exit" => break,
            other => println!("Unknown command: {}", other),
        }

        if let Some(error) = app.error() {
            println!("Error: {}", error.message);
        }
    }

    Ok(())
}

fn print_session<W>(app: &Dapp<W>)
where
    W: WalletProvider + Clone,
{
    if let Some(session) = app.session() {
        println!("Address: {} ({})", session.address, session.short_address());
        println!("Network: {}", session.network);
        println!("Balance: {} ETH", session.native_balance);
    }
}

fn print_token<W>(app: &Dapp<W>, contract: &ContractConfig)
where
    W: WalletProvider + Clone,
{
    if let Some(token) = app.token() {
        println!("Contract: {}", token.contract);
        println!("Name: {}", token.name);
        println!("Symbol: {}", token.symbol);
        println!("Total Supply: {}", token.total_supply);

        if let Some(deployed) = &contract.total_supply {
            if *deployed != token.total_supply {
                println!("Total Supply at deploy: {}", deployed);
            }
        }
    }
}

fn print_status<W>(app: &Dapp<W>, contract: &ContractConfig)
where
    W: WalletProvider + Clone,
{
    println!(
        "Provider: {}",
        if app.has_provider() { "Detected" } else { "Not Found" }
    );
    println!("{}", app.status());
    if !app.contract().is_empty() {
        println!("Contract Address: {}", app.contract());
    }
    if let (Some(name), Some(symbol)) = (&contract.name, &contract.symbol) {
        println!("Deployed Token: {} ({})", name, symbol);
    }
}
