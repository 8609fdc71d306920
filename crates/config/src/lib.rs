//! Configuration types for the token dApp.
//!
//! This crate provides:
//! - The static table of known networks and chain id labelling
//! - The deployed contract descriptor (`contract-address.json`) and its loader

pub mod contract;
pub mod network;

pub use contract::{ContractAddress, ContractConfig, ContractConfigError};
pub use network::{network_label, parse_chain_id, KnownNetwork, KNOWN_NETWORKS};
