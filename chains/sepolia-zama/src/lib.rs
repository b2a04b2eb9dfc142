//! Sepolia testnet tools for the Zama token contract: per-wallet token
//! balance reporting and batch faucet claims.

pub mod config;
pub mod tasks;

pub use config::{SepoliaConfig, SEPOLIA_CHAIN_ID};
