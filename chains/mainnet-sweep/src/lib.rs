//! Mainnet wallet tools: balance/nonce reporting and residual-ETH
//! sweeping over newline-delimited credential files.

pub mod config;
pub mod tasks;

pub use config::MainnetConfig;
