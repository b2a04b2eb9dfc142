//! # Core Error Types
//!
//! Centralized error definitions for the core-logic crate.
//! Only two severities exist at the call sites: fatal errors (no usable
//! endpoint, nothing to process) abort the run, everything else is scoped
//! to a single credential and logged.

use thiserror::Error;

/// Wallet and credential errors. Always per-item: the offending entry is
/// skipped and the run continues.
#[derive(Error, Debug, Clone)]
pub enum WalletError {
    #[error("Invalid private key format: expected hex string")]
    InvalidKeyFormat,

    #[error("Invalid address format: '{value}'")]
    InvalidAddress { value: String },
}

/// RPC connectivity errors. These are the fatal ones: without a live
/// endpoint the run never starts.
#[derive(Error, Debug, Clone)]
pub enum NetworkError {
    #[error("No usable RPC endpoint ({attempted} candidates probed)")]
    NoUsableEndpoint { attempted: usize },

    #[error("Endpoint '{url}' is on chain {actual}, expected {expected}")]
    WrongChain {
        url: String,
        expected: u64,
        actual: u64,
    },

    #[error("Probe of '{url}' timed out after {timeout_secs}s")]
    ProbeTimeout { url: String, timeout_secs: u64 },
}
