//! # Core Logic - Shared Utilities for the EVM Batch Tools
//!
//! Everything the four wallet tools have in common lives here: RPC
//! endpoint selection, credential loading, the fixed-selector ABI codec,
//! gas arithmetic, ERC-20 reads, transaction submission, failure
//! classification, and the sequential batch driver.
//!
//! ## Modules
//!
//! - [`abi`] - Typed encode/decode per fixed function selector
//! - [`classify`] - Coarse failure classification for per-item errors
//! - [`credentials`] - Credential files and address derivation
//! - [`erc20`] - Read-only token queries with fail-soft defaults
//! - [`error`] - Typed error handling with thiserror
//! - [`gas`] - Gas price/limit estimation and sweep arithmetic
//! - [`rpc`] - One-pass endpoint selection under a probe timeout
//! - [`summary`] - Run counters and the final report
//! - [`traits`] - The per-credential task trait
//! - [`tx`] - Legacy transaction submission
//! - [`units`] - Wei/ETH/gwei display conversion

pub mod abi;
pub mod classify;
pub mod credentials;
pub mod erc20;
pub mod error;
pub mod gas;
pub mod rpc;
pub mod summary;
pub mod traits;
pub mod tx;
pub mod units;
pub(crate) mod utils;

pub use classify::FailureKind;
pub use credentials::{checksum, load_credentials, Credential};
pub use erc20::{TokenBalance, TokenInfo};
pub use error::{NetworkError, WalletError};
pub use rpc::{connect, RpcContext, PROBE_TIMEOUT};
pub use summary::RunSummary;
pub use traits::{BatchTask, ItemStatus};
pub use tx::{TxFailure, TxOutcome};
pub use utils::{setup_logger, BatchRunner};
