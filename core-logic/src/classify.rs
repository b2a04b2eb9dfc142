//! Failure classification for per-item transaction errors.
//!
//! Classification is structural first (JSON-RPC error code, receipt
//! status), falling back to substring heuristics on the error text when
//! the transport exposes nothing better.

use std::fmt;

/// Coarse classification of a failed submission or execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Execution reverted on-chain (bad call, missing permission,
    /// contract state rejected the call).
    Reverted,
    /// Gas-related: estimate too low, out-of-gas, fee cap issues.
    Gas,
    /// Nonce-related: duplicate or stale nonce.
    Nonce,
    /// Account cannot cover value + fee.
    InsufficientFunds,
    /// Anything else (network hiccup, transport error, unknown RPC error).
    Other,
}

impl FailureKind {
    /// One-line operator hint, logged next to the raw error.
    pub fn hint(&self) -> &'static str {
        match self {
            FailureKind::Reverted => {
                "call reverted: function missing, caller unauthorized, or contract state rejected it"
            }
            FailureKind::Gas => "gas problem: consider a higher gas limit",
            FailureKind::Nonce => "nonce problem: duplicate transaction or stale pending count",
            FailureKind::InsufficientFunds => "balance cannot cover value plus fee",
            FailureKind::Other => "unclassified failure",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::Reverted => "reverted",
            FailureKind::Gas => "gas",
            FailureKind::Nonce => "nonce",
            FailureKind::InsufficientFunds => "insufficient-funds",
            FailureKind::Other => "other",
        };
        f.write_str(s)
    }
}

/// Classify from a structured JSON-RPC error. Code 3 is the standard
/// "execution reverted" code; everything else falls through to the
/// message heuristics.
pub fn from_rpc_error(code: i64, message: &str) -> FailureKind {
    if code == 3 {
        return FailureKind::Reverted;
    }
    from_message(message)
}

/// Substring heuristics over an error message. Last resort, kept for
/// transports that surface failures as plain text only.
pub fn from_message(message: &str) -> FailureKind {
    let msg = message.to_ascii_lowercase();
    if msg.contains("revert") {
        FailureKind::Reverted
    } else if msg.contains("insufficient funds") || msg.contains("insufficient balance") {
        FailureKind::InsufficientFunds
    } else if msg.contains("nonce") {
        FailureKind::Nonce
    } else if msg.contains("gas") {
        FailureKind::Gas
    } else {
        FailureKind::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_code_3_is_revert_regardless_of_message() {
        assert_eq!(from_rpc_error(3, "whatever"), FailureKind::Reverted);
    }

    #[test]
    fn message_heuristics() {
        assert_eq!(
            from_message("execution reverted: not allowed"),
            FailureKind::Reverted
        );
        assert_eq!(
            from_message("intrinsic gas too low"),
            FailureKind::Gas
        );
        assert_eq!(
            from_message("nonce too low: next nonce 4"),
            FailureKind::Nonce
        );
        assert_eq!(
            from_message("insufficient funds for gas * price + value"),
            FailureKind::InsufficientFunds
        );
        assert_eq!(from_message("connection reset"), FailureKind::Other);
    }

    #[test]
    fn insufficient_funds_wins_over_gas_substring() {
        // "insufficient funds for gas" contains "gas" too
        assert_eq!(
            from_message("Insufficient funds for gas"),
            FailureKind::InsufficientFunds
        );
    }
}
