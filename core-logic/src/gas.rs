//! Gas price, gas limit estimation, and sweep-amount arithmetic.
//!
//! Every estimate has a hardcoded fallback so a flaky RPC read never
//! aborts the run: 21000 for plain transfers, 100000 for the contract
//! path. Successful contract estimates get a 5% buffer on top.

use ethers::providers::{Http, Middleware, Provider};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, TransactionRequest, U256};
use tracing::{info, warn};

use crate::units;

/// Gas limit of a plain value transfer.
pub const TRANSFER_GAS_LIMIT: u64 = 21_000;
/// Fallback gas limit when a contract-call estimate fails.
pub const CONTRACT_GAS_FALLBACK: u64 = 100_000;
/// Safety margin added to successful contract-call estimates.
pub const ESTIMATE_BUFFER_PERCENT: u64 = 5;
/// Fallback gas price when `eth_gasPrice` fails.
pub const DEFAULT_GAS_PRICE_GWEI: u64 = 20;

pub fn default_gas_price() -> U256 {
    U256::from(DEFAULT_GAS_PRICE_GWEI) * U256::exp10(9)
}

/// Current gas price, or the 20 gwei default when the read fails.
pub async fn gas_price_or_default(provider: &Provider<Http>) -> U256 {
    match provider.get_gas_price().await {
        Ok(price) => {
            info!(
                "Current gas price: {} wei ({:.2} gwei)",
                price,
                units::wei_to_gwei(price)
            );
            price
        }
        Err(e) => {
            warn!(
                "Failed to fetch gas price, using {} gwei default: {}",
                DEFAULT_GAS_PRICE_GWEI, e
            );
            default_gas_price()
        }
    }
}

/// Buffered limit: estimate plus 5%, rounded up.
pub fn apply_buffer(estimate: U256) -> U256 {
    let scaled = estimate * U256::from(100 + ESTIMATE_BUFFER_PERCENT);
    (scaled + U256::from(99u64)) / U256::from(100u64)
}

/// Total fee bound: limit × price. Integer math, no rounding.
pub fn total_cost(gas_limit: U256, gas_price: U256) -> U256 {
    gas_limit * gas_price
}

/// The sweepable amount: balance minus gas cost, and only when that is
/// strictly positive. `None` means the wallet cannot afford the fee.
pub fn sweep_amount(balance: U256, gas_cost: U256) -> Option<U256> {
    if balance > gas_cost {
        Some(balance - gas_cost)
    } else {
        None
    }
}

/// Gas limit for a value transfer, estimated against the node with the
/// 21000 fallback on failure.
pub async fn estimate_transfer_gas(
    provider: &Provider<Http>,
    from: Address,
    to: Address,
    value: U256,
) -> U256 {
    let tx: TypedTransaction = TransactionRequest::new()
        .from(from)
        .to(to)
        .value(value)
        .into();
    match provider.estimate_gas(&tx, None).await {
        Ok(limit) => limit,
        Err(e) => {
            warn!(
                "Gas estimate failed, falling back to {}: {}",
                TRANSFER_GAS_LIMIT, e
            );
            U256::from(TRANSFER_GAS_LIMIT)
        }
    }
}

/// Gas limit for a contract call: buffered estimate on success, the
/// 100000 fallback otherwise.
pub async fn estimate_contract_gas(provider: &Provider<Http>, tx: &TypedTransaction) -> U256 {
    match provider.estimate_gas(tx, None).await {
        Ok(estimate) => {
            let limit = apply_buffer(estimate);
            info!(
                "Estimated gas: {} (using {} with {}% buffer)",
                estimate, limit, ESTIMATE_BUFFER_PERCENT
            );
            limit
        }
        Err(e) => {
            warn!(
                "Contract gas estimate failed, using default {}: {}",
                CONTRACT_GAS_FALLBACK, e
            );
            U256::from(CONTRACT_GAS_FALLBACK)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_adds_five_percent_rounded_up() {
        assert_eq!(apply_buffer(U256::from(100_000u64)), U256::from(105_000u64));
        // 21000 * 1.05 = 22050 exactly
        assert_eq!(apply_buffer(U256::from(21_000u64)), U256::from(22_050u64));
        // 33333 * 105 = 3499965 -> ceil(34999.65) = 35000
        assert_eq!(apply_buffer(U256::from(33_333u64)), U256::from(35_000u64));
    }

    #[test]
    fn sweep_amount_requires_strictly_positive_remainder() {
        // balance 10, cost 12: nothing to sweep
        assert_eq!(sweep_amount(U256::from(10u64), U256::from(12u64)), None);
        // equal: still nothing (amount would be zero)
        assert_eq!(sweep_amount(U256::from(12u64), U256::from(12u64)), None);
        assert_eq!(
            sweep_amount(U256::from(15u64), U256::from(12u64)),
            Some(U256::from(3u64))
        );
    }

    #[test]
    fn five_eth_minus_milli_fee() {
        // 5 ETH balance, 0.001 ETH fee -> 4.999 ETH swept
        let balance = U256::from(5u64) * U256::exp10(18);
        let cost = U256::exp10(15);
        let amount = sweep_amount(balance, cost).unwrap();
        assert_eq!(crate::units::fmt_eth(amount), "4.99900000");
    }

    #[test]
    fn cost_is_limit_times_price() {
        let cost = total_cost(U256::from(TRANSFER_GAS_LIMIT), default_gas_price());
        assert_eq!(cost, U256::from(21_000u64 * 20_000_000_000u64));
    }
}
