//! Unit conversion helpers on top of `ethers::utils::format_units`.

use ethers::types::U256;
use ethers::utils::format_units;

/// Convert a raw amount to a float given a decimal scale. Parse failures
/// read as zero, same as everywhere else in the tools.
pub fn to_f64(amount: U256, decimals: u32) -> f64 {
    format_units(amount, decimals)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Wei → ETH as a float (18 decimals).
pub fn wei_to_eth(wei: U256) -> f64 {
    to_f64(wei, 18)
}

/// Wei → ETH rendered with 8 decimal places, the display precision used
/// in every report line.
pub fn fmt_eth(wei: U256) -> String {
    format!("{:.8}", wei_to_eth(wei))
}

/// Wei → gwei as a float, for gas price log lines.
pub fn wei_to_gwei(wei: U256) -> f64 {
    to_f64(wei, 9)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_eth() {
        let wei = U256::exp10(18);
        assert_eq!(wei_to_eth(wei), 1.0);
        assert_eq!(fmt_eth(wei), "1.00000000");
    }

    #[test]
    fn small_amounts_keep_precision() {
        // 0.001 ETH
        let wei = U256::exp10(15);
        assert_eq!(fmt_eth(wei), "0.00100000");
    }

    #[test]
    fn gwei_scale() {
        let twenty_gwei = U256::from(20u64) * U256::exp10(9);
        assert_eq!(wei_to_gwei(twenty_gwei), 20.0);
    }

    #[test]
    fn zero() {
        assert_eq!(wei_to_eth(U256::zero()), 0.0);
    }
}
