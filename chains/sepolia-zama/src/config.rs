use anyhow::Result;
use config::{Config, Environment, File};
use ethers::types::{Address, U256};
use serde::Deserialize;

/// Sepolia chain id; endpoint selection rejects anything else.
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

/// Sepolia tool configuration. Defaults reproduce the historical
/// hardcoded values; a TOML file or `ZAMA_*` environment variables
/// override them.
#[derive(Debug, Clone, Deserialize)]
pub struct SepoliaConfig {
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<String>,
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// The token/faucet contract address.
    #[serde(default = "default_contract")]
    pub contract: String,
    #[serde(default = "default_keys_file")]
    pub keys_file: String,
    #[serde(default = "default_token_delay_ms")]
    pub token_delay_ms: u64,
    #[serde(default = "default_faucet_delay_ms")]
    pub faucet_delay_ms: u64,
    /// Minimum spendable balance (in ETH) for a faucet claim attempt.
    #[serde(default = "default_min_balance_eth")]
    pub min_balance_eth: f64,
}

fn default_endpoints() -> Vec<String> {
    vec![
        "https://sepolia.infura.io/v3/0baf7b768440432a9ec455077c65384a".to_string(),
        "https://eth-sepolia.g.alchemy.com/v2/demo".to_string(),
        "https://rpc.sepolia.org".to_string(),
        "https://ethereum-sepolia.blockpi.network/v1/rpc/public".to_string(),
    ]
}

fn default_chain_id() -> u64 {
    SEPOLIA_CHAIN_ID
}

fn default_contract() -> String {
    "0x3edf60dd017ace33a0220f78741b5581c385a1ba".to_string()
}

fn default_keys_file() -> String {
    "evm_private.txt".to_string()
}

fn default_token_delay_ms() -> u64 {
    500
}

fn default_faucet_delay_ms() -> u64 {
    2000
}

fn default_min_balance_eth() -> f64 {
    0.001
}

impl Default for SepoliaConfig {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            chain_id: default_chain_id(),
            contract: default_contract(),
            keys_file: default_keys_file(),
            token_delay_ms: default_token_delay_ms(),
            faucet_delay_ms: default_faucet_delay_ms(),
            min_balance_eth: default_min_balance_eth(),
        }
    }
}

impl SepoliaConfig {
    pub fn load(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("ZAMA"))
            .build()?;

        settings.try_deserialize().map_err(|e| anyhow::anyhow!(e))
    }

    pub fn contract_address(&self) -> Result<Address> {
        self.contract
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid contract address '{}': {}", self.contract, e))
    }

    /// Minimum balance threshold in wei.
    pub fn min_balance_wei(&self) -> U256 {
        // f64 precision is ample here: the threshold is a coarse gate,
        // not an accounting value
        let wei = self.min_balance_eth * 1e18;
        U256::from(wei as u128)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_historical_constants() {
        let cfg = SepoliaConfig::default();
        assert_eq!(cfg.endpoints.len(), 4);
        assert_eq!(cfg.endpoints[2], "https://rpc.sepolia.org");
        assert_eq!(cfg.chain_id, 11_155_111);
        assert_eq!(cfg.contract, "0x3edf60dd017ace33a0220f78741b5581c385a1ba");
        assert_eq!(cfg.token_delay_ms, 500);
        assert_eq!(cfg.faucet_delay_ms, 2000);
        assert_eq!(cfg.min_balance_eth, 0.001);
    }

    #[test]
    fn min_balance_is_one_milli_eth_in_wei() {
        let cfg = SepoliaConfig::default();
        assert_eq!(cfg.min_balance_wei(), U256::exp10(15));
    }

    #[test]
    fn contract_parses() {
        assert!(SepoliaConfig::default().contract_address().is_ok());
    }
}
