use anyhow::Result;
use config::{Config, Environment, File};
use ethers::types::Address;
use serde::Deserialize;

/// Mainnet tool configuration. Every field has a default matching the
/// historical hardcoded values, so the tools run with no config file at
/// all; a TOML file or `SWEEP_*` environment variables override them.
#[derive(Debug, Clone, Deserialize)]
pub struct MainnetConfig {
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<String>,
    /// Destination of every sweep.
    #[serde(default = "default_target_address")]
    pub target_address: String,
    /// Private keys, one per line.
    #[serde(default = "default_keys_file")]
    pub keys_file: String,
    /// Plain addresses, one per line (eth-info input).
    #[serde(default = "default_address_file")]
    pub address_file: String,
    #[serde(default = "default_sweep_delay_ms")]
    pub sweep_delay_ms: u64,
    #[serde(default = "default_info_delay_ms")]
    pub info_delay_ms: u64,
}

fn default_endpoints() -> Vec<String> {
    vec![
        "https://ethereum.blockpi.network/v1/rpc/public".to_string(),
        "https://eth-mainnet.g.alchemy.com/v2/demo".to_string(),
        "https://rpc.ankr.com/eth".to_string(),
    ]
}

fn default_target_address() -> String {
    "0x220511f4fd6d898125f79aa8d4cb91bffe9df6db".to_string()
}

fn default_keys_file() -> String {
    "evm_private.txt".to_string()
}

fn default_address_file() -> String {
    "EVM.txt".to_string()
}

fn default_sweep_delay_ms() -> u64 {
    500
}

fn default_info_delay_ms() -> u64 {
    100
}

impl Default for MainnetConfig {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            target_address: default_target_address(),
            keys_file: default_keys_file(),
            address_file: default_address_file(),
            sweep_delay_ms: default_sweep_delay_ms(),
            info_delay_ms: default_info_delay_ms(),
        }
    }
}

impl MainnetConfig {
    pub fn load(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("SWEEP"))
            .build()?;

        settings.try_deserialize().map_err(|e| anyhow::anyhow!(e))
    }

    pub fn target(&self) -> Result<Address> {
        self.target_address
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid target_address '{}': {}", self.target_address, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_historical_constants() {
        let cfg = MainnetConfig::default();
        assert_eq!(cfg.endpoints.len(), 3);
        assert_eq!(
            cfg.endpoints[0],
            "https://ethereum.blockpi.network/v1/rpc/public"
        );
        assert_eq!(
            cfg.target_address,
            "0x220511f4fd6d898125f79aa8d4cb91bffe9df6db"
        );
        assert_eq!(cfg.keys_file, "evm_private.txt");
        assert_eq!(cfg.address_file, "EVM.txt");
        assert_eq!(cfg.sweep_delay_ms, 500);
        assert_eq!(cfg.info_delay_ms, 100);
    }

    #[test]
    fn default_target_parses_as_an_address() {
        assert!(MainnetConfig::default().target().is_ok());
    }

    #[test]
    fn toml_overrides_take_precedence() {
        let toml = r#"
            target_address = "0x0000000000000000000000000000000000000001"
            sweep_delay_ms = 250
        "#;
        let cfg: MainnetConfig = Config::builder()
            .add_source(File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(cfg.sweep_delay_ms, 250);
        assert_eq!(
            cfg.target_address,
            "0x0000000000000000000000000000000000000001"
        );
        // untouched fields keep their defaults
        assert_eq!(cfg.endpoints.len(), 3);
    }
}
