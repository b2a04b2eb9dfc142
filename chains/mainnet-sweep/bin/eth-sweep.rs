use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use core_logic::{gas, load_credentials, setup_logger, BatchRunner, PROBE_TIMEOUT};
use dotenv::dotenv;
use mainnet_sweep::config::MainnetConfig;
use mainnet_sweep::tasks::SweepTask;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sweep residual ETH from many wallets to one target")]
struct Args {
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Private-key file override (defaults to the configured keys_file)
    #[arg(short, long)]
    file: Option<String>,

    /// Target address override
    #[arg(short, long)]
    target: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = setup_logger();
    dotenv().ok();

    let args = Args::parse();
    let mut config = MainnetConfig::load(&args.config)?;
    if let Some(target) = args.target {
        config.target_address = target;
    }
    let target = config.target()?;

    info!("Starting ETH balance sweep...");
    let ctx = core_logic::connect(&config.endpoints, None, PROBE_TIMEOUT).await?;

    // One gas price for the whole run
    let gas_price = gas::gas_price_or_default(&ctx.provider).await;

    let path = args.file.unwrap_or_else(|| config.keys_file.clone());
    let keys = load_credentials(&path);
    if keys.is_empty() {
        bail!("No private keys found in {}", path);
    }
    info!("Found {} private keys", keys.len());
    info!("Target address: {}\n", config.target_address);

    let task = SweepTask::new(ctx.provider.clone(), ctx.chain_id, target, gas_price);
    BatchRunner::run(&task, &keys, Duration::from_millis(config.sweep_delay_ms)).await?;

    info!("✅ Sweep complete");
    Ok(())
}
