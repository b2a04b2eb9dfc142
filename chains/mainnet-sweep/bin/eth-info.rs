use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use core_logic::{load_credentials, setup_logger, BatchRunner, PROBE_TIMEOUT};
use dotenv::dotenv;
use mainnet_sweep::config::MainnetConfig;
use mainnet_sweep::tasks::BalanceInfoTask;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "ETH balance and nonce report for a list of addresses")]
struct Args {
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Address file override (defaults to the configured address_file)
    #[arg(short, long)]
    file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = setup_logger();
    dotenv().ok();

    let args = Args::parse();
    let config = MainnetConfig::load(&args.config)?;

    info!("Fetching address info from Ethereum mainnet...");
    let ctx = core_logic::connect(&config.endpoints, None, PROBE_TIMEOUT).await?;

    let path = args.file.unwrap_or_else(|| config.address_file.clone());
    let addresses = load_credentials(&path);
    if addresses.is_empty() {
        bail!("No addresses found in {}", path);
    }
    info!("Found {} addresses\n", addresses.len());

    let task = BalanceInfoTask::new(ctx.provider);
    BatchRunner::run(
        &task,
        &addresses,
        Duration::from_millis(config.info_delay_ms),
    )
    .await?;

    info!("✅ Done");
    Ok(())
}
