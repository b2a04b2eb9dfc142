use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use core_logic::{load_credentials, setup_logger, BatchRunner, PROBE_TIMEOUT};
use dotenv::dotenv;
use ethers::providers::Middleware;
use sepolia_zama::config::SepoliaConfig;
use sepolia_zama::tasks::FaucetClaimTask;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Submit a faucet claim from every wallet in a key file")]
struct Args {
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Private-key file override (defaults to the configured keys_file)
    #[arg(short, long)]
    file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = setup_logger();
    dotenv().ok();

    let args = Args::parse();
    let config = SepoliaConfig::load(&args.config)?;
    let contract = config.contract_address()?;

    info!("Starting Sepolia faucet claims...");
    info!("{}", "=".repeat(60));
    let ctx =
        core_logic::connect(&config.endpoints, Some(config.chain_id), PROBE_TIMEOUT).await?;

    // One code check up front; a missing contract means every claim
    // will revert, but the run proceeds and reports per item
    match ctx.provider.get_code(contract, None).await {
        Ok(code) if code.is_empty() => {
            warn!("No contract code at {}", config.contract)
        }
        Ok(_) => {}
        Err(e) => warn!("Could not check contract code: {}", e),
    }

    let path = args.file.unwrap_or_else(|| config.keys_file.clone());
    let keys = load_credentials(&path);
    if keys.is_empty() {
        bail!("No private keys found in {}", path);
    }
    info!("Found {} private keys\n", keys.len());

    let task = FaucetClaimTask::new(
        ctx.provider.clone(),
        ctx.chain_id,
        contract,
        config.min_balance_wei(),
    );
    BatchRunner::run(&task, &keys, Duration::from_millis(config.faucet_delay_ms)).await?;

    info!("✅ All claims processed");
    Ok(())
}
