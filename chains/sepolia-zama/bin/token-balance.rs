use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use core_logic::{erc20, load_credentials, setup_logger, BatchRunner, PROBE_TIMEOUT};
use dotenv::dotenv;
use sepolia_zama::config::SepoliaConfig;
use sepolia_zama::tasks::TokenBalanceTask;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Token balance report for a list of wallets on Sepolia")]
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

    info!("🪙 Querying token balances on Sepolia...");
    let ctx =
        core_logic::connect(&config.endpoints, Some(config.chain_id), PROBE_TIMEOUT).await?;

    info!("📋 Fetching token metadata...");
    let token = erc20::token_info(&ctx.provider, contract).await;
    info!("Token name: {}", token.name);
    info!("Token symbol: {}", token.symbol);
    info!("Decimals: {}", token.decimals);
    info!("Contract: {}\n", config.contract);

    let path = args.file.unwrap_or_else(|| config.keys_file.clone());
    let keys = load_credentials(&path);
    if keys.is_empty() {
        bail!("No private keys found in {}", path);
    }
    info!("Found {} private keys\n", keys.len());

    let task = TokenBalanceTask::new(ctx.provider, contract, token);
    BatchRunner::run(&task, &keys, Duration::from_millis(config.token_delay_ms)).await?;

    info!("✅ Token balance check complete");
    Ok(())
}
