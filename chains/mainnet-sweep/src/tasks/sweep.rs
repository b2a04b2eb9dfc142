use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use core_logic::{
    checksum, erc20, gas, tx, units, BatchTask, Credential, ItemStatus, RunSummary,
};
use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::Signer;
use ethers::types::{Address, BlockNumber, TransactionRequest, U256};
use tracing::{error, info, warn};

#[derive(Default)]
struct SweepTotals {
    valid_addresses: u64,
    total_balance: U256,
    transfers: u64,
    total_transferred: U256,
}

/// Sweeps each wallet's residual ETH (balance minus estimated fee) to
/// one fixed target address.
pub struct SweepTask {
    provider: Provider<Http>,
    chain_id: u64,
    target: Address,
    /// Fetched once at startup and reused for every item.
    gas_price: U256,
    totals: Mutex<SweepTotals>,
}

impl SweepTask {
    pub fn new(provider: Provider<Http>, chain_id: u64, target: Address, gas_price: U256) -> Self {
        Self {
            provider,
            chain_id,
            target,
            gas_price,
            totals: Mutex::new(SweepTotals::default()),
        }
    }
}

#[async_trait]
impl BatchTask for SweepTask {
    fn name(&self) -> &str {
        "eth-sweep"
    }

    async fn process(&self, item: &Credential, index: usize, total: usize) -> Result<ItemStatus> {
        info!(
            "[{}/{}] Processing key: {}",
            index + 1,
            total,
            item.preview()
        );

        let wallet = match item.derive_wallet() {
            Ok(w) => w,
            Err(e) => {
                warn!("Invalid private key, skipping: {}", e);
                return Ok(ItemStatus::Skipped);
            }
        };
        let address = wallet.address();
        info!("Address: {}", checksum(&address));
        self.totals.lock().unwrap().valid_addresses += 1;

        let balance = erc20::eth_balance_or_zero(&self.provider, address).await;
        info!("ETH balance: {} ETH", units::fmt_eth(balance));
        if balance.is_zero() {
            info!("📭 No balance");
            return Ok(ItemStatus::Skipped);
        }
        self.totals.lock().unwrap().total_balance += balance;

        // Fee estimated against a zero-value probe, as the amount is not
        // known until the fee is subtracted.
        let probe_limit =
            gas::estimate_transfer_gas(&self.provider, address, self.target, U256::zero()).await;
        let gas_cost = gas::total_cost(probe_limit, self.gas_price);
        info!("Estimated gas cost: {} ETH", units::fmt_eth(gas_cost));

        let amount = match gas::sweep_amount(balance, gas_cost) {
            Some(amount) => amount,
            None => {
                info!(
                    "❌ Balance cannot cover gas (balance: {} ETH, gas: {} ETH)",
                    units::fmt_eth(balance),
                    units::fmt_eth(gas_cost)
                );
                return Ok(ItemStatus::Skipped);
            }
        };

        info!(
            "💰 Sweeping {} ETH to {}",
            units::fmt_eth(amount),
            checksum(&self.target)
        );

        // The transaction's own limit is re-estimated at the real amount
        let gas_limit =
            gas::estimate_transfer_gas(&self.provider, address, self.target, amount).await;
        let nonce = self
            .provider
            .get_transaction_count(address, Some(BlockNumber::Pending.into()))
            .await?;

        let request = TransactionRequest::new()
            .from(address)
            .to(self.target)
            .value(amount)
            .gas(gas_limit)
            .gas_price(self.gas_price)
            .nonce(nonce);

        match tx::send_legacy(self.provider.clone(), wallet, self.chain_id, request).await {
            Ok(outcome) => {
                info!("✅ Transfer SUCCESS");
                info!("Transaction hash: {:?}", outcome.tx_hash);
                info!("Gas used: {}", outcome.gas_used);
                if let Some(block) = outcome.block_number {
                    info!("Block: {}", block);
                }
                let mut totals = self.totals.lock().unwrap();
                totals.transfers += 1;
                totals.total_transferred += amount;
                Ok(ItemStatus::Completed)
            }
            Err(failure) => {
                error!("❌ Transfer failed: {}", failure.message);
                info!("🔍 {}", failure.kind.hint());
                Err(failure.into())
            }
        }
    }

    fn finish(&self, _summary: &RunSummary) {
        let totals = self.totals.lock().unwrap();
        info!("=== Sweep summary ===");
        info!("Valid addresses: {}", totals.valid_addresses);
        info!("Total balance seen: {} ETH", units::fmt_eth(totals.total_balance));
        info!("Successful transfers: {}", totals.transfers);
        info!(
            "Total transferred: {} ETH",
            units::fmt_eth(totals.total_transferred)
        );
        info!("Target address: {}", checksum(&self.target));
    }
}
