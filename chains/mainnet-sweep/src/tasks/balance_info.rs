use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use core_logic::{checksum, erc20, units, BatchTask, Credential, ItemStatus, RunSummary};
use ethers::providers::{Http, Middleware, Provider};
use ethers::types::{Address, U256};
use tracing::{info, warn};

#[derive(Default)]
struct InfoTotals {
    total_balance: U256,
}

/// Per-address report: ETH balance and transaction count, both reads
/// issued together and awaited jointly.
pub struct BalanceInfoTask {
    provider: Provider<Http>,
    totals: Mutex<InfoTotals>,
}

impl BalanceInfoTask {
    pub fn new(provider: Provider<Http>) -> Self {
        Self {
            provider,
            totals: Mutex::new(InfoTotals::default()),
        }
    }

    async fn tx_count_or_zero(&self, address: Address) -> u64 {
        match self.provider.get_transaction_count(address, None).await {
            Ok(count) => count.as_u64(),
            Err(e) => {
                warn!("Failed to fetch tx count of {:?}: {}", address, e);
                0
            }
        }
    }
}

#[async_trait]
impl BatchTask for BalanceInfoTask {
    fn name(&self) -> &str {
        "eth-info"
    }

    async fn process(&self, item: &Credential, index: usize, total: usize) -> Result<ItemStatus> {
        let address = match item.parse_address() {
            Ok(a) => a,
            Err(e) => {
                warn!("[{}/{}] Skipping invalid address: {}", index + 1, total, e);
                return Ok(ItemStatus::Skipped);
            }
        };

        info!(
            "Processing address {}/{}: {}",
            index + 1,
            total,
            checksum(&address)
        );

        let (balance, tx_count) = tokio::join!(
            erc20::eth_balance_or_zero(&self.provider, address),
            self.tx_count_or_zero(address)
        );

        info!("  ETH balance: {:.6} ETH", units::wei_to_eth(balance));
        info!("  Transaction count: {}", tx_count);
        info!("{}", "─".repeat(50));

        self.totals.lock().unwrap().total_balance += balance;
        Ok(ItemStatus::Completed)
    }

    fn finish(&self, summary: &RunSummary) {
        let totals = self.totals.lock().unwrap();
        info!(
            "Checked {} addresses, total balance {} ETH",
            summary.succeeded,
            units::fmt_eth(totals.total_balance)
        );
    }
}
