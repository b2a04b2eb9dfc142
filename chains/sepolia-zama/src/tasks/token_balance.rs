use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use core_logic::{
    checksum, erc20, units, BatchTask, Credential, ItemStatus, RunSummary, TokenInfo,
};
use ethers::providers::{Http, Provider};
use ethers::signers::Signer;
use ethers::types::{Address, U256};
use tracing::{info, warn};

#[derive(Default)]
struct TokenTotals {
    total_eth: U256,
    total_tokens: f64,
    holders: u64,
    /// Redacted key preview + checksum address of wallets holding none.
    empty_wallets: Vec<(String, String)>,
}

/// Per-wallet ETH and token balance report against one token contract.
pub struct TokenBalanceTask {
    provider: Provider<Http>,
    contract: Address,
    token: TokenInfo,
    totals: Mutex<TokenTotals>,
}

impl TokenBalanceTask {
    pub fn new(provider: Provider<Http>, contract: Address, token: TokenInfo) -> Self {
        Self {
            provider,
            contract,
            token,
            totals: Mutex::new(TokenTotals::default()),
        }
    }
}

#[async_trait]
impl BatchTask for TokenBalanceTask {
    fn name(&self) -> &str {
        "token-balance"
    }

    async fn process(&self, item: &Credential, index: usize, total: usize) -> Result<ItemStatus> {
        info!("{}", "=".repeat(40));
        info!("Wallet [{}/{}]: {}", index + 1, total, item.preview());

        let wallet = match item.derive_wallet() {
            Ok(w) => w,
            Err(e) => {
                warn!("Invalid private key, skipping: {}", e);
                return Ok(ItemStatus::Skipped);
            }
        };
        let address = wallet.address();
        info!("Address: {}", checksum(&address));

        let eth_balance = erc20::eth_balance_or_zero(&self.provider, address).await;
        info!("ETH balance: {} ETH", units::fmt_eth(eth_balance));

        let token_balance = erc20::token_balance(
            &self.provider,
            self.contract,
            address,
            self.token.decimals,
        )
        .await;
        info!(
            "{} balance: {:.6} {} (raw: {})",
            self.token.symbol, token_balance.formatted, self.token.symbol, token_balance.raw
        );

        let mut totals = self.totals.lock().unwrap();
        totals.total_eth += eth_balance;
        totals.total_tokens += token_balance.formatted;
        if token_balance.formatted > 0.0 {
            totals.holders += 1;
        } else {
            info!("⚪ No {} in this wallet", self.token.symbol);
            totals
                .empty_wallets
                .push((item.preview(), checksum(&address)));
        }

        Ok(ItemStatus::Completed)
    }

    fn finish(&self, summary: &RunSummary) {
        let totals = self.totals.lock().unwrap();
        let symbol = &self.token.symbol;

        info!("📊 Token report:");
        info!("Wallets checked: {}", summary.processed);
        info!("Wallets holding {}: {}", symbol, totals.holders);
        info!("Wallets without {}: {}", symbol, totals.empty_wallets.len());
        info!("Total ETH balance: {} ETH", units::fmt_eth(totals.total_eth));
        info!("Total {} balance: {:.6} {}", symbol, totals.total_tokens, symbol);

        if summary.processed > 0 {
            info!(
                "Average ETH per wallet: {:.8} ETH",
                units::wei_to_eth(totals.total_eth) / summary.processed as f64
            );
            info!(
                "Average {} per wallet: {:.6} {}",
                symbol,
                totals.total_tokens / summary.processed as f64,
                symbol
            );
        }
        if totals.holders > 0 {
            info!(
                "💰 Average {} per holder: {:.6} {}",
                symbol,
                totals.total_tokens / totals.holders as f64,
                symbol
            );
        }

        if totals.empty_wallets.is_empty() {
            info!("🎉 Every wallet holds {}!", symbol);
        } else {
            info!("⚪ Wallets without {} ({}):", symbol, totals.empty_wallets.len());
            for (i, (key_preview, address)) in totals.empty_wallets.iter().enumerate() {
                info!("{}. {} ({})", i + 1, key_preview, address);
            }
        }
    }
}
