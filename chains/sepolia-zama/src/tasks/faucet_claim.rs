use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use core_logic::{
    abi, checksum, erc20, gas, tx, units, BatchTask, Credential, ItemStatus, RunSummary,
};
use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::Signer;
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, BlockNumber, TransactionRequest, U256};
use tracing::{error, info, warn};

#[derive(Default)]
struct ClaimTotals {
    claims: u64,
    gas_used: u64,
    fees: U256,
}

/// Submits the fixed faucet-claim calldata from every wallet with enough
/// ETH to cover the fee.
pub struct FaucetClaimTask {
    provider: Provider<Http>,
    chain_id: u64,
    contract: Address,
    min_balance: U256,
    totals: Mutex<ClaimTotals>,
}

impl FaucetClaimTask {
    pub fn new(
        provider: Provider<Http>,
        chain_id: u64,
        contract: Address,
        min_balance: U256,
    ) -> Self {
        Self {
            provider,
            chain_id,
            contract,
            min_balance,
            totals: Mutex::new(ClaimTotals::default()),
        }
    }
}

#[async_trait]
impl BatchTask for FaucetClaimTask {
    fn name(&self) -> &str {
        "faucet-claim"
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

        let balance = erc20::eth_balance_or_zero(&self.provider, address).await;
        info!("ETH balance: {} ETH", units::fmt_eth(balance));
        if balance <= self.min_balance {
            info!(
                "❌ Balance at or below the {} ETH minimum, skipping claim",
                units::wei_to_eth(self.min_balance)
            );
            return Ok(ItemStatus::Skipped);
        }

        let calldata = abi::encode_call_address(abi::SELECTOR_FAUCET_CLAIM, address);
        info!("Calldata: {}", calldata);

        let gas_price = gas::gas_price_or_default(&self.provider).await;
        let probe: TypedTransaction = TransactionRequest::new()
            .from(address)
            .to(self.contract)
            .value(U256::zero())
            .data(calldata.clone())
            .into();
        let gas_limit = gas::estimate_contract_gas(&self.provider, &probe).await;

        let estimated_fee = gas::total_cost(gas_limit, gas_price);
        info!("Estimated fee: {} ETH", units::fmt_eth(estimated_fee));
        if balance < estimated_fee {
            info!(
                "❌ Insufficient balance for fee: {} ETH < {} ETH",
                units::fmt_eth(balance),
                units::fmt_eth(estimated_fee)
            );
            return Ok(ItemStatus::Skipped);
        }

        let nonce = self
            .provider
            .get_transaction_count(address, Some(BlockNumber::Pending.into()))
            .await?;

        let request = TransactionRequest::new()
            .from(address)
            .to(self.contract)
            .value(U256::zero())
            .data(calldata)
            .gas(gas_limit)
            .gas_price(gas_price)
            .nonce(nonce);

        info!("Signing and sending claim...");
        match tx::send_legacy(self.provider.clone(), wallet, self.chain_id, request).await {
            Ok(outcome) => {
                let used = outcome.gas_used.as_u64();
                let limit = gas_limit.as_u64();
                info!("📋 Claim SUCCESS: {:?}", outcome.tx_hash);
                info!(
                    "Gas used: {}/{} ({:.2}%)",
                    used,
                    limit,
                    (used as f64 / limit as f64) * 100.0
                );
                info!("Actual fee: {} ETH", units::fmt_eth(outcome.fee));
                if let Some(block) = outcome.block_number {
                    info!("Block: {}", block);
                }

                let mut totals = self.totals.lock().unwrap();
                totals.claims += 1;
                totals.gas_used += used;
                totals.fees += outcome.fee;
                Ok(ItemStatus::Completed)
            }
            Err(failure) => {
                error!("❌ Claim failed: {}", failure.message);
                info!("🔍 {}", failure.kind.hint());
                Err(failure.into())
            }
        }
    }

    fn finish(&self, summary: &RunSummary) {
        let totals = self.totals.lock().unwrap();
        info!("📊 Claim summary:");
        info!("Wallets processed: {}", summary.processed);
        info!("Successful claims: {}", totals.claims);
        info!("Total gas used: {}", totals.gas_used);
        info!("Total fees spent: {} ETH", units::fmt_eth(totals.fees));
        if totals.claims > 0 {
            info!("Average gas per claim: {}", totals.gas_used / totals.claims);
            info!(
                "Average fee per claim: {:.8} ETH",
                units::wei_to_eth(totals.fees) / totals.claims as f64
            );
        }
    }
}
