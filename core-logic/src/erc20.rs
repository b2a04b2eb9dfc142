//! Read-only ERC-20 queries built on the raw selector codec.
//!
//! Each metadata field is fetched with its own call and its own fallback
//! default, so a token with a broken `name()` still reports a symbol and
//! a balance.

use ethers::providers::{Http, Middleware, Provider};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes, TransactionRequest, U256};
use tracing::warn;

use crate::{abi, units};

/// Token metadata with per-field fallbacks.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Default for TokenInfo {
    fn default() -> Self {
        Self {
            name: "Unknown".to_string(),
            symbol: "UNK".to_string(),
            decimals: 18,
        }
    }
}

/// A holder's token balance, raw and scaled.
#[derive(Debug, Clone, Default)]
pub struct TokenBalance {
    pub raw: U256,
    pub formatted: f64,
}

async fn read_call(
    provider: &Provider<Http>,
    contract: Address,
    data: Bytes,
) -> anyhow::Result<Bytes> {
    let tx: TypedTransaction = TransactionRequest::new().to(contract).data(data).into();
    Ok(provider.call(&tx, None).await?)
}

/// Fetch name, symbol and decimals with three independent calls. Any
/// failed or empty read keeps that field's default.
pub async fn token_info(provider: &Provider<Http>, contract: Address) -> TokenInfo {
    let mut info = TokenInfo::default();

    match read_call(provider, contract, abi::encode_call(abi::SELECTOR_NAME)).await {
        Ok(data) => {
            if let Some(name) = abi::decode_string(&data) {
                info.name = name;
            }
        }
        Err(e) => warn!("name() call failed: {}", e),
    }

    match read_call(provider, contract, abi::encode_call(abi::SELECTOR_SYMBOL)).await {
        Ok(data) => {
            if let Some(symbol) = abi::decode_string(&data) {
                info.symbol = symbol;
            }
        }
        Err(e) => warn!("symbol() call failed: {}", e),
    }

    match read_call(provider, contract, abi::encode_call(abi::SELECTOR_DECIMALS)).await {
        Ok(data) => {
            if let Some(decimals) = abi::decode_u8(&data) {
                info.decimals = decimals;
            }
        }
        Err(e) => warn!("decimals() call failed, assuming 18: {}", e),
    }

    info
}

/// `balanceOf(holder)`. An empty `0x` result or a failed call both read
/// as a zero balance, never as an error.
pub async fn token_balance(
    provider: &Provider<Http>,
    contract: Address,
    holder: Address,
    decimals: u8,
) -> TokenBalance {
    let calldata = abi::encode_call_address(abi::SELECTOR_BALANCE_OF, holder);
    let raw = match read_call(provider, contract, calldata).await {
        Ok(data) => abi::decode_uint256(&data),
        Err(e) => {
            warn!("balanceOf({:?}) failed, treating as zero: {}", holder, e);
            U256::zero()
        }
    };

    TokenBalance {
        raw,
        formatted: units::to_f64(raw, decimals as u32),
    }
}

/// ETH balance with the same fail-soft contract: an RPC error logs and
/// reads as zero funds.
pub async fn eth_balance_or_zero(provider: &Provider<Http>, address: Address) -> U256 {
    match provider.get_balance(address, None).await {
        Ok(balance) => balance,
        Err(e) => {
            warn!("Failed to fetch balance of {:?}: {}", address, e);
            U256::zero()
        }
    }
}
