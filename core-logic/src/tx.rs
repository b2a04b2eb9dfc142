//! Legacy transaction submission with receipt-aware failure
//! classification.

use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, MiddlewareError, Provider, ProviderError};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{TransactionRequest, TxHash, U256, U64};
use thiserror::Error;
use tracing::info;

use crate::classify::{self, FailureKind};

/// A submitted and mined transaction.
#[derive(Debug, Clone)]
pub struct TxOutcome {
    pub tx_hash: TxHash,
    pub block_number: Option<U64>,
    pub gas_used: U256,
    pub fee: U256,
}

/// A per-item transaction failure. Never fatal to the run.
#[derive(Error, Debug)]
#[error("transaction failed ({kind}): {message}")]
pub struct TxFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl TxFailure {
    fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn classify_provider_error(e: &ProviderError) -> FailureKind {
    if let ProviderError::JsonRpcClientError(inner) = e {
        if let Some(rpc) = inner.as_error_response() {
            return classify::from_rpc_error(rpc.code, &rpc.message);
        }
    }
    classify::from_message(&e.to_string())
}

/// Sign and submit a legacy (gas-price) transaction, then wait for its
/// receipt. The request must carry gas limit, gas price and nonce; the
/// wallet is bound to the run's chain id here.
pub async fn send_legacy(
    provider: Provider<Http>,
    wallet: LocalWallet,
    chain_id: u64,
    tx: TransactionRequest,
) -> Result<TxOutcome, TxFailure> {
    let gas_price = tx.gas_price.unwrap_or_default();
    let client = SignerMiddleware::new(provider, wallet.with_chain_id(chain_id));

    let pending = client.send_transaction(tx, None).await.map_err(|e| {
        let kind = match e.as_error_response() {
            Some(rpc) => classify::from_rpc_error(rpc.code, &rpc.message),
            None => classify::from_message(&e.to_string()),
        };
        TxFailure::new(kind, e.to_string())
    })?;

    let tx_hash = pending.tx_hash();
    info!("Transaction submitted: {:?}", tx_hash);

    let receipt = pending
        .await
        .map_err(|e| TxFailure::new(classify_provider_error(&e), e.to_string()))?
        .ok_or_else(|| {
            TxFailure::new(FailureKind::Other, "transaction dropped without a receipt")
        })?;

    // Receipt status is the structural revert signal
    if receipt.status == Some(U64::zero()) {
        return Err(TxFailure::new(
            FailureKind::Reverted,
            format!("transaction {:?} reverted on-chain", receipt.transaction_hash),
        ));
    }

    let gas_used = receipt.gas_used.unwrap_or_default();
    Ok(TxOutcome {
        tx_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
        gas_used,
        fee: gas_used * gas_price,
    })
}
