//! RPC endpoint selection.
//!
//! One pass over an ordered candidate list: probe each with a block
//! height request under a fixed timeout, take the first that answers,
//! keep it for the rest of the run. A later RPC failure is a per-item
//! matter; there is no re-selection.

use std::future::Future;
use std::time::Duration;

use anyhow::{anyhow, Result};
use ethers::providers::{Http, Middleware, Provider};
use tracing::{info, warn};

use crate::error::NetworkError;

/// Default connectivity probe timeout.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// The selected connection, fixed for the remainder of the run.
#[derive(Debug, Clone)]
pub struct RpcContext {
    pub provider: Provider<Http>,
    pub endpoint: String,
    pub chain_id: u64,
    pub block_number: u64,
}

/// Walk `urls` in order and return the first probe success with its
/// index. Later candidates are never touched once one answers.
pub async fn first_reachable<T, F, Fut>(
    urls: &[String],
    mut probe: F,
) -> Result<(usize, T), NetworkError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    for (index, url) in urls.iter().enumerate() {
        info!("Trying RPC endpoint: {}", url);
        match probe(url.clone()).await {
            Ok(value) => return Ok((index, value)),
            Err(e) => {
                warn!("❌ Endpoint failed: {} - {}", url, e);
            }
        }
    }
    Err(NetworkError::NoUsableEndpoint {
        attempted: urls.len(),
    })
}

/// Select a working endpoint and return a connected context.
///
/// Each candidate gets one `eth_blockNumber` probe raced against
/// `probe_timeout`, then an `eth_chainId` read; when `expected_chain_id`
/// is set a mismatching endpoint is rejected like an unreachable one.
pub async fn connect(
    urls: &[String],
    expected_chain_id: Option<u64>,
    probe_timeout: Duration,
) -> Result<RpcContext, NetworkError> {
    let timeout_secs = probe_timeout.as_secs();
    let (_, ctx) = first_reachable(urls, |url| async move {
        let provider = Provider::<Http>::try_from(url.as_str())
            .map_err(|e| anyhow!("invalid endpoint URL: {}", e))?;

        let block_number = tokio::time::timeout(probe_timeout, provider.get_block_number())
            .await
            .map_err(|_| {
                anyhow!(NetworkError::ProbeTimeout {
                    url: url.clone(),
                    timeout_secs,
                })
            })??;

        let chain_id = tokio::time::timeout(probe_timeout, provider.get_chainid())
            .await
            .map_err(|_| {
                anyhow!(NetworkError::ProbeTimeout {
                    url: url.clone(),
                    timeout_secs,
                })
            })??
            .as_u64();

        if let Some(expected) = expected_chain_id {
            if chain_id != expected {
                return Err(anyhow!(NetworkError::WrongChain {
                    url: url.clone(),
                    expected,
                    actual: chain_id,
                }));
            }
        }

        info!(
            "✅ Connected to {} (block {}, chain id {})",
            url, block_number, chain_id
        );

        Ok(RpcContext {
            provider,
            endpoint: url,
            chain_id,
            block_number: block_number.as_u64(),
        })
    })
    .await?;

    Ok(ctx)
}
