use std::time::Duration;

use anyhow::Result;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::credentials::Credential;
use crate::summary::RunSummary;
use crate::traits::{BatchTask, ItemStatus};

/// Sequential batch driver: one credential at a time, in file order,
/// with a fixed delay between items. Ctrl+C stops the run between items
/// without losing the summary.
pub struct BatchRunner;

impl BatchRunner {
    pub async fn run<T: BatchTask>(
        task: &T,
        items: &[Credential],
        delay: Duration,
    ) -> Result<RunSummary> {
        let token = CancellationToken::new();
        let cancel = token.clone();
        tokio::spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    warn!("🛑 Received Ctrl+C, stopping after the current item...");
                    cancel.cancel();
                }
                Err(err) => {
                    error!("Unable to listen for shutdown signal: {}", err);
                }
            }
        });

        let total = items.len();
        let mut summary = RunSummary::new();
        info!("Starting {} over {} credentials...", task.name(), total);

        for (i, item) in items.iter().enumerate() {
            if token.is_cancelled() {
                warn!("Run cancelled after {} of {} items", i, total);
                break;
            }

            match task.process(item, i, total).await {
                Ok(ItemStatus::Completed) => summary.record_success(),
                Ok(ItemStatus::Skipped) => summary.record_skip(),
                Err(e) => {
                    error!("[{}/{}] FAILED: {:#}", i + 1, total, e);
                    summary.record_failure();
                }
            }

            // Rate-limit courtesy pause, skipped after the last item
            if i + 1 < total {
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = token.cancelled() => {}
                }
            }
        }

        summary.report(task.name());
        task.finish(&summary);
        Ok(summary)
    }
}
