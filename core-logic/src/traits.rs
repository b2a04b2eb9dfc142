use anyhow::Result;
use async_trait::async_trait;

use crate::credentials::Credential;
use crate::summary::RunSummary;

/// What a task did with one credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    /// The item's work completed (query answered, transfer mined, ...).
    Completed,
    /// Preconditions not met (no funds, invalid entry); not an error.
    Skipped,
}

/// One unit of per-credential work, driven sequentially by the batch
/// runner. Implementations own their provider handle, their config and
/// any domain totals they want to report at the end.
#[async_trait]
pub trait BatchTask: Send + Sync {
    /// Task name used in log lines and the final summary.
    fn name(&self) -> &str;

    /// Process a single credential. An `Err` counts as a per-item
    /// failure and the run moves on to the next item.
    async fn process(&self, item: &Credential, index: usize, total: usize) -> Result<ItemStatus>;

    /// Report domain totals after the loop. Default: nothing extra.
    fn finish(&self, _summary: &RunSummary) {}
}
