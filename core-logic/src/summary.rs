//! Run-level accounting. Write-only during the loop, printed once at the
//! end, gone when the process exits.

use std::time::Instant;

use tracing::info;

/// Outcome counters for one batch run.
#[derive(Debug)]
pub struct RunSummary {
    pub processed: u64,
    pub succeeded: u64,
    pub skipped: u64,
    pub failed: u64,
    started: Instant,
}

impl RunSummary {
    pub fn new() -> Self {
        Self {
            processed: 0,
            succeeded: 0,
            skipped: 0,
            failed: 0,
            started: Instant::now(),
        }
    }

    pub fn record_success(&mut self) {
        self.processed += 1;
        self.succeeded += 1;
    }

    pub fn record_skip(&mut self) {
        self.processed += 1;
        self.skipped += 1;
    }

    pub fn record_failure(&mut self) {
        self.processed += 1;
        self.failed += 1;
    }

    pub fn success_rate(&self) -> f64 {
        let attempted = self.succeeded + self.failed;
        if attempted == 0 {
            return 0.0;
        }
        (self.succeeded as f64 / attempted as f64) * 100.0
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Final summary line for the console and log file.
    pub fn report(&self, task_name: &str) {
        info!("{}", "=".repeat(60));
        info!(
            "{} done in {:.1}s | Processed: {} | Success: {} | Skipped: {} | Failed: {} | Rate: {:.2}%",
            task_name,
            self.elapsed_secs(),
            self.processed,
            self.succeeded,
            self.skipped,
            self.failed,
            self.success_rate()
        );
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_add_up() {
        let mut s = RunSummary::new();
        s.record_success();
        s.record_success();
        s.record_skip();
        s.record_failure();

        assert_eq!(s.processed, 4);
        assert_eq!(s.succeeded, 2);
        assert_eq!(s.skipped, 1);
        assert_eq!(s.failed, 1);
    }

    #[test]
    fn skips_do_not_dilute_success_rate() {
        let mut s = RunSummary::new();
        s.record_success();
        s.record_skip();
        s.record_skip();
        s.record_failure();
        // 1 success out of 2 attempts
        assert_eq!(s.success_rate(), 50.0);
    }

    #[test]
    fn empty_run_has_zero_rate() {
        assert_eq!(RunSummary::new().success_rate(), 0.0);
    }
}
