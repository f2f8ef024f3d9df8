//! Status - per-cycle counters of a consumer loop

use super::consumer_loop::CycleOutcome;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    pub idle: u64,
    pub processed: u64,
    pub rejected: u64,
    pub ignored: u64,
    pub failed: u64,
    pub source_errors: u64,
}

impl CycleStats {
    pub fn record(&mut self, outcome: CycleOutcome) {
        let counter = match outcome {
            CycleOutcome::Idle => &mut self.idle,
            CycleOutcome::Processed => &mut self.processed,
            CycleOutcome::Rejected => &mut self.rejected,
            CycleOutcome::Ignored => &mut self.ignored,
            CycleOutcome::Failed => &mut self.failed,
            CycleOutcome::SourceError => &mut self.source_errors,
        };
        *counter += 1;
    }

    /// Cycles that pulled a request from the inbox.
    pub fn fetched(&self) -> u64 {
        self.processed + self.rejected + self.ignored + self.failed
    }
}
