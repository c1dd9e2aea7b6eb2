//! Outcome bookkeeping

use super::types::{BatchReport, UnresolvedReference};
use crate::core::catalog::OperationOutcome;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Tally {
    success_count: usize,
    failure_count: usize,
    failures: Vec<OperationOutcome>,
    unresolved: Vec<UnresolvedReference>,
    skipped_rows: usize,
}

/// Collects outcomes from concurrently settling tasks
///
/// All updates go through one lock, so counts and the failure list never
/// disagree.
#[derive(Debug)]
pub struct ReportAggregator {
    run_id: Uuid,
    started_at: DateTime<Utc>,
    tally: Mutex<Tally>,
}

impl Default for ReportAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportAggregator {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            tally: Mutex::new(Tally::default()),
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn record(&self, outcome: OperationOutcome) {
        let mut tally = self.tally.lock();
        if outcome.succeeded {
            tally.success_count += 1;
        } else {
            tally.failure_count += 1;
            tally.failures.push(outcome);
        }
    }

    pub fn record_unresolved(&self, entry: UnresolvedReference) {
        self.tally.lock().unresolved.push(entry);
    }

    pub fn record_skipped(&self, rows: usize) {
        self.tally.lock().skipped_rows += rows;
    }

    /// Updates recorded so far, successful or not
    pub fn recorded(&self) -> usize {
        let tally = self.tally.lock();
        tally.success_count + tally.failure_count
    }

    /// Build the report; call only once every submitted task has settled
    pub fn finalize(self) -> BatchReport {
        let tally = self.tally.into_inner();
        BatchReport {
            run_id: self.run_id,
            started_at: self.started_at,
            finished_at: Utc::now(),
            success_count: tally.success_count,
            failure_count: tally.failure_count,
            failures: tally.failures,
            unresolved: tally.unresolved,
            skipped_rows: tally.skipped_rows,
        }
    }
}
