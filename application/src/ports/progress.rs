//! Progress notification port
//!
//! Defines the interface for reporting progress during a batch run.

use crate::use_cases::run_batch::{BatchReport, RecordOutcome};
use atoss_domain::SplitPhase;

/// Callback for progress updates during a batch run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain lines, nothing).
pub trait BatchProgressNotifier: Send + Sync {
    /// Called once the record range is known
    fn on_run_start(&self, total_records: usize);

    /// Called before a record is fetched
    fn on_record_start(&self, _index: usize) {}

    /// Called when a record enters a new phase
    fn on_phase(&self, _index: usize, _phase: SplitPhase) {}

    /// Called when a record is done (written or skipped)
    fn on_record_complete(&self, outcome: &RecordOutcome);

    /// Called when the run ends, including cancelled runs
    fn on_run_complete(&self, report: &BatchReport);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl BatchProgressNotifier for NoProgress {
    fn on_run_start(&self, _total_records: usize) {}
    fn on_record_complete(&self, _outcome: &RecordOutcome) {}
    fn on_run_complete(&self, _report: &BatchReport) {}
}
