//! Batch parameters: limits for one run of the batch runner.

use serde::{Deserialize, Serialize};

/// Records processed per run unless configured otherwise.
pub const DEFAULT_RECORD_CAP: usize = 200;

/// Batch run limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchParams {
    /// Hard cap on records processed in one run.
    ///
    /// The cap always wins: a requested slice larger than the cap is cut
    /// to its first `record_cap` records and the rest is left untouched.
    pub record_cap: usize,
    /// Log a `Processed n/len` line every this many records.
    pub report_every: usize,
}

impl Default for BatchParams {
    fn default() -> Self {
        Self {
            record_cap: DEFAULT_RECORD_CAP,
            report_every: 100,
        }
    }
}

impl BatchParams {
    pub fn with_record_cap(mut self, cap: usize) -> Self {
        self.record_cap = cap;
        self
    }
}
