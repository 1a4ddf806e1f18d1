//! Types for the RunBatch use case: input, error, per-record outcome and
//! the run report.

use crate::ports::record_source::DatasetError;
use crate::use_cases::shared::SplitError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::ops::Range;
use std::time::Duration;
use thiserror::Error;

/// Errors that abort a batch run
#[derive(Error, Debug)]
pub enum RunBatchError {
    #[error("Invalid record range: start {start} is after end {end}")]
    InvalidRange { start: usize, end: usize },

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Split(#[from] SplitError),

    #[error("Failed to write output: {0}")]
    Sink(#[from] std::io::Error),
}

/// Input for the RunBatch use case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunBatchInput {
    /// First record index (inclusive)
    pub start: usize,
    /// Last record index (exclusive)
    pub end: usize,
}

impl RunBatchInput {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// What happened to a single record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// Raw and final lines written
    Written,
    /// Generation produced nothing; neither log touched
    NoCandidates,
    /// Filter selected nothing; only the raw log was written
    NoSelections,
}

/// Outcome of processing one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordOutcome {
    pub index: usize,
    pub status: RecordStatus,
    pub raw_lines: usize,
    pub final_lines: usize,
    /// Fewer candidates than requested
    pub partial_candidates: bool,
    /// Selection count differed from K
    pub partial_selections: bool,
    /// Lines written verbatim because escape decoding failed
    pub decode_fallbacks: usize,
    pub elapsed: Duration,
}

impl RecordOutcome {
    pub(crate) fn new(index: usize, status: RecordStatus) -> Self {
        Self {
            index,
            status,
            raw_lines: 0,
            final_lines: 0,
            partial_candidates: false,
            partial_selections: false,
            decode_fallbacks: 0,
            elapsed: Duration::ZERO,
        }
    }
}

/// Summary of a batch run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    /// Effective first index after clamping
    pub start: usize,
    /// Effective end index (exclusive) after clamping and the record cap
    pub end: usize,
    pub processed: usize,
    pub written: usize,
    pub skipped_no_candidates: usize,
    pub skipped_no_selections: usize,
    pub partial_generations: usize,
    pub partial_selections: usize,
    pub raw_lines: usize,
    pub final_lines: usize,
    pub decode_fallbacks: usize,
    /// Stopped early because cancellation was requested
    pub cancelled: bool,
    pub elapsed: Duration,
}

impl BatchReport {
    pub(crate) fn new(range: &Range<usize>) -> Self {
        Self {
            started_at: Utc::now(),
            start: range.start,
            end: range.end,
            processed: 0,
            written: 0,
            skipped_no_candidates: 0,
            skipped_no_selections: 0,
            partial_generations: 0,
            partial_selections: 0,
            raw_lines: 0,
            final_lines: 0,
            decode_fallbacks: 0,
            cancelled: false,
            elapsed: Duration::ZERO,
        }
    }

    /// Number of records the run was planned to process
    pub fn planned(&self) -> usize {
        self.end - self.start
    }

    pub(crate) fn absorb(&mut self, outcome: &RecordOutcome) {
        self.processed += 1;
        match outcome.status {
            RecordStatus::Written => self.written += 1,
            RecordStatus::NoCandidates => self.skipped_no_candidates += 1,
            RecordStatus::NoSelections => self.skipped_no_selections += 1,
        }
        self.partial_generations += usize::from(outcome.partial_candidates);
        self.partial_selections += usize::from(outcome.partial_selections);
        self.raw_lines += outcome.raw_lines;
        self.final_lines += outcome.final_lines;
        self.decode_fallbacks += outcome.decode_fallbacks;
    }
}
