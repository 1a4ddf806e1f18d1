//! Per-record phases of a batch run

use serde::{Deserialize, Serialize};

/// Stage a record is in while the batch runner processes it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitPhase {
    /// Reading the record from the dataset
    Fetching,
    /// Sampling candidate splits
    Generating,
    /// Appending candidates to the raw log
    LoggingRaw,
    /// Selecting the best candidates
    Filtering,
    /// Appending selections to the final log
    LoggingFinal,
}

impl SplitPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitPhase::Fetching => "fetching",
            SplitPhase::Generating => "generating",
            SplitPhase::LoggingRaw => "logging-raw",
            SplitPhase::Filtering => "filtering",
            SplitPhase::LoggingFinal => "logging-final",
        }
    }
}

impl std::fmt::Display for SplitPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
