//! Record source port
//!
//! Defines how the batch runner reads the input dataset.

use atoss_domain::Record;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading the dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// `line` is the 1-based file line for line-oriented sources
    #[error(
        "Invalid record {index}{}: {message}",
        .line.map(|line| format!(" (line {line})")).unwrap_or_default()
    )]
    InvalidRecord {
        index: usize,
        line: Option<usize>,
        message: String,
    },

    #[error("Record index {index} out of range (dataset has {len} records)")]
    OutOfRange { index: usize, len: usize },
}

/// An indexed, finite collection of records
pub trait RecordSource: Send + Sync {
    /// Human-readable identifier, used in logs
    fn name(&self) -> &str;

    /// Total number of records
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch the record at `index`
    fn record(&self, index: usize) -> Result<Record, DatasetError>;
}
