//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod batch;
mod dataset;
mod inference;
mod split;

pub use batch::FileBatchConfig;
pub use dataset::FileDatasetConfig;
pub use inference::FileInferenceConfig;
pub use split::FileSplitConfig;

use atoss_application::{BatchParams, SplitParams};
use atoss_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Inference endpoint, model and call policy
    pub inference: FileInferenceConfig,
    /// Candidate counts, temperatures and fan-out
    pub split: FileSplitConfig,
    /// Record cap and output files
    pub batch: FileBatchConfig,
    /// Input dataset location and field names
    pub dataset: FileDatasetConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. Errors make the
    /// configuration unusable; warnings are reported and the run continues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.inference.validate());
        issues.extend(self.split.validate());
        issues.extend(self.batch.validate());
        issues.extend(self.dataset.validate());
        issues
    }

    /// Parameters for the generation and filtering use cases
    pub fn split_params(&self) -> SplitParams {
        SplitParams {
            model: self.inference.model.clone(),
            candidate_count: self.split.candidates,
            select_count: self.split.select,
            generation_temperature: self.split.generation_temperature,
            filter_temperature: self.split.filter_temperature,
            max_concurrency: self.split.max_concurrency,
            call_timeout: self.inference.call_timeout(),
            retry: self.inference.retry_policy(),
        }
    }

    /// Parameters for the batch runner
    pub fn batch_params(&self) -> BatchParams {
        BatchParams::default().with_record_cap(self.batch.record_cap)
    }
}
