//! Batch configuration from TOML (`[batch]` section)

use atoss_application::DEFAULT_RECORD_CAP;
use atoss_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw batch configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileBatchConfig {
    /// Maximum records processed per run; wins over a larger slice
    pub record_cap: usize,
    /// Log of every generated candidate (appended)
    pub raw_output: PathBuf,
    /// Log of the selected candidates (appended)
    pub final_output: PathBuf,
}

impl Default for FileBatchConfig {
    fn default() -> Self {
        Self {
            record_cap: DEFAULT_RECORD_CAP,
            raw_output: PathBuf::from("raw_output.txt"),
            final_output: PathBuf::from("output.txt"),
        }
    }
}

impl FileBatchConfig {
    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.record_cap == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroValue {
                    field: "batch.record_cap".to_string(),
                },
                "batch.record_cap: must be at least 1",
            ));
        }
        if self.raw_output == self.final_output {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::SameOutputFile,
                format!(
                    "batch.raw_output and batch.final_output both point at {}",
                    self.raw_output.display()
                ),
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_output_file_is_error() {
        let config: FileBatchConfig =
            toml::from_str("raw_output = \"out.txt\"\nfinal_output = \"out.txt\"").unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::SameOutputFile);
    }

    #[test]
    fn test_zero_cap_is_error() {
        let config = FileBatchConfig {
            record_cap: 0,
            ..Default::default()
        };
        assert!(config.validate()[0].is_error());
    }
}
