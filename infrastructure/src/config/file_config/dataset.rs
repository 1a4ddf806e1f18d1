//! Dataset configuration from TOML (`[dataset]` section)

use atoss_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw dataset configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileDatasetConfig {
    /// JSON Lines or JSON array file
    pub path: Option<PathBuf>,
    /// Field holding the review sentence
    pub text_field: String,
    /// Field holding the quadruplet annotations
    pub labels_field: String,
}

impl Default for FileDatasetConfig {
    fn default() -> Self {
        Self {
            path: None,
            text_field: "text".to_string(),
            labels_field: "labels".to_string(),
        }
    }
}

impl FileDatasetConfig {
    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.path.is_none() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingDatasetPath,
                "dataset.path: no input dataset configured (use --input or [dataset].path)",
            ));
        }
        for (field, value) in [
            ("dataset.text_field", &self.text_field),
            ("dataset.labels_field", &self.labels_field),
        ] {
            if value.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyValue {
                        field: field.to_string(),
                    },
                    format!("{field}: field name cannot be empty"),
                ));
            }
        }

        issues
    }
}
