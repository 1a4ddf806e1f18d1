//! Split configuration from TOML (`[split]` section)

use atoss_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Accepted sampling temperature range
const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;

/// Raw split configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSplitConfig {
    /// Candidates generated per record
    pub candidates: usize,
    /// Candidates kept by the filter (K)
    pub select: usize,
    pub generation_temperature: f32,
    pub filter_temperature: f32,
    /// Generation calls in flight at once
    pub max_concurrency: usize,
}

impl Default for FileSplitConfig {
    fn default() -> Self {
        Self {
            candidates: 10,
            select: 2,
            generation_temperature: 1.0,
            filter_temperature: 0.0,
            max_concurrency: 1,
        }
    }
}

impl FileSplitConfig {
    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (field, value) in [
            ("split.candidates", self.candidates),
            ("split.select", self.select),
            ("split.max_concurrency", self.max_concurrency),
        ] {
            if value == 0 {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::ZeroValue {
                        field: field.to_string(),
                    },
                    format!("{field}: must be at least 1"),
                ));
            }
        }

        if self.select > self.candidates {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::SelectExceedsCandidates {
                    select: self.select,
                    candidates: self.candidates,
                },
                format!(
                    "split.select ({}) cannot exceed split.candidates ({})",
                    self.select, self.candidates
                ),
            ));
        }

        for (field, value) in [
            ("split.generation_temperature", self.generation_temperature),
            ("split.filter_temperature", self.filter_temperature),
        ] {
            if !TEMPERATURE_RANGE.contains(&value) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::TemperatureOutOfRange {
                        field: field.to_string(),
                        value,
                    },
                    format!("{field}: {value} is outside 0.0..=2.0"),
                ));
            }
        }

        if self.max_concurrency > self.candidates && self.candidates > 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ConcurrencyExceedsCandidates {
                    concurrency: self.max_concurrency,
                    candidates: self.candidates,
                },
                format!(
                    "split.max_concurrency ({}) is larger than split.candidates ({}); extra slots stay idle",
                    self.max_concurrency, self.candidates
                ),
            ));
        }

        issues
    }
}
