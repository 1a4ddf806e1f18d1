//! Inference configuration from TOML (`[inference]` section)
//!
//! ```toml
//! [inference]
//! base_url = "https://api.together.xyz/v1"
//! model = "meta-llama/Llama-3.3-70B-Instruct-Turbo"
//! api_key_env = "TOGETHER_API_KEY"
//! timeout_secs = 120     # 0 disables the per-call timeout
//! max_retries = 3
//! retry_backoff_ms = 1000
//! ```

use atoss_application::RetryPolicy;
use atoss_domain::{ConfigIssue, ConfigIssueCode, Model};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Endpoint of the OpenAI-compatible chat completions API
pub const DEFAULT_BASE_URL: &str = "https://api.together.xyz/v1";

/// Environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "TOGETHER_API_KEY";

/// Raw inference configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileInferenceConfig {
    pub base_url: String,
    /// Model used for generation and filtering
    pub model: Model,
    /// Name of the environment variable that holds the API key
    pub api_key_env: String,
    /// Per-call timeout in seconds (0 = no timeout)
    pub timeout_secs: u64,
    /// Retries for transient failures
    pub max_retries: u32,
    /// Delay before the first retry, doubled for each further retry
    pub retry_backoff_ms: u64,
    /// Completion length limit sent with each request
    pub max_tokens: Option<u32>,
}

impl Default for FileInferenceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: Model::default(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: 120,
            max_retries: 3,
            retry_backoff_ms: 1000,
            max_tokens: None,
        }
    }
}

impl FileInferenceConfig {
    pub fn call_timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            initial_backoff: Duration::from_millis(self.retry_backoff_ms),
        }
    }

    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.model.is_blank() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyModelName,
                "inference.model: model name cannot be empty",
            ));
        }
        if self.base_url.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "inference.base_url".to_string(),
                },
                "inference.base_url: endpoint cannot be empty",
            ));
        }
        if self.max_tokens == Some(0) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroValue {
                    field: "inference.max_tokens".to_string(),
                },
                "inference.max_tokens: must be at least 1",
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timeout_disables_timeout() {
        let config = FileInferenceConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.call_timeout(), None);
        assert_eq!(
            FileInferenceConfig::default().call_timeout(),
            Some(Duration::from_secs(120))
        );
    }

    #[test]
    fn test_blank_model_is_error() {
        let config: FileInferenceConfig = toml::from_str("model = \"  \"").unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::EmptyModelName);
    }

    #[test]
    fn test_custom_model_passes_through() {
        let config: FileInferenceConfig =
            toml::from_str("model = \"mistralai/Mixtral-8x7B-Instruct-v0.1\"").unwrap();
        assert_eq!(
            config.model,
            Model::Custom("mistralai/Mixtral-8x7B-Instruct-v0.1".to_string())
        );
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_api_key_from_unset_variable() {
        let config = FileInferenceConfig {
            api_key_env: "ATOSS_TEST_SURELY_UNSET_KEY".to_string(),
            ..Default::default()
        };
        assert_eq!(config.api_key(), None);
    }
}
