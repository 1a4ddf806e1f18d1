//! Split parameters: per-record generation and filtering control.
//!
//! [`SplitParams`] groups the static parameters used by
//! [`GenerateCandidatesUseCase`](crate::use_cases::generate_candidates::GenerateCandidatesUseCase)
//! and [`FilterCandidatesUseCase`](crate::use_cases::filter_candidates::FilterCandidatesUseCase).

use atoss_domain::Model;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bounded exponential backoff for transient gateway failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Retries after the first attempt (0 = fail on first error).
    pub max_retries: u32,
    /// Delay before the first retry; doubled for every further retry.
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// No retries at all
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::ZERO,
        }
    }

    /// Delay before retry number `retry` (1-based): 1s, 2s, 4s, ...
    pub fn backoff(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(16);
        self.initial_backoff.saturating_mul(1 << exponent)
    }
}

/// Generation and filtering parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitParams {
    /// Model used for both generation and filtering.
    pub model: Model,
    /// Candidates sampled per record.
    pub candidate_count: usize,
    /// Candidates the filter must keep (K).
    pub select_count: usize,
    /// Sampling temperature for generation; high for diversity.
    pub generation_temperature: f32,
    /// Sampling temperature for filtering; zero for determinism.
    pub filter_temperature: f32,
    /// Generation calls in flight at once (1 = sequential).
    pub max_concurrency: usize,
    /// Per-call timeout.
    pub call_timeout: Option<Duration>,
    /// Retry policy for transient failures.
    pub retry: RetryPolicy,
}

impl Default for SplitParams {
    fn default() -> Self {
        Self {
            model: Model::default(),
            candidate_count: 10,
            select_count: 2,
            generation_temperature: 1.0,
            filter_temperature: 0.0,
            max_concurrency: 1,
            call_timeout: Some(Duration::from_secs(120)),
            retry: RetryPolicy::default(),
        }
    }
}

impl SplitParams {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_candidate_count(mut self, count: usize) -> Self {
        self.candidate_count = count;
        self
    }

    pub fn with_select_count(mut self, count: usize) -> Self {
        self.select_count = count;
        self
    }

    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = SplitParams::default();
        assert_eq!(params.candidate_count, 10);
        assert_eq!(params.select_count, 2);
        assert_eq!(params.generation_temperature, 1.0);
        assert_eq!(params.filter_temperature, 0.0);
        assert_eq!(params.max_concurrency, 1);
        assert_eq!(params.call_timeout, Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_builder() {
        let params = SplitParams::default()
            .with_candidate_count(5)
            .with_select_count(1)
            .with_max_concurrency(4)
            .with_call_timeout(None)
            .with_retry(RetryPolicy::none());
        assert_eq!(params.candidate_count, 5);
        assert_eq!(params.select_count, 1);
        assert_eq!(params.max_concurrency, 4);
        assert!(params.call_timeout.is_none());
        assert_eq!(params.retry.max_retries, 0);
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_secs(1));
        assert_eq!(policy.backoff(2), Duration::from_secs(2));
        assert_eq!(policy.backoff(3), Duration::from_secs(4));
    }
}
