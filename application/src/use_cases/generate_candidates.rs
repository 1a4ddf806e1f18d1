//! Generate Candidates use case
//!
//! Samples several candidate splits for one record.

use crate::config::SplitParams;
use crate::ports::llm_gateway::{CompletionRequest, LlmGateway};
use crate::use_cases::shared::{SplitError, complete_with_policy};
use atoss_domain::{Collected, Record, SplitPhase, SplitPromptTemplate, single_line};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::{debug, warn};

/// Use case for sampling candidate splits
///
/// Issues `candidate_count` identical generation calls. Up to
/// `max_concurrency` of them are in flight at once; results are collected in
/// call order regardless of which call finishes first.
pub struct GenerateCandidatesUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    params: SplitParams,
}

impl<G: LlmGateway + 'static> GenerateCandidatesUseCase<G> {
    pub fn new(gateway: Arc<G>, params: SplitParams) -> Self {
        Self { gateway, params }
    }

    /// Generate single-line candidates for `record`
    ///
    /// Blank completions are dropped, so the result is `Partial` whenever
    /// fewer than `candidate_count` usable candidates came back. A dropped
    /// completion never reaches the raw log or the filter prompt, which means
    /// the raw log can hold fewer than `candidate_count` lines per record.
    pub async fn execute(&self, record: &Record) -> Result<Collected<String>, SplitError> {
        let expected = self.params.candidate_count;
        let prompt = SplitPromptTemplate::generation(record.sentence(), record.aspects());
        let request = CompletionRequest::user(
            self.params.model.clone(),
            prompt,
            self.params.generation_temperature,
        );

        let completions: Vec<String> = stream::iter(0..expected)
            .map(|_| {
                complete_with_policy(
                    self.gateway.as_ref(),
                    &request,
                    &self.params.retry,
                    self.params.call_timeout,
                )
            })
            .buffered(self.params.max_concurrency.max(1))
            .try_collect()
            .await
            .map_err(SplitError::gateway(SplitPhase::Generating))?;

        let candidates: Vec<String> = completions
            .iter()
            .map(|completion| single_line(completion))
            .filter(|candidate| !candidate.is_empty())
            .collect();

        debug!("Candidates for {:?}: {:#?}", record.sentence(), candidates);

        let outcome = Collected::from_items(candidates, expected);
        if !outcome.is_complete() {
            warn!(
                "Expected {} candidates, collected {}",
                expected,
                outcome.len()
            );
        }
        Ok(outcome)
    }
}
