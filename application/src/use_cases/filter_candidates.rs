//! Filter Candidates use case
//!
//! Asks the model to keep the best K of the generated candidates.

use crate::config::SplitParams;
use crate::ports::llm_gateway::{CompletionRequest, LlmGateway};
use crate::use_cases::shared::{SplitError, complete_with_policy};
use atoss_domain::{Collected, Record, SplitPhase, SplitPromptTemplate, parse_selections};
use std::sync::Arc;
use tracing::{debug, warn};

/// Use case for selecting the best candidates
pub struct FilterCandidatesUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    params: SplitParams,
}

impl<G: LlmGateway + 'static> FilterCandidatesUseCase<G> {
    pub fn new(gateway: Arc<G>, params: SplitParams) -> Self {
        Self { gateway, params }
    }

    /// Select `k` of `candidates` for `record`
    ///
    /// Every non-blank response line is returned; a count other than `k`
    /// yields `Partial` rather than being truncated or padded.
    pub async fn execute(
        &self,
        record: &Record,
        candidates: &[String],
        k: usize,
    ) -> Result<Collected<String>, SplitError> {
        let prompt =
            SplitPromptTemplate::filter(record.sentence(), record.aspects(), candidates, k);
        let request = CompletionRequest::user(
            self.params.model.clone(),
            prompt,
            self.params.filter_temperature,
        );

        let response = complete_with_policy(
            self.gateway.as_ref(),
            &request,
            &self.params.retry,
            self.params.call_timeout,
        )
        .await
        .map_err(SplitError::gateway(SplitPhase::Filtering))?;

        let selections = parse_selections(&response);
        debug!("Selections for {:?}: {:#?}", record.sentence(), selections);

        let outcome = Collected::from_items(selections, k);
        if !outcome.is_complete() {
            warn!("Filter returned {} selections, expected {}", outcome.len(), k);
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use async_trait::async_trait;
    use atoss_domain::{Aspects, Quadruplet};
    use std::sync::Mutex;

    struct FixedGateway {
        response: String,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl FixedGateway {
        fn new(response: &str) -> Self {
            Self {
                response: response.to_string(),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmGateway for FixedGateway {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(self.response.clone())
        }
    }

    fn record() -> Record {
        Record::new(
            "The food was great but the service was slow.",
            Aspects::new(vec![
                Quadruplet::new("food", "food quality", "positive", "great"),
                Quadruplet::new("service", "service general", "negative", "slow"),
            ]),
        )
        .unwrap()
    }

    fn candidates() -> Vec<String> {
        (0..10).map(|i| format!("Candidate {i}.")).collect()
    }

    #[tokio::test]
    async fn test_exactly_k_lines_is_complete() {
        let gateway = Arc::new(FixedGateway::new(
            "\n  The food was great. The service was slow.  \n\nThe food was great. But the service was slow.\n",
        ));
        let use_case = FilterCandidatesUseCase::new(gateway.clone(), SplitParams::default());

        let outcome = use_case.execute(&record(), &candidates(), 2).await.unwrap();

        assert_eq!(
            outcome,
            Collected::Complete {
                items: vec![
                    "The food was great. The service was slow.".to_string(),
                    "The food was great. But the service was slow.".to_string(),
                ],
            }
        );

        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].temperature, 0.0);
        let prompt = &requests[0].messages[0].content;
        assert!(prompt.contains("Select EXACTLY 2 BEST"));
        for candidate in candidates() {
            assert!(prompt.contains(&candidate));
        }
    }

    #[tokio::test]
    async fn test_extra_lines_are_kept_as_partial() {
        let gateway = Arc::new(FixedGateway::new("one\ntwo\nthree"));
        let use_case = FilterCandidatesUseCase::new(gateway, SplitParams::default());

        let outcome = use_case.execute(&record(), &candidates(), 2).await.unwrap();

        assert_eq!(
            outcome,
            Collected::Partial {
                items: vec!["one".into(), "two".into(), "three".into()],
                expected: 2,
            }
        );
    }

    #[tokio::test]
    async fn test_blank_response_is_empty() {
        let gateway = Arc::new(FixedGateway::new("  \n\n"));
        let use_case = FilterCandidatesUseCase::new(gateway, SplitParams::default());

        let outcome = use_case.execute(&record(), &candidates(), 2).await.unwrap();
        assert!(outcome.is_empty());
        assert!(!outcome.is_complete());
    }
}
