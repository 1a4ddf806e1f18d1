//! Shared utilities for use cases.
//!
//! Contains the per-call inference policy (timeout plus bounded retry) and
//! the error type shared by candidate generation and filtering.

use crate::config::RetryPolicy;
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use atoss_domain::SplitPhase;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Errors raised while generating or filtering candidates
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Inference failed while {phase}: {source}")]
    Gateway {
        phase: SplitPhase,
        #[source]
        source: GatewayError,
    },
}

impl SplitError {
    pub(crate) fn gateway(phase: SplitPhase) -> impl FnOnce(GatewayError) -> Self {
        move |source| SplitError::Gateway { phase, source }
    }

    /// Phase the failure happened in
    pub fn phase(&self) -> SplitPhase {
        match self {
            SplitError::Gateway { phase, .. } => *phase,
        }
    }
}

/// Run one completion with an optional timeout, retrying transient failures.
///
/// Non-retryable errors and the last retryable error are returned as-is.
pub(crate) async fn complete_with_policy<G: LlmGateway + ?Sized>(
    gateway: &G,
    request: &CompletionRequest,
    retry: &RetryPolicy,
    timeout: Option<Duration>,
) -> Result<String, GatewayError> {
    let mut retries = 0;
    loop {
        let result = match timeout {
            Some(limit) => tokio::time::timeout(limit, gateway.complete(request))
                .await
                .unwrap_or(Err(GatewayError::Timeout)),
            None => gateway.complete(request).await,
        };

        match result {
            Ok(text) => return Ok(text),
            Err(e) if e.is_retryable() && retries < retry.max_retries => {
                retries += 1;
                let delay = retry.backoff(retries);
                warn!(
                    "Inference call failed ({}), retry {}/{} after {}ms",
                    e,
                    retries,
                    retry.max_retries,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use atoss_domain::Model;
    use std::sync::Mutex;

    /// Replays a fixed list of results, one per call
    struct ReplayGateway {
        results: Mutex<Vec<Result<String, GatewayError>>>,
        calls: Mutex<usize>,
    }

    impl ReplayGateway {
        fn new(mut results: Vec<Result<String, GatewayError>>) -> Self {
            results.reverse();
            Self {
                results: Mutex::new(results),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl LlmGateway for ReplayGateway {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, GatewayError> {
            *self.calls.lock().unwrap() += 1;
            self.results
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Err(GatewayError::Other("exhausted".into())))
        }
    }

    struct SlowGateway;

    #[async_trait]
    impl LlmGateway for SlowGateway {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, GatewayError> {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok("late".into())
        }
    }

    fn request() -> CompletionRequest {
        CompletionRequest::user(Model::default(), "prompt", 1.0)
    }

    fn fast_retry(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            initial_backoff: Duration::ZERO,
        }
    }

    fn server_error() -> GatewayError {
        GatewayError::Server {
            status: 503,
            message: "unavailable".into(),
        }
    }

    #[tokio::test]
    async fn test_retries_transient_failures() {
        let gateway = ReplayGateway::new(vec![
            Err(server_error()),
            Err(GatewayError::Timeout),
            Ok("done".into()),
        ]);
        let text = complete_with_policy(&gateway, &request(), &fast_retry(3), None)
            .await
            .unwrap();
        assert_eq!(text, "done");
        assert_eq!(gateway.calls(), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let gateway = ReplayGateway::new(vec![
            Err(server_error()),
            Err(server_error()),
            Err(server_error()),
        ]);
        let err = complete_with_policy(&gateway, &request(), &fast_retry(2), None)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Server { status: 503, .. }));
        assert_eq!(gateway.calls(), 3);
    }

    #[tokio::test]
    async fn test_does_not_retry_client_errors() {
        let gateway = ReplayGateway::new(vec![
            Err(GatewayError::RequestFailed {
                status: 401,
                message: "invalid api key".into(),
            }),
            Ok("never".into()),
        ]);
        let err = complete_with_policy(&gateway, &request(), &fast_retry(3), None)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::RequestFailed { status: 401, .. }));
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_maps_to_gateway_timeout() {
        let err = complete_with_policy(
            &SlowGateway,
            &request(),
            &RetryPolicy::none(),
            Some(Duration::from_secs(1)),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, GatewayError::Timeout));
    }

    #[test]
    fn test_split_error_keeps_phase() {
        let err = SplitError::gateway(SplitPhase::Filtering)(GatewayError::Timeout);
        assert_eq!(err.phase(), SplitPhase::Filtering);
        assert_eq!(err.to_string(), "Inference failed while filtering: Timeout");
    }
}
