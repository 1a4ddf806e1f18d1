//! LLM Gateway port
//!
//! Defines the interface for communicating with the inference provider.

use async_trait::async_trait;
use atoss_domain::{Message, Model};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Timeout")]
    Timeout,

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Server error (status {status}): {message}")]
    Server { status: u16, message: String },

    #[error("Request failed (status {status}): {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Model returned an empty completion")]
    EmptyCompletion,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Whether retrying the same request may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayError::ConnectionError(_)
                | GatewayError::Timeout
                | GatewayError::RateLimited(_)
                | GatewayError::Server { .. }
        )
    }
}

/// One chat-completion request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: Model,
    pub messages: Vec<Message>,
    pub temperature: f32,
}

impl CompletionRequest {
    /// Single user message at the given temperature
    pub fn user(model: Model, prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            model,
            messages: vec![Message::user(prompt)],
            temperature,
        }
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer reaches the model.
/// Implementations (adapters) live in the infrastructure layer. Each call
/// returns one free-text completion; no latency or determinism is assumed.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send the messages and return the completion text
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(GatewayError::Timeout.is_retryable());
        assert!(GatewayError::ConnectionError("reset".into()).is_retryable());
        assert!(GatewayError::RateLimited("slow down".into()).is_retryable());
        assert!(
            GatewayError::Server {
                status: 503,
                message: "unavailable".into()
            }
            .is_retryable()
        );
        assert!(
            !GatewayError::RequestFailed {
                status: 401,
                message: "bad key".into()
            }
            .is_retryable()
        );
        assert!(!GatewayError::EmptyCompletion.is_retryable());
        assert!(!GatewayError::InvalidResponse("no choices".into()).is_retryable());
    }

    #[test]
    fn test_user_request() {
        let request = CompletionRequest::user(Model::default(), "split this", 1.0);
        assert_eq!(request.messages, vec![Message::user("split this")]);
        assert_eq!(request.temperature, 1.0);
    }
}
