//! OpenAI-compatible chat completions adapter
//!
//! Talks to any endpoint exposing `POST {base_url}/chat/completions` with
//! bearer authentication (Together, OpenAI, vLLM, llama.cpp server, ...).
//! One request per call; retries and timeouts are applied by the use cases.

use async_trait::async_trait;
use atoss_application::{CompletionRequest, GatewayError, LlmGateway};
use atoss_domain::Message;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Gateway for OpenAI-compatible chat completion APIs
pub struct OpenAiCompatibleGateway {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    max_tokens: Option<u32>,
}

impl OpenAiCompatibleGateway {
    /// Create a gateway for `base_url` (e.g. `https://api.together.xyz/v1`)
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key,
            max_tokens: None,
        })
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatibleGateway {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let body = ChatRequest {
            model: request.model.as_str(),
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: self.max_tokens,
        };

        let mut builder = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            warn!("Inference API returned {}", status);
            return Err(status_error(status, &text));
        }

        parse_completion(&text)
    }
}

fn transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if error.is_connect() || error.is_request() || error.is_body() {
        GatewayError::ConnectionError(error.to_string())
    } else {
        GatewayError::Other(error.to_string())
    }
}

/// Map a non-success status to an error, preferring the API's own message
fn status_error(status: StatusCode, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    if status == StatusCode::TOO_MANY_REQUESTS {
        GatewayError::RateLimited(message)
    } else if status.is_server_error() {
        GatewayError::Server {
            status: status.as_u16(),
            message,
        }
    } else {
        GatewayError::RequestFailed {
            status: status.as_u16(),
            message,
        }
    }
}

/// Extract the first choice's text; a null content counts as blank text
fn parse_completion(body: &str) -> Result<String, GatewayError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

    if let Some(usage) = &response.usage {
        debug!(
            "Completion usage: prompt_tokens={}, completion_tokens={}",
            usage.prompt_tokens, usage.completion_tokens
        );
    }

    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.unwrap_or_default())
        .ok_or(GatewayError::EmptyCompletion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use atoss_domain::Model;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one HTTP response and hand back the raw request
    async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/v1", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())?
                        })
                        .unwrap_or(0);
                    if request.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {status} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).to_string()
        });

        (base_url, handle)
    }

    fn request() -> CompletionRequest {
        CompletionRequest::user(Model::default(), "split this", 1.0)
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let gateway = OpenAiCompatibleGateway::new("https://api.together.xyz/v1/", None).unwrap();
        assert_eq!(
            gateway.endpoint(),
            "https://api.together.xyz/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let messages = vec![Message::user("hi")];
        let body = ChatRequest {
            model: "m",
            messages: &messages,
            temperature: 0.0,
            max_tokens: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "m",
                "messages": [{"role": "user", "content": "hi"}],
                "temperature": 0.0
            })
        );
    }

    #[test]
    fn test_parse_completion() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"A. B."}}],"usage":{"prompt_tokens":10,"completion_tokens":3}}"#;
        assert_eq!(parse_completion(body).unwrap(), "A. B.");

        let null_content = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        assert_eq!(parse_completion(null_content).unwrap(), "");

        assert!(matches!(
            parse_completion(r#"{"choices":[]}"#),
            Err(GatewayError::EmptyCompletion)
        ));
        assert!(matches!(
            parse_completion("<html>"),
            Err(GatewayError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_status_classification() {
        let api_error = r#"{"error":{"message":"slow down"}}"#;
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, api_error),
            GatewayError::RateLimited(m) if m == "slow down"
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, "upstream"),
            GatewayError::Server { status: 502, message } if message == "upstream"
        ));
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, r#"{"error":{"message":"invalid key"}}"#),
            GatewayError::RequestFailed { status: 401, message } if message == "invalid key"
        ));
    }

    #[tokio::test]
    async fn test_complete_round_trip() {
        let (base_url, server) = serve_once(
            200,
            r#"{"choices":[{"message":{"role":"assistant","content":"The food was great. The service was slow."}}]}"#,
        )
        .await;
        let gateway = OpenAiCompatibleGateway::new(&base_url, Some("secret".into()))
            .unwrap()
            .with_max_tokens(Some(256));

        let text = gateway.complete(&request()).await.unwrap();
        assert_eq!(text, "The food was great. The service was slow.");

        let raw_request = server.await.unwrap();
        assert!(raw_request.starts_with("POST /v1/chat/completions"));
        assert!(raw_request.to_lowercase().contains("authorization: bearer secret"));
        assert!(raw_request.contains("\"max_tokens\":256"));
        assert!(raw_request.contains("meta-llama/Llama-3.3-70B-Instruct-Turbo"));
    }

    #[tokio::test]
    async fn test_server_error_is_retryable() {
        let (base_url, server) = serve_once(503, r#"{"error":{"message":"overloaded"}}"#).await;
        let gateway = OpenAiCompatibleGateway::new(&base_url, None).unwrap();

        let err = gateway.complete(&request()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Server { status: 503, .. }));
        assert!(err.is_retryable());

        let raw_request = server.await.unwrap();
        assert!(!raw_request.to_lowercase().contains("authorization"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_connection_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gateway = OpenAiCompatibleGateway::new(&format!("http://{addr}/v1"), None).unwrap();
        let err = gateway.complete(&request()).await.unwrap_err();
        assert!(matches!(err, GatewayError::ConnectionError(_)));
    }
}
