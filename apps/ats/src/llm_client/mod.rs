//! LLM Client: the single point of entry for all text-generation calls in the engine.
//!
//! ARCHITECTURAL RULE: scoring and optimization stages never talk HTTP directly.
//! They depend on the `TextGenerator` trait; `LlmClient` is the production
//! implementation speaking the OpenAI-compatible chat completions protocol.
//!
//! No retries happen here. Every failure is returned as a typed `LlmError` and
//! `LlmError::is_retryable` tells an outer transport whether a retry makes sense.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod json_recovery;
pub mod pricing;
pub mod prompts;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited by provider: {0}")]
    RateLimited(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl LlmError {
    /// Whether a transport-level retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::RateLimited(_) | LlmError::Timeout(_) => true,
            LlmError::Api { status, .. } => *status >= 500,
            LlmError::Http(e) => e.is_connect() || e.is_timeout(),
            LlmError::Parse(_) | LlmError::EmptyContent => false,
        }
    }
}

/// The provider seam: `generate(systemPrompt, userPrompt, model, temperature) -> text`.
///
/// Carried by the engine as `Arc<dyn TextGenerator>` so tests can script responses.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        system: &str,
        prompt: &str,
        model: &str,
        temperature: f32,
    ) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice, if the provider returned any non-blank content.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// HTTP client for any OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    endpoint: String,
    timeout: Duration,
}

impl LlmClient {
    pub fn new(
        api_key: impl Into<String>,
        api_base: &str,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: chat_completions_url(api_base),
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Makes one chat completion call and returns the full response object.
    pub async fn call(
        &self,
        system: &str,
        prompt: &str,
        model: &str,
        temperature: f32,
    ) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model,
            temperature,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let started = Instant::now();
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("LLM API returned {}: {}", status, message);
            if status.as_u16() == 429 {
                return Err(LlmError::RateLimited(message));
            }
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = serde_json::from_str(&body)?;
        let elapsed = started.elapsed();

        match chat.usage {
            Some(usage) => info!(
                "LLM call succeeded: model={}, latency_ms={}, prompt_tokens={}, completion_tokens={}, est_cost_usd={:.6}",
                model,
                elapsed.as_millis(),
                usage.prompt_tokens,
                usage.completion_tokens,
                pricing::estimate_cost(model, &usage)
            ),
            None => debug!(
                "LLM call succeeded: model={}, latency_ms={} (no usage reported)",
                model,
                elapsed.as_millis()
            ),
        }

        Ok(chat)
    }

    fn classify(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            LlmError::Timeout(self.timeout)
        } else {
            LlmError::Http(err)
        }
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(
        &self,
        system: &str,
        prompt: &str,
        model: &str,
        temperature: f32,
    ) -> Result<String, LlmError> {
        let response = self.call(system, prompt, model, temperature).await?;
        response
            .text()
            .map(str::to_owned)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Accepts `https://host/v1`, `https://host/v1/` or a full `.../chat/completions` URL.
fn chat_completions_url(api_base: &str) -> String {
    let base = api_base.trim().trim_end_matches('/');
    if base.ends_with("/chat/completions") {
        base.to_string()
    } else {
        format!("{base}/chat/completions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OK_BODY: &str = r#"{
        "id": "chatcmpl-1",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": "{\"score\": 81}"}}],
        "usage": {"prompt_tokens": 120, "completion_tokens": 30, "total_tokens": 150}
    }"#;

    fn client_for(server: &mockito::ServerGuard) -> LlmClient {
        LlmClient::new(
            "test-key",
            &format!("{}/v1", server.url()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_chat_completions_url_appends_path() {
        assert_eq!(
            chat_completions_url("https://api.deepseek.com/v1"),
            "https://api.deepseek.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_chat_completions_url_trims_trailing_slash() {
        assert_eq!(
            chat_completions_url("https://api.openai.com/v1/"),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_chat_completions_url_keeps_full_endpoint() {
        assert_eq!(
            chat_completions_url("https://api.openai.com/v1/chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_retryable_classification() {
        assert!(LlmError::RateLimited("slow down".into()).is_retryable());
        assert!(LlmError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(LlmError::Api {
            status: 503,
            message: "overloaded".into()
        }
        .is_retryable());
        assert!(!LlmError::Api {
            status: 401,
            message: "bad key".into()
        }
        .is_retryable());
        assert!(!LlmError::EmptyContent.is_retryable());
    }

    #[test]
    fn test_response_text_skips_blank_content() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "   "}}]}"#,
        )
        .unwrap();
        assert!(response.text().is_none());
        assert!(response.usage.is_none());
    }

    #[tokio::test]
    async fn test_generate_returns_first_choice_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(OK_BODY)
            .create_async()
            .await;

        let client = client_for(&server);
        let text = client
            .generate("system", "prompt", "gpt-3.5-turbo", 0.1)
            .await
            .unwrap();

        assert_eq!(text, "{\"score\": 81}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_call_exposes_usage() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(OK_BODY)
            .create_async()
            .await;

        let response = client_for(&server)
            .call("system", "prompt", "gpt-4", 0.0)
            .await
            .unwrap();
        let usage = response.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 120);
        assert_eq!(usage.total_tokens, 150);
    }

    #[tokio::test]
    async fn test_rate_limit_maps_to_rate_limited() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(429)
            .with_body(r#"{"error": {"message": "Rate limit reached"}}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .generate("s", "p", "m", 0.1)
            .await
            .unwrap_err();
        match err {
            LlmError::RateLimited(message) => assert_eq!(message, "Rate limit reached"),
            other => panic!("expected RateLimited, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_auth_failure_surfaces_provider_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(401)
            .with_body(r#"{"error": {"message": "Incorrect API key provided"}}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .generate("s", "p", "m", 0.1)
            .await
            .unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_slow_provider_maps_to_timeout() {
        // Accepts the connection and never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let timeout = Duration::from_millis(100);
        let client = LlmClient::new("test-key", &format!("http://{addr}/v1"), timeout).unwrap();
        let err = client.generate("s", "p", "m", 0.1).await.unwrap_err();
        match err {
            LlmError::Timeout(after) => assert_eq!(after, timeout),
            other => panic!("expected Timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_empty_content() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .generate("s", "p", "m", 0.1)
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }
}
