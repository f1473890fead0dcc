//! Model client for text generation using the Gemini `generateContent` API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

/// Default Gemini API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model used for all three operations.
pub const DEFAULT_MODEL_NAME: &str = "gemini-2.5-flash-lite";

/// Model client errors.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Failed to parse response: {0}")]
    ParseError(String),
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },
    #[error("Model returned no candidates")]
    EmptyResponse,
}

impl ModelError {
    /// HTTP status reported by the provider, if the failure carried one.
    ///
    /// Parse failures and empty responses never have a status.
    pub fn status(&self) -> Option<u16> {
        match self {
            ModelError::ApiError { status, .. } => Some(*status),
            ModelError::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            ModelError::ParseError(_) | ModelError::EmptyResponse => None,
        }
    }

    /// Whether a retry may succeed: rate limiting (429) or temporary
    /// unavailability (503).
    pub fn is_transient(&self) -> bool {
        matches!(self.status(), Some(429) | Some(503))
    }
}

/// Configuration for the AI model.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub base_url: String,
    pub api_key: String,
    pub model_name: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
        }
    }
}

impl ModelConfig {
    /// Create a new ModelConfig with custom base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Create a new ModelConfig with custom API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Create a new ModelConfig with custom model name.
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }
}

/// Anything that can turn a prompt into generated text.
///
/// The proxy only talks to the model through this trait so that tests can
/// swap in deterministic stubs.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run a single generation for `prompt`. Implementations must not retry.
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;
}

/// Gemini API response structures.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
}

/// Client for the Gemini generative-language API.
pub struct ModelClient {
    config: ModelConfig,
    client: Client,
}

impl ModelClient {
    /// Create a new ModelClient with the given configuration.
    pub fn new(config: ModelConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model_name
        )
    }

    /// Send a single request to the API.
    async fn send_request(&self, prompt: &str) -> Result<String, ModelError> {
        let body = json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": prompt }]
                }
            ]
        });

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ModelError::ApiError {
                status: status.as_u16(),
                message: Self::error_message(&text),
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&text).map_err(|e| ModelError::ParseError(e.to_string()))?;

        Self::extract_text(parsed)
    }

    /// Pull the human-readable message out of a provider error body.
    fn error_message(body: &str) -> String {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
            _ => body.to_string(),
        }
    }

    /// Concatenate the text parts of the first candidate.
    fn extract_text(response: GenerateContentResponse) -> Result<String, ModelError> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or(ModelError::EmptyResponse)?;

        Ok(candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default())
    }
}

#[async_trait]
impl TextGenerator for ModelClient {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        self.send_request(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_error_body(code: u16, message: &str, status: &str) -> Value {
        json!({
            "error": {
                "code": code,
                "message": message,
                "status": status
            }
        })
    }

    fn client_for(server: &MockServer) -> ModelClient {
        ModelClient::new(
            ModelConfig::default()
                .with_base_url(server.uri())
                .with_api_key("test-key"),
        )
    }

    #[test]
    fn test_model_config_default() {
        let config = ModelConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model_name, "gemini-2.5-flash-lite");
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = ModelClient::new(
            ModelConfig::default()
                .with_base_url("http://localhost:9000/v1beta/")
                .with_model_name("gemini-test"),
        );
        assert_eq!(
            client.endpoint(),
            "http://localhost:9000/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn test_error_classification() {
        let rate_limited = ModelError::ApiError {
            status: 429,
            message: "quota".into(),
        };
        assert_eq!(rate_limited.status(), Some(429));
        assert!(rate_limited.is_transient());

        let unavailable = ModelError::ApiError {
            status: 503,
            message: "overloaded".into(),
        };
        assert!(unavailable.is_transient());

        let bad_request = ModelError::ApiError {
            status: 400,
            message: "invalid argument".into(),
        };
        assert!(!bad_request.is_transient());

        assert_eq!(ModelError::ParseError("eof".into()).status(), None);
        assert!(!ModelError::EmptyResponse.is_transient());
    }

    #[test]
    fn test_error_message_prefers_envelope() {
        let body = provider_error_body(429, "Resource has been exhausted", "RESOURCE_EXHAUSTED");
        assert_eq!(
            ModelClient::error_message(&body.to_string()),
            "Resource has been exhausted"
        );
        assert_eq!(ModelClient::error_message("upstream down"), "upstream down");
    }

    #[tokio::test]
    async fn test_generate_returns_candidate_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash-lite:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{ "role": "user", "parts": [{ "text": "hello" }] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{ "text": "A. " }, { "text": "B. C." }]
                    },
                    "finishReason": "STOP"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server).generate("hello").await.unwrap();
        assert_eq!(text, "A. B. C.");
    }

    #[tokio::test]
    async fn test_generate_maps_rate_limit_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(provider_error_body(
                429,
                "Resource has been exhausted",
                "RESOURCE_EXHAUSTED",
            )))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("hello").await.unwrap_err();
        match &err {
            ModelError::ApiError { status, message } => {
                assert_eq!(*status, 429);
                assert_eq!(message, "Resource has been exhausted");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_generate_rejects_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("hello").await.unwrap_err();
        assert!(matches!(err, ModelError::ParseError(_)));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_connection_refused_is_permanent() {
        // Nothing listens on port 1, so the connection is refused.
        let client = ModelClient::new(
            ModelConfig::default()
                .with_base_url("http://127.0.0.1:1")
                .with_api_key("test-key"),
        );

        let err = client.generate("hello").await.unwrap_err();

        assert!(matches!(err, ModelError::RequestFailed(_)));
        assert_eq!(err.status(), None);
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_generate_without_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "promptFeedback": { "blockReason": "SAFETY" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("hello").await.unwrap_err();
        assert!(matches!(err, ModelError::EmptyResponse));
    }
}
