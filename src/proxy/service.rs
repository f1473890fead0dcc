//! The proxy service: validate, build a prompt, call the model with retry.

use std::sync::Arc;

use super::error::{Operation, ProxyError};
use super::types::{
    ChatRequest, ChatResponse, ExplainRequest, ExplainResponse, SummarizeRequest,
    SummarizeResponse,
};
use crate::config::{chat_prompt, explain_prompt, summarize_prompt};
use crate::model::{RetryPolicy, TextGenerator};

/// Forwards summarize / explain / chat requests to the model.
///
/// The generator is injected; `None` means no API key was configured and
/// every operation fails with [`ProxyError::NotConfigured`] after request
/// validation. The service holds no mutable state, so one instance is shared
/// across all concurrent requests.
pub struct ProxyService {
    generator: Option<Arc<dyn TextGenerator>>,
    retry: RetryPolicy,
}

impl ProxyService {
    /// Create a new service.
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, retry: RetryPolicy) -> Self {
        Self { generator, retry }
    }

    /// A service with no model behind it.
    pub fn unconfigured() -> Self {
        Self::new(None, RetryPolicy::default())
    }

    /// Whether a model client is available.
    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    /// Summarize text in three bullet points.
    pub async fn summarize(
        &self,
        request: &SummarizeRequest,
    ) -> Result<SummarizeResponse, ProxyError> {
        let text = request.validate()?;
        let summary = self
            .generate(Operation::Summarize, summarize_prompt(text))
            .await?;
        Ok(SummarizeResponse { summary })
    }

    /// Explain text in plain language.
    pub async fn explain(&self, request: &ExplainRequest) -> Result<ExplainResponse, ProxyError> {
        let text = request.validate()?;
        let explanation = self
            .generate(Operation::Explain, explain_prompt(text))
            .await?;
        Ok(ExplainResponse { explanation })
    }

    /// Answer a question about the supplied context.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ProxyError> {
        let (question, context) = request.validate()?;
        let answer = self
            .generate(Operation::Chat, chat_prompt(question, context))
            .await?;
        Ok(ChatResponse { answer })
    }

    async fn generate(&self, operation: Operation, prompt: String) -> Result<String, ProxyError> {
        let Some(generator) = self.generator.as_ref() else {
            tracing::error!(%operation, "Gemini client not configured");
            return Err(ProxyError::NotConfigured);
        };

        self.retry
            .run(|| generator.generate(&prompt))
            .await
            .map_err(|e| {
                let error = ProxyError::from_model_error(operation, &e);
                tracing::error!(
                    %operation,
                    status = ?e.status(),
                    response_status = error.status_code().as_u16(),
                    error = %e,
                    "Gemini request failed"
                );
                error
            })
    }
}
