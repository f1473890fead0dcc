//! Request and response bodies for the HTTP API.

use serde::{Deserialize, Serialize};

use super::error::ProxyError;

/// Return a required field as sent, or a validation error naming it when it
/// is absent or blank.
fn required<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, ProxyError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ProxyError::Validation(field))
}

/// Body of `POST /api/summarize`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

impl SummarizeRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// The text to summarize.
    pub fn validate(&self) -> Result<&str, ProxyError> {
        required("text", self.text.as_deref())
    }
}

/// Body of `POST /api/explain`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplainRequest {
    #[serde(default)]
    pub text: Option<String>,
}

impl ExplainRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// The text to explain.
    pub fn validate(&self) -> Result<&str, ProxyError> {
        required("text", self.text.as_deref())
    }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
}

impl ChatRequest {
    pub fn new(question: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            question: Some(question.into()),
            context: Some(context.into()),
        }
    }

    /// `(question, context)`. The question is checked first.
    pub fn validate(&self) -> Result<(&str, &str), ProxyError> {
        let question = required("question", self.question.as_deref())?;
        let context = required("context", self.context.as_deref())?;
        Ok((question, context))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainResponse {
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_blank_text_are_rejected() {
        let missing: SummarizeRequest = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            missing.validate(),
            Err(ProxyError::Validation("text"))
        ));

        let null: ExplainRequest = serde_json::from_str(r#"{"text": null}"#).unwrap();
        assert!(null.validate().is_err());

        let blank = SummarizeRequest::new("  \n\t ");
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_text_is_passed_through_untrimmed() {
        let request = ExplainRequest::new("  photosynthesis \n");
        assert_eq!(request.validate().unwrap(), "  photosynthesis \n");

        let chat = ChatRequest::new(" What? ", "\tA page\n");
        assert_eq!(chat.validate().unwrap(), (" What? ", "\tA page\n"));
    }

    #[test]
    fn test_chat_checks_question_before_context() {
        let neither: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            neither.validate(),
            Err(ProxyError::Validation("question"))
        ));

        let no_context: ChatRequest = serde_json::from_str(r#"{"question": "What?"}"#).unwrap();
        assert!(matches!(
            no_context.validate(),
            Err(ProxyError::Validation("context"))
        ));

        let ok = ChatRequest::new("What?", "A page");
        assert_eq!(ok.validate().unwrap(), ("What?", "A page"));
    }
}
