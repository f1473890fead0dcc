//! Proxy error taxonomy and its HTTP mapping.

use std::fmt;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use super::types::ErrorBody;
use crate::model::ModelError;

/// Message shown to users when the model is rate limited.
pub const RATE_LIMITED_MESSAGE: &str =
    "AI is receiving too many requests. Please try again in a moment.";

/// The three operations the proxy performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Summarize,
    Explain,
    Chat,
}

impl Operation {
    /// Short name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Summarize => "summarize",
            Operation::Explain => "explain",
            Operation::Chat => "chat",
        }
    }

    /// Generic user-facing message for a failed model call.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Summarize => "Failed to generate summary",
            Operation::Explain => "Failed to generate explanation",
            Operation::Chat => "Failed to generate answer",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by the proxy. The `Display` text is what the client sees.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Missing {0} field")]
    Validation(&'static str),
    #[error("Invalid JSON body")]
    InvalidBody,
    #[error("Request body too large")]
    PayloadTooLarge,
    #[error("Gemini client not configured")]
    NotConfigured,
    #[error("{}", RATE_LIMITED_MESSAGE)]
    RateLimited,
    #[error("{}", .0.failure_message())]
    Provider(Operation),
}

impl ProxyError {
    /// Map a final model failure onto the proxy taxonomy.
    ///
    /// Only an exhausted 429 keeps its status; 503, other provider statuses,
    /// transport failures and malformed responses all become a gateway error.
    pub fn from_model_error(operation: Operation, error: &ModelError) -> Self {
        match error.status() {
            Some(429) => ProxyError::RateLimited,
            _ => ProxyError::Provider(operation),
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::Validation(_) | ProxyError::InvalidBody => StatusCode::BAD_REQUEST,
            ProxyError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ProxyError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ProxyError::Provider(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<JsonRejection> for ProxyError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ProxyError::PayloadTooLarge
        } else {
            ProxyError::InvalidBody
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
