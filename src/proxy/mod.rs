//! HTTP proxy in front of the model: request types, service, errors, routes.

mod error;
mod routes;
mod service;
mod types;

pub use error::{Operation, ProxyError, RATE_LIMITED_MESSAGE};
pub use routes::{create_router, AppState, BODY_LIMIT_BYTES};
pub use service::ProxyService;
pub use types::{
    ChatRequest, ChatResponse, ErrorBody, ExplainRequest, ExplainResponse, StatusMessage,
    SummarizeRequest, SummarizeResponse,
};
