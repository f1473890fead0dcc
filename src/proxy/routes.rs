//! HTTP routes for the proxy.
//!
//! ```text
//! GET  /               - liveness message
//! POST /api/summarize  - {text}              -> {summary}
//! POST /api/explain    - {text}              -> {explanation}
//! POST /api/chat       - {question, context} -> {answer}
//! ```

use std::any::Any;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::error::ProxyError;
use super::service::ProxyService;
use super::types::{
    ChatRequest, ChatResponse, ErrorBody, ExplainRequest, ExplainResponse, StatusMessage,
    SummarizeRequest, SummarizeResponse,
};

/// Largest accepted request body (10 MiB). Page and PDF text can be long.
pub const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Shared handler state.
pub type AppState = Arc<ProxyService>;

/// Build the application router around `service`.
pub fn create_router(service: Arc<ProxyService>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/summarize", post(summarize))
        .route("/api/explain", post(explain))
        .route("/api/chat", post(chat))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}

async fn root() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: "MakeItSimple Server is running!".to_string(),
    })
}

async fn summarize(
    State(service): State<AppState>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummarizeResponse>, ProxyError> {
    let request = request_body(payload)?;
    Ok(Json(service.summarize(&request).await?))
}

async fn explain(
    State(service): State<AppState>,
    payload: Result<Json<ExplainRequest>, JsonRejection>,
) -> Result<Json<ExplainResponse>, ProxyError> {
    let request = request_body(payload)?;
    Ok(Json(service.explain(&request).await?))
}

async fn chat(
    State(service): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ProxyError> {
    let request = request_body(payload)?;
    Ok(Json(service.chat(&request).await?))
}

/// Unwrap a JSON body. A request sent without a JSON content type is read
/// as an empty body so that validation names the missing field.
fn request_body<T: Default>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ProxyError> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(rejection.into()),
    }
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Not Found".to_string(),
        }),
    )
}

fn handle_panic(_panic: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("Request handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: "Internal Server Error".to_string(),
        }),
    )
        .into_response()
}
