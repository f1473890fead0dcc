//! # MakeItSimple Server
//!
//! Backend proxy for the MakeItSimple browser extension. The extension sends
//! page text, a selection or a chat question; this server wraps it in a
//! prompt, forwards it to Google Gemini and returns the generated text.
//!
//! Calls that fail with a rate limit (429) or service-unavailable (503) are
//! retried with exponential backoff, up to a fixed number of attempts.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use makeitsimple_server::{create_router, ModelClient, ModelConfig, ProxyService, RetryPolicy};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let model_config = ModelConfig::default().with_api_key("your-gemini-key");
//!     let client: Arc<dyn makeitsimple_server::TextGenerator> =
//!         Arc::new(ModelClient::new(model_config));
//!
//!     let service = ProxyService::new(Some(client), RetryPolicy::default());
//!     let app = create_router(Arc::new(service));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod model;
pub mod proxy;
pub mod settings;

pub use model::{ModelClient, ModelConfig, ModelError, RetryPolicy, TextGenerator};
pub use proxy::{
    create_router, ChatRequest, ChatResponse, ExplainRequest, ExplainResponse, ProxyError,
    ProxyService, SummarizeRequest, SummarizeResponse,
};
pub use settings::ServerSettings;
