//! MakeItSimple Server - Gemini proxy for the browser extension
//!
//! Run with: cargo run --bin makeitsimple-server

use std::sync::Arc;

use anyhow::Context;
use makeitsimple_server::{create_router, ModelClient, ProxyService, ServerSettings, TextGenerator};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (ignore errors if file doesn't exist)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = ServerSettings::from_env();

    let generator: Option<Arc<dyn TextGenerator>> = settings.model_config().map(|config| {
        tracing::info!(model = %config.model_name, "Gemini client configured");
        let client: Arc<dyn TextGenerator> = Arc::new(ModelClient::new(config));
        client
    });

    let retry = settings.retry_policy();
    tracing::info!(
        max_attempts = retry.max_attempts(),
        initial_backoff_ms = retry.initial_backoff.as_millis() as u64,
        "Retry policy"
    );

    let service = Arc::new(ProxyService::new(generator, retry));
    if !service.is_configured() {
        tracing::warn!("GEMINI_API_KEY is not set. AI requests will fail.");
    }
    let app = create_router(service);

    let (host, port) = settings.listen_addr();
    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))?;
    let addr = listener.local_addr().context("Failed to read bound address")?;

    tracing::info!("MakeItSimple server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
