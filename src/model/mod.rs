//! Model client module for AI inference.

mod client;
mod retry;

pub use client::{
    ModelClient, ModelConfig, ModelError, TextGenerator, DEFAULT_BASE_URL, DEFAULT_MODEL_NAME,
};
pub use retry::{RetryPolicy, DEFAULT_INITIAL_BACKOFF_MS, DEFAULT_MAX_RETRIES};
