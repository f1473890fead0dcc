//! Configuration module for the proxy server.

mod prompts;

pub use prompts::{chat_prompt, explain_prompt, summarize_prompt};
