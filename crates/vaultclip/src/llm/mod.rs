//! Local LLM backend
//!
//! Both the relevance filter and the LLM conversion mode talk to the model
//! through [`LlmClient`]. [`OllamaClient`] is the default implementation.

mod ollama;

pub use ollama::OllamaClient;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the LLM backend
///
/// Never fatal to a run: callers degrade to fail-closed or placeholder output.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Transport-level failure
    #[error("LLM request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// Non-2xx answer from the model server
    #[error("LLM request failed: HTTP {0}")]
    Status(u16),

    /// Body could not be parsed or had no `response` field
    #[error("Invalid LLM response: {0}")]
    InvalidResponse(String),
}

/// Text generation backend
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate a completion for `prompt` under the given system instruction
    async fn generate(&self, prompt: &str, system: &str) -> Result<String, LlmError>;

    /// Model name, for logging
    fn model_name(&self) -> &str;
}
