//! Ollama client
//!
//! Non-streaming calls to `POST /api/generate` on a local Ollama server.

use crate::llm::{LlmClient, LlmError};
use crate::{DEFAULT_MODEL, DEFAULT_OLLAMA_URL};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Client for a local Ollama server
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    model: String,
}

impl OllamaClient {
    /// Create a client for `base_url` (e.g. `http://localhost:11434`) and `model`
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    /// Client for the default local server and model
    pub fn local() -> Self {
        Self::new(DEFAULT_OLLAMA_URL, DEFAULT_MODEL)
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn generate(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let payload = GenerateRequest {
            model: &self.model,
            prompt,
            system,
            stream: false,
        };

        let client = reqwest::Client::builder()
            .build()
            .map_err(LlmError::ClientBuildError)?;

        let resp = client
            .post(self.generate_url())
            .json(&payload)
            .send()
            .await
            .map_err(LlmError::Request)?;

        if !resp.status().is_success() {
            return Err(LlmError::Status(resp.status().as_u16()));
        }

        let body = resp.text().await.map_err(LlmError::Request)?;
        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        Ok(parsed.response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
