use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::json;

use crate::config::ModelConfig;

/// System/user message pair sent to the external language model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRequest {
    pub system: String,
    pub user: String,
}

/// Failure kinds from the model call, switched on by the orchestration
/// layer instead of inspecting message text. Every kind routes to the
/// deterministic fallback.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model credential is not configured")]
    MissingCredential,
    #[error("model transport failure: {0}")]
    Transport(String),
    #[error("model endpoint returned status {0}")]
    Status(u16),
    #[error("model call timed out after {0:?}")]
    Timeout(Duration),
    #[error("model response payload malformed: {0}")]
    Payload(String),
}

/// Outbound completion call, kept behind a trait so tests and the offline
/// demo can swap the transport.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Returns the raw completion text for a system/user message pair.
    async fn complete(&self, request: &ModelRequest) -> Result<String, ModelError>;
}

/// Chat-completions client for an OpenAI-style endpoint.
pub struct HttpModelClient {
    http: HttpClient,
    config: ModelConfig,
}

impl HttpModelClient {
    pub fn new(config: ModelConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| HttpClient::new());
        Self { http, config }
    }
}

#[async_trait]
impl ModelClient for HttpModelClient {
    async fn complete(&self, request: &ModelRequest) -> Result<String, ModelError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ModelError::MissingCredential)?;

        let payload = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user },
            ],
            "temperature": 0.2,
        });

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    ModelError::Timeout(self.config.timeout)
                } else {
                    ModelError::Transport(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ModelError::Status(status.as_u16()));
        }

        let completion: ChatCompletion = response.json().await.map_err(|err| {
            if err.is_timeout() {
                ModelError::Timeout(self.config.timeout)
            } else {
                ModelError::Payload(err.to_string())
            }
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ModelError::Payload("completion carried no choices".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}
