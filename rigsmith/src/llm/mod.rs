//! Model client: one chat-completion call per recommendation run.
//!
//! [`ModelClient`] owns the credential check and error mapping; the actual HTTP exchange
//! sits behind the [`ChatTransport`] trait so tests can count calls and inspect requests.
//! Implementations: [`MistralTransport`] (real API), [`MockTransport`] (fixed response).
//!
//! No retries: a transport failure is reported immediately as `llm_request_failed`.

mod mistral;
mod mock;

pub use mistral::{MistralTransport, DEFAULT_MISTRAL_BASE_URL};
pub use mock::MockTransport;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RecommendError;

/// Model and sampling parameters for one call.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// One chat message in the outbound request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Chat completion request body (Mistral / OpenAI-compatible field names).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatCompletionRequest {
    /// Single user message carrying the whole prompt.
    pub fn user_prompt(settings: &ModelSettings, prompt: &str) -> Self {
        Self {
            model: settings.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }

    /// Content of the first user message.
    pub fn prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == "user")
            .map(|m| m.content.as_str())
    }
}

/// Transport or provider failure, with HTTP status and body when the provider answered.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    pub status: Option<u16>,
    pub body: Option<String>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            body: None,
        }
    }

    pub fn with_status(mut self, status: u16, body: impl Into<String>) -> Self {
        self.status = Some(status);
        self.body = Some(body.into());
        self
    }

    /// Compact JSON used as the `details` of an `llm_request_failed` record:
    /// `{"error": ..., "status_code": ..., "body": ...}`.
    pub fn details(&self) -> String {
        let mut info = serde_json::Map::new();
        info.insert("error".into(), Value::String(self.message.clone()));
        if let Some(status) = self.status {
            info.insert("status_code".into(), Value::from(status));
        }
        if let Some(body) = &self.body {
            info.insert("body".into(), Value::String(body.clone()));
        }
        Value::Object(info).to_string()
    }
}

/// Sends one chat completion request and returns the provider's raw JSON response.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<Value, TransportError>;
}

/// Credential check plus a single transport call.
#[derive(Clone)]
pub struct ModelClient {
    api_key: Option<String>,
    transport: Arc<dyn ChatTransport>,
}

impl ModelClient {
    pub fn new(api_key: Option<String>, transport: Arc<dyn ChatTransport>) -> Self {
        Self { api_key, transport }
    }

    /// Mistral API client at `base_url`.
    pub fn mistral(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self::new(api_key, Arc::new(MistralTransport::new(base_url)))
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    /// Sends `prompt` as a single user message and returns the raw response.
    ///
    /// Fails with `missing_api_key` before touching the transport when no credential is set.
    pub async fn complete(
        &self,
        prompt: &str,
        settings: &ModelSettings,
    ) -> Result<Value, RecommendError> {
        let api_key = match self.api_key.as_deref().map(str::trim) {
            Some(k) if !k.is_empty() => k,
            _ => {
                return Err(RecommendError::MissingApiKey {
                    details: "Set MISTRAL_API_KEY environment variable".to_string(),
                })
            }
        };
        let request = ChatCompletionRequest::user_prompt(settings, prompt);
        tracing::debug!(model = %request.model, prompt_len = prompt.len(), "sending chat completion");
        self.transport
            .send(api_key, &request)
            .await
            .map_err(|e| RecommendError::LlmRequestFailed { details: e.details() })
    }
}
