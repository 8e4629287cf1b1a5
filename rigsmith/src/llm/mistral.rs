//! Mistral chat completions over HTTP (reqwest).

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::{ChatCompletionRequest, ChatTransport, TransportError};

pub const DEFAULT_MISTRAL_BASE_URL: &str = "https://api.mistral.ai/v1";

/// POSTs to `{base_url}/chat/completions` with a bearer token.
///
/// No timeout unless one is set with [`MistralTransport::with_timeout`]; the transport
/// default applies otherwise.
pub struct MistralTransport {
    client: reqwest::Client,
    base_url: String,
}

impl MistralTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Custom client (proxies, TLS settings, ...).
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Client with a whole-request timeout. Falls back to the default client when the
    /// builder fails.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("could not build HTTP client with timeout: {}", e);
                reqwest::Client::new()
            });
        Self::with_client(base_url, client)
    }

    /// Transport at `base_url` (the public API when `None`), with an optional timeout.
    pub fn configured(base_url: Option<&str>, timeout: Option<Duration>) -> Self {
        let base_url = base_url.unwrap_or(DEFAULT_MISTRAL_BASE_URL);
        match timeout {
            Some(timeout) => Self::with_timeout(base_url, timeout),
            None => Self::new(base_url),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl Default for MistralTransport {
    fn default() -> Self {
        Self::new(DEFAULT_MISTRAL_BASE_URL)
    }
}

#[async_trait]
impl ChatTransport for MistralTransport {
    async fn send(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<Value, TransportError> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                let mut err = TransportError::new(e.to_string());
                err.status = e.status().map(|s| s.as_u16());
                err
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(status = status.as_u16(), "Mistral API error");
            return Err(TransportError::new(format!("Mistral API error {}", status))
                .with_status(status.as_u16(), body));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::new(format!("failed to decode response body: {}", e)))
    }
}
