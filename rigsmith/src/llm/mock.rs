//! Fixed-response transport for tests and offline runs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{ChatCompletionRequest, ChatTransport, TransportError};

/// Returns the same response (or error) on every call, counting calls and keeping the
/// request bodies it received.
pub struct MockTransport {
    response: Result<Value, TransportError>,
    calls: AtomicUsize,
    requests: Mutex<Vec<ChatCompletionRequest>>,
}

impl MockTransport {
    /// Raw provider response returned as-is.
    pub fn with_response(response: Value) -> Self {
        Self {
            response: Ok(response),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Wraps `content` as `choices[0].message.content` of a chat completion response.
    /// `content` may be a string or a list of content blocks.
    pub fn with_content(content: impl Into<Value>) -> Self {
        Self::with_response(json!({
            "id": "mock-completion",
            "object": "chat.completion",
            "model": "mock",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content.into()},
                "finish_reason": "stop"
            }]
        }))
    }

    pub fn failing(error: TransportError) -> Self {
        Self {
            response: Err(error),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests
            .lock()
            .map(|g| g.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn send(
        &self,
        _api_key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<Value, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut g) = self.requests.lock() {
            g.push(request.clone());
        }
        self.response.clone()
    }
}
