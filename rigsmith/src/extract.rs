//! Response extraction: provider JSON -> one trimmed text string.
//!
//! Message content comes either as a plain string or as a list of content blocks
//! (`"text"` or `{"type": "text", "text": "..."}`). [`MessageContent`] is the closed
//! decoding of those shapes; anything else falls into [`MessageContent::Other`] and is
//! rendered as JSON text.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::RecommendError;

/// Decoded `message.content`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
    Other(Value),
}

/// One element of a block-list content.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ContentBlock {
    Text(String),
    Typed {
        #[serde(rename = "type")]
        block_type: String,
        #[serde(default)]
        text: Option<String>,
    },
    Other(Value),
}

impl ContentBlock {
    /// Text contributed by this block; `None` for non-text blocks.
    fn text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text(s) => Some(s),
            ContentBlock::Typed { block_type, text } if block_type == "text" => {
                Some(text.as_deref().unwrap_or(""))
            }
            ContentBlock::Typed { .. } | ContentBlock::Other(_) => None,
        }
    }
}

impl MessageContent {
    pub fn from_value(value: &Value) -> Self {
        Self::deserialize(value).unwrap_or_else(|_| MessageContent::Other(value.clone()))
    }

    /// Untrimmed text: the string itself, text blocks joined by `\n`, `""` for null, or
    /// the JSON rendering of any other value.
    pub fn as_text(&self) -> String {
        match self {
            MessageContent::Text(s) => s.clone(),
            MessageContent::Blocks(blocks) => blocks
                .iter()
                .filter_map(ContentBlock::text)
                .collect::<Vec<_>>()
                .join("\n"),
            MessageContent::Other(Value::Null) => String::new(),
            MessageContent::Other(v) => v.to_string(),
        }
    }
}

/// Finds the content value: `choices[0].message.content`, or a top-level `content` when the
/// response has no `choices`. A message without `content` reads as null.
fn locate_content(response: &Value) -> Result<&Value, RecommendError> {
    static NULL: Value = Value::Null;
    if let Some(choices) = response.get("choices") {
        let message = choices
            .get(0)
            .and_then(|c| c.get("message"))
            .ok_or_else(|| RecommendError::LlmResponseReadFailed {
                details: "response has no choices[0].message".to_string(),
            })?;
        return Ok(message.get("content").unwrap_or(&NULL));
    }
    response
        .get("content")
        .ok_or_else(|| RecommendError::LlmResponseReadFailed {
            details: "response has neither choices nor content".to_string(),
        })
}

/// Extracts and trims the model's text.
///
/// Empty text is `empty_llm_response`; with `include_debug_raw` the whole provider
/// response is attached as `debug.raw_response`.
pub fn extract_text(response: &Value, include_debug_raw: bool) -> Result<String, RecommendError> {
    let content = locate_content(response)?;
    let text = MessageContent::from_value(content).as_text();
    let text = text.trim();
    if text.is_empty() {
        let debug = include_debug_raw.then(|| json!({ "raw_response": response }));
        return Err(RecommendError::EmptyLlmResponse { debug });
    }
    Ok(text.to_string())
}
