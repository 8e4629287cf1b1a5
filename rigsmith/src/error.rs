//! Error taxonomy for a recommendation run.
//!
//! Every stage returns [`RecommendError`]; the pipeline converts it into an
//! [`ErrorRecord`](crate::recommendation::ErrorRecord) so callers always receive a
//! [`RecommendationResult`](crate::recommendation::RecommendationResult).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::recommendation::ErrorRecord;

/// Wire name of a failure, serialized as the `error` field of an [`ErrorRecord`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingApiKey,
    LlmRequestFailed,
    LlmResponseReadFailed,
    EmptyLlmResponse,
    InvalidJson,
    InvalidJsonExtracted,
    UnexpectedLlmOutput,
    InsufficientBuilds,
    InvalidBuildItems,
    InvalidLlmResponse,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MissingApiKey => "missing_api_key",
            ErrorKind::LlmRequestFailed => "llm_request_failed",
            ErrorKind::LlmResponseReadFailed => "llm_response_read_failed",
            ErrorKind::EmptyLlmResponse => "empty_llm_response",
            ErrorKind::InvalidJson => "invalid_json",
            ErrorKind::InvalidJsonExtracted => "invalid_json_extracted",
            ErrorKind::UnexpectedLlmOutput => "unexpected_llm_output",
            ErrorKind::InsufficientBuilds => "insufficient_builds",
            ErrorKind::InvalidBuildItems => "invalid_build_items",
            ErrorKind::InvalidLlmResponse => "invalid_llm_response",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of one pipeline stage. Terminal: the run stops at the first one.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RecommendError {
    #[error("missing API key: {details}")]
    MissingApiKey { details: String },
    #[error("LLM request failed: {details}")]
    LlmRequestFailed { details: String },
    #[error("could not read LLM response: {details}")]
    LlmResponseReadFailed { details: String },
    #[error("LLM returned empty content")]
    EmptyLlmResponse { debug: Option<Value> },
    #[error("LLM output is not valid JSON")]
    InvalidJson { raw: String },
    #[error("JSON array extracted from LLM output is not valid JSON")]
    InvalidJsonExtracted { raw: String },
    #[error("LLM output is not a JSON array")]
    UnexpectedLlmOutput { raw: Value },
    #[error("LLM returned fewer than 3 builds")]
    InsufficientBuilds { raw: Value },
    #[error("LLM returned build items that are not objects")]
    InvalidBuildItems { raw: Value },
    #[error("no recommendation result was produced: {details}")]
    InvalidLlmResponse { details: String },
}

impl RecommendError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecommendError::MissingApiKey { .. } => ErrorKind::MissingApiKey,
            RecommendError::LlmRequestFailed { .. } => ErrorKind::LlmRequestFailed,
            RecommendError::LlmResponseReadFailed { .. } => ErrorKind::LlmResponseReadFailed,
            RecommendError::EmptyLlmResponse { .. } => ErrorKind::EmptyLlmResponse,
            RecommendError::InvalidJson { .. } => ErrorKind::InvalidJson,
            RecommendError::InvalidJsonExtracted { .. } => ErrorKind::InvalidJsonExtracted,
            RecommendError::UnexpectedLlmOutput { .. } => ErrorKind::UnexpectedLlmOutput,
            RecommendError::InsufficientBuilds { .. } => ErrorKind::InsufficientBuilds,
            RecommendError::InvalidBuildItems { .. } => ErrorKind::InvalidBuildItems,
            RecommendError::InvalidLlmResponse { .. } => ErrorKind::InvalidLlmResponse,
        }
    }

    /// Converts into the wire record. Diagnostic payloads move into `details`, `raw` or `debug`.
    pub fn into_record(self) -> ErrorRecord {
        let kind = self.kind();
        let mut record = ErrorRecord::new(kind);
        match self {
            RecommendError::MissingApiKey { details }
            | RecommendError::LlmRequestFailed { details }
            | RecommendError::LlmResponseReadFailed { details }
            | RecommendError::InvalidLlmResponse { details } => {
                record.details = Some(details);
            }
            RecommendError::EmptyLlmResponse { debug } => {
                record.details = Some("LLM returned empty content".to_string());
                record.debug = debug;
            }
            RecommendError::InvalidJson { raw } | RecommendError::InvalidJsonExtracted { raw } => {
                record.raw = Some(Value::String(raw));
            }
            RecommendError::UnexpectedLlmOutput { raw } | RecommendError::InvalidBuildItems { raw } => {
                record.raw = Some(raw);
            }
            RecommendError::InsufficientBuilds { raw } => {
                record.details = Some("LLM returned fewer than 3 builds".to_string());
                record.raw = Some(raw);
            }
        }
        record
    }
}
