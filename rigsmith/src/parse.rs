//! Result parsing: model text -> exactly three build objects.
//!
//! Order of checks: JSON parse (with array recovery), array shape, count (fewer than three
//! fails, more is truncated), object shape of the kept items.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::RecommendError;
use crate::recommendation::{BuildRecommendation, MAX_BUILDS};

static JSON_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\[[\s\S]*\])").expect("valid JSON array regex"));

/// Best-effort recovery of a JSON array embedded in prose: the span from the first `[` to
/// the last `]`.
///
/// This is a heuristic. A stray bracket before or after the real array widens the span and
/// the result will usually fail to parse; it never balances brackets.
pub fn extract_json_array(text: &str) -> Option<&str> {
    JSON_ARRAY.find(text).map(|m| m.as_str())
}

/// Parses the whole text as JSON, falling back to [`extract_json_array`].
pub fn parse_json_payload(text: &str) -> Result<Value, RecommendError> {
    if let Ok(v) = serde_json::from_str::<Value>(text) {
        return Ok(v);
    }
    let Some(candidate) = extract_json_array(text) else {
        return Err(RecommendError::InvalidJson {
            raw: text.to_string(),
        });
    };
    tracing::debug!(len = candidate.len(), "direct JSON parse failed, trying extracted array");
    serde_json::from_str::<Value>(candidate).map_err(|_| RecommendError::InvalidJsonExtracted {
        raw: text.to_string(),
    })
}

/// Validates a parsed payload into exactly [`MAX_BUILDS`] build objects, kept verbatim.
pub fn validate_builds(parsed: Value) -> Result<Vec<BuildRecommendation>, RecommendError> {
    let items = match &parsed {
        Value::Array(items) => items,
        _ => return Err(RecommendError::UnexpectedLlmOutput { raw: parsed }),
    };
    if items.len() < MAX_BUILDS {
        return Err(RecommendError::InsufficientBuilds { raw: parsed });
    }
    let builds: Vec<BuildRecommendation> = items
        .iter()
        .take(MAX_BUILDS)
        .filter_map(|item| match item {
            Value::Object(map) => Some(BuildRecommendation::new(map.clone())),
            _ => None,
        })
        .collect();
    if builds.len() < MAX_BUILDS {
        return Err(RecommendError::InvalidBuildItems { raw: parsed });
    }
    Ok(builds)
}

pub fn parse_builds(text: &str) -> Result<Vec<BuildRecommendation>, RecommendError> {
    validate_builds(parse_json_payload(text)?)
}
