//! Output types: build recommendations, error records and the caller-facing result.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ErrorKind, RecommendError};

/// Number of builds a successful run returns.
pub const MAX_BUILDS: usize = 3;

/// Field names every build object is asked to carry, in template order.
pub const BUILD_FIELDS: [&str; 10] = [
    "build_name",
    "cpu",
    "gpu",
    "ram",
    "storage",
    "motherboard",
    "psu",
    "cabinet",
    "estimated_price",
    "why_this_build",
];

/// One PC build as returned by the model.
///
/// Only the object shape is validated; the fields are kept verbatim, including
/// unknown keys and non-string values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildRecommendation(Map<String, Value>);

impl BuildRecommendation {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Returns the field as a string slice when present and a JSON string.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    pub fn build_name(&self) -> Option<&str> {
        self.field("build_name")
    }

    pub fn estimated_price(&self) -> Option<&str> {
        self.field("estimated_price")
    }

    /// Known template fields that are missing or not strings.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        BUILD_FIELDS
            .iter()
            .copied()
            .filter(|f| self.field(f).is_none())
            .collect()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Typed failure descriptor placed in `recommendations` instead of builds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub error: ErrorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<Value>,
}

impl ErrorRecord {
    pub fn new(error: ErrorKind) -> Self {
        Self {
            error,
            details: None,
            raw: None,
            debug: None,
        }
    }
}

/// One element of `recommendations`: a build, or the error that replaced them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecommendationEntry {
    Error(ErrorRecord),
    Build(BuildRecommendation),
}

/// The single response shape returned to callers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub recommendations: Vec<RecommendationEntry>,
}

impl RecommendationResult {
    /// At most [`MAX_BUILDS`] builds are kept.
    pub fn from_builds(builds: Vec<BuildRecommendation>) -> Self {
        Self {
            recommendations: builds
                .into_iter()
                .take(MAX_BUILDS)
                .map(RecommendationEntry::Build)
                .collect(),
        }
    }

    pub fn from_error(err: RecommendError) -> Self {
        Self {
            recommendations: vec![RecommendationEntry::Error(err.into_record())],
        }
    }

    pub fn from_outcome(outcome: Result<Vec<BuildRecommendation>, RecommendError>) -> Self {
        match outcome {
            Ok(builds) => Self::from_builds(builds),
            Err(e) => Self::from_error(e),
        }
    }

    /// The error record when the run failed.
    pub fn error(&self) -> Option<&ErrorRecord> {
        self.recommendations.iter().find_map(|e| match e {
            RecommendationEntry::Error(r) => Some(r),
            RecommendationEntry::Build(_) => None,
        })
    }

    pub fn builds(&self) -> Vec<&BuildRecommendation> {
        self.recommendations
            .iter()
            .filter_map(|e| match e {
                RecommendationEntry::Build(b) => Some(b),
                RecommendationEntry::Error(_) => None,
            })
            .collect()
    }

    pub fn is_success(&self) -> bool {
        self.error().is_none()
    }
}
