//! The recommendation pipeline: adapter -> prompt -> model -> extractor -> parser.
//!
//! One implementation serves both variants; [`PipelineProfile`] selects the adapter, the
//! prompt and the model settings. A run keeps no state and stops at the first failing
//! stage, which is reported as an error record in the [`RecommendationResult`].

use serde::{Deserialize, Serialize};

use crate::adapter::{format_direct, normalize};
use crate::error::RecommendError;
use crate::extract::extract_text;
use crate::llm::{ModelClient, ModelSettings};
use crate::parse::parse_builds;
use crate::prompt::{build_direct_prompt, build_normalized_prompt};
use crate::recommendation::{BuildRecommendation, RecommendationResult};
use crate::request::UserRequest;

/// Which adapter and prompt variant a pipeline uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineKind {
    /// Brands cleaned and budget rendered as currency; prompt addressed as form inputs.
    Direct,
    /// Numeric budget and derived component priorities.
    Normalized,
}

impl std::fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineKind::Direct => f.write_str("direct"),
            PipelineKind::Normalized => f.write_str("normalized"),
        }
    }
}

/// Variant plus model settings.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineProfile {
    pub kind: PipelineKind,
    pub settings: ModelSettings,
}

impl PipelineProfile {
    /// `mistral-large`, temperature 0.2, 900 tokens.
    pub fn direct() -> Self {
        Self {
            kind: PipelineKind::Direct,
            settings: ModelSettings {
                model: "mistral-large".to_string(),
                temperature: 0.2,
                max_tokens: 900,
            },
        }
    }

    /// `open-mistral-7b`, temperature 0.3, 800 tokens.
    pub fn normalized() -> Self {
        Self {
            kind: PipelineKind::Normalized,
            settings: ModelSettings {
                model: "open-mistral-7b".to_string(),
                temperature: 0.3,
                max_tokens: 800,
            },
        }
    }

    pub fn for_kind(kind: PipelineKind) -> Self {
        match kind {
            PipelineKind::Direct => Self::direct(),
            PipelineKind::Normalized => Self::normalized(),
        }
    }
}

/// Per-pipeline switches set by the embedding application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Attach the raw provider response to `empty_llm_response` records.
    pub include_debug_raw: bool,
}

#[derive(Clone)]
pub struct Pipeline {
    profile: PipelineProfile,
    client: ModelClient,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(profile: PipelineProfile, client: ModelClient) -> Self {
        Self {
            profile,
            client,
            options: PipelineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn profile(&self) -> &PipelineProfile {
        &self.profile
    }

    pub fn options(&self) -> PipelineOptions {
        self.options
    }

    /// The prompt this pipeline sends for `request`. No I/O.
    pub fn build_prompt(&self, request: &UserRequest) -> String {
        match self.profile.kind {
            PipelineKind::Direct => build_direct_prompt(&format_direct(request)),
            PipelineKind::Normalized => build_normalized_prompt(&normalize(request)),
        }
    }

    /// Runs every stage and returns the three builds or the first failure.
    pub async fn run(
        &self,
        request: &UserRequest,
    ) -> Result<Vec<BuildRecommendation>, RecommendError> {
        let prompt = self.build_prompt(request);

        tracing::debug!(stage = "requesting", pipeline = %self.profile.kind);
        let response = self.client.complete(&prompt, &self.profile.settings).await?;

        tracing::debug!(stage = "extracting", pipeline = %self.profile.kind);
        let text = extract_text(&response, self.options.include_debug_raw)?;
        tracing::debug!(pipeline = %self.profile.kind, "raw LLM output:\n{}", text);

        tracing::debug!(stage = "parsing", pipeline = %self.profile.kind);
        parse_builds(&text)
    }

    /// Runs the pipeline and wraps the outcome in the caller-facing result shape.
    pub async fn recommend(&self, request: &UserRequest) -> RecommendationResult {
        tracing::info!(
            pipeline = %self.profile.kind,
            model = %self.profile.settings.model,
            "recommendation requested"
        );
        let outcome = self.run(request).await;
        match &outcome {
            Ok(builds) => tracing::info!(pipeline = %self.profile.kind, builds = builds.len(), "recommendation done"),
            Err(e) => tracing::warn!(pipeline = %self.profile.kind, error = %e.kind(), "recommendation failed: {}", e),
        }
        RecommendationResult::from_outcome(outcome)
    }
}
