//! # Rigsmith
//!
//! PC build recommendations produced by an external LLM (Mistral chat completions) and
//! parsed into a fixed, validated shape.
//!
//! A run goes through five stateless stages:
//!
//! - [`adapter`]: [`UserRequest`] -> [`FormattedInput`] (direct) or [`NormalizedInput`].
//! - [`prompt`]: input block -> prompt text with a strict JSON output template.
//! - [`llm`]: [`ModelClient`] sends the prompt through a [`ChatTransport`]
//!   ([`MistralTransport`], [`MockTransport`]).
//! - [`extract`]: provider response -> trimmed text ([`MessageContent`]).
//! - [`parse`]: text -> exactly three [`BuildRecommendation`]s.
//!
//! [`Pipeline`] wires them together for a [`PipelineProfile`]; every failure becomes an
//! [`ErrorRecord`] inside the [`RecommendationResult`], never a panic or a different shape.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use rigsmith::{ModelClient, Pipeline, PipelineProfile, UserRequest, DEFAULT_MISTRAL_BASE_URL};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let client = ModelClient::mistral(std::env::var("MISTRAL_API_KEY").ok(), DEFAULT_MISTRAL_BASE_URL);
//! let pipeline = Pipeline::new(PipelineProfile::direct(), client);
//! let result = pipeline
//!     .recommend(&UserRequest::new("gaming").with_budget("100000"))
//!     .await;
//! println!("{}", serde_json::to_string_pretty(&result).unwrap());
//! # }
//! ```

pub mod adapter;
pub mod error;
pub mod extract;
pub mod llm;
pub mod parse;
pub mod pipeline;
pub mod prompt;
pub mod recommendation;
pub mod request;

pub use adapter::{
    format_budget, format_direct, normalize, normalize_brands, parse_budget_amount,
    FormattedInput, NormalizedInput, Priority, DEFAULT_BUDGET,
};
pub use error::{ErrorKind, RecommendError};
pub use extract::{extract_text, ContentBlock, MessageContent};
pub use llm::{
    ChatCompletionRequest, ChatMessage, ChatTransport, MistralTransport, MockTransport,
    ModelClient, ModelSettings, TransportError, DEFAULT_MISTRAL_BASE_URL,
};
pub use parse::{extract_json_array, parse_builds};
pub use pipeline::{Pipeline, PipelineKind, PipelineOptions, PipelineProfile};
pub use prompt::{build_direct_prompt, build_normalized_prompt, OUTPUT_TEMPLATE};
pub use recommendation::{
    BuildRecommendation, ErrorRecord, RecommendationEntry, RecommendationResult, BUILD_FIELDS,
    MAX_BUILDS,
};
pub use request::{Brands, Budget, UserRequest};
