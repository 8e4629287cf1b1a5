//! Axum app: shared state and router.
//!
//! Routes: `GET /` (status), `POST /recommend_direct` (direct pipeline), `POST /recommend`
//! (normalized pipeline). CORS is open to every origin, method and header.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use config::RecommenderEnv;
use rigsmith::{
    ChatTransport, MistralTransport, ModelClient, Pipeline, PipelineOptions, PipelineProfile,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::recommend::{recommend_direct, recommend_normalized};

/// Pipelines shared by every request. Cloning is cheap; no per-request state lives here.
#[derive(Clone)]
pub struct AppState {
    pub(crate) direct: Arc<Pipeline>,
    pub(crate) normalized: Arc<Pipeline>,
}

impl AppState {
    pub fn new(direct: Pipeline, normalized: Pipeline) -> Self {
        Self {
            direct: Arc::new(direct),
            normalized: Arc::new(normalized),
        }
    }

    /// Both pipelines over one transport and credential.
    pub fn with_transport(
        api_key: Option<String>,
        transport: Arc<dyn ChatTransport>,
        options: PipelineOptions,
    ) -> Self {
        Self::from_client(ModelClient::new(api_key, transport), options)
    }

    /// Direct and normalized pipelines sharing `client`.
    pub fn from_client(client: ModelClient, options: PipelineOptions) -> Self {
        Self::new(
            Pipeline::new(PipelineProfile::direct(), client.clone()).with_options(options),
            Pipeline::new(PipelineProfile::normalized(), client).with_options(options),
        )
    }

    /// Mistral-backed pipelines configured from settings.
    pub fn from_env(env: &RecommenderEnv) -> Self {
        let client = mistral_client(env);
        if !client.has_api_key() {
            tracing::warn!("MISTRAL_API_KEY is not set; recommendations will return missing_api_key");
        }
        Self::from_client(client, pipeline_options(env))
    }
}

/// Mistral client from settings: key, base URL and request timeout.
pub fn mistral_client(env: &RecommenderEnv) -> ModelClient {
    let transport = MistralTransport::configured(env.base_url.as_deref(), env.request_timeout);
    ModelClient::new(env.api_key.clone(), Arc::new(transport))
}

pub fn pipeline_options(env: &RecommenderEnv) -> PipelineOptions {
    PipelineOptions {
        include_debug_raw: env.debug_raw,
    }
}

pub(crate) fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/recommend_direct", post(recommend_direct))
        .route("/recommend", post(recommend_normalized))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({ "status": "Backend running" }))
}
