//! Recommendation handlers. Whatever happens past body validation, the answer is a
//! `RecommendationResult` with status 200.

use std::sync::Arc;

use axum::{extract::State, Json};
use rigsmith::{Pipeline, RecommendError, RecommendationResult, UserRequest};

use super::app::AppState;

pub(crate) async fn recommend_direct(
    State(state): State<AppState>,
    Json(request): Json<UserRequest>,
) -> Json<RecommendationResult> {
    Json(run_isolated(state.direct.clone(), request).await)
}

pub(crate) async fn recommend_normalized(
    State(state): State<AppState>,
    Json(request): Json<UserRequest>,
) -> Json<RecommendationResult> {
    Json(run_isolated(state.normalized.clone(), request).await)
}

/// Runs the pipeline on its own task so a panic inside it becomes an
/// `invalid_llm_response` record instead of a dropped connection.
async fn run_isolated(pipeline: Arc<Pipeline>, request: UserRequest) -> RecommendationResult {
    let task = tokio::spawn(async move { pipeline.recommend(&request).await });
    match task.await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("recommendation task aborted: {}", e);
            RecommendationResult::from_error(RecommendError::InvalidLlmResponse {
                details: format!("recommendation task aborted: {}", e),
            })
        }
    }
}
