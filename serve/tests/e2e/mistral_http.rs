//! The real Mistral transport against a local stand-in for the provider API.

use axum::{http::StatusCode, routing::post, Json, Router};
use rigsmith::{ModelClient, Pipeline, PipelineOptions, PipelineProfile};
use serde_json::{json, Value};
use serve::AppState;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use super::common;

/// Provider stub. Each route prefix is a base URL with its own canned answer.
async fn spawn_provider() -> (String, oneshot::Sender<()>) {
    let app = Router::new()
        .route(
            "/unauthorized/chat/completions",
            post(|| async { (StatusCode::UNAUTHORIZED, r#"{"message":"bad key"}"#) }),
        )
        .route(
            "/empty/chat/completions",
            post(|| async {
                Json(json!({
                    "id": "cmpl-1",
                    "choices": [{"index": 0, "message": {"role": "assistant", "content": ""}}]
                }))
            }),
        )
        .route(
            "/garbled/chat/completions",
            post(|| async { (StatusCode::OK, "not json at all") }),
        )
        .route(
            "/ok/chat/completions",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "model": body["model"],
                    "choices": [{"message": {
                        "role": "assistant",
                        "content": common::three_builds().to_string()
                    }}]
                }))
            }),
        );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = rx.await;
            })
            .await;
    });
    (format!("http://{}", addr), tx)
}

/// Direct pipeline on `direct_base`, normalized pipeline on `normalized_base`.
async fn spawn_over_provider(
    direct_base: String,
    normalized_base: String,
    options: PipelineOptions,
) -> common::TestServer {
    let direct = Pipeline::new(
        PipelineProfile::direct(),
        ModelClient::mistral(Some("sk-test".into()), direct_base),
    )
    .with_options(options);
    let normalized = Pipeline::new(
        PipelineProfile::normalized(),
        ModelClient::mistral(Some("sk-test".into()), normalized_base),
    )
    .with_options(options);
    common::spawn_with_state(AppState::new(direct, normalized)).await
}

#[tokio::test]
async fn e2e_provider_401_reports_status_and_body() {
    let (provider, provider_stop) = spawn_provider().await;
    let server = spawn_over_provider(
        format!("{}/unauthorized", provider),
        format!("{}/empty", provider),
        PipelineOptions::default(),
    )
    .await;

    let (status, body) =
        common::post_json(&server.base_url, "/recommend_direct", &json!({"usage": "gaming"})).await;

    assert_eq!(status, 200);
    let record = &body["recommendations"][0];
    assert_eq!(record["error"], json!("llm_request_failed"));
    let details: Value = serde_json::from_str(record["details"].as_str().unwrap()).unwrap();
    assert_eq!(details["status_code"], json!(401));
    assert_eq!(details["body"], json!(r#"{"message":"bad key"}"#));
    assert_eq!(details["error"], json!("Mistral API error 401 Unauthorized"));

    server.stop().await;
    let _ = provider_stop.send(());
}

#[tokio::test]
async fn e2e_provider_empty_content_is_empty_llm_response() {
    let (provider, provider_stop) = spawn_provider().await;
    let server = spawn_over_provider(
        format!("{}/unauthorized", provider),
        format!("{}/empty", provider),
        PipelineOptions {
            include_debug_raw: true,
        },
    )
    .await;

    let (status, body) =
        common::post_json(&server.base_url, "/recommend", &json!({"usage": "office"})).await;

    assert_eq!(status, 200);
    let record = &body["recommendations"][0];
    assert_eq!(record["error"], json!("empty_llm_response"));
    assert_eq!(record["debug"]["raw_response"]["id"], json!("cmpl-1"));

    server.stop().await;
    let _ = provider_stop.send(());
}

#[tokio::test]
async fn e2e_provider_undecodable_body_is_request_failure() {
    let (provider, provider_stop) = spawn_provider().await;
    let server = spawn_over_provider(
        format!("{}/garbled", provider),
        format!("{}/garbled", provider),
        PipelineOptions::default(),
    )
    .await;

    let (status, body) =
        common::post_json(&server.base_url, "/recommend_direct", &json!({"usage": "gaming"})).await;

    assert_eq!(status, 200);
    let record = &body["recommendations"][0];
    assert_eq!(record["error"], json!("llm_request_failed"));
    let details: Value = serde_json::from_str(record["details"].as_str().unwrap()).unwrap();
    assert!(details["error"]
        .as_str()
        .unwrap()
        .starts_with("failed to decode response body"));
    assert!(details.get("status_code").is_none());

    server.stop().await;
    let _ = provider_stop.send(());
}

#[tokio::test]
async fn e2e_provider_success_returns_builds() {
    let (provider, provider_stop) = spawn_provider().await;
    let server = spawn_over_provider(
        format!("{}/ok/", provider),
        format!("{}/ok", provider),
        PipelineOptions::default(),
    )
    .await;

    let (status, body) = common::post_json(
        &server.base_url,
        "/recommend_direct",
        &json!({"usage": "gaming", "budget": 100000}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({"recommendations": common::three_builds()}));

    server.stop().await;
    let _ = provider_stop.send(());
}
