use std::sync::Arc;

use rigsmith::{MockTransport, PipelineOptions};
use serde_json::{json, Value};

use super::common;

#[tokio::test]
async fn e2e_root_reports_status() {
    let server = common::spawn_server(
        Some("k"),
        Arc::new(MockTransport::with_content("[]")),
        PipelineOptions::default(),
    )
    .await;

    let resp = reqwest::get(format!("{}/", server.base_url)).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"status": "Backend running"}));

    server.stop().await;
}

#[tokio::test]
async fn e2e_cors_allows_any_origin() {
    let server = common::spawn_server(
        Some("k"),
        Arc::new(MockTransport::with_content("[]")),
        PipelineOptions::default(),
    )
    .await;

    let resp = reqwest::Client::new()
        .request(
            reqwest::Method::OPTIONS,
            format!("{}/recommend_direct", server.base_url),
        )
        .header("Origin", "https://frontend.example")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    server.stop().await;
}
