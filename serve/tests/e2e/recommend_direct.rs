use std::sync::Arc;

use async_trait::async_trait;
use rigsmith::{
    ChatCompletionRequest, ChatTransport, MockTransport, PipelineOptions, TransportError,
};
use serde_json::{json, Value};

use super::common;

#[tokio::test]
async fn e2e_recommend_direct_returns_three_builds() {
    let transport = Arc::new(MockTransport::with_content(common::three_builds().to_string()));
    let server = common::spawn_server(Some("k"), transport.clone(), PipelineOptions::default()).await;

    let (status, body) = common::post_json(
        &server.base_url,
        "/recommend_direct",
        &json!({"usage": "gaming", "budget": "100000", "preferred_brands": ["AMD", "Nvidia"]}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({"recommendations": common::three_builds()}));
    let sent = transport.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].model, "mistral-large");
    let prompt = sent[0].prompt().unwrap();
    assert!(prompt.contains("gaming"));
    assert!(prompt.contains("₹100,000"));

    server.stop().await;
}

#[tokio::test]
async fn e2e_missing_api_key_is_error_record_with_200() {
    let transport = Arc::new(MockTransport::with_content(common::three_builds().to_string()));
    let server = common::spawn_server(None, transport.clone(), PipelineOptions::default()).await;

    let (status, body) =
        common::post_json(&server.base_url, "/recommend_direct", &json!({"usage": "gaming"})).await;

    assert_eq!(status, 200);
    assert_eq!(body["recommendations"][0]["error"], json!("missing_api_key"));
    assert_eq!(body["recommendations"].as_array().map(Vec::len), Some(1));
    assert_eq!(transport.call_count(), 0);

    server.stop().await;
}

#[tokio::test]
async fn e2e_empty_reply_carries_debug_when_enabled() {
    let transport = Arc::new(MockTransport::with_content("   "));
    let server = common::spawn_server(
        Some("k"),
        transport,
        PipelineOptions {
            include_debug_raw: true,
        },
    )
    .await;

    let (status, body) =
        common::post_json(&server.base_url, "/recommend_direct", &json!({"usage": "office"})).await;

    assert_eq!(status, 200);
    let record = &body["recommendations"][0];
    assert_eq!(record["error"], json!("empty_llm_response"));
    assert!(record["debug"]["raw_response"]["choices"].is_array());

    server.stop().await;
}

#[tokio::test]
async fn e2e_provider_failure_is_llm_request_failed() {
    let transport = Arc::new(MockTransport::failing(
        TransportError::new("Mistral API error 401 Unauthorized").with_status(401, "Unauthorized"),
    ));
    let server = common::spawn_server(Some("bad"), transport, PipelineOptions::default()).await;

    let (status, body) =
        common::post_json(&server.base_url, "/recommend_direct", &json!({"usage": "gaming"})).await;

    assert_eq!(status, 200);
    let record = &body["recommendations"][0];
    assert_eq!(record["error"], json!("llm_request_failed"));
    let details: Value = serde_json::from_str(record["details"].as_str().unwrap()).unwrap();
    assert_eq!(details["status_code"], json!(401));

    server.stop().await;
}

struct PanickingTransport;

#[async_trait]
impl ChatTransport for PanickingTransport {
    async fn send(
        &self,
        _api_key: &str,
        _request: &ChatCompletionRequest,
    ) -> Result<Value, TransportError> {
        panic!("transport exploded");
    }
}

#[tokio::test]
async fn e2e_pipeline_panic_becomes_invalid_llm_response() {
    let server = common::spawn_server(
        Some("k"),
        Arc::new(PanickingTransport),
        PipelineOptions::default(),
    )
    .await;

    let (status, body) =
        common::post_json(&server.base_url, "/recommend_direct", &json!({"usage": "gaming"})).await;

    assert_eq!(status, 200);
    assert_eq!(
        body["recommendations"][0]["error"],
        json!("invalid_llm_response")
    );

    server.stop().await;
}
