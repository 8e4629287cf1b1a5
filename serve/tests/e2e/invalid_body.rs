use std::sync::Arc;

use rigsmith::{MockTransport, PipelineOptions};
use serde_json::json;

use super::common;

/// A body that fails schema validation is rejected by the framework and never reaches
/// the provider.
#[tokio::test]
async fn e2e_body_without_usage_is_rejected() {
    let transport = Arc::new(MockTransport::with_content(common::three_builds().to_string()));
    let server = common::spawn_server(Some("k"), transport.clone(), PipelineOptions::default()).await;

    let (status, _) =
        common::post_json(&server.base_url, "/recommend_direct", &json!({"budget": 50000})).await;
    assert!((400..500).contains(&status), "expected 4xx, got {}", status);
    assert_eq!(transport.call_count(), 0);

    server.stop().await;
}

#[tokio::test]
async fn e2e_whole_float_budget_is_accepted_fractional_is_not() {
    let transport = Arc::new(MockTransport::with_content(common::three_builds().to_string()));
    let server = common::spawn_server(Some("k"), transport.clone(), PipelineOptions::default()).await;

    let (status, body) = common::post_json(
        &server.base_url,
        "/recommend_direct",
        &json!({"usage": "gaming", "budget": 75000.0}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["recommendations"].as_array().map(Vec::len), Some(3));
    assert!(transport.requests()[0].prompt().unwrap().contains("₹75,000"));

    let (status, _) = common::post_json(
        &server.base_url,
        "/recommend_direct",
        &json!({"usage": "gaming", "budget": 75000.5}),
    )
    .await;
    assert!((400..500).contains(&status), "expected 4xx, got {}", status);
    assert_eq!(transport.call_count(), 1);

    server.stop().await;
}
