use std::sync::Arc;

use rigsmith::{MockTransport, PipelineOptions};
use serde_json::json;

use super::common;

#[tokio::test]
async fn e2e_recommend_uses_normalized_profile() {
    let transport = Arc::new(MockTransport::with_content(common::three_builds().to_string()));
    let server = common::spawn_server(Some("k"), transport.clone(), PipelineOptions::default()).await;

    let (status, body) = common::post_json(
        &server.base_url,
        "/recommend",
        &json!({"usage": "video editing", "budget": "₹70,000 - ₹90,000", "storage_capacity": "2TB"}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["recommendations"], common::three_builds());
    let sent = transport.requests();
    assert_eq!(sent[0].model, "open-mistral-7b");
    let prompt = sent[0].prompt().unwrap();
    assert!(prompt.contains("\"budget_numeric\": 80000"));
    assert!(prompt.contains("\"cpu_priority\": \"high\""));
    assert!(prompt.contains("\"storage_priority\": \"2TB\""));

    server.stop().await;
}
