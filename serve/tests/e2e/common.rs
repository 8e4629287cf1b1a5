//! Shared helpers for e2e tests: spawn a server over a given transport and post JSON to it.

use std::sync::Arc;
use std::time::Duration;

use rigsmith::{ChatTransport, PipelineOptions};
use serde_json::Value;
use serve::AppState;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Running server; dropping `shutdown` (or sending on it) stops it.
pub struct TestServer {
    pub base_url: String,
    pub shutdown: Option<oneshot::Sender<()>>,
    pub handle: tokio::task::JoinHandle<Result<(), Box<dyn std::error::Error + Send + Sync>>>,
}

impl TestServer {
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = tokio::time::timeout(Duration::from_secs(5), self.handle).await;
    }
}

/// Binds a random port and serves both pipelines over `transport`.
pub async fn spawn_server(
    api_key: Option<&str>,
    transport: Arc<dyn ChatTransport>,
    options: PipelineOptions,
) -> TestServer {
    let state = AppState::with_transport(api_key.map(str::to_string), transport, options);
    spawn_with_state(state).await
}

/// Binds a random port and serves `state`.
pub async fn spawn_with_state(state: AppState) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(serve::run_serve_on_listener(listener, state, async move {
        let _ = rx.await;
    }));
    TestServer {
        base_url: format!("http://{}", addr),
        shutdown: Some(tx),
        handle,
    }
}

/// POSTs `body` to `path`; returns status and parsed JSON (Null when the body is not JSON).
pub async fn post_json(base_url: &str, path: &str, body: &Value) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .post(format!("{}{}", base_url, path))
        .json(body)
        .timeout(Duration::from_secs(10))
        .send()
        .await
        .expect("request sent");
    let status = resp.status().as_u16();
    let text = resp.text().await.unwrap_or_default();
    eprintln!("[e2e] received {}: {}", status, text);
    (status, serde_json::from_str(&text).unwrap_or(Value::Null))
}

pub fn three_builds() -> Value {
    serde_json::json!([
        {"build_name": "Starter", "cpu": "Ryzen 5 5600", "gpu": "RX 6600", "ram": "16GB",
         "storage": "512GB NVMe", "motherboard": "B550M", "psu": "550W Bronze",
         "cabinet": "Mid tower", "estimated_price": "₹60,000", "why_this_build": "Entry 1080p gaming."},
        {"build_name": "Mainstream", "cpu": "Ryzen 5 7600", "gpu": "RTX 4060", "ram": "32GB",
         "storage": "1TB NVMe", "motherboard": "B650M", "psu": "650W Bronze",
         "cabinet": "Mid tower", "estimated_price": "₹90,000", "why_this_build": "High-refresh 1080p."},
        {"build_name": "Enthusiast", "cpu": "Ryzen 7 7800X3D", "gpu": "RTX 4070 Super", "ram": "32GB",
         "storage": "2TB NVMe", "motherboard": "X670", "psu": "750W Gold",
         "cabinet": "Airflow tower", "estimated_price": "₹1,60,000", "why_this_build": "1440p ultra."}
    ])
}
