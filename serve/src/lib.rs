//! HTTP server for rigsmith (axum).
//!
//! Serves the recommendation pipelines over JSON. See [`AppState`] for how pipelines are
//! wired and `app.rs` for the routes.
//!
//! **Public API**: [`run_serve`], [`run_serve_on_listener`], [`AppState`], [`mistral_client`].

mod app;
mod recommend;

use std::future::Future;

use tokio::net::TcpListener;
use tracing::info;

pub use app::{mistral_client, pipeline_options, AppState};

/// Serves on an existing listener until `shutdown` resolves. Used by tests (bind to
/// 127.0.0.1:0 then pass the listener).
pub async fn run_serve_on_listener<F>(
    listener: TcpListener,
    state: AppState,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("HTTP server listening on http://{}", addr);
    axum::serve(listener, app::router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("HTTP server stopped");
    Ok(())
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn run_serve(
    addr: &str,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let listener = TcpListener::bind(addr).await?;
    run_serve_on_listener(listener, state, ctrl_c()).await
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("could not listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
