//! HTTP API.
//!
//! Exposes the detection engine over a small axum router:
//! predict, notify, history, and the whitelist administration endpoints.

mod handlers;
mod types;

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::detection::DetectionEngine;
use crate::notify::TelegramNotifier;

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The detection engine.
    pub engine: Arc<DetectionEngine>,
    /// Outbound notifier; `None` leaves the notify endpoint disabled.
    pub notifier: Option<Arc<TelegramNotifier>>,
}

/// Builds the API router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/predict", post(handlers::predict))
        .route("/api/v1/notify", post(handlers::notify))
        .route("/api/v1/history", get(handlers::history))
        .route(
            "/api/v1/whitelist",
            get(handlers::whitelist_list).post(handlers::whitelist_add),
        )
        .route(
            "/api/v1/whitelist/{domain}",
            delete(handlers::whitelist_remove),
        )
        .route("/api/v1/whitelist/reload", post(handlers::whitelist_reload))
        .with_state(state)
}

/// Binds the listener and serves the API until the process exits.
///
/// # Errors
///
/// Returns an error when the port cannot be bound or the server fails.
pub async fn serve(port: u16, state: AppState) -> Result<(), anyhow::Error> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind API server to port {port}: {e}"))?;

    log::info!("API server listening on http://0.0.0.0:{port}/api/v1/");

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("API server error: {e}"))?;

    Ok(())
}
