//! HTTP server setup with Axum

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};

use super::dashboard;
use super::rest::{internal_error_response, stats, webhook};
use super::state::AppState;
use crate::utils::{current_timestamp, to_iso8601};

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // Webhook senders come from anywhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Dashboard
        .route("/", get(dashboard::index))
        // Ingress
        .route(
            "/webhook",
            post(webhook::receive_webhook).layer(DefaultBodyLimit::max(state.max_body_bytes)),
        )
        // Statistics, with its own error message on failure
        .route(
            "/stats",
            get(stats::get_stats).layer(CatchPanicLayer::custom(stats::stats_error_response)),
        )
        // Health check
        .route("/health", get(health_check))
        .layer(CatchPanicLayer::custom(internal_error_response))
        .layer(cors)
        .with_state(state)
}

/// Serve the API on `listener` until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Health check endpoint, independent of store state
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": to_iso8601(&current_timestamp()),
    }))
}
