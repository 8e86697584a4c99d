//! Stats endpoint - aggregate counters as JSON

use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};

use super::{panic_message, ApiError};
use crate::api::state::AppState;
use crate::types::StoreStats;

/// GET /stats - Total, recent and last-received over the configured window
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StoreStats> {
    Json(state.store.stats(state.window))
}

/// Panic response for `/stats`
pub fn stats_error_response(err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!(panic = panic_message(err.as_ref()), "Error getting stats");
    ApiError::internal("Error retrieving statistics").into_response()
}
