//! Webhook endpoint - accepts and stores JSON payloads

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use super::ApiError;
use crate::api::state::AppState;
use crate::utils::to_iso8601;

/// Response for POST /webhook
#[derive(Debug, Serialize)]
pub struct WebhookAccepted {
    pub status: &'static str,
    pub message: &'static str,
    pub webhook_id: u64,
    /// `received_at` in RFC 3339
    pub timestamp: String,
}

/// Whether a Content-Type header value denotes JSON
///
/// Accepts `application/json` and `application/*+json`, ignoring parameters
/// and case.
pub fn is_json_content_type(value: &str) -> bool {
    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// POST /webhook - Validate and store a JSON payload
///
/// Malformed requests are rejected here and never reach the store.
pub async fn receive_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAccepted>, ApiError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

    if !content_type.as_deref().is_some_and(is_json_content_type) {
        tracing::warn!(content_type = ?content_type, "Invalid content type");
        return Err(ApiError::UnsupportedContentType {
            received: content_type,
        });
    }

    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "JSON parsing error");
        ApiError::InvalidJson(e)
    })?;

    if payload.is_null() {
        tracing::warn!("Empty JSON payload received");
        return Err(ApiError::EmptyPayload);
    }

    let entry = state.store.add(payload);
    tracing::info!(webhook_id = entry.id, "Webhook received and stored successfully");

    Ok(Json(WebhookAccepted {
        status: "success",
        message: "Webhook received and stored",
        webhook_id: entry.id,
        timestamp: to_iso8601(&entry.received_at),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_content_types() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("application/json; charset=utf-8"));
        assert!(is_json_content_type("Application/JSON"));
        assert!(is_json_content_type("application/vnd.github+json"));
    }

    #[test]
    fn test_non_json_content_types() {
        assert!(!is_json_content_type("text/plain"));
        assert!(!is_json_content_type("application/x-www-form-urlencoded"));
        assert!(!is_json_content_type("text/json+html"));
        assert!(!is_json_content_type(""));
    }
}
