//! REST API module for HTTP endpoints
//!
//! Provides the JSON endpoints:
//! - `POST /webhook` - Store a JSON payload
//! - `GET /stats` - Store statistics
//!
//! Every failure leaves through [`ApiError`], which owns the status code and
//! the JSON error body.

pub mod stats;
pub mod webhook;

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

/// API error response
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request was not sent as JSON
    #[error("Content-Type must be application/json")]
    UnsupportedContentType { received: Option<String> },

    /// Body could not be parsed as JSON
    #[error("Invalid JSON payload")]
    InvalidJson(#[source] serde_json::Error),

    /// Body parsed to `null`
    #[error("Empty JSON payload")]
    EmptyPayload,

    /// Anything unexpected; the message is shown to the caller as-is
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnsupportedContentType { .. }
            | ApiError::InvalidJson(_)
            | ApiError::EmptyPayload => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body sent back to the caller
    pub fn body(&self) -> Value {
        match self {
            ApiError::UnsupportedContentType { received } => json!({
                "error": self.to_string(),
                "received_content_type": received,
            }),
            ApiError::InvalidJson(e) => json!({
                "error": self.to_string(),
                "details": e.to_string(),
            }),
            ApiError::EmptyPayload | ApiError::Internal(_) => json!({
                "error": self.to_string(),
            }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// Extract a readable message from a caught panic
pub(crate) fn panic_message(err: &(dyn Any + Send)) -> &str {
    if let Some(msg) = err.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = err.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic payload"
    }
}

/// Last-resort response for a handler that panicked
pub fn internal_error_response(err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!(panic = panic_message(err.as_ref()), "Unexpected error processing request");
    ApiError::internal("Internal server error").into_response()
}
