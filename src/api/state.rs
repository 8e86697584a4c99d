//! Shared application state for the HTTP handlers

use std::sync::Arc;
use std::time::Duration;

use crate::event_store::EventStore;

/// Default cap on `POST /webhook` bodies (16 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// State handed to every axum handler
pub struct AppState {
    /// The webhook buffer
    pub store: Arc<EventStore>,

    /// Window used by the dashboard and `/stats`
    pub window: Duration,

    /// Largest accepted webhook body
    pub max_body_bytes: usize,
}

impl AppState {
    /// Create state that reads with the store's own retention window
    pub fn new(store: Arc<EventStore>) -> Self {
        let window = store.retention();
        Self {
            store,
            window,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Override the webhook body limit
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}
