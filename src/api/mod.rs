//! API module for the HTTP surface
//!
//! - `POST /webhook` - ingest a JSON payload
//! - `GET /` - HTML dashboard
//! - `GET /stats` - counters as JSON
//! - `GET /health` - liveness

pub mod dashboard;
pub mod http;
pub mod rest;
pub mod state;

pub use http::{create_router, serve};
pub use rest::ApiError;
pub use state::{AppState, DEFAULT_MAX_BODY_BYTES};
