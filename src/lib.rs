//! Webhook Inspector
//!
//! A disposable inspection buffer for webhook integrations: JSON payloads
//! POSTed to the server are kept in memory for a bounded window and exposed
//! through a dashboard and a stats endpoint.
//!
//! # Features
//!
//! - **Thread-Safe Store**: One `RwLock` guards entries and the id counter
//! - **Monotonic Ids**: Ids are never reused, even after eviction
//! - **Windowed Reads**: Recent entries and stats against a single cutoff
//! - **Retention Janitor**: Background eviction with failure backoff
//!
//! # Modules
//!
//! - `types`: Core data structures (Entry, StoreStats)
//! - `event_store`: The time-windowed store and its clock abstraction
//! - `janitor`: Background retention task
//! - `api`: Axum router, handlers and dashboard
//! - `config`: Environment-driven settings
//! - `utils`: Utility functions (timestamps, HTML escaping)
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use webhook_inspector::{AppState, Config, EventStore, RetentionJanitor};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let store = Arc::new(EventStore::with_retention(config.retention));
//!     let janitor = RetentionJanitor::new(store.clone(), config.janitor).spawn();
//!
//!     let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
//!     let state = Arc::new(AppState::new(store));
//!     webhook_inspector::api::serve(listener, state, async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await?;
//!
//!     janitor.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod event_store;
pub mod janitor;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use api::{create_router, ApiError, AppState};
pub use config::{Config, ConfigError};
pub use event_store::{Clock, EventStore, ManualClock, SystemClock};
pub use janitor::{Evict, JanitorConfig, JanitorError, JanitorHandle, RetentionJanitor};
pub use types::{Entry, StoreStats};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
