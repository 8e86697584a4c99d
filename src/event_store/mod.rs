//! Event Store Module
//!
//! This module provides the in-memory webhook buffer:
//! - `EventStore`: retains entries, answers windowed queries, evicts expired ones
//! - `Clock`: time source abstraction (`SystemClock`, `ManualClock`)
//!
//! # Architecture
//!
//! ```text
//! Write Path:
//! ┌──────────────┐    ┌──────────────────┐    ┌───────────────┐
//! │ POST /webhook│───►│ add() under lock │───►│ id + timestamp│
//! └──────────────┘    └──────────────────┘    └───────────────┘
//!
//! Retention:
//! ┌──────────────────┐    ┌──────────────────────┐
//! │ RetentionJanitor │───►│ evict(now - window)  │
//! └──────────────────┘    └──────────────────────┘
//! ```

mod clock;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{EventStore, DEFAULT_RETENTION};
