//! Data types for the Webhook Inspector
//!
//! This module contains the core data structures shared by the store and the HTTP layer.

mod entry;
mod stats;

pub use entry::Entry;
pub use stats::StoreStats;
