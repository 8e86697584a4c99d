//! Aggregate statistics over the retained entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of store counters, computed under a single lock acquisition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Number of retained entries (after whatever eviction has happened)
    pub total_count: usize,
    /// Number of entries inside the requested window
    pub recent_count: usize,
    /// Latest `received_at` across retained entries, `None` when empty
    pub last_received: Option<DateTime<Utc>>,
}

impl StoreStats {
    /// Zeroed stats used when the real ones cannot be loaded
    pub fn empty() -> Self {
        Self::default()
    }
}
