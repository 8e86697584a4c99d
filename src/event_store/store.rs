//! Event Store - time-windowed in-memory webhook buffer
//!
//! The EventStore owns every retained [`Entry`]. One lock guards both the
//! entries and the id counter, so id assignment, timestamping and the append
//! happen as one step with respect to every other operation.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde_json::Value;

use super::clock::{Clock, SystemClock};
use crate::types::{Entry, StoreStats};

/// Default retention window (1 hour)
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(60 * 60);

/// State guarded by the store lock
#[derive(Debug)]
struct Inner {
    /// Retained entries in insertion order
    entries: Vec<Entry>,
    /// Next id to hand out; never reset, so eviction cannot cause reuse
    next_id: u64,
    /// Latest timestamp handed out so far
    high_water: Option<DateTime<Utc>>,
}

impl Inner {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            high_water: None,
        }
    }
}

/// Thread-safe, time-windowed store of received webhooks
pub struct EventStore {
    inner: RwLock<Inner>,
    clock: Arc<dyn Clock>,
    retention: Duration,
}

impl EventStore {
    /// Create a store with the default retention and the system clock
    pub fn new() -> Self {
        Self::with_clock(DEFAULT_RETENTION, Arc::new(SystemClock))
    }

    /// Create a store with a custom retention window
    pub fn with_retention(retention: Duration) -> Self {
        Self::with_clock(retention, Arc::new(SystemClock))
    }

    /// Create a store with a custom retention window and time source
    pub fn with_clock(retention: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: RwLock::new(Inner::new()),
            clock,
            retention,
        }
    }

    /// Retention window used by the janitor and the HTTP read endpoints
    pub fn retention(&self) -> Duration {
        self.retention
    }

    /// Number of retained entries
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    /// Store a payload and return a copy of the new entry
    ///
    /// The timestamp is clamped to the latest one already issued, so id order
    /// and `received_at` order never disagree even if the wall clock steps back.
    pub fn add(&self, payload: Value) -> Entry {
        let mut inner = self.inner.write();

        let now = self.clock.now();
        let received_at = match inner.high_water {
            Some(last) if last > now => last,
            _ => now,
        };

        let id = inner.next_id;
        inner.next_id += 1;
        inner.high_water = Some(received_at);

        let entry = Entry::new(id, received_at, payload);
        inner.entries.push(entry.clone());
        drop(inner);

        tracing::info!(webhook_id = id, "Added webhook entry");
        entry
    }

    /// Entries received within `window`, most recent first
    ///
    /// The returned vector is a snapshot; later mutations do not affect it.
    pub fn recent_entries(&self, window: Duration) -> Vec<Entry> {
        let cutoff = self.cutoff(window);
        let inner = self.inner.read();

        let mut recent: Vec<Entry> = inner
            .entries
            .iter()
            .rev()
            .filter(|entry| entry.is_within(cutoff))
            .cloned()
            .collect();
        drop(inner);

        recent.sort_by(|a, b| {
            b.received_at
                .cmp(&a.received_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        recent
    }

    /// Remove entries received before `now - window`, returning how many were dropped
    pub fn evict(&self, window: Duration) -> usize {
        let cutoff = self.cutoff(window);
        let mut inner = self.inner.write();

        let before = inner.entries.len();
        inner.entries.retain(|entry| entry.is_within(cutoff));
        let removed = before - inner.entries.len();
        drop(inner);

        if removed > 0 {
            tracing::info!(removed, %cutoff, "Cleaned up old webhook entries");
        }
        removed
    }

    /// Counters over the retained entries, `recent_count` measured against `window`
    pub fn stats(&self, window: Duration) -> StoreStats {
        let cutoff = self.cutoff(window);
        let inner = self.inner.read();

        StoreStats {
            total_count: inner.entries.len(),
            recent_count: inner
                .entries
                .iter()
                .filter(|entry| entry.is_within(cutoff))
                .count(),
            last_received: inner.entries.iter().map(|entry| entry.received_at).max(),
        }
    }

    /// `now - window`, computed once per call
    fn cutoff(&self, window: Duration) -> DateTime<Utc> {
        let now = self.clock.now();
        chrono::Duration::from_std(window)
            .ok()
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_store::ManualClock;
    use chrono::TimeZone;
    use serde_json::json;

    const HOUR: Duration = Duration::from_secs(3600);

    fn manual_store() -> (EventStore, Arc<ManualClock>) {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let store = EventStore::with_clock(HOUR, clock.clone());
        (store, clock)
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let (store, _clock) = manual_store();

        let first = store.add(json!({"a": 1}));
        let second = store.add(json!({"b": 2}));

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_add_returns_stored_copy() {
        let (store, clock) = manual_store();

        let entry = store.add(json!({"nested": {"list": [1, 2, 3]}}));

        assert_eq!(entry.received_at, clock.now());
        assert_eq!(entry.payload, json!({"nested": {"list": [1, 2, 3]}}));
        assert_eq!(store.recent_entries(HOUR), vec![entry]);
    }

    #[test]
    fn test_recent_entries_most_recent_first() {
        let (store, clock) = manual_store();

        store.add(json!({"a": 1}));
        clock.advance(chrono::Duration::minutes(1));
        store.add(json!({"b": 2}));
        clock.advance(chrono::Duration::minutes(1));
        store.add(json!({"c": 3}));
        clock.advance(chrono::Duration::minutes(1));

        let recent = store.recent_entries(HOUR);
        let ids: Vec<u64> = recent.iter().map(|e| e.id).collect();
        let payloads: Vec<Value> = recent.into_iter().map(|e| e.payload).collect();

        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(payloads, vec![json!({"c": 3}), json!({"b": 2}), json!({"a": 1})]);
    }

    #[test]
    fn test_recent_entries_ties_broken_by_id() {
        let (store, _clock) = manual_store();

        store.add(json!(1));
        store.add(json!(2));
        store.add(json!(3));

        let ids: Vec<u64> = store.recent_entries(HOUR).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_recent_entries_respects_window() {
        let (store, clock) = manual_store();

        store.add(json!("old"));
        clock.advance(chrono::Duration::minutes(30));
        store.add(json!("new"));
        clock.advance(chrono::Duration::minutes(20));

        let recent = store.recent_entries(Duration::from_secs(30 * 60));
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].payload, json!("new"));

        // Exactly on the cutoff still counts
        let on_cutoff = store.recent_entries(Duration::from_secs(50 * 60));
        assert_eq!(on_cutoff.len(), 2);
    }

    #[test]
    fn test_recent_entries_is_snapshot() {
        let (store, _clock) = manual_store();
        store.add(json!({"a": 1}));

        let snapshot = store.recent_entries(HOUR);
        store.add(json!({"b": 2}));
        store.evict(Duration::ZERO);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, 1);
    }

    #[test]
    fn test_evict_removes_expired_entries() {
        let (store, clock) = manual_store();

        store.add(json!({"a": 1}));
        clock.advance(chrono::Duration::minutes(61));

        assert_eq!(store.evict(HOUR), 1);
        assert!(store.is_empty());
        assert_eq!(store.stats(HOUR).total_count, 0);
    }

    #[test]
    fn test_evict_keeps_entries_inside_window() {
        let (store, clock) = manual_store();

        store.add(json!("expired"));
        clock.advance(chrono::Duration::minutes(40));
        store.add(json!("kept"));
        clock.advance(chrono::Duration::minutes(30));

        assert_eq!(store.evict(HOUR), 1);
        let remaining = store.recent_entries(HOUR);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].payload, json!("kept"));
        assert_eq!(remaining[0].id, 2);
    }

    #[test]
    fn test_evict_is_idempotent() {
        let (store, clock) = manual_store();

        store.add(json!(1));
        clock.advance(chrono::Duration::minutes(10));
        store.add(json!(2));
        clock.advance(chrono::Duration::minutes(55));

        assert_eq!(store.evict(HOUR), 1);
        let after_first = store.recent_entries(HOUR);
        assert_eq!(store.evict(HOUR), 0);
        assert_eq!(store.recent_entries(HOUR), after_first);
    }

    #[test]
    fn test_ids_not_reused_after_eviction() {
        let (store, clock) = manual_store();

        store.add(json!(1));
        store.add(json!(2));
        clock.advance(chrono::Duration::hours(2));
        store.evict(HOUR);

        let next = store.add(json!(3));
        assert_eq!(next.id, 3);
    }

    #[test]
    fn test_timestamps_never_go_backwards() {
        let (store, clock) = manual_store();

        let first = store.add(json!(1));
        clock.advance(chrono::Duration::seconds(-30));
        let second = store.add(json!(2));

        assert!(second.id > first.id);
        assert_eq!(second.received_at, first.received_at);
    }

    #[test]
    fn test_stats_on_empty_store() {
        let (store, _clock) = manual_store();

        let stats = store.stats(HOUR);
        assert_eq!(stats, StoreStats::empty());
        assert!(stats.last_received.is_none());
    }

    #[test]
    fn test_stats_counts_and_last_received() {
        let (store, clock) = manual_store();

        store.add(json!(1));
        clock.advance(chrono::Duration::minutes(45));
        let latest = store.add(json!(2));
        clock.advance(chrono::Duration::minutes(30));

        let stats = store.stats(HOUR);
        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.recent_count, 1);
        assert!(stats.recent_count <= stats.total_count);
        assert_eq!(stats.last_received, Some(latest.received_at));
    }

    #[test]
    fn test_huge_window_does_not_overflow() {
        let (store, _clock) = manual_store();
        store.add(json!(1));

        assert_eq!(store.recent_entries(Duration::MAX).len(), 1);
        assert_eq!(store.evict(Duration::MAX), 0);
    }
}
