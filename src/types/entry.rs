//! Entry type - one received webhook payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A webhook payload retained by the store
///
/// Ids and timestamps are assigned by the store; callers only supply the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique, strictly increasing id
    pub id: u64,
    /// When the store accepted the payload
    pub received_at: DateTime<Utc>,
    /// Opaque JSON body as received
    pub payload: Value,
}

impl Entry {
    pub fn new(id: u64, received_at: DateTime<Utc>, payload: Value) -> Self {
        Self {
            id,
            received_at,
            payload,
        }
    }

    /// Whether the entry was received at or after `cutoff`
    pub fn is_within(&self, cutoff: DateTime<Utc>) -> bool {
        self.received_at >= cutoff
    }

    /// Payload rendered as indented JSON (for display)
    pub fn pretty_payload(&self) -> String {
        serde_json::to_string_pretty(&self.payload).unwrap_or_else(|_| self.payload.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_is_within_includes_cutoff() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let entry = Entry::new(1, at, json!({"a": 1}));

        assert!(entry.is_within(at));
        assert!(entry.is_within(at - chrono::Duration::seconds(1)));
        assert!(!entry.is_within(at + chrono::Duration::seconds(1)));
    }

    #[test]
    fn test_serializes_timestamp_as_rfc3339() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let entry = Entry::new(7, at, json!(null));

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["received_at"], "2024-01-01T12:00:00Z");
        assert!(value["payload"].is_null());
    }
}
