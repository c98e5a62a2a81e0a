//! The immutable event record
//!
//! An `EventRecord` is one audit/activity entry. Records are created exactly
//! once by the store, read many times, and never mutated or deleted.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One immutable audit/activity entry in the ledger
///
/// The store assigns `id` and `timestamp` at append time; callers supply the
/// actor identity, the action type tag and the open `details` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Store-assigned identifier, monotonically increasing with insertion.
    /// Doubles as the stable cursor/tie-breaker for same-tick timestamps.
    pub id: u64,

    /// The user this record is attributed to
    pub actor_id: i64,

    /// Display name captured at event time. Intentionally denormalized:
    /// it is never re-resolved, so history survives later renames.
    pub actor_label: String,

    /// Open-ended category tag, e.g. "user_login" or "quiz_attempt".
    /// The store does not enforce a closed set; new tags need no migration.
    pub action_type: String,

    /// UTC instant assigned by the store at append time, stored with
    /// millisecond precision
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,

    /// Action-type specific payload; always a JSON object
    pub details: serde_json::Value,
}

impl EventRecord {
    /// Compare two records for newest-first listings: timestamp descending,
    /// ties broken by id ascending so same-tick records keep append order
    pub fn recency_cmp(a: &EventRecord, b: &EventRecord) -> Ordering {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| a.id.cmp(&b.id))
    }

    /// Serialize record to a JSON string (one JSONL line)
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize a record from a JSONL line
    pub fn from_json_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: u64, ts_millis: i64) -> EventRecord {
        EventRecord {
            id,
            actor_id: 1,
            actor_label: "mika".to_string(),
            action_type: "user_login".to_string(),
            timestamp: DateTime::from_timestamp_millis(ts_millis).unwrap(),
            details: json!({}),
        }
    }

    #[test]
    fn test_json_line_round_trip() {
        let rec = EventRecord {
            id: 3,
            actor_id: 42,
            actor_label: "mika".to_string(),
            action_type: "quiz_attempt".to_string(),
            timestamp: DateTime::from_timestamp_millis(1_700_000_000_123).unwrap(),
            details: json!({
                "quiz_id": 7,
                "quiz_title": "N5 Vocabulary",
                "score": 85,
                "accuracy": 0.85
            }),
        };

        let line = rec.to_json_line().unwrap();
        assert!(line.contains("\"action_type\":\"quiz_attempt\""));
        assert!(line.contains("\"timestamp\":1700000000123"));

        let parsed = EventRecord::from_json_line(&line).unwrap();
        assert_eq!(parsed, rec);
    }

    #[test]
    fn test_recency_newer_timestamp_first() {
        let older = record(1, 1000);
        let newer = record(2, 2000);
        assert_eq!(EventRecord::recency_cmp(&newer, &older), Ordering::Less);
        assert_eq!(EventRecord::recency_cmp(&older, &newer), Ordering::Greater);
    }

    #[test]
    fn test_recency_same_tick_keeps_append_order() {
        let first = record(5, 1000);
        let second = record(6, 1000);
        // Equal timestamps: lower id (appended first) sorts first
        assert_eq!(EventRecord::recency_cmp(&first, &second), Ordering::Less);
    }
}
