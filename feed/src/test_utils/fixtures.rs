//! Test fixtures
//!
//! Factory functions for event records, built from JSON the way the
//! server sends them.

use serde_json::{json, Value};

use crate::domain::EventRecord;

/// An event with every field missing
pub fn test_event() -> EventRecord {
    EventRecord::default()
}

fn with_timestamp(mut record: Value, timestamp: Option<&str>) -> EventRecord {
    if let Some(timestamp) = timestamp {
        record["timestamp"] = json!(timestamp);
    }
    EventRecord::from_value(record)
}

pub fn push_event(author: &str, to_branch: &str, timestamp: Option<&str>) -> EventRecord {
    with_timestamp(
        json!({
            "action": "PUSH",
            "author": author,
            "to_branch": to_branch
        }),
        timestamp,
    )
}

pub fn pull_request_event(
    author: &str,
    from_branch: &str,
    to_branch: &str,
    timestamp: Option<&str>,
) -> EventRecord {
    with_timestamp(
        json!({
            "action": "PULL_REQUEST",
            "author": author,
            "from_branch": from_branch,
            "to_branch": to_branch
        }),
        timestamp,
    )
}

pub fn merge_event(
    author: &str,
    from_branch: &str,
    to_branch: &str,
    timestamp: Option<&str>,
) -> EventRecord {
    with_timestamp(
        json!({
            "action": "MERGE",
            "author": author,
            "from_branch": from_branch,
            "to_branch": to_branch
        }),
        timestamp,
    )
}
