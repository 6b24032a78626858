//! Event records as served by the events endpoint

use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Repository action reported by the server
///
/// Unknown values are kept verbatim so they can be shown to the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventAction {
    Push,
    PullRequest,
    Merge,
    Other(String),
}

impl EventAction {
    pub fn as_str(&self) -> &str {
        match self {
            EventAction::Push => "PUSH",
            EventAction::PullRequest => "PULL_REQUEST",
            EventAction::Merge => "MERGE",
            EventAction::Other(raw) => raw,
        }
    }
}

impl From<String> for EventAction {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "PUSH" => EventAction::Push,
            "PULL_REQUEST" => EventAction::PullRequest,
            "MERGE" => EventAction::Merge,
            _ => EventAction::Other(raw),
        }
    }
}

impl fmt::Display for EventAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text value of a record field
///
/// `Err` carries the JSON of an object or array found where text belongs.
fn text_field(fields: &Map<String, Value>, key: &str) -> Result<Option<String>, String> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(Some(v.to_string())),
        Some(other) => Err(other.to_string()),
    }
}

/// One server-reported repository action
///
/// Read-only and transient: it lives for a single render pass. The JSON it
/// was decoded from is kept untouched for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub action: Option<EventAction>,
    pub author: Option<String>,
    pub to_branch: Option<String>,
    /// Only meaningful for pull requests and merges
    pub from_branch: Option<String>,
    /// ISO-8601 text, formatted lazily by the renderer
    pub timestamp: Option<String>,
    raw: Value,
    malformed: bool,
}

impl EventRecord {
    /// Interpret one element of the events array
    ///
    /// Never fails: an element that is not an object, or that has an object
    /// or array where text belongs, is marked malformed and keeps whatever
    /// text fields could be read.
    pub fn from_value(raw: Value) -> Self {
        let Some(fields) = raw.as_object() else {
            tracing::warn!(record = %raw, "Event record is not an object");
            return Self {
                action: None,
                author: None,
                to_branch: None,
                from_branch: None,
                timestamp: None,
                raw,
                malformed: true,
            };
        };

        let mut malformed = false;
        let mut text = |key: &str| match text_field(fields, key) {
            Ok(value) => value,
            Err(found) => {
                malformed = true;
                tracing::warn!(field = key, found = %found, "Event field is not text");
                None
            }
        };

        let author = text("author");
        let to_branch = text("to_branch");
        let from_branch = text("from_branch");
        let timestamp = text("timestamp");

        let action = match text_field(fields, "action") {
            Ok(action) => action.map(EventAction::from),
            Err(found) => {
                malformed = true;
                tracing::warn!(found = %found, "Event action is not text");
                Some(EventAction::Other(found))
            }
        };

        Self {
            action,
            author,
            to_branch,
            from_branch,
            timestamp,
            malformed,
            raw,
        }
    }

    /// True when the record could not be read as a regular event
    pub fn is_malformed(&self) -> bool {
        self.malformed
    }

    /// The JSON this record was decoded from
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// The original record as compact JSON, for diagnostics
    pub fn raw_json(&self) -> String {
        self.raw.to_string()
    }
}

impl Default for EventRecord {
    fn default() -> Self {
        Self::from_value(Value::Object(Map::new()))
    }
}

impl<'de> Deserialize<'de> for EventRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(EventRecord::from_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_actions_parse() {
        assert_eq!(EventAction::from("PUSH".to_string()), EventAction::Push);
        assert_eq!(
            EventAction::from("PULL_REQUEST".to_string()),
            EventAction::PullRequest
        );
        assert_eq!(EventAction::from("MERGE".to_string()), EventAction::Merge);
    }

    #[test]
    fn action_matching_is_case_sensitive() {
        assert_eq!(
            EventAction::from("push".to_string()),
            EventAction::Other("push".to_string())
        );
    }

    #[test]
    fn from_value_reads_full_record() {
        let record = EventRecord::from_value(json!({
            "_id": "665b1f",
            "request_id": "abc123",
            "action": "PULL_REQUEST",
            "author": "alice",
            "from_branch": "feature",
            "to_branch": "main",
            "timestamp": "2024-06-01T14:30:00Z"
        }));

        assert!(!record.is_malformed());
        assert_eq!(record.action, Some(EventAction::PullRequest));
        assert_eq!(record.author.as_deref(), Some("alice"));
        assert_eq!(record.from_branch.as_deref(), Some("feature"));
        assert_eq!(record.to_branch.as_deref(), Some("main"));
        assert_eq!(record.timestamp.as_deref(), Some("2024-06-01T14:30:00Z"));
        assert_eq!(record.raw()["request_id"], json!("abc123"));
    }

    #[test]
    fn missing_null_and_empty_fields_are_none() {
        let record = EventRecord::from_value(json!({
            "action": "PUSH",
            "author": null,
            "to_branch": ""
        }));

        assert!(!record.is_malformed());
        assert_eq!(record.action, Some(EventAction::Push));
        assert!(record.author.is_none());
        assert!(record.to_branch.is_none());
        assert!(record.from_branch.is_none());
        assert!(record.timestamp.is_none());
    }

    #[test]
    fn scalar_text_fields_keep_json_spelling() {
        let record = EventRecord::from_value(json!({
            "action": "PUSH",
            "author": 42,
            "to_branch": true
        }));

        assert_eq!(record.author.as_deref(), Some("42"));
        assert_eq!(record.to_branch.as_deref(), Some("true"));
    }

    #[test]
    fn object_in_text_field_marks_record_malformed() {
        let record = EventRecord::from_value(json!({
            "action": "PUSH",
            "author": { "name": "alice" },
            "to_branch": "main"
        }));

        assert!(record.is_malformed());
        assert!(record.author.is_none());
        assert_eq!(record.to_branch.as_deref(), Some("main"));
    }

    #[test]
    fn object_action_is_kept_as_its_json() {
        let record = EventRecord::from_value(json!({ "action": { "kind": "deploy" } }));

        assert!(record.is_malformed());
        assert_eq!(
            record.action,
            Some(EventAction::Other(r#"{"kind":"deploy"}"#.to_string()))
        );
    }

    #[test]
    fn non_object_element_is_malformed() {
        let record = EventRecord::from_value(json!(7));

        assert!(record.is_malformed());
        assert!(record.action.is_none());
        assert_eq!(record.raw_json(), "7");
    }

    #[test]
    fn deserialize_never_fails_per_element() {
        let records: Vec<EventRecord> =
            serde_json::from_str(r#"[{"action":"PUSH"},{"action":{"kind":"deploy"}},7]"#).unwrap();

        assert_eq!(records.len(), 3);
        assert!(!records[0].is_malformed());
        assert!(records[1].is_malformed());
        assert!(records[2].is_malformed());
    }

    #[test]
    fn raw_json_is_the_original_record() {
        let record = EventRecord::from_value(json!({
            "_id": "x",
            "action": "DEPLOY",
            "author": 42,
            "from_branch": null,
            "to_branch": ""
        }));

        assert_eq!(
            record.raw_json(),
            r#"{"_id":"x","action":"DEPLOY","author":42,"from_branch":null,"to_branch":""}"#
        );
    }

    #[test]
    fn raw_json_keeps_key_order() {
        let record: EventRecord =
            serde_json::from_str(r#"{"to_branch":"main","action":"DEPLOY","_id":"x"}"#).unwrap();

        assert_eq!(
            record.raw_json(),
            r#"{"to_branch":"main","action":"DEPLOY","_id":"x"}"#
        );
    }

    #[test]
    fn default_record_is_an_empty_object() {
        let record = EventRecord::default();

        assert!(!record.is_malformed());
        assert!(record.action.is_none());
        assert_eq!(record.raw_json(), "{}");
    }
}
