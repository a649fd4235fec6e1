//! Change events delivered by the database change-feed.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What happened at a watched location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Updated,
    Created,
    Deleted,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Updated => "updated",
            EventKind::Created => "created",
            EventKind::Deleted => "deleted",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An existing value was overwritten
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueUpdated {
    pub path: String,
    pub previous: Option<Value>,
    pub current: Value,
}

/// A record appeared under a watched collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordCreated {
    pub path: String,
    pub record: Value,
}

/// A record was removed; `record` is its last snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDeleted {
    pub path: String,
    pub record: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeEvent {
    ValueUpdated(ValueUpdated),
    RecordCreated(RecordCreated),
    RecordDeleted(RecordDeleted),
}

impl ChangeEvent {
    /// Builds an event from a raw `{path, kind, before, after}` delivery.
    ///
    /// Created records come from `after`, deleted records from `before`.
    /// Absent snapshots become JSON null.
    pub fn from_delivery(
        path: impl Into<String>,
        kind: EventKind,
        before: Option<Value>,
        after: Option<Value>,
    ) -> Self {
        let path = path.into();
        match kind {
            EventKind::Updated => ChangeEvent::ValueUpdated(ValueUpdated {
                path,
                previous: before,
                current: after.unwrap_or(Value::Null),
            }),
            EventKind::Created => ChangeEvent::RecordCreated(RecordCreated {
                path,
                record: after.unwrap_or(Value::Null),
            }),
            EventKind::Deleted => ChangeEvent::RecordDeleted(RecordDeleted {
                path,
                record: before.unwrap_or(Value::Null),
            }),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            ChangeEvent::ValueUpdated(e) => &e.path,
            ChangeEvent::RecordCreated(e) => &e.path,
            ChangeEvent::RecordDeleted(e) => &e.path,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            ChangeEvent::ValueUpdated(_) => EventKind::Updated,
            ChangeEvent::RecordCreated(_) => EventKind::Created,
            ChangeEvent::RecordDeleted(_) => EventKind::Deleted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_delivery_picks_snapshot_by_kind() {
        let before = Some(json!({"name": "Bob"}));
        let after = Some(json!({"name": "Carol"}));

        let created = ChangeEvent::from_delivery(
            "/temp_password/a",
            EventKind::Created,
            before.clone(),
            after.clone(),
        );
        match created {
            ChangeEvent::RecordCreated(e) => assert_eq!(e.record, json!({"name": "Carol"})),
            other => panic!("unexpected event {:?}", other),
        }

        match ChangeEvent::from_delivery("/temp_password/a", EventKind::Deleted, before, after) {
            ChangeEvent::RecordDeleted(e) => assert_eq!(e.record, json!({"name": "Bob"})),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_from_delivery_missing_after_is_null() {
        let event = ChangeEvent::from_delivery("/notification", EventKind::Updated, None, None);
        assert_eq!(event.kind(), EventKind::Updated);
        assert_eq!(event.path(), "/notification");
        match event {
            ChangeEvent::ValueUpdated(e) => {
                assert_eq!(e.current, Value::Null);
                assert!(e.previous.is_none());
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_event_kind_serde() {
        assert_eq!(serde_json::to_string(&EventKind::Deleted).unwrap(), "\"deleted\"");
        let kind: EventKind = serde_json::from_str("\"created\"").unwrap();
        assert_eq!(kind, EventKind::Created);
        assert!(serde_json::from_str::<EventKind>("\"moved\"").is_err());
    }
}
