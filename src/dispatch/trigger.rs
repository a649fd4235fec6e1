//! Routing of change-feed deliveries to dispatch operations.

use serde::Serialize;
use thiserror::Error;

use super::event::{ChangeEvent, EventKind, RecordCreated, RecordDeleted, ValueUpdated};
use crate::config::WatchConfig;
use crate::utils::path::{normalize_path, segments};

/// The four dispatch operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Alert,
    PasswordChange,
    TempPasswordCreated,
    TempPasswordDeleted,
}

impl Trigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trigger::Alert => "alert",
            Trigger::PasswordChange => "password_change",
            Trigger::TempPasswordCreated => "temp_password_created",
            Trigger::TempPasswordDeleted => "temp_password_deleted",
        }
    }
}

/// An event paired with the operation that handles it.
///
/// Each variant carries exactly the event shape its operation accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggeredEvent {
    Alert(ValueUpdated),
    PasswordChange(ValueUpdated),
    TempPasswordCreated(RecordCreated),
    TempPasswordDeleted(RecordDeleted),
}

impl TriggeredEvent {
    pub fn trigger(&self) -> Trigger {
        match self {
            TriggeredEvent::Alert(_) => Trigger::Alert,
            TriggeredEvent::PasswordChange(_) => Trigger::PasswordChange,
            TriggeredEvent::TempPasswordCreated(_) => Trigger::TempPasswordCreated,
            TriggeredEvent::TempPasswordDeleted(_) => Trigger::TempPasswordDeleted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No trigger watches {kind} events on {path}")]
pub struct Unrouted {
    pub path: String,
    pub kind: EventKind,
}

#[derive(Debug, Clone)]
pub struct TriggerRouter {
    alert_path: String,
    password_path: String,
    temp_password_root: String,
}

impl TriggerRouter {
    pub fn new(watch: &WatchConfig) -> Self {
        Self {
            alert_path: normalize_path(&watch.alert_path),
            password_path: normalize_path(&watch.password_path),
            temp_password_root: normalize_path(&watch.temp_password_root),
        }
    }

    /// Which trigger, if any, watches `kind` events on `path`
    pub fn resolve(&self, path: &str, kind: EventKind) -> Option<Trigger> {
        let path = normalize_path(path);

        match kind {
            EventKind::Updated if path == self.alert_path => Some(Trigger::Alert),
            EventKind::Updated if path == self.password_path => Some(Trigger::PasswordChange),
            EventKind::Created if self.is_temp_password_child(&path) => {
                Some(Trigger::TempPasswordCreated)
            }
            EventKind::Deleted if self.is_temp_password_child(&path) => {
                Some(Trigger::TempPasswordDeleted)
            }
            _ => None,
        }
    }

    pub fn route(&self, event: ChangeEvent) -> Result<TriggeredEvent, Unrouted> {
        let unrouted = |event: &ChangeEvent| Unrouted {
            path: event.path().to_string(),
            kind: event.kind(),
        };

        match (self.resolve(event.path(), event.kind()), event) {
            (Some(Trigger::Alert), ChangeEvent::ValueUpdated(e)) => Ok(TriggeredEvent::Alert(e)),
            (Some(Trigger::PasswordChange), ChangeEvent::ValueUpdated(e)) => {
                Ok(TriggeredEvent::PasswordChange(e))
            }
            (Some(Trigger::TempPasswordCreated), ChangeEvent::RecordCreated(e)) => {
                Ok(TriggeredEvent::TempPasswordCreated(e))
            }
            (Some(Trigger::TempPasswordDeleted), ChangeEvent::RecordDeleted(e)) => {
                Ok(TriggeredEvent::TempPasswordDeleted(e))
            }
            (_, event) => Err(unrouted(&event)),
        }
    }

    /// `{root}/{pushId}`: exactly one segment below the root
    fn is_temp_password_child(&self, path: &str) -> bool {
        let root: Vec<&str> = segments(&self.temp_password_root).collect();
        let parts: Vec<&str> = segments(path).collect();

        parts.len() == root.len() + 1 && parts.starts_with(&root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn router() -> TriggerRouter {
        TriggerRouter::new(&WatchConfig::default())
    }

    #[test]
    fn test_resolve_watched_paths() {
        let router = router();
        assert_eq!(router.resolve("/notification", EventKind::Updated), Some(Trigger::Alert));
        assert_eq!(
            router.resolve("main_password/", EventKind::Updated),
            Some(Trigger::PasswordChange)
        );
        assert_eq!(
            router.resolve("/temp_password/-Nx1", EventKind::Created),
            Some(Trigger::TempPasswordCreated)
        );
        assert_eq!(
            router.resolve("/temp_password/-Nx1", EventKind::Deleted),
            Some(Trigger::TempPasswordDeleted)
        );
    }

    #[test]
    fn test_resolve_rejects_other_combinations() {
        let router = router();
        assert_eq!(router.resolve("/notification", EventKind::Created), None);
        assert_eq!(router.resolve("/main_password", EventKind::Deleted), None);
        assert_eq!(router.resolve("/temp_password", EventKind::Created), None);
        assert_eq!(router.resolve("/temp_password/a/b", EventKind::Created), None);
        assert_eq!(router.resolve("/temp_password/a", EventKind::Updated), None);
        assert_eq!(router.resolve("/password_update_info", EventKind::Updated), None);
    }

    #[test]
    fn test_route_carries_event() {
        let event = ChangeEvent::from_delivery(
            "/notification",
            EventKind::Updated,
            Some(json!("NONE")),
            Some(json!("Motion Detected!")),
        );
        let routed = router().route(event).unwrap();
        assert_eq!(routed.trigger(), Trigger::Alert);
        match routed {
            TriggeredEvent::Alert(e) => assert_eq!(e.current, json!("Motion Detected!")),
            other => panic!("unexpected route {:?}", other),
        }
    }

    #[test]
    fn test_route_unrouted() {
        let event =
            ChangeEvent::from_delivery("/doors/front", EventKind::Updated, None, Some(json!(1)));
        let err = router().route(event).unwrap_err();
        assert_eq!(err.path, "/doors/front");
        assert_eq!(err.kind, EventKind::Updated);
        assert_eq!(err.to_string(), "No trigger watches updated events on /doors/front");
    }

    #[test]
    fn test_custom_watch_paths() {
        let watch = WatchConfig {
            alert_path: "/devices/door1/alert".to_string(),
            temp_password_root: "/devices/door1/temp".to_string(),
            ..WatchConfig::default()
        };
        let router = TriggerRouter::new(&watch);
        assert_eq!(
            router.resolve("/devices/door1/alert", EventKind::Updated),
            Some(Trigger::Alert)
        );
        assert_eq!(
            router.resolve("/devices/door1/temp/k", EventKind::Deleted),
            Some(Trigger::TempPasswordDeleted)
        );
        assert_eq!(router.resolve("/notification", EventKind::Updated), None);
    }
}
