//! Notification payloads and the per-event message builders.

use serde::{Deserialize, Serialize};

use super::classify::AlertKind;
use super::record::TempPasswordRecord;

pub const PASSWORD_CHANGED_TITLE: &str = "Main Password Changed!!";
pub const TEMP_PASSWORD_CREATED_TITLE: &str = "New Temporary Password Added!";
pub const TEMP_PASSWORD_DELETED_TITLE: &str = "Temporary Password Deleted";

/// A push notification addressed to a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationIntent {
    pub title: String,
    pub body: String,
    pub topic: String,
}

impl NotificationIntent {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            topic: topic.into(),
        }
    }
}

/// Title and body before a topic is attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub title: String,
    pub body: String,
}

impl Message {
    pub fn into_intent(self, topic: impl Into<String>) -> NotificationIntent {
        NotificationIntent::new(self.title, self.body, topic)
    }
}

pub fn alert_message(kind: AlertKind) -> Message {
    Message {
        title: kind.title().to_string(),
        body: kind.body().to_string(),
    }
}

pub fn password_change_message(name: &str, new_password: &str) -> Message {
    Message {
        title: PASSWORD_CHANGED_TITLE.to_string(),
        body: format!("{} changed the password to: {}", name, new_password),
    }
}

pub fn temp_password_created_message(record: &TempPasswordRecord) -> Message {
    Message {
        title: TEMP_PASSWORD_CREATED_TITLE.to_string(),
        body: format!(
            "{} added a temporary password: {} (Expires: {})",
            record.name, record.password, record.expires_at
        ),
    }
}

pub fn temp_password_deleted_message(record: &TempPasswordRecord) -> Message {
    Message {
        title: TEMP_PASSWORD_DELETED_TITLE.to_string(),
        body: format!(
            "The temporary password: {}, added by {}, has been deleted.",
            record.password, record.name
        ),
    }
}
