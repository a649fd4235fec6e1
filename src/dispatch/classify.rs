//! Alert code classification.

use serde_json::Value;

/// Alert value meaning "nothing to report"
pub const NO_ALERT_SENTINEL: &str = "NONE";

/// Alert codes the doorbell firmware writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    Security,
    Delivery,
    Doorbell,
    Motion,
}

impl AlertKind {
    pub const ALL: [AlertKind; 4] = [
        AlertKind::Security,
        AlertKind::Delivery,
        AlertKind::Doorbell,
        AlertKind::Motion,
    ];

    /// Exact, case-sensitive match on the stored code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Security Alert!" => Some(AlertKind::Security),
            "Delivery on the Door" => Some(AlertKind::Delivery),
            "The Door is ringing!" => Some(AlertKind::Doorbell),
            "Motion Detected!" => Some(AlertKind::Motion),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AlertKind::Security => "Security Alert!",
            AlertKind::Delivery => "Delivery on the Door",
            AlertKind::Doorbell => "The Door is ringing!",
            AlertKind::Motion => "Motion Detected!",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AlertKind::Security => "Security Alert!",
            AlertKind::Delivery => "Delivery Alert!",
            AlertKind::Doorbell => "Doorbell Alert!",
            AlertKind::Motion => "Motion Detected!",
        }
    }

    pub fn body(&self) -> &'static str {
        match self {
            AlertKind::Security => "A security alert was triggered!",
            AlertKind::Delivery => "A delivery is waiting at the door.",
            AlertKind::Doorbell => "Someone is at the door.",
            AlertKind::Motion => "Motion was detected near the door. Look at the camera.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    NoAlert,
    Alert(AlertKind),
    /// Anything else, including non-string values
    Unknown(Value),
}

pub fn classify_alert(value: &Value) -> Classification {
    match value {
        Value::String(code) if code == NO_ALERT_SENTINEL => Classification::NoAlert,
        Value::String(code) => match AlertKind::from_code(code) {
            Some(kind) => Classification::Alert(kind),
            None => Classification::Unknown(value.clone()),
        },
        other => Classification::Unknown(other.clone()),
    }
}
