//! Change-feed delivery DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::dispatch::{ChangeEvent, DispatchOutcome, EventKind, Trigger};

/// Body of `POST /api/events`.
///
/// `before`/`after` are the snapshots around the change; which one matters
/// depends on `kind`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EventDeliveryRequest {
    #[validate(length(min = 1, max = 512, message = "Path must be between 1 and 512 characters"))]
    pub path: String,
    pub kind: EventKind,
    #[serde(default)]
    pub before: Option<Value>,
    #[serde(default)]
    pub after: Option<Value>,
}

impl EventDeliveryRequest {
    pub fn into_change_event(self) -> ChangeEvent {
        ChangeEvent::from_delivery(self.path, self.kind, self.before, self.after)
    }
}

/// Result of one delivery: the trigger that handled it and what happened
#[derive(Debug, Serialize)]
pub struct EventDeliveryResponse {
    pub trigger: Trigger,
    pub outcome: DispatchOutcome,
}
