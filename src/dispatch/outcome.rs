//! Terminal results of one dispatch.

use serde::Serialize;
use serde_json::Value;

use super::intent::NotificationIntent;
use crate::services::SendReceipt;

/// Why no notification was built
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Alert value was the "NONE" sentinel
    NoAlert,
    /// Alert value matched no known code
    UnknownClassification { value: Value },
    /// Password change with no update info to name the author
    MissingContext,
}

/// Why a notification was not delivered
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    Delivery { title: String, error: String },
    Lookup { error: String },
}

/// Every dispatch operation ends in exactly one of these.
///
/// None of them is an error for the caller: the triggering event is
/// considered processed either way.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchOutcome {
    Sent {
        intent: NotificationIntent,
        receipt: SendReceipt,
    },
    Skipped {
        reason: SkipReason,
    },
    Failed {
        reason: FailureReason,
    },
}

impl DispatchOutcome {
    pub fn skipped(reason: SkipReason) -> Self {
        DispatchOutcome::Skipped { reason }
    }

    pub fn failed(reason: FailureReason) -> Self {
        DispatchOutcome::Failed { reason }
    }

    pub fn status(&self) -> &'static str {
        match self {
            DispatchOutcome::Sent { .. } => "sent",
            DispatchOutcome::Skipped { .. } => "skipped",
            DispatchOutcome::Failed { .. } => "failed",
        }
    }

    pub fn is_sent(&self) -> bool {
        matches!(self, DispatchOutcome::Sent { .. })
    }

    /// The intent that was delivered, if any
    pub fn intent(&self) -> Option<&NotificationIntent> {
        match self {
            DispatchOutcome::Sent { intent, .. } => Some(intent),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outcome_json_shape() {
        let skipped = DispatchOutcome::skipped(SkipReason::UnknownClassification {
            value: json!("Banana"),
        });
        assert_eq!(
            serde_json::to_value(&skipped).unwrap(),
            json!({
                "status": "skipped",
                "reason": {"kind": "unknown_classification", "value": "Banana"}
            })
        );

        let failed = DispatchOutcome::failed(FailureReason::Delivery {
            title: "Security Alert!".to_string(),
            error: "timeout".to_string(),
        });
        let value = serde_json::to_value(&failed).unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["reason"]["kind"], "delivery");
        assert_eq!(value["reason"]["title"], "Security Alert!");
    }

    #[test]
    fn test_sent_exposes_intent() {
        let outcome = DispatchOutcome::Sent {
            intent: NotificationIntent::new("t", "b", "alerts"),
            receipt: SendReceipt {
                gateway: "log".to_string(),
                message_id: None,
                status_code: None,
                duration_ms: 0,
            },
        };
        assert!(outcome.is_sent());
        assert_eq!(outcome.status(), "sent");
        assert_eq!(outcome.intent().map(|i| i.title.as_str()), Some("t"));
        assert!(DispatchOutcome::skipped(SkipReason::NoAlert).intent().is_none());
    }
}
