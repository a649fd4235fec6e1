//! The notification dispatcher.
//!
//! One operation per trigger. Each classifies its event, builds at most one
//! notification intent, hands it to the gateway and reports a
//! [`DispatchOutcome`]. No operation returns an error: skips and failures are
//! logged and returned as values.

use std::sync::Arc;

use super::classify::{Classification, classify_alert};
use super::event::{RecordCreated, RecordDeleted, ValueUpdated};
use super::intent::{
    Message, alert_message, password_change_message, temp_password_created_message,
    temp_password_deleted_message,
};
use super::outcome::{DispatchOutcome, FailureReason, SkipReason};
use super::record::{PasswordChangeContext, TempPasswordRecord, render_value};
use super::trigger::TriggeredEvent;
use crate::services::{MessagingGateway, SideLookup};

pub const DEFAULT_TOPIC: &str = "alerts";
pub const DEFAULT_UPDATE_INFO_PATH: &str = "/password_update_info";

pub struct Dispatcher {
    gateway: Arc<dyn MessagingGateway>,
    lookup: Arc<dyn SideLookup>,
    topic: String,
    update_info_path: String,
}

impl Dispatcher {
    pub fn new(gateway: Arc<dyn MessagingGateway>, lookup: Arc<dyn SideLookup>) -> Self {
        Self {
            gateway,
            lookup,
            topic: DEFAULT_TOPIC.to_string(),
            update_info_path: DEFAULT_UPDATE_INFO_PATH.to_string(),
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    pub fn with_update_info_path(mut self, path: impl Into<String>) -> Self {
        self.update_info_path = path.into();
        self
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Runs the operation the event was routed to
    pub async fn dispatch(&self, event: TriggeredEvent) -> DispatchOutcome {
        match event {
            TriggeredEvent::Alert(e) => self.dispatch_alert(e).await,
            TriggeredEvent::PasswordChange(e) => self.dispatch_password_change(e).await,
            TriggeredEvent::TempPasswordCreated(e) => self.dispatch_temp_password_created(e).await,
            TriggeredEvent::TempPasswordDeleted(e) => self.dispatch_temp_password_deleted(e).await,
        }
    }

    pub async fn dispatch_alert(&self, event: ValueUpdated) -> DispatchOutcome {
        match classify_alert(&event.current) {
            Classification::NoAlert => {
                tracing::debug!(path = %event.path, "Alert cleared, nothing to send");
                DispatchOutcome::skipped(SkipReason::NoAlert)
            }
            Classification::Unknown(value) => {
                tracing::info!(path = %event.path, value = %value, "Unknown notification type");
                DispatchOutcome::skipped(SkipReason::UnknownClassification { value })
            }
            Classification::Alert(kind) => self.deliver(alert_message(kind)).await,
        }
    }

    pub async fn dispatch_password_change(&self, event: ValueUpdated) -> DispatchOutcome {
        let info = match self.lookup.get(&self.update_info_path).await {
            Ok(info) => info,
            Err(e) => {
                tracing::error!(
                    path = %self.update_info_path,
                    error = %e,
                    "Failed to read password update info"
                );
                return DispatchOutcome::failed(FailureReason::Lookup {
                    error: e.to_string(),
                });
            }
        };

        let context = match PasswordChangeContext::from_value(info.as_ref()) {
            Ok(Some(context)) => context,
            Ok(None) => {
                tracing::debug!(
                    path = %self.update_info_path,
                    "No password update info, skipping notification"
                );
                return DispatchOutcome::skipped(SkipReason::MissingContext);
            }
            Err(error) => {
                tracing::error!(
                    path = %self.update_info_path,
                    error = %error,
                    "Malformed password update info"
                );
                return DispatchOutcome::failed(FailureReason::Lookup { error });
            }
        };

        let new_password = render_value(&event.current);
        self.deliver(password_change_message(&context.name, &new_password))
            .await
    }

    pub async fn dispatch_temp_password_created(&self, event: RecordCreated) -> DispatchOutcome {
        let record = TempPasswordRecord::from_snapshot(&event.record);
        self.deliver(temp_password_created_message(&record)).await
    }

    pub async fn dispatch_temp_password_deleted(&self, event: RecordDeleted) -> DispatchOutcome {
        let record = TempPasswordRecord::from_snapshot(&event.record);
        self.deliver(temp_password_deleted_message(&record)).await
    }

    /// Single send attempt; no retry
    async fn deliver(&self, message: Message) -> DispatchOutcome {
        let intent = message.into_intent(self.topic.as_str());

        match self.gateway.send(&intent).await {
            Ok(receipt) => {
                tracing::info!(
                    title = %intent.title,
                    topic = %intent.topic,
                    gateway = %receipt.gateway,
                    message_id = ?receipt.message_id,
                    duration_ms = receipt.duration_ms,
                    "Notification sent successfully"
                );
                DispatchOutcome::Sent { intent, receipt }
            }
            Err(e) => {
                tracing::error!(
                    title = %intent.title,
                    topic = %intent.topic,
                    gateway = self.gateway.name(),
                    error = %e,
                    "Error sending notification"
                );
                DispatchOutcome::failed(FailureReason::Delivery {
                    title: intent.title,
                    error: e.to_string(),
                })
            }
        }
    }
}
