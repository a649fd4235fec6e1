//! Dispatch command handler
//!
//! Routes one change event given on the command line through the same
//! dispatcher the HTTP ingest uses.

use serde_json::Value;

use crate::api::dto::EventDeliveryResponse;
use crate::config::settings::Settings;
use crate::dispatch::{ChangeEvent, EventKind};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Handler for the dispatch command
pub struct DispatchCommandHandler {
    state: AppState,
}

impl DispatchCommandHandler {
    /// Build the configured gateway and lookup store
    pub fn new(settings: &Settings) -> AppResult<Self> {
        Ok(Self::with_state(AppState::from_settings(settings)?))
    }

    pub fn with_state(state: AppState) -> Self {
        Self { state }
    }

    /// Route and dispatch one event
    ///
    /// Sent, skipped and failed deliveries are all `Ok`; only an event no
    /// trigger watches is an error.
    pub async fn execute(
        &self,
        path: &str,
        kind: EventKind,
        before: Option<Value>,
        after: Option<Value>,
    ) -> AppResult<EventDeliveryResponse> {
        let event = ChangeEvent::from_delivery(path.to_string(), kind, before, after);

        let routed = self.state.router.route(event).map_err(|unrouted| AppError::NotFound {
            entity: "trigger".to_string(),
            field: "path".to_string(),
            value: format!("{} ({})", unrouted.path, unrouted.kind),
        })?;

        let trigger = routed.trigger();
        let outcome = self.state.dispatcher.dispatch(routed).await;

        tracing::debug!(
            trigger = trigger.as_str(),
            status = outcome.status(),
            "Command-line dispatch finished"
        );

        Ok(EventDeliveryResponse { trigger, outcome })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::dispatch::{DispatchOutcome, SkipReason, Trigger};
    use crate::services::{MemoryLookup, RecordingGateway};

    fn handler(
        gateway: Arc<RecordingGateway>,
        lookup: Arc<MemoryLookup>,
    ) -> DispatchCommandHandler {
        DispatchCommandHandler::with_state(AppState::new(&Settings::default(), gateway, lookup))
    }

    #[tokio::test]
    async fn test_dispatch_password_change_reads_update_info() {
        let gateway = Arc::new(RecordingGateway::new());
        let lookup = Arc::new(MemoryLookup::new());
        lookup.set("/password_update_info", json!({"name": "Alice"}));

        let response = handler(gateway.clone(), lookup)
            .execute("/main_password", EventKind::Updated, Some(json!("1111")), Some(json!("2222")))
            .await
            .unwrap();

        assert_eq!(response.trigger, Trigger::PasswordChange);
        assert!(response.outcome.is_sent());
        assert_eq!(
            gateway.sent()[0].body,
            "Alice changed the password to: 2222"
        );
    }

    #[tokio::test]
    async fn test_dispatch_skip_is_ok() {
        let gateway = Arc::new(RecordingGateway::new());

        let response = handler(gateway.clone(), Arc::new(MemoryLookup::new()))
            .execute("/notification", EventKind::Updated, None, Some(json!("NONE")))
            .await
            .unwrap();

        assert_eq!(response.outcome, DispatchOutcome::skipped(SkipReason::NoAlert));
        assert_eq!(gateway.send_count(), 0);
    }

    #[tokio::test]
    async fn test_dispatch_unrouted_is_error() {
        let gateway = Arc::new(RecordingGateway::new());

        let result = handler(gateway.clone(), Arc::new(MemoryLookup::new()))
            .execute("/temp_password", EventKind::Created, None, Some(json!({})))
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
        assert_eq!(gateway.send_count(), 0);
    }

    #[tokio::test]
    async fn test_dispatch_from_default_settings_uses_log_gateway() {
        let handler = DispatchCommandHandler::new(&Settings::default()).unwrap();

        let response = handler
            .execute("/notification", EventKind::Updated, None, Some(json!("The Door is ringing!")))
            .await
            .unwrap();

        match response.outcome {
            DispatchOutcome::Sent { receipt, .. } => assert_eq!(receipt.gateway, "log"),
            other => panic!("expected sent outcome, got {:?}", other),
        }
    }
}
