//! In-memory gateway that records every intent it is asked to send.

use std::sync::Mutex;

use async_trait::async_trait;

use super::gateway::{GatewayError, GatewayResult, MessagingGateway, SendReceipt};
use crate::dispatch::NotificationIntent;

/// Records sent intents; can be switched into a failing mode.
///
/// Failed sends are recorded too, so callers can assert on attempts.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<NotificationIntent>>,
    failure: Mutex<Option<String>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway whose every send fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        let gateway = Self::default();
        gateway.fail_with(message);
        gateway
    }

    pub fn fail_with(&self, message: impl Into<String>) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = Some(message.into());
        }
    }

    pub fn recover(&self) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = None;
        }
    }

    /// Snapshot of all attempted sends, in order
    pub fn sent(&self) -> Vec<NotificationIntent> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn send_count(&self) -> usize {
        self.sent.lock().map(|s| s.len()).unwrap_or(0)
    }
}

#[async_trait]
impl MessagingGateway for RecordingGateway {
    async fn send(&self, intent: &NotificationIntent) -> GatewayResult<SendReceipt> {
        let attempt = {
            let mut sent = self
                .sent
                .lock()
                .map_err(|_| GatewayError::Transport("recording lock poisoned".to_string()))?;
            sent.push(intent.clone());
            sent.len()
        };

        let failure = self.failure.lock().ok().and_then(|f| f.clone());
        if let Some(message) = failure {
            return Err(GatewayError::Transport(message));
        }

        Ok(SendReceipt {
            gateway: self.name().to_string(),
            message_id: Some(format!("recorded-{}", attempt)),
            status_code: None,
            duration_ms: 0,
        })
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_in_order_and_fails_on_demand() {
        let gateway = RecordingGateway::new();
        let first = NotificationIntent::new("a", "1", "alerts");
        let second = NotificationIntent::new("b", "2", "alerts");

        let receipt = gateway.send(&first).await.unwrap();
        assert_eq!(receipt.message_id.as_deref(), Some("recorded-1"));

        gateway.fail_with("unavailable");
        assert!(gateway.send(&second).await.is_err());

        gateway.recover();
        assert!(gateway.send(&second).await.is_ok());

        assert_eq!(gateway.sent(), vec![first, second.clone(), second]);
    }
}
