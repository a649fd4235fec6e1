//! Gateway that only logs what it would have sent.

use std::time::Instant;

use async_trait::async_trait;

use super::gateway::{GatewayResult, MessagingGateway, SendReceipt};
use crate::dispatch::NotificationIntent;

/// Writes each notification to the log and reports success.
///
/// The default provider, so a fresh checkout runs without credentials.
#[derive(Debug, Clone, Default)]
pub struct LogGateway;

#[async_trait]
impl MessagingGateway for LogGateway {
    async fn send(&self, intent: &NotificationIntent) -> GatewayResult<SendReceipt> {
        let start = Instant::now();

        tracing::info!(
            topic = %intent.topic,
            title = %intent.title,
            body = %intent.body,
            "Notification published to log gateway"
        );

        Ok(SendReceipt {
            gateway: self.name().to_string(),
            message_id: None,
            status_code: None,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
