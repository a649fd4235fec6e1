//! Core messaging gateway trait and types.
//!
//! A gateway delivers one [`NotificationIntent`] to every device subscribed
//! to the intent's topic.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::dispatch::NotificationIntent;

/// Why a gateway could not deliver a message
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Request never produced a response (DNS, TLS, timeout, ...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Gateway answered with a non-success status
    #[error("Gateway rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Invalid gateway configuration for {field}: {reason}")]
    Configuration { field: String, reason: String },
}

impl GatewayError {
    pub fn configuration(field: impl Into<String>, reason: impl Into<String>) -> Self {
        GatewayError::Configuration {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(error: reqwest::Error) -> Self {
        GatewayError::Transport(error.to_string())
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Result of a successful send
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendReceipt {
    /// Name of the gateway that accepted the message
    pub gateway: String,
    /// Gateway-assigned message identifier, when the gateway returns one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub duration_ms: u64,
}

/// Trait for messaging gateways (FCM, webhook, ...)
///
/// Implementations report failure through [`GatewayError`]; deciding what a
/// failure means for the triggering event is left to the dispatcher.
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Sends a notification to the intent's topic
    async fn send(&self, intent: &NotificationIntent) -> GatewayResult<SendReceipt>;

    /// Static name for logs and receipts (e.g. "fcm", "webhook")
    fn name(&self) -> &'static str;

    /// Validates gateway configuration (optional, default no-op)
    async fn validate_config(&self) -> GatewayResult<()> {
        Ok(())
    }
}
