//! Messaging gateways with pluggable providers.
//!
//! The core trait `MessagingGateway` hides which push service delivers a
//! notification. The active provider is chosen by `messaging.provider`.

mod fcm_gateway;
mod gateway;
mod log_gateway;
#[cfg(test)]
mod recording_gateway;
mod webhook_gateway;

use std::sync::Arc;
use std::time::Duration;

pub use fcm_gateway::FcmGateway;
pub use gateway::{GatewayError, GatewayResult, MessagingGateway, SendReceipt};
pub use log_gateway::LogGateway;
#[cfg(test)]
pub use recording_gateway::RecordingGateway;
pub use webhook_gateway::WebhookGateway;

use crate::config::{MessagingConfig, MessagingProvider};
use crate::error::{AppError, AppResult};

/// Builds the gateway named by `config.provider`
pub fn create_gateway(config: &MessagingConfig) -> AppResult<Arc<dyn MessagingGateway>> {
    let timeout = Duration::from_secs(config.timeout_seconds);

    let gateway: Arc<dyn MessagingGateway> = match config.provider {
        MessagingProvider::Fcm => Arc::new(
            FcmGateway::new(&config.fcm, timeout).map_err(|e| gateway_config_error("fcm", e))?,
        ),
        MessagingProvider::Webhook => Arc::new(
            WebhookGateway::new(&config.webhook, timeout)
                .map_err(|e| gateway_config_error("webhook", e))?,
        ),
        MessagingProvider::Log => Arc::new(LogGateway),
    };

    Ok(gateway)
}

fn gateway_config_error(provider: &str, error: GatewayError) -> AppError {
    AppError::Configuration {
        key: format!("messaging.{}", provider),
        source: anyhow::anyhow!(error),
    }
}
