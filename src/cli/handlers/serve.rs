//! Serve command handler
//!
//! Handles the serve command including dry-run validation and server startup.

use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::server::Server;
use crate::state::AppState;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Run the ingest server, or only validate when `dry_run` is set
    ///
    /// # Errors
    /// - Configuration validation errors
    /// - Gateway configuration errors (dry run)
    /// - Server startup errors
    pub async fn execute(self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            self.validate_only().await
        } else {
            Server::new(self.config).run().await.map_err(AppError::from)
        }
    }

    /// Validate configuration and build the dispatch collaborators without binding
    pub async fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;
        println!("✓ Configuration is valid");

        let state = AppState::from_settings(&self.config)?;
        state
            .gateway
            .validate_config()
            .await
            .map_err(|e| AppError::Configuration {
                key: format!("messaging.{}", self.config.messaging.provider.as_str()),
                source: anyhow::Error::new(e),
            })?;

        println!("✓ Messaging gateway '{}' is ready", state.gateway.name());
        println!("✓ Notifications go to topic '{}'", state.dispatcher.topic());
        if self.config.database.url.is_empty() {
            println!("! No database URL, password change context will never be found");
        } else {
            println!("✓ Side lookups read from {}", self.config.database.url);
        }
        println!("✓ Server would bind to: {}", self.config.server.address());

        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MessagingProvider;

    #[tokio::test]
    async fn test_serve_handler_new() {
        let config = Settings::default();
        let handler = ServeCommandHandler::new(config.clone());
        assert_eq!(handler.config(), &config);
    }

    #[tokio::test]
    async fn test_serve_handler_dry_run() {
        let handler = ServeCommandHandler::new(Settings::default());
        assert!(handler.execute(true).await.is_ok());
    }

    #[tokio::test]
    async fn test_serve_handler_dry_run_invalid_config() {
        let mut config = Settings::default();
        config.server.port = 0;

        let result = ServeCommandHandler::new(config).execute(true).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_serve_handler_dry_run_rejects_plain_http_webhook() {
        let mut config = Settings::default();
        config.messaging.provider = MessagingProvider::Webhook;
        config.messaging.webhook.url = "http://hooks.example.com/doorbell".to_string();

        let result = ServeCommandHandler::new(config).execute(true).await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }
}
