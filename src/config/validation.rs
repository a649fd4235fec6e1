//! Configuration validation logic
//!
//! Range and format checks run after all configuration layers are merged.

use reqwest::Url;

use crate::config::error::ConfigError;
use crate::config::settings::{
    DatabaseConfig, LoggerSettings, MessagingConfig, MessagingProvider, ServerConfig, Settings,
    WatchConfig,
};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

const VALID_WEBHOOK_METHODS: &[&str] = &["POST", "PUT", "PATCH"];

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Host must not be empty
    /// - Port must be between 1 and 65535
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host cannot be empty.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger configuration
    ///
    /// Accepts either a bare level or a full `EnvFilter` directive such as
    /// `info,doorbell_relay=debug`; only the bare form is checked against
    /// the known level names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.level.to_lowercase();
        let is_directive = level.contains('=') || level.contains(',');
        if !is_directive && !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.file.format.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.file.format",
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.file.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        if self.file.enabled && self.file.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path cannot be empty when file output is enabled.",
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        Ok(())
    }
}

impl WatchConfig {
    /// Validate watched paths
    ///
    /// # Validation Rules
    /// - No path may be empty or the database root
    /// - Alert, password and temp-password locations must be distinct
    pub fn validate(&self) -> Result<(), ConfigError> {
        let paths = [
            ("watch.alert_path", &self.alert_path),
            ("watch.password_path", &self.password_path),
            ("watch.temp_password_root", &self.temp_password_root),
            ("watch.update_info_path", &self.update_info_path),
        ];

        for (field, path) in paths {
            if path.trim_matches('/').trim().is_empty() {
                return Err(ConfigError::validation(
                    field,
                    "Watched path cannot be empty or the database root.",
                ));
            }
        }

        let normalized = |p: &str| p.trim_matches('/').to_string();
        let alert = normalized(&self.alert_path);
        let password = normalized(&self.password_path);
        let temp = normalized(&self.temp_password_root);

        if alert == password || alert == temp || password == temp {
            return Err(ConfigError::validation(
                "watch",
                "alert_path, password_path and temp_password_root must be distinct.",
            ));
        }

        Ok(())
    }
}

impl MessagingConfig {
    /// Validate messaging configuration for the selected provider
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.topic.trim().is_empty() {
            return Err(ConfigError::validation(
                "messaging.topic",
                "Topic cannot be empty.",
            ));
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "messaging.timeout_seconds",
                "Timeout must be greater than 0 seconds.",
            ));
        }

        match self.provider {
            MessagingProvider::Fcm => {
                if self.fcm.project_id.trim().is_empty() {
                    return Err(ConfigError::validation(
                        "messaging.fcm.project_id",
                        "Project id is required when provider is 'fcm'.",
                    ));
                }
                if self.fcm.access_token.trim().is_empty() {
                    return Err(ConfigError::validation(
                        "messaging.fcm.access_token",
                        "Access token is required when provider is 'fcm'. \
                         Set DOORBELL_MESSAGING__FCM__ACCESS_TOKEN.",
                    ));
                }
                validate_http_url("messaging.fcm.endpoint", &self.fcm.endpoint)?;
            }
            MessagingProvider::Webhook => {
                validate_http_url("messaging.webhook.url", &self.webhook.url)?;
                let method = self.webhook.method.to_uppercase();
                if !VALID_WEBHOOK_METHODS.contains(&method.as_str()) {
                    return Err(ConfigError::validation(
                        "messaging.webhook.method",
                        format!(
                            "Invalid webhook method '{}'. Valid methods are: {}",
                            self.webhook.method,
                            VALID_WEBHOOK_METHODS.join(", ")
                        ),
                    ));
                }
            }
            MessagingProvider::Log => {}
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Validate the Realtime Database configuration
    ///
    /// An empty URL is allowed and selects the in-memory store.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.url.is_empty() {
            validate_http_url("database.url", &self.url)?;
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "database.timeout_seconds",
                "Timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.logger.validate()?;
        self.watch.validate()?;
        self.messaging.validate()?;
        self.database.validate()?;
        Ok(())
    }
}

fn validate_http_url(field: &str, raw: &str) -> Result<(), ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::validation(field, format!("Invalid URL '{}': {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::validation(
            field,
            format!("URL must use http or https, got '{}'", other),
        )),
    }
}
