//! Configuration settings structures for doorbell-relay
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "doorbell-relay".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/doorbell-relay.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_alert_path() -> String {
    "/notification".to_string()
}

fn default_password_path() -> String {
    "/main_password".to_string()
}

fn default_temp_password_root() -> String {
    "/temp_password".to_string()
}

fn default_update_info_path() -> String {
    "/password_update_info".to_string()
}

fn default_topic() -> String {
    "alerts".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_fcm_endpoint() -> String {
    "https://fcm.googleapis.com".to_string()
}

fn default_webhook_method() -> String {
    "POST".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// HTTP ingest server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// ============================================================================
// Watched paths
// ============================================================================

/// Database locations the relay reacts to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Value holding the current alert code
    #[serde(default = "default_alert_path")]
    pub alert_path: String,

    /// Value holding the main door password
    #[serde(default = "default_password_path")]
    pub password_path: String,

    /// Collection whose children are temporary passwords
    #[serde(default = "default_temp_password_root")]
    pub temp_password_root: String,

    /// Side location read when the main password changes
    #[serde(default = "default_update_info_path")]
    pub update_info_path: String,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            alert_path: default_alert_path(),
            password_path: default_password_path(),
            temp_password_root: default_temp_password_root(),
            update_info_path: default_update_info_path(),
        }
    }
}

// ============================================================================
// Messaging Configuration
// ============================================================================

/// Which messaging gateway delivers notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessagingProvider {
    /// Firebase Cloud Messaging HTTP v1
    Fcm,
    /// Generic JSON webhook
    Webhook,
    /// Log the notification and report success
    #[default]
    Log,
}

impl MessagingProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessagingProvider::Fcm => "fcm",
            MessagingProvider::Webhook => "webhook",
            MessagingProvider::Log => "log",
        }
    }
}

/// Firebase Cloud Messaging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FcmSettings {
    #[serde(default)]
    pub project_id: String,

    /// OAuth2 bearer token; normally injected through
    /// `DOORBELL_MESSAGING__FCM__ACCESS_TOKEN`
    #[serde(default)]
    pub access_token: String,

    #[serde(default = "default_fcm_endpoint")]
    pub endpoint: String,
}

impl Default for FcmSettings {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            access_token: String::new(),
            endpoint: default_fcm_endpoint(),
        }
    }
}

/// Webhook gateway settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookSettings {
    #[serde(default)]
    pub url: String,

    #[serde(default = "default_webhook_method")]
    pub method: String,

    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for WebhookSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: default_webhook_method(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagingConfig {
    #[serde(default)]
    pub provider: MessagingProvider,

    /// Topic every notification is published to
    #[serde(default = "default_topic")]
    pub topic: String,

    /// Per-request timeout for gateway calls
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    #[serde(default)]
    pub fcm: FcmSettings,

    #[serde(default)]
    pub webhook: WebhookSettings,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            provider: MessagingProvider::default(),
            topic: default_topic(),
            timeout_seconds: default_timeout_seconds(),
            fcm: FcmSettings::default(),
            webhook: WebhookSettings::default(),
        }
    }
}

// ============================================================================
// Realtime Database Configuration
// ============================================================================

/// Realtime Database used for side lookups.
///
/// An empty `url` selects the in-memory store, in which case password change
/// events never find their context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,

    /// Database secret or ID token passed as `auth=`
    #[serde(default)]
    pub auth_token: Option<String>,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            auth_token: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_path")]
    pub path: String,

    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level or full `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert the file representation into the runtime [`LoggerConfig`]
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = ConsoleConfig::new(self.console.enabled, self.console.colored);
        let format = self
            .file
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::validation("logger.file.format", e.to_string()))?;
        let file = FileConfig::new(
            self.file.enabled,
            PathBuf::from(self.file.path),
            self.file.append,
            format,
        );

        LoggerConfig::new(console, file, self.level)
            .map_err(|e| ConfigError::validation("logger", e.to_string()))
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logger: LoggerSettings,

    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub messaging: MessagingConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.application.name, "doorbell-relay");
        assert_eq!(settings.server.address(), "127.0.0.1:8080");
        assert_eq!(settings.watch.alert_path, "/notification");
        assert_eq!(settings.watch.password_path, "/main_password");
        assert_eq!(settings.watch.temp_password_root, "/temp_password");
        assert_eq!(settings.watch.update_info_path, "/password_update_info");
        assert_eq!(settings.messaging.provider, MessagingProvider::Log);
        assert_eq!(settings.messaging.topic, "alerts");
        assert_eq!(settings.messaging.fcm.endpoint, "https://fcm.googleapis.com");
        assert!(settings.database.url.is_empty());
    }

    #[test]
    fn test_settings_serialization_roundtrip() {
        let mut settings = Settings::default();
        settings.messaging.provider = MessagingProvider::Webhook;
        settings
            .messaging
            .webhook
            .headers
            .insert("X-Api-Key".to_string(), "secret".to_string());
        settings.database.auth_token = Some("token".to_string());

        let toml_str = toml::to_string(&settings).expect("Settings should serialize to TOML");
        let parsed: Settings = toml::from_str(&toml_str).expect("TOML should deserialize");
        assert_eq!(settings, parsed);
    }

    #[test]
    fn test_settings_deserialize_partial() {
        let toml_str = r#"
[messaging]
provider = "fcm"

[messaging.fcm]
project_id = "smart-doorbell-2025"

[watch]
alert_path = "/alerts/current"
"#;
        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.messaging.provider, MessagingProvider::Fcm);
        assert_eq!(settings.messaging.fcm.project_id, "smart-doorbell-2025");
        assert_eq!(settings.messaging.topic, "alerts");
        assert_eq!(settings.watch.alert_path, "/alerts/current");
        assert_eq!(settings.watch.password_path, "/main_password");
        assert_eq!(settings.server.port, 8080);
    }

    #[test]
    fn test_logger_settings_into_logger_config() {
        let mut settings = LoggerSettings::default();
        settings.level = "debug".to_string();
        settings.file.format = "compact".to_string();

        let config = settings.into_logger_config().unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.file.format, LogFormat::Compact);
        assert!(config.console.enabled);
    }

    #[test]
    fn test_logger_settings_invalid_format() {
        let mut settings = LoggerSettings::default();
        settings.file.format = "xml".to_string();

        let err = settings.into_logger_config().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ValidationError { ref field, .. } if field == "logger.file.format"
        ));
    }

    #[test]
    fn test_logger_settings_both_outputs_disabled() {
        let mut settings = LoggerSettings::default();
        settings.console.enabled = false;
        settings.file.enabled = false;

        assert!(settings.into_logger_config().is_err());
    }
}
