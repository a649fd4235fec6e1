//! CLI argument parsing with clap
//!
//! Defines the command-line surface: global flags plus the `serve` and
//! `dispatch` subcommands.

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::path::PathBuf;

use crate::dispatch::EventKind;

/// Smart-doorbell notification relay
#[derive(Parser, Debug)]
#[command(name = "doorbell-relay")]
#[command(about = "Turns doorbell database changes into push notifications")]
#[command(long_about = "
doorbell-relay watches the doorbell's database through a change feed and
publishes a push notification to the shared topic for alerts, main password
changes and temporary password additions or removals.

EXAMPLES:
    # Start the ingest server with default configuration
    doorbell-relay serve

    # Start server on custom host and port
    doorbell-relay serve --host 0.0.0.0 --port 8080

    # Use custom configuration file
    doorbell-relay --config /etc/doorbell-relay/production.toml serve

    # Check configuration without starting server
    doorbell-relay serve --dry-run

    # Dispatch one alert change by hand
    doorbell-relay dispatch --path /notification --kind updated \\
        --before '\"NONE\"' --after '\"Motion Detected!\"'

    # Replay a temporary password removal
    doorbell-relay dispatch --path /temp_password/-Nx1 --kind deleted \\
        --before '{\"name\":\"Bob\",\"password\":\"4321\"}'
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load this single TOML file instead of the layered `config/` directory.
    /// `DOORBELL_*` environment variables still apply on top.
    #[arg(
        short,
        long,
        value_name = "FILE",
        value_parser = super::validation::validate_config_file_path
    )]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `config/{environment}.toml` is layered over the defaults.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP ingest server (default)
    ///
    /// Examples:
    ///   doorbell-relay serve                           # Start with defaults
    ///   doorbell-relay serve --host 0.0.0.0 --port 80 # Bind to all interfaces on port 80
    ///   doorbell-relay serve --dry-run                 # Validate config without starting
    Serve {
        /// Host address to bind to
        #[arg(
            long,
            value_name = "ADDRESS",
            value_parser = super::validation::validate_host_address
        )]
        host: Option<String>,

        /// Port number to listen on
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override, takes precedence over --verbose/--quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        ///
        /// Builds the messaging gateway and lookup store, checks the gateway
        /// configuration and exits without binding.
        #[arg(long)]
        dry_run: bool,
    },

    /// Route and dispatch a single change event, then print the outcome
    ///
    /// Exits 0 whether the notification was sent, skipped or failed to send.
    /// Paths no trigger watches exit non-zero.
    Dispatch {
        /// Database path that changed
        #[arg(long, value_name = "PATH")]
        path: String,

        /// Kind of change
        #[arg(long, value_enum)]
        kind: EventKind,

        /// Value before the change, as JSON
        #[arg(long, value_name = "JSON", value_parser = super::validation::parse_json_value)]
        before: Option<Value>,

        /// Value after the change, as JSON
        #[arg(long, value_name = "JSON", value_parser = super::validation::parse_json_value)]
        after: Option<Value>,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl Cli {
    /// Checks argument combinations clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if let Some(Commands::Dispatch { path, .. }) = &self.command
            && path.trim().is_empty()
        {
            return Err("--path cannot be empty".to_string());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        Ok(())
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["doorbell-relay", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_default_behavior() {
        let cli = Cli::try_parse_from(["doorbell-relay"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.config.is_none());
        assert!(cli.env.is_none());
    }

    #[test]
    fn test_serve_command() {
        let cli = Cli::try_parse_from([
            "doorbell-relay",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--dry-run",
        ])
        .unwrap();

        let Some(Commands::Serve { host, port, log_level, dry_run }) = cli.command else {
            panic!("Expected Serve command");
        };
        assert_eq!(host.as_deref(), Some("0.0.0.0"));
        assert_eq!(port, Some(8080));
        assert!(log_level.is_none());
        assert!(dry_run);
    }

    #[test]
    fn test_dispatch_command_parses_json() {
        let cli = Cli::try_parse_from([
            "doorbell-relay",
            "dispatch",
            "--path",
            "/temp_password/-Nx1",
            "--kind",
            "created",
            "--after",
            r#"{"name":"Bob","expires_at":"2024-06-01"}"#,
        ])
        .unwrap();

        let Some(Commands::Dispatch { path, kind, before, after }) = cli.command else {
            panic!("Expected Dispatch command");
        };
        assert_eq!(path, "/temp_password/-Nx1");
        assert_eq!(kind, EventKind::Created);
        assert!(before.is_none());
        assert_eq!(after, Some(json!({"name": "Bob", "expires_at": "2024-06-01"})));
    }

    #[test]
    fn test_dispatch_rejects_bad_json_and_kind() {
        let err = Cli::try_parse_from([
            "doorbell-relay",
            "dispatch",
            "--path",
            "/notification",
            "--kind",
            "updated",
            "--after",
            "Security Alert!",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);

        let err = Cli::try_parse_from([
            "doorbell-relay",
            "dispatch",
            "--path",
            "/notification",
            "--kind",
            "renamed",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_dispatch_requires_path_and_kind() {
        let err =
            Cli::try_parse_from(["doorbell-relay", "dispatch", "--kind", "updated"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_validate_rejects_blank_path() {
        let cli = Cli::try_parse_from([
            "doorbell-relay",
            "dispatch",
            "--path",
            " ",
            "--kind",
            "updated",
        ])
        .unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_env_alias() {
        let cli = Cli::try_parse_from(["doorbell-relay", "--env", "prod"]).unwrap();
        let env: crate::config::Environment = cli.env.unwrap().into();
        assert_eq!(env, crate::config::Environment::Production);
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let err = Cli::try_parse_from(["doorbell-relay", "--verbose", "--quiet"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
