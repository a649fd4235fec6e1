//! Logger Module
//!
//! Built on `tracing-subscriber` with support for:
//! - Console output with color control
//! - File output in Full, Compact, or JSON format
//! - `EnvFilter` directives for per-module levels

pub mod config;
pub mod error;
pub(crate) mod writer;

pub use config::*;
pub use error::LoggerError;

use std::io::IsTerminal;

use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use writer::LogFileWriter;

type BoxedSubscriber = Box<dyn Subscriber + Send + Sync>;

/// Initialize the global subscriber with the given configuration
pub fn init_logger(config: LoggerConfig) -> Result<(), LoggerError> {
    build_subscriber(&config)?
        .try_init()
        .map_err(|e| LoggerError::config(e.to_string()))
}

/// Assemble the subscriber for `config` without installing it
pub(crate) fn build_subscriber(config: &LoggerConfig) -> Result<BoxedSubscriber, LoggerError> {
    config.validate()?;

    let filter = config.env_filter()?;

    match (config.console.enabled, config.file.enabled) {
        (true, true) => build_both(config, filter),
        (true, false) => Ok(build_console_only(&config.console, filter)),
        (false, true) => build_file_only(&config.file, filter),
        (false, false) => Err(LoggerError::config(
            "At least one output (console or file) must be enabled",
        )),
    }
}

fn console_layer<S>(config: &ConsoleConfig) -> fmt::Layer<S> {
    let use_ansi = config.colored && std::io::stdout().is_terminal();

    fmt::layer()
        .with_ansi(use_ansi)
        .with_target(true)
        .with_level(true)
}

fn build_console_only(config: &ConsoleConfig, filter: EnvFilter) -> BoxedSubscriber {
    Box::new(
        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer(config)),
    )
}

fn build_file_only(config: &FileConfig, filter: EnvFilter) -> Result<BoxedSubscriber, LoggerError> {
    let writer = LogFileWriter::new(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let subscriber: BoxedSubscriber = match config.format {
        LogFormat::Full => Box::new(
            registry.with(fmt::layer().with_ansi(false).with_target(true).with_writer(writer)),
        ),
        LogFormat::Compact => Box::new(
            registry.with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .compact()
                    .with_writer(writer),
            ),
        ),
        LogFormat::Json => {
            Box::new(registry.with(fmt::layer().with_ansi(false).json().with_writer(writer)))
        }
    };

    Ok(subscriber)
}

fn build_both(config: &LoggerConfig, filter: EnvFilter) -> Result<BoxedSubscriber, LoggerError> {
    let writer = LogFileWriter::new(&config.file)?;

    // File layer goes first so console ANSI settings do not leak into span
    // fields written to the file (tokio-rs/tracing#1817).
    let registry = tracing_subscriber::registry().with(filter);
    let subscriber: BoxedSubscriber = match config.file.format {
        LogFormat::Full => Box::new(
            registry
                .with(fmt::layer().with_ansi(false).with_target(true).with_writer(writer))
                .with(console_layer(&config.console)),
        ),
        LogFormat::Compact => Box::new(
            registry
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_target(true)
                        .compact()
                        .with_writer(writer),
                )
                .with(console_layer(&config.console)),
        ),
        LogFormat::Json => Box::new(
            registry
                .with(fmt::layer().with_ansi(false).json().with_writer(writer))
                .with(console_layer(&config.console)),
        ),
    };

    Ok(subscriber)
}
