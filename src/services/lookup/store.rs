//! Side-lookup trait and error types.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Lookup transport error: {0}")]
    Transport(String),

    #[error("Lookup failed with status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Lookup returned malformed data: {0}")]
    Decode(String),

    #[error("Invalid lookup configuration: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(error: reqwest::Error) -> Self {
        LookupError::Transport(error.to_string())
    }
}

pub type LookupResult<T> = Result<T, LookupError>;

/// Point read against a database location other than the one that fired.
///
/// `Ok(None)` means the location holds no data; JSON null is reported the
/// same way.
#[async_trait]
pub trait SideLookup: Send + Sync {
    async fn get(&self, path: &str) -> LookupResult<Option<Value>>;

    fn name(&self) -> &'static str;
}
