//! Side-lookup stores for auxiliary reads made during dispatch.

mod memory_lookup;
mod rtdb_lookup;
mod store;

use std::sync::Arc;

pub use memory_lookup::MemoryLookup;
pub use rtdb_lookup::RtdbLookup;
pub use store::{LookupError, LookupResult, SideLookup};

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

/// Builds the REST store when `database.url` is set, the in-memory store otherwise
pub fn create_lookup(config: &DatabaseConfig) -> AppResult<Arc<dyn SideLookup>> {
    if config.url.trim().is_empty() {
        tracing::warn!("No database url configured, side lookups use an empty in-memory store");
        return Ok(Arc::new(MemoryLookup::new()));
    }

    let lookup = RtdbLookup::new(config).map_err(|e| AppError::Configuration {
        key: "database.url".to_string(),
        source: anyhow::anyhow!(e),
    })?;

    Ok(Arc::new(lookup))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_lookup_selects_store() {
        assert_eq!(create_lookup(&DatabaseConfig::default()).unwrap().name(), "memory");

        let config = DatabaseConfig {
            url: "https://doorbell-default-rtdb.firebaseio.com".to_string(),
            ..DatabaseConfig::default()
        };
        assert_eq!(create_lookup(&config).unwrap().name(), "rtdb");
    }

    #[test]
    fn test_create_lookup_invalid_url() {
        let config = DatabaseConfig {
            url: "::".to_string(),
            ..DatabaseConfig::default()
        };
        assert!(matches!(
            create_lookup(&config),
            Err(AppError::Configuration { .. })
        ));
    }
}
