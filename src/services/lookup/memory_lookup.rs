use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use super::store::{LookupResult, SideLookup};
use crate::utils::path::normalize_path;

/// In-memory lookup store keyed by normalised path.
///
/// Used when no database URL is configured, and by tests.
#[derive(Debug, Default)]
pub struct MemoryLookup {
    entries: DashMap<String, Value>,
}

impl MemoryLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` at `path`; storing null removes the entry
    pub fn set(&self, path: &str, value: Value) {
        let key = normalize_path(path);
        if value.is_null() {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, value);
        }
    }
}

#[async_trait]
impl SideLookup for MemoryLookup {
    async fn get(&self, path: &str) -> LookupResult<Option<Value>> {
        Ok(self
            .entries
            .get(&normalize_path(path))
            .map(|entry| entry.value().clone()))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
