//! Projections of database snapshots used to build notification text.

use serde::Serialize;
use serde_json::{Map, Value};

pub const DEFAULT_NAME: &str = "Someone";
pub const DEFAULT_PASSWORD: &str = "Unknown";
pub const DEFAULT_EXPIRES_AT: &str = "Unknown date";

/// Whether a JSON value counts as present.
///
/// Null, `false`, zero and the empty string are absent.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Strings verbatim, everything else as JSON text
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A temporary password entry, with every field defaulted when absent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TempPasswordRecord {
    pub name: String,
    pub password: String,
    pub expires_at: String,
}

impl TempPasswordRecord {
    /// Never fails: a non-object snapshot yields all defaults
    pub fn from_snapshot(snapshot: &Value) -> Self {
        let empty = Map::new();
        let fields = snapshot.as_object().unwrap_or(&empty);

        Self {
            name: field_or(fields, "name", DEFAULT_NAME),
            password: field_or(fields, "password", DEFAULT_PASSWORD),
            expires_at: field_or(fields, "expires_at", DEFAULT_EXPIRES_AT),
        }
    }
}

fn field_or(fields: &Map<String, Value>, key: &str, default: &str) -> String {
    fields
        .get(key)
        .filter(|v| is_truthy(v))
        .map(render_value)
        .unwrap_or_else(|| default.to_string())
}

/// Who changed the main password, read from the update-info location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChangeContext {
    pub name: String,
}

impl PasswordChangeContext {
    /// `Ok(None)` for a falsy value, `Err` when the value has no textual `name`
    pub fn from_value(value: Option<&Value>) -> Result<Option<Self>, String> {
        let Some(value) = value.filter(|v| is_truthy(v)) else {
            return Ok(None);
        };

        match value.get("name") {
            Some(Value::String(name)) => Ok(Some(Self { name: name.clone() })),
            Some(other) => Err(format!("update info name is not text: {}", other)),
            None => Err("update info has no name".to_string()),
        }
    }
}
