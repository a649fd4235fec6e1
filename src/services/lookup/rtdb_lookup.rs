//! Realtime Database REST lookup.
//!
//! Reads `GET {database_url}/{path}.json`, passing the configured secret or
//! ID token as the `auth` query parameter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde_json::Value;

use super::store::{LookupError, LookupResult, SideLookup};
use crate::config::DatabaseConfig;
use crate::external::client::build_http_client;
use crate::utils::path::segments;

pub struct RtdbLookup {
    client: reqwest::Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl RtdbLookup {
    pub fn new(config: &DatabaseConfig) -> LookupResult<Self> {
        let base_url = Url::parse(&config.url).map_err(|e| {
            LookupError::Configuration(format!("Invalid database url '{}': {}", config.url, e))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(LookupError::Configuration(format!(
                "Database url '{}' cannot carry a path",
                config.url
            )));
        }

        let client = build_http_client(Duration::from_secs(config.timeout_seconds))?;

        Ok(Self {
            client,
            base_url,
            auth_token: config
                .auth_token
                .clone()
                .filter(|token| !token.trim().is_empty()),
        })
    }

    /// Each database segment is appended percent-encoded; query pairs on the
    /// configured url (such as the emulator's `ns`) are kept.
    fn url_for_path(&self, path: &str) -> LookupResult<Url> {
        let parts: Vec<&str> = segments(path).collect();
        let mut url = self.base_url.clone();

        {
            let mut url_path = url.path_segments_mut().map_err(|_| {
                LookupError::Configuration("Database url cannot carry a path".to_string())
            })?;
            url_path.pop_if_empty();

            match parts.split_last() {
                Some((last, parents)) => {
                    url_path.extend(parents);
                    url_path.push(&format!("{}.json", last));
                }
                None => {
                    url_path.push(".json");
                }
            }
        }

        if let Some(token) = &self.auth_token {
            url.query_pairs_mut().append_pair("auth", token);
        }

        Ok(url)
    }
}

/// Pulls `{"error": "..."}` out of an RTDB error body, falling back to the raw text
fn extract_error_message(raw: &str) -> String {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(obj)) => match obj.get("error") {
            Some(Value::String(message)) => message.clone(),
            _ => raw.to_string(),
        },
        _ => raw.to_string(),
    }
}

#[async_trait]
impl SideLookup for RtdbLookup {
    async fn get(&self, path: &str) -> LookupResult<Option<Value>> {
        let url = self.url_for_path(path)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Http {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))?;

        Ok(match value {
            Value::Null => None,
            other => Some(other),
        })
    }

    fn name(&self) -> &'static str {
        "rtdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(url: &str, token: Option<&str>) -> RtdbLookup {
        let config = DatabaseConfig {
            url: url.to_string(),
            auth_token: token.map(str::to_string),
            timeout_seconds: 5,
        };
        RtdbLookup::new(&config).unwrap()
    }

    #[test]
    fn test_url_for_path_appends_json_and_auth() {
        let lookup = lookup("https://doorbell-default-rtdb.firebaseio.com", Some("secret"));
        let url = lookup.url_for_path("/password_update_info").unwrap();

        assert_eq!(
            url.as_str(),
            "https://doorbell-default-rtdb.firebaseio.com/password_update_info.json?auth=secret"
        );
    }

    #[test]
    fn test_url_for_path_keeps_base_path() {
        let lookup = lookup("http://localhost:9000/ns/", None);

        assert_eq!(
            lookup.url_for_path("a/b/").unwrap().as_str(),
            "http://localhost:9000/ns/a/b.json"
        );
        assert_eq!(
            lookup.url_for_path("/").unwrap().as_str(),
            "http://localhost:9000/ns/.json"
        );
    }

    #[test]
    fn test_url_for_path_encodes_reserved_segments() {
        let lookup = lookup("https://db.example.com", Some("secret"));

        assert_eq!(
            lookup.url_for_path("/doors:front/update_info").unwrap().as_str(),
            "https://db.example.com/doors:front/update_info.json?auth=secret"
        );

        let url = lookup.url_for_path("/who?/update_info").unwrap();
        assert_eq!(url.host_str(), Some("db.example.com"));
        assert_eq!(url.path(), "/who%3F/update_info.json");
        assert_eq!(url.query(), Some("auth=secret"));
    }

    #[test]
    fn test_url_for_path_keeps_namespace_query() {
        let lookup = lookup("http://127.0.0.1:9000?ns=doorbell-demo", Some("owner"));

        assert_eq!(
            lookup.url_for_path("/password_update_info").unwrap().as_str(),
            "http://127.0.0.1:9000/password_update_info.json?ns=doorbell-demo&auth=owner"
        );
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let lookup = lookup("https://db.example.com", Some("  "));
        assert!(lookup.url_for_path("/x").unwrap().query().is_none());
    }

    #[test]
    fn test_invalid_url_rejected() {
        for url in ["not a url", "mailto:owner@example.com"] {
            let config = DatabaseConfig {
                url: url.to_string(),
                ..DatabaseConfig::default()
            };
            assert!(
                matches!(RtdbLookup::new(&config), Err(LookupError::Configuration(_))),
                "{} should be rejected",
                url
            );
        }
    }

    #[test]
    fn test_extract_error_message() {
        assert_eq!(
            extract_error_message(r#"{"error":"Permission denied"}"#),
            "Permission denied"
        );
        assert_eq!(extract_error_message("plain"), "plain");
    }

    #[tokio::test]
    async fn test_transport_failure_is_error() {
        let lookup = lookup("http://127.0.0.1:9", None);
        assert!(matches!(
            lookup.get("/password_update_info").await,
            Err(LookupError::Transport(_))
        ));
    }
}
