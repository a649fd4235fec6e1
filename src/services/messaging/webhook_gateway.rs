//! Webhook messaging gateway.
//!
//! Posts each notification as JSON to a configured URL, for bridges that fan
//! out to push services this crate does not speak directly.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde_json::{Value, json};

use super::gateway::{GatewayError, GatewayResult, MessagingGateway, SendReceipt};
use crate::config::settings::WebhookSettings;
use crate::dispatch::NotificationIntent;
use crate::external::client::build_http_client;

/// Webhook gateway
///
/// # Example
/// ```ignore
/// let settings = WebhookSettings {
///     url: "https://example.com/hooks/doorbell".to_string(),
///     method: "POST".to_string(),
///     headers: HashMap::new(),
/// };
/// let gateway = WebhookGateway::new(&settings, Duration::from_secs(30))?;
/// let receipt = gateway.send(&intent).await?;
/// ```
pub struct WebhookGateway {
    client: reqwest::Client,
    url: String,
    method: String,
    headers: HashMap<String, String>,
}

impl WebhookGateway {
    pub fn new(settings: &WebhookSettings, timeout: Duration) -> GatewayResult<Self> {
        Ok(Self {
            client: build_http_client(timeout)?,
            url: settings.url.clone(),
            method: settings.method.clone(),
            headers: settings.headers.clone(),
        })
    }

    fn parse_method(&self) -> GatewayResult<Method> {
        self.method.to_uppercase().parse().map_err(|_| {
            GatewayError::configuration("method", format!("Invalid HTTP method: {}", self.method))
        })
    }

    fn build_request_body(intent: &NotificationIntent) -> Value {
        json!({
            "title": intent.title,
            "body": intent.body,
            "topic": intent.topic,
        })
    }
}

#[async_trait]
impl MessagingGateway for WebhookGateway {
    async fn send(&self, intent: &NotificationIntent) -> GatewayResult<SendReceipt> {
        let start = Instant::now();

        let mut request = self
            .client
            .request(self.parse_method()?, &self.url)
            .json(&Self::build_request_body(intent));

        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        let response = request.send().await?;
        let status = response.status();
        let duration_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(SendReceipt {
            gateway: self.name().to_string(),
            message_id: None,
            status_code: Some(status.as_u16()),
            duration_ms,
        })
    }

    fn name(&self) -> &'static str {
        "webhook"
    }

    /// Checks that:
    /// - URL parses and uses HTTPS
    /// - HTTP method is valid
    async fn validate_config(&self) -> GatewayResult<()> {
        let url = Url::parse(&self.url)
            .map_err(|_| GatewayError::configuration("url", "Invalid URL format"))?;

        if url.scheme() != "https" {
            return Err(GatewayError::configuration(
                "url",
                "Only HTTPS URLs are allowed",
            ));
        }

        self.parse_method()?;

        Ok(())
    }
}
