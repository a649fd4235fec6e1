//! Firebase Cloud Messaging gateway.
//!
//! Publishes notifications to a topic through the FCM HTTP v1 API:
//! `POST {endpoint}/v1/projects/{project_id}/messages:send`.
//!
//! The gateway is handed a ready OAuth2 access token; minting one from a
//! service account is the deployment's job.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::{Value, json};

use super::gateway::{GatewayError, GatewayResult, MessagingGateway, SendReceipt};
use crate::config::settings::FcmSettings;
use crate::dispatch::NotificationIntent;
use crate::external::client::build_http_client;

/// Successful FCM response: `{"name": "projects/p/messages/0:123"}`
#[derive(Debug, Deserialize)]
struct FcmSendResponse {
    name: Option<String>,
}

pub struct FcmGateway {
    client: reqwest::Client,
    endpoint: String,
    project_id: String,
    access_token: String,
}

impl FcmGateway {
    pub fn new(settings: &FcmSettings, timeout: Duration) -> GatewayResult<Self> {
        let client = build_http_client(timeout)?;
        Ok(Self::with_client(client, settings))
    }

    pub fn with_client(client: reqwest::Client, settings: &FcmSettings) -> Self {
        Self {
            client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            project_id: settings.project_id.clone(),
            access_token: settings.access_token.clone(),
        }
    }

    fn send_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/messages:send",
            self.endpoint, self.project_id
        )
    }

    /// FCM v1 message envelope for a topic notification
    fn build_request_body(intent: &NotificationIntent) -> Value {
        json!({
            "message": {
                "topic": intent.topic,
                "notification": {
                    "title": intent.title,
                    "body": intent.body,
                },
            }
        })
    }
}

#[async_trait]
impl MessagingGateway for FcmGateway {
    async fn send(&self, intent: &NotificationIntent) -> GatewayResult<SendReceipt> {
        let start = Instant::now();

        let response = self
            .client
            .post(self.send_url())
            .bearer_auth(&self.access_token)
            .json(&Self::build_request_body(intent))
            .send()
            .await?;

        let status = response.status();
        let duration_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        // A 2xx with an unexpected body still means FCM accepted the message
        let message_id = response
            .json::<FcmSendResponse>()
            .await
            .ok()
            .and_then(|r| r.name);

        Ok(SendReceipt {
            gateway: self.name().to_string(),
            message_id,
            status_code: Some(status.as_u16()),
            duration_ms,
        })
    }

    fn name(&self) -> &'static str {
        "fcm"
    }

    /// Checks that:
    /// - endpoint is an http(s) URL
    /// - project id and access token are present
    async fn validate_config(&self) -> GatewayResult<()> {
        let url = Url::parse(&self.endpoint)
            .map_err(|_| GatewayError::configuration("endpoint", "Invalid URL format"))?;
        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(GatewayError::configuration(
                "endpoint",
                "URL must use http or https protocol",
            ));
        }

        if self.project_id.trim().is_empty() {
            return Err(GatewayError::configuration(
                "project_id",
                "Project id cannot be empty",
            ));
        }

        if self.access_token.trim().is_empty() {
            return Err(GatewayError::configuration(
                "access_token",
                "Access token cannot be empty",
            ));
        }

        Ok(())
    }
}
