//! Health check endpoint handlers.
//!
//! Liveness needs nothing but a running process. Readiness additionally
//! requires the messaging gateway's configuration to validate.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    /// RFC 3339 timestamp of the check
    pub timestamp: String,
    /// Name of the active messaging gateway
    pub gateway: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Creates health check routes.
///
/// # Routes
/// - `GET /health` - Basic health check
/// - `GET /health/ready` - Readiness check
/// - `GET /health/live` - Liveness check
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .route("/health/live", get(liveness_check))
}

async fn build_response(state: &AppState) -> HealthResponse {
    let (status, message) = match state.gateway.validate_config().await {
        Ok(()) => (HealthStatus::Healthy, None),
        Err(e) => (HealthStatus::Unhealthy, Some(e.to_string())),
    };

    HealthResponse {
        status,
        version: state.version.clone(),
        timestamp: jiff::Timestamp::now().to_string(),
        gateway: state.gateway.name().to_string(),
        message,
    }
}

/// `GET /health`: always 200, reports gateway health in the body
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(build_response(&state).await)
}

/// `GET /health/ready`: 503 while the gateway configuration is invalid
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let response = build_response(&state).await;
    let status = match response.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(response))
}

/// `GET /health/live`
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}
