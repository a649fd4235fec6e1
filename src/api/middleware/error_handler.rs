//! Error handler for converting AppError to HTTP responses.
//!
//! Implements `IntoResponse` for `AppError` and provides a middleware that
//! rewrites bare framework errors (unknown route, wrong method) into the
//! same JSON shape.

use axum::{
    Json,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::RequestId;
use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - NotFound → 404 NOT_FOUND
    /// - Validation / ValidationErrors / BadRequest → 400 BAD_REQUEST
    /// - Configuration / Internal → 500 INTERNAL_SERVER_ERROR
    ///
    /// Internal details are logged, never returned.
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            AppError::NotFound {
                entity,
                field,
                value,
            } => (
                StatusCode::NOT_FOUND,
                ErrorResponse::not_found(entity, field, value),
            ),
            AppError::Validation { field, reason } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("VALIDATION_ERROR", &format!("Validation failed for {}", field))
                    .with_details(json!({ "field": field, "reason": reason })),
            ),
            AppError::ValidationErrors { errors } => {
                (StatusCode::BAD_REQUEST, ErrorResponse::validation(errors))
            }
            AppError::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("BAD_REQUEST", message),
            ),
            AppError::Configuration { key, source } => {
                tracing::error!(
                    key = %key,
                    error = %source,
                    "Configuration error while serving request"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "CONFIGURATION_ERROR",
                        &format!("Configuration error: {}", key),
                    ),
                )
            }
            AppError::Internal { source } => {
                tracing::error!(error = %source, "Internal error while serving request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred"),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Rewrites non-JSON 4xx/5xx responses into [`ErrorResponse`] and stamps
/// the request ID on them.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let request_id = request.extensions().get::<RequestId>().map(|r| r.0.clone());
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));
    if is_json {
        return response;
    }

    let (code, message) = match status {
        StatusCode::NOT_FOUND => ("NOT_FOUND", "The requested resource was not found"),
        StatusCode::METHOD_NOT_ALLOWED => {
            ("METHOD_NOT_ALLOWED", "HTTP method not allowed for this endpoint")
        }
        StatusCode::UNSUPPORTED_MEDIA_TYPE => ("UNSUPPORTED_MEDIA_TYPE", "Unsupported media type"),
        s if s.is_client_error() => ("BAD_REQUEST", "Bad request - invalid or malformed request"),
        _ => ("INTERNAL_ERROR", "An internal error occurred"),
    };

    let mut error_response = ErrorResponse::new(code, message);
    if let Some(id) = &request_id {
        error_response = error_response.with_request_id(id);
    }

    (status, Json(error_response)).into_response()
}
