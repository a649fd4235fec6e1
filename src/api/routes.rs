//! Router configuration for the API.

use axum::{Router, http::StatusCode, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::limit::RequestBodyLimitLayer;

use crate::api::handlers;
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::state::AppState;

pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Layers run outermost first:
/// 1. Request ID - generates/propagates request IDs
/// 2. Logging - logs requests inside a span carrying the request ID
/// 3. Compression - when the client accepts it
/// 4. Body limit - refuses bodies above [`MAX_BODY_BYTES`]
/// 5. Error handler - turns bare framework errors into JSON
///
/// # Routes
/// - `/api/events` - Change-feed ingest
/// - `/health`, `/health/live`, `/health/ready` - Health checks
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new().nest("/events", handlers::events::event_routes());

    Router::new()
        .merge(handlers::health::health_routes())
        .nest("/api", api_routes)
        .fallback(|| async { StatusCode::NOT_FOUND })
        .layer(middleware::from_fn(global_error_handler))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::api::middleware::REQUEST_ID_HEADER;
    use crate::config::Settings;
    use crate::services::{MemoryLookup, RecordingGateway};

    fn router(gateway: Arc<RecordingGateway>) -> Router {
        let state = AppState::new(&Settings::default(), gateway, Arc::new(MemoryLookup::new()));
        create_router(state)
    }

    fn post_event(body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/events")
            .header(header::CONTENT_TYPE, "application/json")
            .header(REQUEST_ID_HEADER, "delivery-7")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_post_event_returns_outcome() {
        let gateway = Arc::new(RecordingGateway::new());
        let response = router(gateway.clone())
            .oneshot(post_event(json!({
                "path": "/temp_password/-Nx1",
                "kind": "created",
                "after": {}
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "delivery-7");

        let body = json_body(response).await;
        assert_eq!(body["trigger"], "temp_password_created");
        assert_eq!(body["outcome"]["status"], "sent");
        assert_eq!(
            body["outcome"]["intent"]["body"],
            "Someone added a temporary password: Unknown (Expires: Unknown date)"
        );
        assert_eq!(gateway.send_count(), 1);
    }

    #[tokio::test]
    async fn test_post_event_unrouted_is_404() {
        let response = router(Arc::new(RecordingGateway::new()))
            .oneshot(post_event(json!({"path": "/elsewhere", "kind": "updated", "after": 1})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_post_event_malformed_is_400() {
        let response = router(Arc::new(RecordingGateway::new()))
            .oneshot(post_event(json!({"path": "/notification", "kind": "renamed"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = router(Arc::new(RecordingGateway::new()))
            .oneshot(post_event(json!({"path": "", "kind": "updated"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = router(Arc::new(RecordingGateway::new()))
            .oneshot(
                Request::builder()
                    .uri("/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["code"], "NOT_FOUND");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = router(Arc::new(RecordingGateway::new()))
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["gateway"], "recording");
    }
}
