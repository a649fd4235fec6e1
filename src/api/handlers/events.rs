//! Change-feed ingest handler.

use axum::{Json, Router, extract::State, routing::post};

use crate::api::dto::{EventDeliveryRequest, EventDeliveryResponse};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Routes:
/// - POST /  - Deliver one change event
pub fn event_routes() -> Router<AppState> {
    Router::new().route("/", post(deliver_event))
}

/// POST /api/events - Route and dispatch one change event
///
/// Every dispatch outcome (sent, skipped, failed) is a 200. Deliveries no
/// trigger watches are 404 and never reach the dispatcher.
pub async fn deliver_event(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<EventDeliveryRequest>,
) -> AppResult<Json<EventDeliveryResponse>> {
    let event = payload.into_change_event();

    let routed = state.router.route(event).map_err(|unrouted| {
        tracing::info!(path = %unrouted.path, kind = %unrouted.kind, "Unrouted change event");
        AppError::NotFound {
            entity: "trigger".to_string(),
            field: "path".to_string(),
            value: format!("{} ({})", unrouted.path, unrouted.kind),
        }
    })?;

    let trigger = routed.trigger();
    tracing::debug!(trigger = trigger.as_str(), "Dispatching change event");
    let outcome = state.dispatcher.dispatch(routed).await;

    Ok(Json(EventDeliveryResponse { trigger, outcome }))
}
