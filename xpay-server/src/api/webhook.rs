//! Webhook receiver.
//!
//! # Endpoints
//!
//! - `POST /xpay`: receive a signed X-Pay event delivery

use axum::{Json, Router, response::IntoResponse, routing::post};
use serde::Serialize;

use crate::api::extractors::VerifiedWebhook;
use crate::state::AppState;

/// Build the webhook router.
pub fn router() -> Router<AppState> {
    Router::new().route("/xpay", post(receive_event))
}

#[derive(Serialize)]
struct Acknowledgement {
    received: bool,
}

/// `POST /xpay`: acknowledge an authenticated delivery.
///
/// With `verify_signature = false` the signature header is ignored, yet a
/// body that is not a well-formed event is still answered with 400 rather
/// than passed through. This handler only ever sees a validated event.
async fn receive_event(VerifiedWebhook(event): VerifiedWebhook) -> impl IntoResponse {
    tracing::info!(
        event_id = %event.id,
        event_type = %event.event_type,
        resource = event.resource(),
        created_at = %event.created_at,
        "Received X-Pay webhook"
    );
    Json(Acknowledgement { received: true })
}
