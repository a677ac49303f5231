//! Custom Axum extractors for incoming X-Pay webhooks.
//!
//! `VerifiedWebhook` checks the `X-XPay-Signature` header against the raw
//! request body, then parses and validates the event. All cryptographic
//! and payload checks are delegated to [`xpay_sdk::signature`] and
//! [`xpay_sdk::webhook`].

use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use xpay_sdk::signature::{self, SIGNATURE_HEADER};
use xpay_sdk::webhook::{self, PayloadError, WebhookEvent};

use crate::state::AppState;

/// Upper bound on accepted webhook bodies.
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// An Axum extractor yielding an authenticated, structurally valid
/// webhook event.
///
/// # Header format
///
/// ```text
/// X-XPay-Signature: sha256={hex(HMAC-SHA256(body, webhook_secret))}
/// ```
///
/// A webhook secret must be configured either way. When signature
/// verification is disabled the header is not required, but the payload is
/// still parsed and validated: a malformed body is rejected with 400.
pub struct VerifiedWebhook(pub WebhookEvent);

/// Errors returned by the [`VerifiedWebhook`] extractor.
#[derive(Debug, thiserror::Error)]
pub enum WebhookRejection {
    #[error("Webhook secret not configured")]
    SecretNotConfigured,
    #[error("Missing webhook signature")]
    MissingSignature,
    #[error("Unable to read request payload")]
    BodyReadError,
    #[error("Invalid webhook signature")]
    InvalidSignature,
    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(#[from] PayloadError),
    #[error("Invalid webhook event structure")]
    InvalidEvent,
}

impl IntoResponse for WebhookRejection {
    fn into_response(self) -> Response {
        let status = match self {
            WebhookRejection::SecretNotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            WebhookRejection::InvalidSignature => StatusCode::UNAUTHORIZED,
            WebhookRejection::MissingSignature
            | WebhookRejection::BodyReadError
            | WebhookRejection::InvalidPayload(_)
            | WebhookRejection::InvalidEvent => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}

impl FromRequest<AppState> for VerifiedWebhook {
    type Rejection = WebhookRejection;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let secret = state
            .webhook
            .secret
            .as_deref()
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| {
                tracing::error!("Rejecting webhook: no webhook secret configured");
                WebhookRejection::SecretNotConfigured
            })?;

        let header_value = if state.webhook.verify_signature {
            let value = req
                .headers()
                .get(SIGNATURE_HEADER)
                .ok_or(WebhookRejection::MissingSignature)?;
            if value.is_empty() {
                return Err(WebhookRejection::MissingSignature);
            }
            Some(
                value
                    .to_str()
                    .map_err(|_| WebhookRejection::InvalidSignature)?
                    .to_owned(),
            )
        } else {
            None
        };

        let body_bytes = axum::body::to_bytes(req.into_body(), MAX_BODY_SIZE)
            .await
            .map_err(|_| WebhookRejection::BodyReadError)?;
        let payload =
            String::from_utf8(body_bytes.to_vec()).map_err(|_| WebhookRejection::BodyReadError)?;

        let authentic = header_value
            .is_none_or(|header_value| signature::verify_signature(&payload, &header_value, secret));
        if !authentic {
            tracing::warn!("Rejecting webhook with invalid signature");
            return Err(WebhookRejection::InvalidSignature);
        }

        let object = webhook::parse_webhook_payload(&payload)?;
        let event = WebhookEvent::try_from_object(object).ok_or(WebhookRejection::InvalidEvent)?;

        Ok(VerifiedWebhook(event))
    }
}
