//! Webhook payload parsing and event validation.
//!
//! Signature checks live in [`crate::signature`]; this module covers what
//! happens once a delivery is authenticated.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Event types X-Pay delivers.
pub const SUPPORTED_EVENTS: [&str; 10] = [
    "payment.created",
    "payment.succeeded",
    "payment.failed",
    "payment.cancelled",
    "payment.refunded",
    "refund.created",
    "refund.succeeded",
    "refund.failed",
    "customer.created",
    "customer.updated",
];

const REQUIRED_FIELDS: [&str; 4] = ["id", "type", "created_at", "data"];

/// Invalid webhook payloads.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("Empty payload provided")]
    Empty,
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Webhook payload must be a JSON object")]
    NotAnObject,
}

pub fn is_supported_event(event_type: &str) -> bool {
    SUPPORTED_EVENTS.contains(&event_type)
}

/// Parse a raw webhook body into a JSON object.
pub fn parse_webhook_payload(payload: &str) -> Result<Map<String, Value>, PayloadError> {
    if payload.is_empty() {
        return Err(PayloadError::Empty);
    }
    match serde_json::from_str::<Value>(payload)? {
        Value::Object(object) => Ok(object),
        _ => Err(PayloadError::NotAnObject),
    }
}

/// Check the structure of a parsed webhook event.
///
/// `id`, `type` and `created_at` must be non-empty strings, `data` must be an
/// object, and `type` must be one of [`SUPPORTED_EVENTS`].
pub fn validate_webhook_event(event: &Map<String, Value>) -> bool {
    if !REQUIRED_FIELDS.iter().all(|field| event.contains_key(*field)) {
        return false;
    }

    let non_empty_str = |field: &str| matches!(event.get(field), Some(Value::String(s)) if !s.is_empty());
    if !(non_empty_str("id") && non_empty_str("type") && non_empty_str("created_at")) {
        return false;
    }

    if !matches!(event.get("data"), Some(Value::Object(_))) {
        return false;
    }

    event
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(is_supported_event)
}

/// A validated webhook event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub created_at: String,
    pub data: Map<String, Value>,
}

impl WebhookEvent {
    /// Build a typed event from a parsed payload, or `None` if it fails
    /// [`validate_webhook_event`].
    pub fn try_from_object(event: Map<String, Value>) -> Option<Self> {
        if !validate_webhook_event(&event) {
            return None;
        }
        serde_json::from_value(Value::Object(event)).ok()
    }

    /// The resource family of the event (`payment`, `refund`, `customer`).
    pub fn resource(&self) -> &str {
        self.event_type
            .split_once('.')
            .map_or(self.event_type.as_str(), |(resource, _)| resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_event() -> Map<String, Value> {
        let Value::Object(event) = json!({
            "id": "evt_123",
            "type": "payment.succeeded",
            "created_at": "2024-01-01T00:00:00Z",
            "data": { "payment": { "id": "pay_123", "amount": "10.00" } }
        }) else {
            unreachable!()
        };
        event
    }

    #[test]
    fn test_parse_valid_payload() {
        let event = parse_webhook_payload(r#"{"id":"evt_1","type":"payment.created"}"#).unwrap();
        assert_eq!(event["id"], "evt_1");
    }

    #[test]
    fn test_parse_empty_payload() {
        let err = parse_webhook_payload("").unwrap_err();
        assert!(matches!(err, PayloadError::Empty));
        assert_eq!(err.to_string(), "Empty payload provided");
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = parse_webhook_payload("{not json").unwrap_err();
        assert!(matches!(err, PayloadError::Json(_)));
        assert!(err.to_string().starts_with("Invalid JSON payload: "));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_parse_non_object() {
        assert!(matches!(
            parse_webhook_payload("[1, 2, 3]").unwrap_err(),
            PayloadError::NotAnObject
        ));
        assert!(matches!(
            parse_webhook_payload("\"text\"").unwrap_err(),
            PayloadError::NotAnObject
        ));
    }

    #[test]
    fn test_validate_valid_event() {
        assert!(validate_webhook_event(&valid_event()));
    }

    #[test]
    fn test_validate_missing_fields() {
        for field in REQUIRED_FIELDS {
            let mut event = valid_event();
            event.remove(field);
            assert!(!validate_webhook_event(&event), "missing {field} accepted");
        }
    }

    #[test]
    fn test_validate_field_types() {
        let mut event = valid_event();
        event.insert("id".into(), json!(""));
        assert!(!validate_webhook_event(&event));

        let mut event = valid_event();
        event.insert("id".into(), json!(123));
        assert!(!validate_webhook_event(&event));

        let mut event = valid_event();
        event.insert("created_at".into(), json!(null));
        assert!(!validate_webhook_event(&event));

        let mut event = valid_event();
        event.insert("data".into(), json!("not an object"));
        assert!(!validate_webhook_event(&event));
    }

    #[test]
    fn test_validate_unsupported_type() {
        let mut event = valid_event();
        event.insert("type".into(), json!("invoice.paid"));
        assert!(!validate_webhook_event(&event));
    }

    #[test]
    fn test_supported_events() {
        assert!(is_supported_event("payment.created"));
        assert!(is_supported_event("refund.failed"));
        assert!(is_supported_event("customer.updated"));
        assert!(!is_supported_event("customer.deleted"));
        assert!(!is_supported_event("Payment.Created"));
        assert_eq!(SUPPORTED_EVENTS.len(), 10);
    }

    #[test]
    fn test_typed_event() {
        let event = WebhookEvent::try_from_object(valid_event()).unwrap();
        assert_eq!(event.id, "evt_123");
        assert_eq!(event.event_type, "payment.succeeded");
        assert_eq!(event.resource(), "payment");
        assert_eq!(event.data["payment"]["id"], "pay_123");

        let mut invalid = valid_event();
        invalid.remove("data");
        assert!(WebhookEvent::try_from_object(invalid).is_none());
    }
}
