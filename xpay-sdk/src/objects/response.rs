//! The uniform response envelope and merchant-level responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// Normalized result of every API call.
///
/// `data` holds the body's `data` field, or the whole body when the API
/// answered without an envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Value,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn from_value(body: Value) -> Self {
        let Value::Object(mut object) = body else {
            return Self {
                success: true,
                data: body,
                message: None,
                error: None,
            };
        };

        let success = object
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(true);
        let message = object
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let error = object
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let data = match object.remove("data") {
            Some(Value::Null) | None => Value::Object(object),
            Some(data) => data,
        };

        Self {
            success,
            data,
            message,
            error,
        }
    }
}

/// Result of a connectivity check.
///
/// `timestamp` is taken on the client when the response arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResponse {
    pub success: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// A payment method enabled for the merchant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentMethodInfo {
    #[serde(rename = "type")]
    pub method_type: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub enabled: bool,
    pub currencies: Vec<String>,
}

/// Payment methods available to the merchant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentMethods {
    pub environment: Option<String>,
    pub merchant_id: Option<String>,
    pub payment_methods: Vec<PaymentMethodInfo>,
}

impl PaymentMethods {
    pub fn enabled(&self) -> impl Iterator<Item = &PaymentMethodInfo> {
        self.payment_methods.iter().filter(|m| m.enabled)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Deleted {
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_with_data() {
        let response = ApiResponse::from_value(json!({
            "success": true,
            "message": "ok",
            "data": { "id": "pay_1" }
        }));
        assert!(response.success);
        assert_eq!(response.message.as_deref(), Some("ok"));
        assert_eq!(response.data, json!({ "id": "pay_1" }));
        assert!(response.error.is_none());
    }

    #[test]
    fn test_envelope_without_data() {
        let response = ApiResponse::from_value(json!({ "status": "healthy" }));
        assert!(response.success);
        assert_eq!(response.data, json!({ "status": "healthy" }));
    }

    #[test]
    fn test_envelope_failure_flag() {
        let response = ApiResponse::from_value(json!({
            "success": false,
            "error": "Something went wrong",
            "data": null
        }));
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Something went wrong"));
        assert_eq!(
            response.data,
            json!({ "success": false, "error": "Something went wrong" })
        );
    }

    #[test]
    fn test_envelope_non_object_body() {
        let response = ApiResponse::from_value(json!([1, 2]));
        assert!(response.success);
        assert_eq!(response.data, json!([1, 2]));
    }

    #[test]
    fn test_payment_methods_defaults() {
        let methods: PaymentMethods = serde_json::from_value(json!({
            "payment_methods": [
                { "type": "stripe", "name": "Card", "enabled": true, "currencies": ["USD"] },
                { "type": "momo", "enabled": false }
            ]
        }))
        .unwrap();
        assert_eq!(methods.payment_methods.len(), 2);
        assert_eq!(methods.enabled().count(), 1);
        assert!(methods.environment.is_none());
        assert!(methods.payment_methods[1].currencies.is_empty());
    }
}
