//! Webhook endpoint management types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Request payload for registering a webhook endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWebhookRequest {
    pub url: String,
    pub events: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateWebhookRequest {
    pub fn new<I, S>(url: impl Into<String>, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            url: url.into(),
            events: events.into_iter().map(Into::into).collect(),
            description: None,
        }
    }
}

/// Partial update of a webhook endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateWebhookRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// A registered webhook endpoint.
///
/// `secret` is the HMAC key X-Pay signs deliveries to this endpoint with.
/// `environment` is kept as reported (`sandbox`, `live`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookEndpoint {
    pub id: String,
    pub url: String,
    pub events: Vec<String>,
    pub environment: String,
    pub is_active: bool,
    pub secret: String,
    #[serde(default, with = "super::timestamp")]
    pub created_at: Option<OffsetDateTime>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct WebhookList {
    pub webhooks: Vec<WebhookEndpoint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_deserialize() {
        let endpoint: WebhookEndpoint = serde_json::from_value(json!({
            "id": "wh_123",
            "url": "https://example.com/webhooks",
            "events": ["payment.succeeded", "payment.failed"],
            "environment": "sandbox",
            "is_active": true,
            "secret": "whsec_abc",
            "created_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(endpoint.environment, "sandbox");
        assert_eq!(endpoint.events.len(), 2);
        assert!(endpoint.is_active);
        assert_eq!(endpoint.created_at.unwrap().unix_timestamp(), 1_704_067_200);
    }

    #[test]
    fn test_endpoint_tolerates_unknown_environment() {
        let endpoint: WebhookEndpoint = serde_json::from_value(json!({
            "id": "wh_123",
            "url": "https://example.com/webhooks",
            "events": [],
            "environment": "production",
            "is_active": false,
            "secret": "whsec_abc",
            "created_at": "2024-01-01 00:00:00"
        }))
        .unwrap();

        assert_eq!(endpoint.environment, "production");
        assert_eq!(endpoint.created_at.unwrap().unix_timestamp(), 1_704_067_200);
    }

    #[test]
    fn test_create_request() {
        let request = CreateWebhookRequest::new("https://example.com/hook", ["payment.created"]);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "url": "https://example.com/hook", "events": ["payment.created"] })
        );
    }
}
