//! Webhook endpoint management, plus shortcuts to the delivery helpers.

use serde_json::{Map, Value};

use super::{HttpClient, Method, decode, segment};
use crate::error::Result;
use crate::objects::response::Deleted;
use crate::objects::webhook::WebhookList;
use crate::objects::{CreateWebhookRequest, UpdateWebhookRequest, WebhookEndpoint};
use crate::webhook::{self, PayloadError, SUPPORTED_EVENTS};
use crate::signature;

/// `/v1/api/merchants/{merchant_id}/webhooks`
#[derive(Debug, Clone)]
pub struct Webhooks {
    http: HttpClient,
    base: String,
}

impl Webhooks {
    pub fn new(http: HttpClient, merchant_id: &str) -> Self {
        Self {
            http,
            base: format!("/v1/api/merchants/{}/webhooks", segment(merchant_id)),
        }
    }

    fn path(&self, webhook_id: &str) -> String {
        format!("{}/{}", self.base, segment(webhook_id))
    }

    pub async fn create(&self, request: &CreateWebhookRequest) -> Result<WebhookEndpoint> {
        let response = self.http.post(&self.base, request).await?;
        decode(response.data)
    }

    pub async fn list(&self) -> Result<Vec<WebhookEndpoint>> {
        let response = self.http.get(&self.base).await?;
        Ok(decode::<WebhookList>(response.data)?.webhooks)
    }

    pub async fn retrieve(&self, webhook_id: &str) -> Result<WebhookEndpoint> {
        let response = self.http.get(&self.path(webhook_id)).await?;
        decode(response.data)
    }

    pub async fn update(
        &self,
        webhook_id: &str,
        request: &UpdateWebhookRequest,
    ) -> Result<WebhookEndpoint> {
        let response = self.http.put(&self.path(webhook_id), request).await?;
        decode(response.data)
    }

    pub async fn delete(&self, webhook_id: &str) -> Result<bool> {
        let response = self.http.delete(&self.path(webhook_id)).await?;
        Ok(decode::<Deleted>(response.data)?.deleted)
    }

    /// Ask X-Pay to send a test delivery to the endpoint. Returns the raw
    /// result payload.
    pub async fn test(&self, webhook_id: &str) -> Result<Value> {
        let path = format!("{}/test", self.path(webhook_id));
        let response = self.http.request(Method::Post, &path, None).await?;
        Ok(response.data)
    }

    pub fn verify_signature(payload: &str, signature: &str, secret: &str) -> bool {
        signature::verify_signature(payload, signature, secret)
    }

    pub fn parse_payload(payload: &str) -> std::result::Result<Map<String, Value>, PayloadError> {
        webhook::parse_webhook_payload(payload)
    }

    pub fn validate_event(event: &Map<String, Value>) -> bool {
        webhook::validate_webhook_event(event)
    }

    pub fn supported_events() -> &'static [&'static str] {
        &SUPPORTED_EVENTS
    }
}
