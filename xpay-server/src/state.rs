//! Application state shared across all request handlers.

use crate::config::WebhookSettings;
use std::sync::Arc;
use xpay_sdk::XPay;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone)]
pub struct AppState {
    /// The process-wide X-Pay client.
    pub xpay: Arc<XPay>,
    /// Webhook authentication settings.
    pub webhook: Arc<WebhookSettings>,
}

impl AppState {
    pub fn new(xpay: XPay, webhook: WebhookSettings) -> Self {
        Self {
            xpay: Arc::new(xpay),
            webhook: Arc::new(webhook),
        }
    }
}
