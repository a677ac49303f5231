use std::sync::Arc;

use time::OffsetDateTime;

use crate::client::{Customers, HttpClient, Payments, Transport, Webhooks, decode, segment};
use crate::config::{ConfigError, XPayConfig};
use crate::error::Result;
use crate::objects::{PaymentMethods, PingResponse};

/// Entry point of the SDK.
///
/// Holds one request executor shared by the resource clients. Cloning is
/// cheap and clones share the underlying transport.
///
/// ```ignore
/// let config = XPayConfig::new("sk_sandbox_...")?.with_merchant_id("merchant_123");
/// let xpay = XPay::new(config)?;
///
/// let payment = xpay
///     .payments()
///     .create(PaymentRequest::new(dec, "momo"))
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct XPay {
    http: HttpClient,
    merchant_id: String,
    payments: Payments,
    customers: Customers,
    webhooks: Webhooks,
}

impl XPay {
    /// Build a client that talks to the API over `reqwest`.
    #[cfg(feature = "client")]
    pub fn new(config: XPayConfig) -> std::result::Result<Self, ConfigError> {
        let transport = crate::client::ReqwestTransport::new(config.timeout())
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Build a client on top of a custom [`Transport`].
    ///
    /// Fails with [`ConfigError::MissingMerchantId`] if the configuration has
    /// no (or an empty) merchant id.
    pub fn with_transport(
        config: XPayConfig,
        transport: Arc<dyn Transport>,
    ) -> std::result::Result<Self, ConfigError> {
        let merchant_id = config
            .merchant_id()
            .filter(|id| !id.is_empty())
            .ok_or(ConfigError::MissingMerchantId)?
            .to_owned();

        let http = HttpClient::new(config, transport);
        Ok(Self {
            payments: Payments::new(http.clone(), &merchant_id),
            customers: Customers::new(http.clone(), &merchant_id),
            webhooks: Webhooks::new(http.clone(), &merchant_id),
            http,
            merchant_id,
        })
    }

    /// Check connectivity and credentials against `GET /v1/healthz`.
    ///
    /// The timestamp is taken locally once the response arrives.
    pub async fn ping(&self) -> Result<PingResponse> {
        let response = self.http.get("/v1/healthz").await?;
        Ok(PingResponse {
            success: response.success,
            timestamp: OffsetDateTime::now_utc(),
        })
    }

    /// Payment methods enabled for this merchant.
    pub async fn payment_methods(&self) -> Result<PaymentMethods> {
        let path = format!(
            "/v1/api/merchants/{}/payment-methods",
            segment(&self.merchant_id)
        );
        let response = self.http.get(&path).await?;
        decode(response.data)
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    /// The underlying request executor, for endpoints without a typed wrapper.
    pub fn http_client(&self) -> &HttpClient {
        &self.http
    }

    pub fn payments(&self) -> &Payments {
        &self.payments
    }

    pub fn customers(&self) -> &Customers {
        &self.customers
    }

    pub fn webhooks(&self) -> &Webhooks {
        &self.webhooks
    }
}
