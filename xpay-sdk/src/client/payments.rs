//! Payments API client.

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use super::{HttpClient, Method, decode, query_string, segment};
use crate::currency;
use crate::error::Result;
use crate::objects::{ListPaymentsQuery, Payment, PaymentList, PaymentRequest};

/// `/v1/api/merchants/{merchant_id}/payments`
#[derive(Debug, Clone)]
pub struct Payments {
    http: HttpClient,
    base: String,
}

impl Payments {
    pub fn new(http: HttpClient, merchant_id: &str) -> Self {
        Self {
            http,
            base: format!("/v1/api/merchants/{}/payments", segment(merchant_id)),
        }
    }

    fn path(&self, payment_id: &str) -> String {
        format!("{}/{}", self.base, segment(payment_id))
    }

    /// Create a payment.
    ///
    /// A missing currency is filled with the payment method's default, and
    /// the currency is checked against the method before anything is sent.
    pub async fn create(&self, request: PaymentRequest) -> Result<Payment> {
        let request = prepare(request)?;
        let response = self.http.post(&self.base, &request).await?;
        decode(response.data)
    }

    pub async fn retrieve(&self, payment_id: &str) -> Result<Payment> {
        let response = self.http.get(&self.path(payment_id)).await?;
        decode(response.data)
    }

    pub async fn list(&self, query: &ListPaymentsQuery) -> Result<PaymentList> {
        let path = format!("{}{}", self.base, query_string(query.params()));
        let response = self.http.get(&path).await?;
        decode(response.data)
    }

    /// Cancel a payment, if the payment method supports it.
    pub async fn cancel(&self, payment_id: &str) -> Result<Payment> {
        let path = format!("{}/cancel", self.path(payment_id));
        let response = self.http.request(Method::Post, &path, None).await?;
        decode(response.data)
    }

    /// Confirm a payment for methods that need an explicit confirmation step.
    pub async fn confirm(&self, payment_id: &str, confirmation: Option<Value>) -> Result<Payment> {
        let path = format!("/v1/payments/{}/confirm", segment(payment_id));
        let response = self.http.request(Method::Post, &path, confirmation).await?;
        decode(response.data)
    }

    pub fn supported_currencies(&self, payment_method: &str) -> &'static [&'static str] {
        currency::supported_currencies(payment_method)
    }

    pub fn to_smallest_unit(amount: Decimal, currency: &str) -> Result<i64> {
        currency::to_smallest_unit(amount, currency)
    }

    pub fn from_smallest_unit(amount: i64, currency: &str) -> Result<Decimal> {
        currency::from_smallest_unit(amount, currency)
    }

    pub fn format_amount(amount: Decimal, currency: &str, is_smallest_unit: bool) -> Result<String> {
        currency::format_amount(amount, currency, is_smallest_unit)
    }
}

fn prepare(mut request: PaymentRequest) -> Result<PaymentRequest> {
    let currency = match request.currency.take() {
        Some(currency) => currency,
        None => {
            let currency = currency::default_currency(&request.payment_method);
            debug!(payment_method = %request.payment_method, currency, "defaulting payment currency");
            currency.to_owned()
        }
    };
    currency::validate_currency(&request.payment_method, &currency)?;
    request.currency = Some(currency);
    Ok(request)
}
