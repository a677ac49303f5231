//! Payment request and response types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;

/// Extra data required by some payment methods (mobile money, wallets).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
}

/// Request payload for creating a payment.
///
/// When `currency` is `None` the payment method's default currency is
/// filled in before the request is sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub amount: Decimal,
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_data: Option<PaymentMethodData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

impl PaymentRequest {
    pub fn new(amount: Decimal, payment_method: impl Into<String>) -> Self {
        Self {
            amount,
            payment_method: payment_method.into(),
            ..Default::default()
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }
}

/// A payment as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub status: String,
    pub amount: Decimal,
    pub currency: String,
    pub payment_method: String,
    pub description: Option<String>,
    pub customer_id: Option<String>,
    pub client_secret: Option<String>,
    pub reference_id: Option<String>,
    pub transaction_url: Option<String>,
    pub instructions: Option<String>,
    pub metadata: Option<Map<String, Value>>,
    #[serde(default, with = "super::timestamp")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "super::timestamp")]
    pub updated_at: Option<OffsetDateTime>,
}

/// One page of payments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentList {
    pub payments: Vec<Payment>,
    pub total: u64,
}

/// Filters for listing payments. Only these parameters are forwarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPaymentsQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub status: Option<String>,
    pub customer_id: Option<String>,
    pub created_after: Option<String>,
    pub created_before: Option<String>,
}

impl ListPaymentsQuery {
    pub(crate) fn params(&self) -> [(&'static str, Option<String>); 6] {
        [
            ("limit", self.limit.map(|v| v.to_string())),
            ("offset", self.offset.map(|v| v.to_string())),
            ("status", self.status.clone()),
            ("customer_id", self.customer_id.clone()),
            ("created_after", self.created_after.clone()),
            ("created_before", self.created_before.clone()),
        ]
    }
}
