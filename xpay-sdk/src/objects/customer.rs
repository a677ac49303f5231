//! Customer request and response types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;

/// Request payload for creating a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCustomerRequest {
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl CreateCustomerRequest {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Partial update of a customer; only the fields set are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCustomerRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub metadata: Option<Map<String, Value>>,
    #[serde(default, with = "super::timestamp")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, with = "super::timestamp")]
    pub updated_at: Option<OffsetDateTime>,
}

/// One page of customers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerList {
    pub customers: Vec<Customer>,
    pub total: u64,
    pub has_more: bool,
}

/// Filters for listing customers. Only these parameters are forwarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCustomersQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub created_after: Option<String>,
    pub created_before: Option<String>,
}

impl ListCustomersQuery {
    pub(crate) fn params(&self) -> [(&'static str, Option<String>); 6] {
        [
            ("limit", self.limit.map(|v| v.to_string())),
            ("offset", self.offset.map(|v| v.to_string())),
            ("email", self.email.clone()),
            ("name", self.name.clone()),
            ("created_after", self.created_after.clone()),
            ("created_before", self.created_before.clone()),
        ]
    }
}
