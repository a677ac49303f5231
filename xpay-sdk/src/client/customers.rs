//! Customers API client.

use super::{HttpClient, decode, query_string, segment};
use crate::error::Result;
use crate::objects::response::Deleted;
use crate::objects::{
    CreateCustomerRequest, Customer, CustomerList, ListCustomersQuery, UpdateCustomerRequest,
};

/// `/v1/api/merchants/{merchant_id}/customers`
#[derive(Debug, Clone)]
pub struct Customers {
    http: HttpClient,
    base: String,
}

impl Customers {
    pub fn new(http: HttpClient, merchant_id: &str) -> Self {
        Self {
            http,
            base: format!("/v1/api/merchants/{}/customers", segment(merchant_id)),
        }
    }

    fn path(&self, customer_id: &str) -> String {
        format!("{}/{}", self.base, segment(customer_id))
    }

    pub async fn create(&self, request: &CreateCustomerRequest) -> Result<Customer> {
        let response = self.http.post(&self.base, request).await?;
        decode(response.data)
    }

    pub async fn retrieve(&self, customer_id: &str) -> Result<Customer> {
        let response = self.http.get(&self.path(customer_id)).await?;
        decode(response.data)
    }

    pub async fn update(
        &self,
        customer_id: &str,
        request: &UpdateCustomerRequest,
    ) -> Result<Customer> {
        let response = self.http.put(&self.path(customer_id), request).await?;
        decode(response.data)
    }

    /// Delete a customer. Returns the API's `deleted` flag, `false` if absent.
    pub async fn delete(&self, customer_id: &str) -> Result<bool> {
        let response = self.http.delete(&self.path(customer_id)).await?;
        Ok(decode::<Deleted>(response.data)?.deleted)
    }

    pub async fn list(&self, query: &ListCustomersQuery) -> Result<CustomerList> {
        let path = format!("{}{}", self.base, query_string(query.params()));
        let response = self.http.get(&path).await?;
        decode(response.data)
    }
}
