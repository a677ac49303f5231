//! Request and response types exchanged with the X-Pay API.

pub mod customer;
pub mod payment;
pub mod response;
mod timestamp;
pub mod webhook;

pub use customer::{
    CreateCustomerRequest, Customer, CustomerList, ListCustomersQuery, UpdateCustomerRequest,
};
pub use payment::{ListPaymentsQuery, Payment, PaymentList, PaymentMethodData, PaymentRequest};
pub use response::{ApiResponse, PaymentMethodInfo, PaymentMethods, PingResponse};
pub use webhook::{CreateWebhookRequest, UpdateWebhookRequest, WebhookEndpoint};
