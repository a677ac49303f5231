#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

//! Rust SDK for the X-Pay payments API.
//!
//! Start from [`XPayConfig`] and [`XPay`]; use [`signature`] and [`webhook`]
//! to authenticate and validate incoming webhook deliveries.

pub mod client;
pub mod config;
pub mod currency;
pub mod error;
pub mod objects;
pub mod signature;
pub mod webhook;
mod xpay;

pub use config::{ConfigError, Environment, XPayConfig};
pub use currency::Money;
pub use error::{ErrorKind, Result, XPayError};
pub use webhook::{PayloadError, WebhookEvent};
pub use xpay::XPay;
