//! HTTP API surface of xpay-server.

pub mod extractors;
pub mod webhook;
