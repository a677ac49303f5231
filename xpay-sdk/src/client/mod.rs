//! Request execution and the per-resource API clients.
//!
//! [`HttpClient`] is the only place where transport failures and HTTP
//! statuses are turned into [`XPayError`]s. Resource clients build paths and
//! decode the `data` payload; errors pass through them untouched.

mod customers;
mod payments;
mod transport;
mod webhooks;

pub use customers::Customers;
pub use payments::Payments;
#[cfg(feature = "client")]
pub use transport::ReqwestTransport;
pub use transport::{
    CONNECT_TIMEOUT, Method, Transport, TransportError, TransportRequest, TransportResponse,
};
pub use webhooks::Webhooks;

#[cfg(test)]
pub(crate) use transport::mock;

use std::borrow::Cow;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::XPayConfig;
use crate::error::{Details, Result, XPayError};
use crate::objects::ApiResponse;

/// Version reported in the `User-Agent` and `X-SDK-Version` headers.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Executes API calls and maps every outcome onto the error taxonomy.
///
/// Cheap to clone; the configuration and transport are shared.
#[derive(Clone)]
pub struct HttpClient {
    config: Arc<XPayConfig>,
    transport: Arc<dyn Transport>,
}

impl HttpClient {
    pub fn new(config: XPayConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &XPayConfig {
        &self.config
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.request(Method::Get, path, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        let body = encode(body)?;
        self.request(Method::Post, path, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        let body = encode(body)?;
        self.request(Method::Put, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.request(Method::Delete, path, None).await
    }

    /// Perform one call against `base_url + path`.
    ///
    /// `body` is ignored for `GET`. No retries are attempted.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse> {
        let url = format!("{}{}", self.config.base_url(), path);
        let body = match body {
            Some(body) if method != Method::Get => Some(body.to_string()),
            _ => None,
        };

        debug!(%method, %url, has_body = body.is_some(), "sending X-Pay request");

        let request = TransportRequest {
            method,
            url,
            headers: self.headers(),
            body,
        };

        let response = self.transport.send(request).await.map_err(|err| {
            let mapped = map_transport_error(err);
            warn!(%method, path, code = mapped.code(), error = %mapped, "X-Pay request failed");
            mapped
        })?;

        map_response(response).inspect_err(|err| {
            warn!(
                %method,
                path,
                code = err.code(),
                status = ?err.status(),
                error = %err,
                "X-Pay request rejected"
            );
        })
    }

    fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("X-API-Key", self.config.api_key().to_owned()),
            ("Content-Type", "application/json".to_owned()),
            ("User-Agent", format!("xpay-rust-sdk/{SDK_VERSION}")),
            ("X-SDK-Version", SDK_VERSION.to_owned()),
            ("X-Environment", self.config.environment().to_string()),
        ]
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn map_transport_error(err: TransportError) -> XPayError {
    let mapped = match &err {
        TransportError::Connect(_) => XPayError::network("Failed to connect to X-Pay API"),
        TransportError::Timeout(_) => XPayError::timeout("Request timeout"),
        TransportError::Other(message) if message.contains("timeout") => {
            XPayError::timeout("Request timeout")
        }
        TransportError::Other(message) => XPayError::network(message.clone()),
    };
    mapped.with_cause(err)
}

fn map_response(response: TransportResponse) -> Result<ApiResponse> {
    let status = response.status;
    match status {
        400..=499 => Err(client_error(status, error_details(&response.body))),
        500..=599 => Err(server_error(status, error_details(&response.body))),
        _ => serde_json::from_str::<Value>(&response.body)
            .map(ApiResponse::from_value)
            .map_err(|e| XPayError::api("Invalid JSON response", "INVALID_RESPONSE").with_cause(e)),
    }
}

fn client_error(status: u16, details: Details) -> XPayError {
    let message = detail_str(&details, "message")
        .map(str::to_owned)
        .unwrap_or_else(|| format!("HTTP {status}"));

    let err = match status {
        400 => XPayError::validation(message),
        401 => XPayError::authentication(message),
        403 => XPayError::permission(message),
        404 => XPayError::not_found(message),
        _ => XPayError::api(
            message,
            detail_str(&details, "error_code").unwrap_or("CLIENT_ERROR"),
        )
        .with_status(status),
    };
    err.with_details(details)
}

fn server_error(status: u16, details: Details) -> XPayError {
    XPayError::api(
        detail_str(&details, "message").unwrap_or("Server error occurred"),
        detail_str(&details, "error_code").unwrap_or("SERVER_ERROR"),
    )
    .with_status(status)
    .with_details(details)
}

/// The error body as a JSON object, or an empty map if it is anything else.
fn error_details(body: &str) -> Details {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(object)) => object,
        _ => Details::new(),
    }
}

fn detail_str<'a>(details: &'a Details, key: &str) -> Option<&'a str> {
    details.get(key).and_then(Value::as_str)
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value> {
    serde_json::to_value(body).map_err(|e| {
        XPayError::api(format!("Failed to serialize request: {e}"), "INVALID_REQUEST").with_cause(e)
    })
}

/// Decode a response payload into a typed entity.
pub(crate) fn decode<T: DeserializeOwned>(data: Value) -> Result<T> {
    serde_json::from_value(data).map_err(|e| {
        XPayError::api(format!("Invalid response data: {e}"), "INVALID_RESPONSE").with_cause(e)
    })
}

pub(crate) fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// `?k=v&...` for the parameters that are set, or an empty string.
pub(crate) fn query_string<I>(params: I) -> String
where
    I: IntoIterator<Item = (&'static str, Option<String>)>,
{
    let pairs: Vec<String> = params
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| format!("{key}={}", urlencoding::encode(&v))))
        .collect();
    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}
