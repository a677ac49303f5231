//! The HTTP transport the request executor talks through.
//!
//! [`Transport`] is deliberately small: one request in, a status and body
//! out, or a classified failure. The production implementation wraps
//! `reqwest` and is gated behind the `client` cargo feature.

use std::fmt;

use async_trait::async_trait;

/// Upper bound for establishing a connection, independent of the request timeout.
pub const CONNECT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl TransportRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Any HTTP response, successful or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// A request that produced no HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// DNS, TCP or TLS failure before the request was sent.
    #[error("{0}")]
    Connect(String),
    #[error("{0}")]
    Timeout(String),
    #[error("{0}")]
    Other(String),
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

#[cfg(feature = "client")]
pub use reqwest_transport::ReqwestTransport;

#[cfg(feature = "client")]
mod reqwest_transport {
    use std::time::Duration;

    use async_trait::async_trait;
    use reqwest::Client;

    use super::{CONNECT_TIMEOUT, Method, Transport, TransportError, TransportRequest, TransportResponse};

    /// [`Transport`] backed by a `reqwest::Client`.
    #[derive(Debug, Clone)]
    pub struct ReqwestTransport {
        http: Client,
    }

    impl ReqwestTransport {
        /// Build a client with the given request timeout and a fixed connect timeout.
        pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
            let http = Client::builder()
                .timeout(timeout)
                .connect_timeout(CONNECT_TIMEOUT)
                .build()?;
            Ok(Self { http })
        }

        /// Replace the default `reqwest::Client` with a custom one (e.g. to
        /// configure a proxy). Its own timeouts apply.
        pub fn with_http_client(mut self, client: Client) -> Self {
            self.http = client;
            self
        }
    }

    #[async_trait]
    impl Transport for ReqwestTransport {
        async fn send(
            &self,
            request: TransportRequest,
        ) -> Result<TransportResponse, TransportError> {
            let method = match request.method {
                Method::Get => reqwest::Method::GET,
                Method::Post => reqwest::Method::POST,
                Method::Put => reqwest::Method::PUT,
                Method::Delete => reqwest::Method::DELETE,
            };

            let mut builder = self.http.request(method, &request.url);
            for (name, value) in &request.headers {
                builder = builder.header(*name, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let resp = builder.send().await.map_err(classify)?;
            let status = resp.status().as_u16();
            let body = resp.text().await.map_err(classify)?;
            Ok(TransportResponse { status, body })
        }
    }

    fn classify(err: reqwest::Error) -> TransportError {
        if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else if err.is_timeout() {
            TransportError::Timeout(format!("operation timeout: {err}"))
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use serde_json::Value;

    use super::{Transport, TransportError, TransportRequest, TransportResponse};

    /// Replays scripted outcomes in order and records every request.
    #[derive(Default)]
    pub(crate) struct MockTransport {
        outcomes: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
        requests: Mutex<Vec<TransportRequest>>,
    }

    impl MockTransport {
        pub(crate) fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub(crate) fn respond(&self, status: u16, body: Value) {
            self.respond_raw(status, &body.to_string());
        }

        pub(crate) fn respond_raw(&self, status: u16, body: &str) {
            self.outcomes.lock().unwrap().push_back(Ok(TransportResponse {
                status,
                body: body.to_owned(),
            }));
        }

        pub(crate) fn fail(&self, err: TransportError) {
            self.outcomes.lock().unwrap().push_back(Err(err));
        }

        pub(crate) fn requests(&self) -> Vec<TransportRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub(crate) fn last_request(&self) -> TransportRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(
            &self,
            request: TransportRequest,
        ) -> Result<TransportResponse, TransportError> {
            self.requests.lock().unwrap().push(request);
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Other("no scripted response".into())))
        }
    }
}
