//! Error taxonomy shared by every X-Pay operation.
//!
//! All failures surfaced by the SDK are an [`XPayError`]. The [`ErrorKind`]
//! discriminator lets callers branch on a specific class of failure while
//! still reading `code`, `status` and `details` uniformly:
//!
//! ```ignore
//! match xpay.payments().retrieve("pay_123").await {
//!     Err(e) if e.kind() == ErrorKind::ResourceNotFound => { /* ... */ }
//!     Err(e) => eprintln!("{} ({}): {:?}", e, e.code(), e.status()),
//!     Ok(payment) => { /* ... */ }
//! }
//! ```

use std::fmt;

use serde_json::{Map, Value};

/// Structured error details, usually the decoded error body returned by the API.
pub type Details = Map<String, Value>;

type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout the SDK.
pub type Result<T, E = XPayError> = std::result::Result<T, E>;

/// The class of an [`XPayError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Catch-all API error; the machine code is supplied by the caller.
    Api,
    Authentication,
    Validation,
    Network,
    Timeout,
    ResourceNotFound,
    Permission,
}

impl ErrorKind {
    pub const fn default_message(self) -> &'static str {
        match self {
            ErrorKind::Api => "X-Pay API error",
            ErrorKind::Authentication => "Authentication failed",
            ErrorKind::Validation => "Validation failed",
            ErrorKind::Network => "Network error",
            ErrorKind::Timeout => "Request timeout",
            ErrorKind::ResourceNotFound => "Resource not found",
            ErrorKind::Permission => "Permission denied",
        }
    }

    /// Machine-readable code. [`ErrorKind::Api`] errors normally carry a code
    /// taken from the response; `XPAY_ERROR` is only used when none is known.
    pub const fn default_code(self) -> &'static str {
        match self {
            ErrorKind::Api => "XPAY_ERROR",
            ErrorKind::Authentication => "AUTHENTICATION_ERROR",
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Network => "NETWORK_ERROR",
            ErrorKind::Timeout => "TIMEOUT",
            ErrorKind::ResourceNotFound => "NOT_FOUND",
            ErrorKind::Permission => "PERMISSION_DENIED",
        }
    }

    pub const fn default_status(self) -> Option<u16> {
        match self {
            ErrorKind::Api | ErrorKind::Network => None,
            ErrorKind::Authentication => Some(401),
            ErrorKind::Validation => Some(400),
            ErrorKind::Timeout => Some(408),
            ErrorKind::ResourceNotFound => Some(404),
            ErrorKind::Permission => Some(403),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Api => write!(f, "XPayError"),
            ErrorKind::Authentication => write!(f, "AuthenticationError"),
            ErrorKind::Validation => write!(f, "ValidationError"),
            ErrorKind::Network => write!(f, "NetworkError"),
            ErrorKind::Timeout => write!(f, "TimeoutError"),
            ErrorKind::ResourceNotFound => write!(f, "ResourceNotFoundError"),
            ErrorKind::Permission => write!(f, "PermissionError"),
        }
    }
}

/// An error raised by the SDK or returned by the X-Pay API.
///
/// Constructed once at the point of failure and never mutated afterwards.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct XPayError {
    kind: ErrorKind,
    message: String,
    code: String,
    status: Option<u16>,
    details: Option<Details>,
    #[source]
    cause: Option<Cause>,
}

impl XPayError {
    fn build(kind: ErrorKind, message: String, code: String, status: Option<u16>) -> Self {
        Self {
            kind,
            message,
            code,
            status,
            details: None,
            cause: None,
        }
    }

    fn of_kind(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::build(
            kind,
            message.into(),
            kind.default_code().to_owned(),
            kind.default_status(),
        )
    }

    /// Generic API error with a caller-supplied code and no HTTP status.
    pub fn api(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::build(ErrorKind::Api, message.into(), code.into(), None)
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::of_kind(ErrorKind::Authentication, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::of_kind(ErrorKind::Validation, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::of_kind(ErrorKind::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::of_kind(ErrorKind::Timeout, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::of_kind(ErrorKind::ResourceNotFound, message)
    }

    pub fn permission(message: impl Into<String>) -> Self {
        Self::of_kind(ErrorKind::Permission, message)
    }

    /// Attach an HTTP status, overriding the kind's default.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_details(mut self, details: Details) -> Self {
        self.details = Some(details);
        self
    }

    /// Wrap the underlying failure that caused this error.
    pub fn with_cause(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn details(&self) -> Option<&Details> {
        self.details.as_ref()
    }
}

/// An error of the given kind with its default message, code and status.
impl From<ErrorKind> for XPayError {
    fn from(kind: ErrorKind) -> Self {
        Self::of_kind(kind, kind.default_message())
    }
}
