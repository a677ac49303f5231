//! Client configuration.
//!
//! [`XPayConfig`] is built once and then shared read-only by every request
//! issued through the SDK.

mod environment;

pub use environment::Environment;

use std::time::Duration;

/// Hosted X-Pay API used when no base URL override is given.
pub const DEFAULT_BASE_URL: &str = "https://server.xpay-bits.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Invalid arguments supplied while configuring the SDK.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("API key is required")]
    MissingApiKey,

    #[error("Merchant ID is required. Get your merchant ID from the X-Pay dashboard.")]
    MissingMerchantId,

    #[error("invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Configuration for an [`XPay`](crate::XPay) client.
#[derive(Clone)]
pub struct XPayConfig {
    api_key: String,
    merchant_id: Option<String>,
    environment: Option<Environment>,
    base_url: Option<String>,
    timeout: Duration,
}

impl XPayConfig {
    /// Create a configuration for the given API key.
    ///
    /// Fails with [`ConfigError::MissingApiKey`] if the key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(Self {
            api_key,
            merchant_id: None,
            environment: None,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_merchant_id(mut self, merchant_id: impl Into<String>) -> Self {
        self.merchant_id = Some(merchant_id.into());
        self
    }

    /// Pin the environment instead of inferring it from the API key.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Override the API base URL. Trailing slashes are stripped.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Result<Self, ConfigError> {
        let trimmed = base_url.as_ref().trim_end_matches('/');
        url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.as_ref().to_owned(),
            reason: e.to_string(),
        })?;
        self.base_url = Some(trimmed.to_owned());
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn merchant_id(&self) -> Option<&str> {
        self.merchant_id.as_deref()
    }

    /// The effective environment: the explicit one if set, otherwise the one
    /// implied by the API key prefix.
    pub fn environment(&self) -> Environment {
        self.environment
            .unwrap_or_else(|| Environment::from_api_key(&self.api_key))
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl std::fmt::Debug for XPayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XPayConfig")
            .field("api_key", &"<redacted>")
            .field("merchant_id", &self.merchant_id)
            .field("environment", &self.environment())
            .field("base_url", &self.base_url())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_api_key() {
        let err = XPayConfig::new("").unwrap_err();
        assert_eq!(err, ConfigError::MissingApiKey);
        assert_eq!(err.to_string(), "API key is required");
    }

    #[test]
    fn test_defaults() {
        let config = XPayConfig::new("test_api_key").unwrap();
        assert_eq!(config.api_key(), "test_api_key");
        assert_eq!(config.merchant_id(), None);
        assert_eq!(config.environment(), Environment::Sandbox);
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_all_parameters() {
        let config = XPayConfig::new("test_api_key")
            .unwrap()
            .with_merchant_id("merchant_123")
            .with_environment(Environment::Live)
            .with_base_url("https://api.example.com")
            .unwrap()
            .with_timeout(Duration::from_secs(60));

        assert_eq!(config.merchant_id(), Some("merchant_123"));
        assert_eq!(config.environment(), Environment::Live);
        assert_eq!(config.base_url(), "https://api.example.com");
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_environment_from_key_prefix() {
        let sandbox = XPayConfig::new("xpay_sandbox_abc").unwrap();
        assert_eq!(sandbox.environment(), Environment::Sandbox);

        let live = XPayConfig::new("xpay_live_abc").unwrap();
        assert_eq!(live.environment(), Environment::Live);

        let unknown = XPayConfig::new("random_key").unwrap();
        assert_eq!(unknown.environment(), Environment::Sandbox);
    }

    #[test]
    fn test_explicit_environment_overrides_key() {
        let config = XPayConfig::new("xpay_sandbox_abc")
            .unwrap()
            .with_environment(Environment::Live);
        assert_eq!(config.environment(), Environment::Live);
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let config = XPayConfig::new("key")
            .unwrap()
            .with_base_url("http://localhost:8000///")
            .unwrap();
        assert_eq!(config.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = XPayConfig::new("key")
            .unwrap()
            .with_base_url("not a url")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = XPayConfig::new("sk_live_secret").unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk_live_secret"));
        assert!(debug.contains("Live"));
    }
}
