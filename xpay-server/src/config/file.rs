//! TOML file configuration structures.
//!
//! These structs directly map to the `xpay.toml` file format. Every section
//! is optional so that a deployment can be configured from the environment
//! alone.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use xpay_sdk::Environment;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub webhook: WebhookConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

/// X-Pay API credentials and client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub api_key: Option<String>,
    pub merchant_id: Option<String>,
    /// Pins the environment; derived from the API key prefix when absent.
    pub environment: Option<Environment>,
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            merchant_id: None,
            environment: None,
            base_url: None,
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    xpay_sdk::config::DEFAULT_TIMEOUT.as_secs()
}

/// Incoming webhook settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Shared secret of the webhook endpoint registered with X-Pay.
    pub secret: Option<String>,
    #[serde(default = "default_verify_signature")]
    pub verify_signature: bool,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            secret: None,
            verify_signature: default_verify_signature(),
        }
    }
}

fn default_verify_signature() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parsing() {
        let toml_str = r#"
[server]
listen = "127.0.0.1:3000"

[api]
api_key = "sk_live_abc"
merchant_id = "merchant_123"
environment = "live"
base_url = "https://api.example.com/"
timeout = 15

[webhook]
secret = "whsec_123"
verify_signature = false
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen.port(), 3000);
        assert_eq!(config.api.api_key.as_deref(), Some("sk_live_abc"));
        assert_eq!(config.api.environment, Some(Environment::Live));
        assert_eq!(config.api.timeout, 15);
        assert_eq!(config.webhook.secret.as_deref(), Some("whsec_123"));
        assert!(!config.webhook.verify_signature);
    }

    #[test]
    fn test_defaults() {
        let config: FileConfig = toml::from_str("[api]\napi_key = \"k\"\n").unwrap();
        assert_eq!(config.server.listen, default_listen_addr());
        assert_eq!(config.api.timeout, 30);
        assert!(config.api.environment.is_none());
        assert!(config.webhook.secret.is_none());
        assert!(config.webhook.verify_signature);
    }
}
