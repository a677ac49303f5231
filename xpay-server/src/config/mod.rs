//! Configuration module for xpay-server.
//!
//! Handles loading configuration from a TOML file, CLI arguments and
//! environment variables, and turns it into an SDK configuration.

pub mod file;

use crate::config::file::FileConfig;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use xpay_sdk::{Environment, XPayConfig};

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("invalid X-Pay configuration: {0}")]
    Sdk(#[from] xpay_sdk::ConfigError),
}

/// Values from the command line or environment that take precedence over
/// the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub listen: Option<SocketAddr>,
    pub api_key: Option<String>,
    pub merchant_id: Option<String>,
    pub environment: Option<Environment>,
    pub base_url: Option<String>,
    pub timeout: Option<u64>,
    pub webhook_secret: Option<String>,
    pub webhook_verify_signature: Option<bool>,
}

/// How incoming webhook deliveries are authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookSettings {
    pub secret: Option<String>,
    pub verify_signature: bool,
}

/// Fully validated configuration.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub listen: SocketAddr,
    pub sdk: XPayConfig,
    pub webhook: WebhookSettings,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    overrides: Overrides,
}

impl ConfigLoader {
    pub fn new(config_path: impl AsRef<Path>, overrides: Overrides) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            overrides,
        }
    }

    /// Load and process the configuration.
    ///
    /// A missing file is not an error; everything can come from overrides.
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let content = match std::fs::read_to_string(&self.config_path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    "Config file {:?} not found, using environment and defaults",
                    self.config_path
                );
                None
            }
            Err(e) => return Err(e.into()),
        };
        self.load_from(content.as_deref())
    }

    fn load_from(&self, content: Option<&str>) -> Result<LoadedConfig, ConfigError> {
        let mut file_config: FileConfig = match content {
            Some(content) => toml::from_str(content)?,
            None => FileConfig::default(),
        };
        self.apply_overrides(&mut file_config);
        self.validate(&file_config)?;
        self.build_loaded_config(file_config)
    }

    fn apply_overrides(&self, config: &mut FileConfig) {
        let o = self.overrides.clone();
        if let Some(listen) = o.listen {
            config.server.listen = listen;
        }
        if o.api_key.is_some() {
            config.api.api_key = o.api_key;
        }
        if o.merchant_id.is_some() {
            config.api.merchant_id = o.merchant_id;
        }
        if o.environment.is_some() {
            config.api.environment = o.environment;
        }
        if o.base_url.is_some() {
            config.api.base_url = o.base_url;
        }
        if let Some(timeout) = o.timeout {
            config.api.timeout = timeout;
        }
        if o.webhook_secret.is_some() {
            config.webhook.secret = o.webhook_secret;
        }
        if let Some(verify) = o.webhook_verify_signature {
            config.webhook.verify_signature = verify;
        }
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        if config.api.timeout == 0 {
            return Err(ConfigError::ValidationError(
                "api.timeout must be at least one second".into(),
            ));
        }
        if config.webhook.secret.as_deref().is_some_and(str::is_empty) {
            return Err(ConfigError::ValidationError(
                "webhook.secret must not be empty when set".into(),
            ));
        }
        Ok(())
    }

    fn build_loaded_config(&self, file_config: FileConfig) -> Result<LoadedConfig, ConfigError> {
        let api = file_config.api;

        let mut sdk = XPayConfig::new(api.api_key.unwrap_or_default())?
            .with_timeout(Duration::from_secs(api.timeout));
        if let Some(merchant_id) = api.merchant_id {
            sdk = sdk.with_merchant_id(merchant_id);
        }
        if let Some(environment) = api.environment {
            sdk = sdk.with_environment(environment);
        }
        if let Some(base_url) = api.base_url {
            sdk = sdk.with_base_url(base_url)?;
        }

        Ok(LoadedConfig {
            listen: file_config.server.listen,
            sdk,
            webhook: WebhookSettings {
                secret: file_config.webhook.secret,
                verify_signature: file_config.webhook.verify_signature,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
[server]
listen = "127.0.0.1:3000"

[api]
api_key = "sk_sandbox_file"
merchant_id = "merchant_file"
base_url = "https://api.example.com/"

[webhook]
secret = "whsec_file"
"#;

    #[test]
    fn test_load_from_file_content() {
        let loader = ConfigLoader::new("unused.toml", Overrides::default());
        let config = loader.load_from(Some(CONFIG)).unwrap();
        assert_eq!(config.listen.port(), 3000);
        assert_eq!(config.sdk.api_key(), "sk_sandbox_file");
        assert_eq!(config.sdk.merchant_id(), Some("merchant_file"));
        assert_eq!(config.sdk.base_url(), "https://api.example.com");
        assert_eq!(config.sdk.environment(), Environment::Sandbox);
        assert_eq!(config.sdk.timeout(), Duration::from_secs(30));
        assert_eq!(config.webhook.secret.as_deref(), Some("whsec_file"));
        assert!(config.webhook.verify_signature);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let overrides = Overrides {
            listen: Some("0.0.0.0:9000".parse().unwrap()),
            api_key: Some("sk_live_env".into()),
            environment: Some(Environment::Sandbox),
            timeout: Some(5),
            webhook_verify_signature: Some(false),
            ..Default::default()
        };
        let loader = ConfigLoader::new("unused.toml", overrides);
        let config = loader.load_from(Some(CONFIG)).unwrap();
        assert_eq!(config.listen.port(), 9000);
        assert_eq!(config.sdk.api_key(), "sk_live_env");
        assert_eq!(config.sdk.environment(), Environment::Sandbox);
        assert_eq!(config.sdk.merchant_id(), Some("merchant_file"));
        assert_eq!(config.sdk.timeout(), Duration::from_secs(5));
        assert!(!config.webhook.verify_signature);
    }

    #[test]
    fn test_environment_only() {
        let overrides = Overrides {
            api_key: Some("xpay_live_env".into()),
            merchant_id: Some("merchant_env".into()),
            ..Default::default()
        };
        let loader = ConfigLoader::new("unused.toml", overrides);
        let config = loader.load_from(None).unwrap();
        assert_eq!(config.sdk.environment(), Environment::Live);
        assert!(config.webhook.secret.is_none());
    }

    #[test]
    fn test_missing_file_is_tolerated() {
        let path = std::env::temp_dir().join("xpay-server-test-does-not-exist.toml");
        let overrides = Overrides {
            api_key: Some("sk_sandbox_x".into()),
            ..Default::default()
        };
        assert!(ConfigLoader::new(path, overrides).load().is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let loader = ConfigLoader::new("unused.toml", Overrides::default());
        assert!(matches!(
            loader.load_from(None),
            Err(ConfigError::Sdk(xpay_sdk::ConfigError::MissingApiKey))
        ));

        let overrides = Overrides {
            api_key: Some("k".into()),
            timeout: Some(0),
            ..Default::default()
        };
        let loader = ConfigLoader::new("unused.toml", overrides);
        assert!(matches!(
            loader.load_from(None),
            Err(ConfigError::ValidationError(_))
        ));

        let loader = ConfigLoader::new("unused.toml", Overrides::default());
        assert!(matches!(
            loader.load_from(Some("[api]\napi_key = \"k\"\nbase_url = \"not a url\"\n")),
            Err(ConfigError::Sdk(xpay_sdk::ConfigError::InvalidBaseUrl { .. }))
        ));

        assert!(matches!(
            loader.load_from(Some("[server\n")),
            Err(ConfigError::ParseError(_))
        ));
    }
}
