//! Operating environment.

use serde::{Deserialize, Serialize};

const SANDBOX_KEY_PREFIXES: [&str; 3] = ["xpay_sandbox_", "pk_sandbox_", "sk_sandbox_"];
const LIVE_KEY_PREFIXES: [&str; 3] = ["xpay_live_", "pk_live_", "sk_live_"];

/// The X-Pay environment a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Sandbox,
    Live,
}

impl Environment {
    /// Infer the environment from an API key prefix.
    ///
    /// Unrecognized keys fall back to [`Environment::Sandbox`].
    pub fn from_api_key(api_key: &str) -> Self {
        if SANDBOX_KEY_PREFIXES.iter().any(|p| api_key.starts_with(p)) {
            return Environment::Sandbox;
        }
        if LIVE_KEY_PREFIXES.iter().any(|p| api_key.starts_with(p)) {
            return Environment::Live;
        }
        Environment::Sandbox
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Environment::Sandbox => "sandbox",
            Environment::Live => "live",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sandbox" => Ok(Environment::Sandbox),
            "live" => Ok(Environment::Live),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}
