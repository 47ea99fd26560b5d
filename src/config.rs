//! Configuration types for danfe-fetch

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the API base URL
pub const ENV_API_BASE: &str = "MEU_DANFE_API_BASE";

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "MEU_DANFE_API_KEY";

/// Base URL used when [`ENV_API_BASE`] is unset
pub const DEFAULT_API_BASE: &str = "https://api.meudanfe.com.br/v2";

/// Placeholder key used when [`ENV_API_KEY`] is unset. Must be replaced for real use.
pub const PLACEHOLDER_API_KEY: &str = "troque_pela_sua_api_key_aqui";

/// Fixed per-request network timeout, in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration
///
/// Built once at process start and handed to [`crate::DanfeClient::new`].
/// Operations never consult the environment themselves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// API base URL without trailing slash (default: "https://api.meudanfe.com.br/v2")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Static credential sent as the `Api-Key` header
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// Network timeout applied to every request (default: 30 seconds)
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: default_api_key(),
            timeout: default_timeout(),
        }
    }
}

impl Config {
    /// Create a configuration for an explicit endpoint and key
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            api_key: api_key.into(),
            timeout: default_timeout(),
        }
    }

    /// Load configuration from the process environment
    ///
    /// A `.env` file in the working directory is loaded first when present.
    /// Unset variables fall back to [`DEFAULT_API_BASE`] and [`PLACEHOLDER_API_KEY`].
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_API_BASE)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(default_base_url);
        let api_key = lookup(ENV_API_KEY)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(default_api_key);

        let config = Self::new(base_url.trim(), api_key.trim());
        config.validate()?;

        if config.uses_placeholder_key() {
            tracing::warn!(
                variable = ENV_API_KEY,
                "API key not configured; requests will be rejected by the service"
            );
        }

        Ok(config)
    }

    /// Check that the configuration can be used to issue requests
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::config("base URL must not be empty", ENV_API_BASE));
        }

        let parsed = url::Url::parse(&self.base_url).map_err(|e| {
            Error::config(format!("invalid base URL '{}': {}", self.base_url, e), ENV_API_BASE)
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::config(
                format!("base URL must use http or https, got '{}'", parsed.scheme()),
                ENV_API_BASE,
            ));
        }

        if self.api_key.trim().is_empty() {
            return Err(Error::config("API key must not be empty", ENV_API_KEY));
        }

        if self.timeout.is_zero() {
            return Err(Error::Config {
                message: "timeout must be greater than zero".to_string(),
                key: Some("timeout".to_string()),
            });
        }

        Ok(())
    }

    /// True when the API key is still the shipped placeholder
    pub fn uses_placeholder_key(&self) -> bool {
        self.api_key == PLACEHOLDER_API_KEY
    }

    /// Join an endpoint path onto the base URL
    ///
    /// Trailing slashes are dropped here as well, since a `Config` can be
    /// deserialized or built field by field without going through [`Config::new`].
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            normalize_base_url(&self.base_url),
            path.trim_start_matches('/')
        )
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim_end_matches('/').to_string()
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_api_key() -> String {
    PLACEHOLDER_API_KEY.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(REQUEST_TIMEOUT_SECS)
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
