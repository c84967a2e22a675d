//! Configuration for the admin backend client

use crate::client::ApiError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Environment variable overriding [`AdminConfig::base_url`]
pub const ENV_BASE_URL: &str = "FUNLE_ADMIN_URL";

/// Environment variable overriding [`AdminConfig::timeout_secs`]
pub const ENV_TIMEOUT_SECS: &str = "FUNLE_ADMIN_TIMEOUT_SECS";

/// Upper bound for the request timeout
const MAX_TIMEOUT_SECS: u64 = 600;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Backend root, e.g. `http://127.0.0.1:8000`
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Value of the `User-Agent` header
    pub user_agent: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 30,
            user_agent: concat!("funle-admin/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl AdminConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Read a JSON config file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ApiError::config(format!("cannot read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| ApiError::config(format!("cannot parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `FUNLE_ADMIN_URL` / `FUNLE_ADMIN_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, ApiError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw.trim().parse().map_err(|_| {
                ApiError::config(format!("{} must be a number, got {:?}", ENV_TIMEOUT_SECS, raw))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        let url = self.parsed_base_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::config(format!(
                "base_url must be http or https, got {}",
                url.scheme()
            )));
        }

        if self.timeout_secs == 0 {
            return Err(ApiError::config("timeout_secs must be greater than 0"));
        }

        if self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ApiError::config(format!(
                "timeout_secs cannot exceed {}",
                MAX_TIMEOUT_SECS
            )));
        }

        Ok(())
    }

    pub fn parsed_base_url(&self) -> Result<Url, ApiError> {
        Ok(Url::parse(&self.base_url)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
