//! Client configuration
//!
//! A [`ClientConfig`] can be read from a YAML or JSON file and is then
//! overlaid with environment variables:
//!
//! | Variable                | Field      |
//! |-------------------------|------------|
//! | `HYPOTHESIS_API_KEY`    | `api_key`  |
//! | `HYPOTHESIS_USERNAME`   | `username` |
//! | `HYPOTHESIS_API_URL`    | `api_url`  |
//! | `HYPOTHESIS_AUTHORITY`  | `authority`|

use crate::auth::Credentials;
use crate::error::{Error, Result, ResultExt};
use crate::http::RateLimiterConfig;
use crate::types::{API_URL, APP_URL, DEFAULT_AUTHORITY, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "HYPOTHESIS_API_KEY";
/// Environment variable holding the username
pub const ENV_USERNAME: &str = "HYPOTHESIS_USERNAME";
/// Environment variable holding the API base URL
pub const ENV_API_URL: &str = "HYPOTHESIS_API_URL";
/// Environment variable holding the account authority
pub const ENV_AUTHORITY: &str = "HYPOTHESIS_AUTHORITY";

// ============================================================================
// Client Config
// ============================================================================

/// Configuration for a [`HypothesisClient`](crate::client::HypothesisClient)
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Base URL of the web application
    #[serde(default = "default_app_url")]
    pub app_url: String,

    /// Hypothesis username
    #[serde(default)]
    pub username: String,

    /// Developer API key
    #[serde(default)]
    pub api_key: String,

    /// Authority of the account
    #[serde(default = "default_authority")]
    pub authority: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Custom user agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Client-side throttle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<RateLimiterConfig>,
}

fn default_api_url() -> String {
    API_URL.to_string()
}

fn default_app_url() -> String {
    APP_URL.to_string()
}

fn default_authority() -> String {
    DEFAULT_AUTHORITY.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            app_url: default_app_url(),
            username: String::new(),
            api_key: String::new(),
            authority: default_authority(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            rate_limit: None,
        }
    }
}

impl ClientConfig {
    /// Create a config with credentials and default endpoints
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Parse a config from YAML (JSON is accepted as a YAML subset)
    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Overlay values from the process environment
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay values from a variable lookup
    #[must_use]
    pub fn with_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = key;
        }
        if let Some(username) = get(ENV_USERNAME) {
            self.username = username;
        }
        if let Some(url) = get(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(authority) = get(ENV_AUTHORITY) {
            self.authority = authority;
        }
        self
    }

    /// Load from an optional file, then overlay the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_env())
    }

    /// Check the config is usable
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::missing_field("api_key"));
        }
        Url::parse(&self.api_url)?;
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    /// Credentials described by this config
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.api_key.clone())
            .with_authority(self.authority.clone())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url)
            .field("app_url", &self.app_url)
            .field("username", &self.username)
            .field("api_key", &"***")
            .field("authority", &self.authority)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}
