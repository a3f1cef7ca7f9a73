//! Client configuration
//!
//! Connection settings shared by every search a client runs: the auth
//! token and client identity passed through as headers, the API root, and
//! transport limits. Loaded from YAML or JSON, with environment overrides.

use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::query::DEFAULT_API_BASE;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding the token
pub const ENV_TOKEN: &str = "CHANNEL_SEARCH_TOKEN";
/// Environment variable overriding the user agent
pub const ENV_USER_AGENT: &str = "CHANNEL_SEARCH_USER_AGENT";
/// Environment variable overriding the API root
pub const ENV_API_BASE: &str = "CHANNEL_SEARCH_API_BASE";

/// Connection settings for a search client
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Authorization token, sent verbatim
    #[serde(default)]
    pub token: String,

    /// Client identity
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// API root the search endpoints hang off
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Optional client-side request rate cap
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
}

fn default_user_agent() -> String {
    format!("channel-search/{}", env!("CARGO_PKG_VERSION"))
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            user_agent: default_user_agent(),
            api_base: default_api_base(),
            timeout_secs: default_timeout(),
            rate_limit: None,
        }
    }
}

impl ClientConfig {
    /// Create a config with the given token and defaults elsewhere
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    /// Load from a file; `.json` is parsed as JSON, anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Ok(serde_json::from_str(&content)?)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Parse from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply environment overrides
    #[must_use]
    pub fn apply_env(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (empty values are ignored)
    #[must_use]
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(token) = lookup(ENV_TOKEN) {
            self.token = token;
        }
        if let Some(user_agent) = lookup(ENV_USER_AGENT) {
            self.user_agent = user_agent;
        }
        if let Some(api_base) = lookup(ENV_API_BASE) {
            self.api_base = api_base;
        }
        self
    }

    /// Check the config is usable
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(Error::missing_field("token"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be positive"));
        }
        url::Url::parse(&self.api_base)?;
        Ok(())
    }

    /// Transport configuration with the pass-through headers set
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .token(&self.token)
            .user_agent(&self.user_agent)
            .timeout(Duration::from_secs(self.timeout_secs));

        builder = match &self.rate_limit {
            Some(limit) => builder.rate_limit(limit.clone()),
            None => builder.no_rate_limit(),
        };

        builder.build()
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"***")
            .field("user_agent", &self.user_agent)
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}
