//! Client configuration
//!
//! `ClientConfig` is built once and handed to a transport at construction.
//! It replaces any process-wide default headers: two transports built from
//! different configs never share headers, user agents or cookies.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Host name of the site
pub const HOST_NAME: &str = "pr0gramm.com";

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base address of the site (`https://pr0gramm.com`)
pub fn base_address(insecure: bool) -> String {
    let scheme = if insecure { "http" } else { "https" };
    format!("{scheme}://{HOST_NAME}")
}

/// Default user agent sent with every request
pub fn default_user_agent() -> String {
    format!("pr0gramm-api/{VERSION} (Rust)")
}

// ============================================================================
// Connection Pool
// ============================================================================

/// Idle connection limits for the pooled transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Idle connections kept across all hosts
    pub max_idle_connections: usize,
    /// Idle connections kept per host
    pub max_idle_connections_per_host: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle_connections: 10,
            max_idle_connections_per_host: 3,
        }
    }
}

// ============================================================================
// Client Config
// ============================================================================

/// Configuration shared by all transports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Site base URL, without the `/api` suffix
    pub base_url: String,
    /// User agent string
    pub user_agent: String,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// Initial cookies (`name=value; name2=value2`)
    pub cookies: Option<String>,
    /// OAuth access token sent as a bearer header
    pub bearer_token: Option<String>,
    /// Pool limits for the pooled transport
    pub pool: PoolConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: base_address(false),
            user_agent: default_user_agent(),
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            cookies: None,
            bearer_token: None,
            pool: PoolConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Parse a config from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: ClientConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// API root (`<base_url>/api`)
    pub fn api_url(&self) -> String {
        format!("{}/api", self.base_url.trim_end_matches('/'))
    }

    /// Full URL for an API path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url(), path.trim_start_matches('/'))
    }

    /// Parsed base URL, used to scope cookies
    pub fn base(&self) -> Result<url::Url> {
        Ok(url::Url::parse(&self.base_url)?)
    }

    fn validate(&self) -> Result<()> {
        let url = self.base()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "base_url must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.timeout.is_zero() {
            return Err(Error::config("timeout must be greater than zero"));
        }
        Ok(())
    }
}

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Use plain http against the public host
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.config.base_url = base_address(insecure);
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Set initial cookies
    pub fn cookies(mut self, cookies: impl Into<String>) -> Self {
        self.config.cookies = Some(cookies.into());
        self
    }

    /// Set a bearer token
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.config.bearer_token = Some(token.into());
        self
    }

    /// Set pool limits
    pub fn pool(mut self, pool: PoolConfig) -> Self {
        self.config.pool = pool;
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}
