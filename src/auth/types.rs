//! Auth configuration types

use crate::config::ClientConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Number of session id characters sent as `_nonce`
pub const NONCE_LENGTH: usize = 16;

/// Authentication configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthConfig {
    /// Session cookies decide; POSTs carry a nonce from the `me` cookie
    #[default]
    Session,

    /// Bearer token authentication (OAuth access token), no nonce
    Bearer {
        /// The bearer token
        token: String,
    },
}

impl AuthConfig {
    /// Derive the auth mode from a client config
    pub fn from_config(config: &ClientConfig) -> Self {
        match config.bearer_token.as_deref() {
            Some(token) if !token.is_empty() => Self::Bearer {
                token: token.to_string(),
            },
            _ => Self::Session,
        }
    }
}

/// Decoded `me` cookie the site sets after login
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeCookie {
    /// User name
    #[serde(rename = "n", default)]
    pub name: String,
    /// Session id; its prefix is the nonce
    #[serde(default)]
    pub id: String,
    /// Remaining fields, kept opaque
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MeCookie {
    /// The nonce for this session, if the session id is set
    pub fn nonce(&self) -> Option<String> {
        if self.id.is_empty() {
            return None;
        }
        Some(self.id.chars().take(NONCE_LENGTH).collect())
    }
}
