//! Authenticator implementation
//!
//! Handles applying authentication to requests: the bearer header for
//! token auth, and the `_nonce` form field for session auth.

use super::types::{AuthConfig, MeCookie};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::Params;
use percent_encoding::percent_decode_str;
use reqwest::RequestBuilder;
use tracing::debug;

/// Name of the session cookie holding the user name and session id
const ME_COOKIE: &str = "me";

/// Form field carrying the nonce
const NONCE_FIELD: &str = "_nonce";

/// Authenticator handles applying authentication to HTTP requests
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Create an authenticator for a client config
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(AuthConfig::from_config(config))
    }

    /// Apply authentication headers to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.config {
            AuthConfig::Session => req,
            AuthConfig::Bearer { token } => req.bearer_auth(token),
        }
    }

    /// `Authorization` header value, for transports that set headers by hand
    pub fn authorization_header(&self) -> Option<String> {
        match &self.config {
            AuthConfig::Session => None,
            AuthConfig::Bearer { token } => Some(format!("Bearer {token}")),
        }
    }

    /// Add the `_nonce` field to a POST body
    ///
    /// Fails with `NotLoggedIn` when session auth is used and the cookies
    /// carry no usable `me` cookie. Bearer auth needs no nonce.
    pub fn sign(&self, path: &str, body: &mut Params, cookie_header: Option<&str>) -> Result<()> {
        if let AuthConfig::Bearer { .. } = self.config {
            return Ok(());
        }

        let nonce = cookie_header
            .and_then(session_nonce)
            .ok_or_else(|| Error::not_logged_in(path))?;

        debug!(path, "Signed request with session nonce");
        body.insert(NONCE_FIELD, nonce);
        Ok(())
    }

    /// Get the current auth config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

/// Split a `Cookie` header (or `document.cookie` string) into decoded pairs
pub fn parse_cookie_header(header: &str) -> Vec<(String, String)> {
    header
        .split(';')
        .filter_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            let key = percent_decode_str(key.trim()).decode_utf8_lossy().into_owned();
            if key.is_empty() {
                return None;
            }
            let value = percent_decode_str(value.trim())
                .decode_utf8_lossy()
                .into_owned();
            Some((key, value))
        })
        .collect()
}

/// Find and decode the `me` cookie in a cookie header
pub fn me_cookie(cookie_header: &str) -> Option<MeCookie> {
    parse_cookie_header(cookie_header)
        .into_iter()
        .find(|(key, _)| key == ME_COOKIE)
        .and_then(|(_, value)| serde_json::from_str(&value).ok())
}

/// Nonce for the session described by a cookie header
pub fn session_nonce(cookie_header: &str) -> Option<String> {
    me_cookie(cookie_header).and_then(|me| me.nonce())
}
