//! Cookie-jar transport
//!
//! A reqwest client that keeps the session in a shared cookie jar:
//! - initial cookies come from `ClientConfig::cookies`
//! - `Set-Cookie` responses (login, session refresh) update the jar
//! - the `me` cookie in the jar signs POST requests

use super::transport::{parse_body, Params, Transport};
use crate::auth::{me_cookie, Authenticator, MeCookie};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// Transport backed by a reqwest cookie jar
pub struct CookieJarTransport {
    client: Client,
    config: ClientConfig,
    base: Url,
    jar: Arc<Jar>,
    authenticator: Authenticator,
}

impl CookieJarTransport {
    /// Create a transport, seeding the jar from `config.cookies`
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_jar(config, Arc::new(Jar::default()))
    }

    /// Create a transport over an existing jar (shared with other clients)
    pub fn with_jar(config: ClientConfig, jar: Arc<Jar>) -> Result<Self> {
        let base = config.base()?;

        if let Some(cookies) = config.cookies.as_deref() {
            for cookie in cookies.split(';').map(str::trim).filter(|c| !c.is_empty()) {
                jar.add_cookie_str(cookie, &base);
            }
        }

        let client = build_client(&config)?
            .cookie_provider(jar.clone())
            .build()?;

        Ok(Self {
            client,
            authenticator: Authenticator::from_config(&config),
            config,
            base,
            jar,
        })
    }

    /// Current cookies for the site, as a `Cookie` header value
    pub fn cookie_header(&self) -> Option<String> {
        self.jar
            .cookies(&self.base)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }

    /// The decoded session cookie, if logged in
    pub fn me_cookie(&self) -> Option<MeCookie> {
        self.cookie_header().as_deref().and_then(me_cookie)
    }

    /// Get the underlying cookie jar
    pub fn jar(&self) -> &Arc<Jar> {
        &self.jar
    }

    /// Get the client config
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for CookieJarTransport {
    async fn get(&self, path: &str, query: &Params) -> Result<Value> {
        let mut req = self.client.get(self.config.endpoint(path));
        if !query.is_empty() {
            req = req.query(query.as_slice());
        }
        send_json(path, self.authenticator.apply(req)).await
    }

    async fn post(&self, path: &str, mut body: Params, skip_auth: bool) -> Result<Value> {
        if !skip_auth {
            self.authenticator
                .sign(path, &mut body, self.cookie_header().as_deref())?;
        }

        let req = self
            .client
            .post(self.config.endpoint(path))
            .form(body.as_slice());
        send_json(path, self.authenticator.apply(req)).await
    }
}

impl std::fmt::Debug for CookieJarTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieJarTransport")
            .field("base", &self.base.as_str())
            .field("logged_in", &self.me_cookie().is_some())
            .finish_non_exhaustive()
    }
}

/// Client builder with timeout, user agent and default headers applied
pub(super) fn build_client(config: &ClientConfig) -> Result<reqwest::ClientBuilder> {
    Ok(Client::builder()
        .timeout(config.timeout)
        .user_agent(&config.user_agent)
        .default_headers(default_headers(config)?))
}

fn default_headers(config: &ClientConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (key, value) in &config.default_headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| Error::config(format!("Invalid header name '{key}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::config(format!("Invalid value for header '{key}': {e}")))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// Send a request and parse the JSON body of a 2xx response
pub(super) async fn send_json(path: &str, req: RequestBuilder) -> Result<Value> {
    let response = req.send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(path, status = status.as_u16(), "Request failed");
        return Err(Error::http_status(status.as_u16(), body));
    }

    debug!(path, status = status.as_u16(), "Request succeeded");
    let body = response.text().await?;
    parse_body(path, &body)
}
