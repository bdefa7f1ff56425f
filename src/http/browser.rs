//! Browser-style transport
//!
//! The host owns the cookies (as a browser owns `document.cookie`) and the
//! transport only reads them when it needs to: a `Cookie` header on every
//! request, and the `me` cookie to sign POSTs. Nothing the server sets is
//! stored here.

use super::client::{build_client, send_json};
use super::transport::{Params, Transport};
use crate::auth::Authenticator;
use crate::config::ClientConfig;
use crate::error::Result;
use async_trait::async_trait;
use reqwest::header::COOKIE;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::sync::Arc;

/// Supplies the current cookie string, read fresh on every request
pub trait CookieSource: Send + Sync {
    /// `name=value; name2=value2`, or `None` when there are no cookies
    fn cookies(&self) -> Option<String>;
}

/// A fixed cookie string
#[derive(Debug, Clone, Default)]
pub struct StaticCookies(pub String);

impl CookieSource for StaticCookies {
    fn cookies(&self) -> Option<String> {
        if self.0.trim().is_empty() {
            None
        } else {
            Some(self.0.clone())
        }
    }
}

/// Transport that reads cookies from the host instead of keeping a jar
pub struct BrowserTransport {
    client: Client,
    config: ClientConfig,
    cookies: Arc<dyn CookieSource>,
    authenticator: Authenticator,
}

impl BrowserTransport {
    /// Create a transport reading cookies from `cookies`
    pub fn new(config: ClientConfig, cookies: Arc<dyn CookieSource>) -> Result<Self> {
        let client = build_client(&config)?.build()?;
        Ok(Self {
            client,
            authenticator: Authenticator::from_config(&config),
            config,
            cookies,
        })
    }

    /// Create a transport using the cookies from `config.cookies`
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let cookies = StaticCookies(config.cookies.clone().unwrap_or_default());
        Self::new(config, Arc::new(cookies))
    }

    fn prepare(&self, req: RequestBuilder, cookies: Option<&str>) -> RequestBuilder {
        let req = match cookies {
            Some(cookies) => req.header(COOKIE, cookies),
            None => req,
        };
        self.authenticator.apply(req)
    }
}

#[async_trait]
impl Transport for BrowserTransport {
    async fn get(&self, path: &str, query: &Params) -> Result<Value> {
        let cookies = self.cookies.cookies();
        let mut req = self.client.get(self.config.endpoint(path));
        if !query.is_empty() {
            req = req.query(query.as_slice());
        }
        send_json(path, self.prepare(req, cookies.as_deref())).await
    }

    async fn post(&self, path: &str, mut body: Params, skip_auth: bool) -> Result<Value> {
        let cookies = self.cookies.cookies();
        if !skip_auth {
            self.authenticator
                .sign(path, &mut body, cookies.as_deref())?;
        }

        let req = self
            .client
            .post(self.config.endpoint(path))
            .form(body.as_slice());
        send_json(path, self.prepare(req, cookies.as_deref())).await
    }
}

impl std::fmt::Debug for BrowserTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserTransport")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}
