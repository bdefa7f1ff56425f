//! Pooled-connection transport
//!
//! Runs requests through a ureq `Agent`, which keeps idle keep-alive
//! connections per host. ureq is blocking, so each call hops onto tokio's
//! blocking pool. The session (cookie string or bearer token) is fixed at
//! construction.

use super::transport::{parse_body, Params, Transport};
use crate::auth::Authenticator;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};
use ureq::Agent;

/// Transport backed by a pooled ureq agent
#[derive(Clone)]
pub struct PooledTransport {
    agent: Agent,
    config: Arc<ClientConfig>,
    headers: Arc<Vec<(String, String)>>,
    authenticator: Authenticator,
}

impl PooledTransport {
    /// Create a transport with the pool limits from `config.pool`
    pub fn new(config: ClientConfig) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout))
            .max_idle_connections(config.pool.max_idle_connections)
            .max_idle_connections_per_host(config.pool.max_idle_connections_per_host)
            .build()
            .new_agent();

        let authenticator = Authenticator::from_config(&config);
        let headers = request_headers(&config, &authenticator);

        Self {
            agent,
            config: Arc::new(config),
            headers: Arc::new(headers),
            authenticator,
        }
    }

    fn session_cookies(&self) -> Option<&str> {
        self.config
            .cookies
            .as_deref()
            .filter(|c| !c.trim().is_empty())
    }

    async fn execute(&self, path: &str, request: PendingRequest) -> Result<Value> {
        let agent = self.agent.clone();
        let headers = self.headers.clone();
        let url = self.config.endpoint(path);
        let owned_path = path.to_string();

        let (status, body) = tokio::task::spawn_blocking(move || {
            request.call(&agent, &url, &headers)
        })
        .await
        .map_err(|e| Error::transport(format!("Request task for {owned_path} failed: {e}")))??;

        if !(200..300).contains(&status) {
            warn!(path, status, "Request failed");
            return Err(Error::http_status(status, body));
        }

        debug!(path, status, "Request succeeded");
        parse_body(path, &body)
    }
}

/// A request body captured for the blocking task
enum PendingRequest {
    Get(Params),
    Post(Params),
}

impl PendingRequest {
    fn call(self, agent: &Agent, url: &str, headers: &[(String, String)]) -> Result<(u16, String)> {
        let response = match self {
            PendingRequest::Get(query) => {
                let mut req = agent.get(url);
                for (key, value) in headers {
                    req = req.header(key.as_str(), value.as_str());
                }
                for (key, value) in query.iter() {
                    req = req.query(key, value);
                }
                req.call()
            }
            PendingRequest::Post(body) => {
                let mut req = agent.post(url);
                for (key, value) in headers {
                    req = req.header(key.as_str(), value.as_str());
                }
                req.send_form(body.iter())
            }
        };

        let mut response = response.map_err(|e| Error::transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| Error::transport(format!("Failed to read response body: {e}")))?;
        Ok((status, body))
    }
}

/// Headers sent with every request
fn request_headers(config: &ClientConfig, authenticator: &Authenticator) -> Vec<(String, String)> {
    let mut headers = vec![("user-agent".to_string(), config.user_agent.clone())];
    headers.extend(
        config
            .default_headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone())),
    );
    if let Some(cookies) = config.cookies.as_deref().filter(|c| !c.trim().is_empty()) {
        headers.push(("cookie".to_string(), cookies.to_string()));
    }
    if let Some(authorization) = authenticator.authorization_header() {
        headers.push(("authorization".to_string(), authorization));
    }
    headers
}

#[async_trait]
impl Transport for PooledTransport {
    async fn get(&self, path: &str, query: &Params) -> Result<Value> {
        self.execute(path, PendingRequest::Get(query.clone())).await
    }

    async fn post(&self, path: &str, mut body: Params, skip_auth: bool) -> Result<Value> {
        if !skip_auth {
            self.authenticator
                .sign(path, &mut body, self.session_cookies())?;
        }
        self.execute(path, PendingRequest::Post(body)).await
    }
}

impl std::fmt::Debug for PooledTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledTransport")
            .field("base_url", &self.config.base_url)
            .field("pool", &self.config.pool)
            .finish_non_exhaustive()
    }
}
