//! Transport trait and request parameters

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Display;
use std::sync::Arc;

/// One HTTP round trip against the API
///
/// Paths are relative to the API root (`/items/get`). Both calls fail with
/// `Error::HttpStatus` on a non-2xx response.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET with query parameters, parsed as JSON
    async fn get(&self, path: &str, query: &Params) -> Result<Value>;

    /// POST a form body, parsed as JSON
    ///
    /// Unless `skip_auth` is set the body is signed with the session nonce.
    async fn post(&self, path: &str, body: Params, skip_auth: bool) -> Result<Value>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, path: &str, query: &Params) -> Result<Value> {
        (**self).get(path, query).await
    }

    async fn post(&self, path: &str, body: Params, skip_auth: bool) -> Result<Value> {
        (**self).post(path, body, skip_auth).await
    }
}

/// Decode a JSON response into its typed shape
pub fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::decode(path, e.to_string()))
}

/// Parse a response body as JSON
pub(crate) fn parse_body(path: &str, body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(|e| Error::decode(path, e.to_string()))
}

/// Ordered query or form parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    /// Create empty parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a parameter only when a value is present
    #[must_use]
    pub fn with_opt<V: Display>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Add a boolean as `1` / `0`
    #[must_use]
    pub fn with_flag(self, key: impl Into<String>, value: bool) -> Self {
        self.with(key, u8::from(value))
    }

    /// Set a parameter, replacing an existing value for the key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) {
        let key = key.into();
        let value = value.to_string();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Append all parameters of `other`, replacing duplicates
    pub fn extend(&mut self, other: Params) {
        for (key, value) in other.0 {
            self.insert(key, value);
        }
    }

    /// Look up a value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Borrow as key/value pairs (serializable by reqwest)
    pub fn as_slice(&self) -> &[(String, String)] {
        &self.0
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}
