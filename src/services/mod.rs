//! Endpoint groups
//!
//! Each service wraps one area of the API (`/items`, `/tags`, ...) and turns
//! typed arguments into query or form parameters. All of them share one
//! `Transport`, so any transport works with any service.

mod comments;
mod contact;
mod items;
mod messages;
mod profile;
mod tags;
mod user;

pub use comments::CommentsService;
pub use contact::ContactService;
pub use items::{DeleteItemOptions, GetItemsOptions, ItemsService};
pub use messages::MessagesService;
pub use profile::ProfileService;
pub use tags::TagsService;
pub use user::{LoginOptions, SiteSettingsOptions, UserService};

use crate::error::Result;
use crate::http::{decode, Params, Transport};
use serde::de::DeserializeOwned;

/// GET `path` and decode the response
async fn get<T: DeserializeOwned>(transport: &dyn Transport, path: &str, query: Params) -> Result<T> {
    let value = transport.get(path, &query).await?;
    decode(path, value)
}

/// POST a signed form to `path` and decode the response
async fn post<T: DeserializeOwned>(transport: &dyn Transport, path: &str, body: Params) -> Result<T> {
    let value = transport.post(path, body, false).await?;
    decode(path, value)
}

/// POST without a session nonce (login, captcha, password reset)
async fn post_unsigned<T: DeserializeOwned>(
    transport: &dyn Transport,
    path: &str,
    body: Params,
) -> Result<T> {
    let value = transport.post(path, body, true).await?;
    decode(path, value)
}

#[cfg(test)]
mod tests;
