// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # pr0gramm API client
//!
//! A typed client for the pr0gramm image board REST API.
//!
//! ## Features
//!
//! - **Typed endpoints**: items, tags, comments, profiles, inbox, contact and user
//! - **Interchangeable transports**: cookie jar (reqwest), host supplied cookies, pooled (ureq)
//! - **Session signing**: POST bodies carry the nonce from the `me` cookie
//! - **Stream walking**: lazy item streams in both directions
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use pr0gramm_api::{ClientConfig, CookieJarTransport, GetItemsOptions, ItemFlags, Pr0grammApi};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> pr0gramm_api::Result<()> {
//!     let transport = CookieJarTransport::new(ClientConfig::default())?;
//!     let api = Pr0grammApi::new(Arc::new(transport));
//!
//!     let mut items = api
//!         .items
//!         .walk_stream_older(6_000_000, GetItemsOptions::new(ItemFlags::SFW).promoted(true));
//!     while let Some(item) = items.try_next().await? {
//!         println!("{} by {}", item.id, item.user);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          Pr0grammApi                            │
//! │  items  tags  comments  profile  messages  contact  user        │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴───────────┬──────────────────────┐
//! │  Pagination  │        Transport          │        Auth          │
//! ├──────────────┼───────────────────────────┼──────────────────────┤
//! │ walk()       │ CookieJarTransport        │ me cookie            │
//! │ OlderItems   │ BrowserTransport          │ _nonce               │
//! │ NewerItems   │ PooledTransport           │ Bearer token         │
//! └──────────────┴───────────────────────────┴──────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Document the record fields in types.rs

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and records
pub mod types;

/// Response shapes
pub mod responses;

/// Client configuration
pub mod config;

/// Session cookie and bearer authentication
pub mod auth;

/// HTTP transports
pub mod http;

/// Cursor walking over paginated endpoints
pub mod pagination;

/// Endpoint groups
pub mod services;

/// API facade
pub mod api;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use api::Pr0grammApi;
pub use config::ClientConfig;
pub use http::{BrowserTransport, CookieJarTransport, PooledTransport, Transport};
pub use pagination::{walk, WalkStream};
pub use services::{GetItemsOptions, LoginOptions};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
