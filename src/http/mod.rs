//! HTTP transport module
//!
//! Provides the `Transport` seam the services talk through, plus three
//! interchangeable implementations.
//!
//! # Transports
//!
//! - **`CookieJarTransport`**: reqwest client backed by a cookie jar that is
//!   seeded from config and updated from `Set-Cookie`
//! - **`BrowserTransport`**: reqwest client that never stores cookies; the
//!   host hands them in per request, the way a browser owns `document.cookie`
//! - **`PooledTransport`**: ureq agent with an idle connection pool, driven
//!   from `spawn_blocking`

mod browser;
mod client;
mod pooled;
mod transport;

pub use browser::{BrowserTransport, CookieSource, StaticCookies};
pub use client::CookieJarTransport;
pub use pooled::PooledTransport;
pub use transport::{decode, Params, Transport};
