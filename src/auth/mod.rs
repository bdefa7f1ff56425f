//! Authentication module
//!
//! Supports: session cookie (`me` cookie + `_nonce`), Bearer (OAuth access token)
//!
//! The site authenticates POST requests by a nonce derived from the session
//! cookie. The `Authenticator` turns whatever cookies a transport holds into
//! that nonce, or attaches a bearer header when an access token is configured.

mod authenticator;
mod types;

pub use authenticator::{me_cookie, parse_cookie_header, session_nonce, Authenticator};
pub use types::{AuthConfig, MeCookie, NONCE_LENGTH};
