//! CLI module
//!
//! Command-line interface over the API client.
//!
//! # Commands
//!
//! - `walk` - Stream items older or newer than an id
//! - `info` - Tags and comments of an item
//! - `profile` - User profile
//! - `sync` - Account sync log
//! - `captcha` - Request a login captcha
//! - `login` - Log in and print the session cookies

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, TransportKind};
pub use runner::Runner;
