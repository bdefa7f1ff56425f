//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line client for the pr0gramm API
#[derive(Parser, Debug)]
#[command(name = "pr0gramm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Use plain http instead of https
    #[arg(long, global = true)]
    pub insecure: bool,

    /// HTTP transport to use
    #[arg(short, long, global = true, default_value = "jar")]
    pub transport: TransportKind,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stream items starting at an id
    Walk {
        /// Walk towards older items, starting at this id
        #[arg(long, conflicts_with = "newer", required_unless_present = "newer")]
        older: Option<u64>,

        /// Walk towards newer items, starting at this id
        #[arg(long)]
        newer: Option<u64>,

        /// Content flags bitmask (1 = sfw, 2 = nsfw, 4 = nsfl)
        #[arg(long, default_value = "1")]
        flags: u8,

        /// Only promoted items
        #[arg(long)]
        promoted: bool,

        /// Tag filter (comma-separated)
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Only uploads of this user
        #[arg(long)]
        user: Option<String>,

        /// Stop after this many items
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show tags and comments of an item
    Info {
        /// Item id
        item_id: u64,
    },

    /// Show a user profile
    Profile {
        /// User name
        name: String,

        /// Content flags bitmask
        #[arg(long, default_value = "1")]
        flags: u8,
    },

    /// Poll account changes
    Sync {
        /// Sync offset
        #[arg(long, default_value = "0")]
        offset: u64,
    },

    /// Request a login captcha
    Captcha,

    /// Log in and print the session cookies
    Login {
        #[arg(long)]
        name: String,

        #[arg(long)]
        password: String,

        /// Captcha token from `captcha`
        #[arg(long, requires = "captcha")]
        token: Option<String>,

        /// Captcha solution
        #[arg(long, requires = "token")]
        captcha: Option<String>,
    },
}

/// Transport selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TransportKind {
    /// reqwest with a cookie jar
    Jar,
    /// ureq with a connection pool
    Pooled,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one value per line)
    Json,
    /// Human-readable output
    Pretty,
}
