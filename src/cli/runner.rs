//! CLI runner - executes commands

use crate::api::Pr0grammApi;
use crate::cli::commands::{Cli, Commands, OutputFormat, TransportKind};
use crate::config::ClientConfig;
use crate::error::{Error, Result, ResultExt};
use crate::http::{CookieJarTransport, PooledTransport, Transport};
use crate::pagination::WalkStream;
use crate::responses::LogInOutcome;
use crate::services::{GetItemsOptions, LoginOptions};
use crate::types::{Item, ItemFlags};
use futures::{StreamExt, TryStreamExt};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

/// Environment variable holding a cookie string
pub const COOKIES_ENV: &str = "PR0GRAMM_COOKIES";

/// Environment variable holding an OAuth access token
pub const TOKEN_ENV: &str = "PR0GRAMM_TOKEN";

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        debug!(base_url = %config.base_url, transport = ?self.cli.transport, "Client configured");

        match &self.cli.command {
            Commands::Walk {
                older,
                newer,
                flags,
                promoted,
                tags,
                user,
                limit,
            } => {
                let options = walk_options(*flags, *promoted, tags, user.as_deref());
                self.walk(config, *older, *newer, options, *limit).await
            }
            Commands::Info { item_id } => {
                let info = self.api(config)?.items.get_info(*item_id).await?;
                self.output(&info)
            }
            Commands::Profile { name, flags } => {
                let profile = self
                    .api(config)?
                    .profile
                    .get_info(name, ItemFlags(*flags))
                    .await?;
                self.output(&profile)
            }
            Commands::Sync { offset } => {
                let sync = self.api(config)?.user.sync(*offset).await?;
                self.output(&sync)
            }
            Commands::Captcha => {
                let captcha = self.api(config)?.user.request_captcha().await?;
                self.output(&captcha)
            }
            Commands::Login {
                name,
                password,
                token,
                captcha,
            } => {
                let mut options = LoginOptions::new(name, password);
                if let (Some(token), Some(captcha)) = (token, captcha) {
                    options = options.with_captcha(token, captcha);
                }
                self.login(config, &options).await
            }
        }
    }

    /// Build the client config from the config file, flags and environment
    pub fn load_config(&self) -> Result<ClientConfig> {
        let config = match &self.cli.config {
            Some(path) => ClientConfig::from_yaml_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ClientConfig::default(),
        };

        let config = if self.cli.insecure {
            with_insecure(config)?
        } else {
            config
        };

        Ok(with_env(
            config,
            std::env::var(COOKIES_ENV).ok(),
            std::env::var(TOKEN_ENV).ok(),
        ))
    }

    /// Create the API over the selected transport
    fn api(&self, config: ClientConfig) -> Result<Pr0grammApi> {
        let transport: Arc<dyn Transport> = match self.cli.transport {
            TransportKind::Jar => Arc::new(CookieJarTransport::new(config)?),
            TransportKind::Pooled => Arc::new(PooledTransport::new(config)),
        };
        Ok(Pr0grammApi::new(transport))
    }

    /// Stream items as JSON lines
    async fn walk(
        &self,
        config: ClientConfig,
        older: Option<u64>,
        newer: Option<u64>,
        options: GetItemsOptions,
        limit: Option<usize>,
    ) -> Result<()> {
        let api = self.api(config)?;

        let stream: WalkStream<Item> = match (older, newer) {
            (Some(start), _) => api.items.walk_stream_older(start, options),
            (None, Some(start)) => api.items.walk_stream_newer(start, options),
            (None, None) => return Err(Error::config("walk needs --older or --newer")),
        };
        let mut stream = match limit {
            Some(limit) => stream.take(limit).boxed(),
            None => stream,
        };

        let mut count = 0_usize;
        while let Some(item) = stream.try_next().await? {
            self.output(&item)?;
            count += 1;
        }

        info!(count, "Walk finished");
        Ok(())
    }

    /// Log in and print the cookies of the new session
    async fn login(&self, config: ClientConfig, options: &LoginOptions) -> Result<()> {
        if self.cli.transport != TransportKind::Jar {
            return Err(Error::config("login needs the jar transport"));
        }

        let transport = Arc::new(CookieJarTransport::new(config)?);
        let api = Pr0grammApi::new(transport.clone());

        match api.user.login(options).await?.outcome() {
            LogInOutcome::Success { identifier } => {
                info!(name = %options.name, "Logged in");
                self.output(&json!({
                    "identifier": identifier,
                    "cookies": transport.cookie_header(),
                }))
            }
            LogInOutcome::Banned(ban) => Err(Error::auth(match ban.till {
                Some(till) => format!("banned until {till}: {}", ban.reason),
                None => format!("banned: {}", ban.reason),
            })),
            LogInOutcome::WrongCredentials => Err(Error::auth("wrong name or password")),
        }
    }

    /// Print one value
    fn output<T: Serialize>(&self, value: &T) -> Result<()> {
        let line = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{line}");
        Ok(())
    }
}

/// Item filter from walk flags
pub(crate) fn walk_options(
    flags: u8,
    promoted: bool,
    tags: &[String],
    user: Option<&str>,
) -> GetItemsOptions {
    let mut options = GetItemsOptions::new(ItemFlags(flags)).promoted(promoted);
    if !tags.is_empty() {
        options = options.tags(tags.iter().cloned());
    }
    if let Some(user) = user {
        options = options.user(user);
    }
    options
}

/// Switch the base URL to plain http
pub(crate) fn with_insecure(mut config: ClientConfig) -> Result<ClientConfig> {
    let mut url = config.base()?;
    url.set_scheme("http")
        .map_err(|()| Error::config(format!("cannot use http for {}", config.base_url)))?;
    config.base_url = url.as_str().trim_end_matches('/').to_string();
    Ok(config)
}

/// Environment credentials override the config file
pub(crate) fn with_env(
    mut config: ClientConfig,
    cookies: Option<String>,
    token: Option<String>,
) -> ClientConfig {
    if let Some(cookies) = cookies.filter(|c| !c.trim().is_empty()) {
        config.cookies = Some(cookies);
    }
    if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
        config.bearer_token = Some(token);
    }
    config
}
