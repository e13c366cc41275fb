//! Command execution context
//!
//! Loads configuration, merges CLI/env overrides and builds the API client so
//! individual commands don't repeat that setup.

use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::time::Duration;

use crate::cli::OutputFormat;
use crate::cli::args::{AppTargetArgs, GlobalOptions};
use crate::client::{Application, ListingApi, SentinelClient};
use crate::config::Config;
use crate::error::Result;

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Loaded configuration with overrides applied
    pub config: Config,
    /// API client bound to the configured key and host
    pub client: SentinelClient,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// A missing config file is not an error here: the API key may come from
    /// `--api-key` / `SENTINELOP_API_KEY` alone.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingApiKey` when no key is configured anywhere.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let mut config = Config::load_or_default(opts.config_ref())?;
        config.apply_overrides(opts.api_key_ref(), opts.api_host_ref());

        let api_key = config.require_api_key()?;
        let client = SentinelClient::with_host(api_key, config.api_host.clone())?;
        debug!("Using Sentinel API at {}", client.urls().base_url());

        Ok(Self {
            config,
            client,
            format: opts.format,
        })
    }

    /// Applications named on the command line, or every application
    pub async fn resolve_apps(&self, targets: &AppTargetArgs) -> Result<Vec<Application>> {
        if let Some(apps) = targets.selected() {
            return Ok(apps);
        }

        let spinner = self.spinner("Fetching applications...");
        let apps = self.client.list_applications().await;
        spinner.finish_and_clear();

        let apps = apps?;
        debug!("Resolved {} applications", apps.len());
        Ok(apps)
    }

    /// Spinner on stderr; hidden for JSON output
    pub fn spinner(&self, message: &str) -> ProgressBar {
        if self.format == OutputFormat::Json {
            return ProgressBar::hidden();
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}
