//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

use crate::client::models::DEFAULT_EXCLUDE_DIRECTORIES;

pub mod app;
pub mod args;
pub mod completion;
pub mod context;
pub mod init;
pub mod report;
pub mod resources;
pub mod scan;
pub mod status;
pub mod vuln;

pub use args::{AppTargetArgs, OutputFormat};
pub use context::CommandContext;

/// sentinelop - CLI companion for the WhiteHat Sentinel platform
#[derive(Parser, Debug)]
#[command(name = "sentinelop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "SENTINELOP_FORMAT",
        default_value = "table",
        hide_env = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "SENTINELOP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Sentinel API key (overrides the config file)
    #[arg(
        long,
        global = true,
        env = "SENTINELOP_API_KEY",
        hide_env = true,
        hide_env_values = true
    )]
    pub api_key: Option<String>,

    /// Custom API base URL
    #[arg(long, global = true, env = "SENTINELOP_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "SENTINELOP_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize sentinelop configuration
    Init,

    /// Show configuration status
    Status,

    /// Display version information
    Version,

    /// Show the API root resources document
    Resources,

    /// Manage applications
    #[command(subcommand)]
    App(AppCommands),

    /// List vulnerabilities
    #[command(subcommand)]
    Vuln(VulnCommands),

    /// Trigger and schedule scans
    #[command(subcommand)]
    Scan(ScanCommands),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Application management subcommands
#[derive(Subcommand, Debug)]
pub enum AppCommands {
    /// List all applications
    List,

    /// Create one application per repository in a listing file
    Create {
        /// JSON file with repository descriptors (array or `{ "values": [...] }`)
        #[arg(long, value_name = "FILE")]
        repos: String,

        /// Project name to skip, on top of the configured blacklist (repeatable)
        #[arg(long = "project-blacklist", value_name = "PROJECT", value_delimiter = ',')]
        project_blacklist: Vec<String>,

        /// Repository name to skip, on top of the configured blacklist (repeatable)
        #[arg(long = "repo-blacklist", value_name = "REPO", value_delimiter = ',')]
        repo_blacklist: Vec<String>,

        /// Appliance to bind new applications to
        #[arg(long, value_name = "ID")]
        appliance: Option<String>,
    },

    /// Set scanner exclusion directories
    Exclude {
        #[command(flatten)]
        targets: AppTargetArgs,

        /// Comma-separated directories and files to exclude
        #[arg(long, default_value = DEFAULT_EXCLUDE_DIRECTORIES)]
        dirs: String,
    },
}

/// Vulnerability subcommands
#[derive(Subcommand, Debug)]
pub enum VulnCommands {
    /// List vulnerabilities for an application
    List {
        /// Application ID
        app_id: String,
    },
}

/// Scan subcommands
#[derive(Subcommand, Debug)]
pub enum ScanCommands {
    /// Trigger a full scan
    Run {
        #[command(flatten)]
        targets: AppTargetArgs,
    },

    /// Create a daily full-scan schedule
    Schedule {
        #[command(flatten)]
        targets: AppTargetArgs,

        /// Time of day to scan (HH:MM:SS)
        #[arg(long, default_value = "00:18:00")]
        time: String,

        /// IANA timezone of the schedule
        #[arg(long, default_value = "America/New_York")]
        timezone: String,
    },
}
