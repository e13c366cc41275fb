//! Common CLI types shared across commands

use clap::Args;

use crate::client::Application;

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format - one row per entry (default)
    #[default]
    Table,
    /// JSON format - structured for scripts
    Json,
}

/// Which applications a batch command acts on
#[derive(Debug, Clone, Args, Default)]
pub struct AppTargetArgs {
    /// Application ID to act on (repeatable; defaults to every application)
    #[arg(long = "app", value_name = "APP_ID")]
    pub apps: Vec<String>,
}

impl AppTargetArgs {
    /// Explicitly requested applications, or `None` for "all of them"
    pub fn selected(&self) -> Option<Vec<Application>> {
        if self.apps.is_empty() {
            return None;
        }
        Some(self.apps.iter().map(Application::from_id).collect())
    }
}
