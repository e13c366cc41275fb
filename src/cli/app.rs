//! Application management commands

use log::debug;

use crate::cli::args::{AppTargetArgs, GlobalOptions};
use crate::cli::{CommandContext, report};
use crate::client::ListingApi;
use crate::client::batch::{self, CreateSettings};
use crate::client::models::{ExclusionUpdate, RepoListing};
use crate::error::{Error, Result};
use crate::models::AppDisplay;
use crate::output::print_records;

/// Run the app list command
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let spinner = ctx.spinner("Fetching applications...");
    let apps = ctx.client.list_applications().await;
    spinner.finish_and_clear();
    let apps = apps?;

    debug!("Fetched {} applications", apps.len());

    print_records::<_, AppDisplay>(apps, ctx.format)
}

/// Arguments of `app create`
pub struct CreateArgs {
    pub repos: String,
    pub project_blacklist: Vec<String>,
    pub repo_blacklist: Vec<String>,
    pub appliance: Option<String>,
}

/// Run the app create command
pub async fn create(opts: &GlobalOptions, args: CreateArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let repos = read_repo_listing(&args.repos)?;
    debug!("Loaded {} repositories from {}", repos.len(), args.repos);

    let mut settings = CreateSettings::new(ctx.config.require_scm()?.clone());
    settings.blacklist = ctx.config.blacklist.clone();
    settings
        .blacklist
        .extend(args.project_blacklist, args.repo_blacklist);
    settings.rewrite = ctx.config.url_rewrite();
    settings.appliance_id = args
        .appliance
        .unwrap_or_else(|| ctx.config.appliance_id().to_string());

    let reports = batch::create_applications(&ctx.client, &repos, &settings).await;
    report::finish("create application", &reports, ctx.format)
}

/// Run the app exclude command
pub async fn exclude(opts: &GlobalOptions, targets: &AppTargetArgs, dirs: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let apps = ctx.resolve_apps(targets).await?;

    let update = ExclusionUpdate::new(dirs);
    let reports = batch::add_exclusions(&ctx.client, &apps, &update).await;
    report::finish("add exclusions", &reports, ctx.format)
}

fn read_repo_listing(path: &str) -> Result<Vec<crate::client::RepoDescriptor>> {
    let contents = std::fs::read_to_string(path)?;
    let listing: RepoListing = serde_json::from_str(&contents)
        .map_err(|e| Error::Other(format!("Invalid repository listing {}: {}", path, e)))?;
    Ok(listing.into_repos())
}
