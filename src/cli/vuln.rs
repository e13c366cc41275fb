//! Vulnerability commands

use log::debug;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::client::ListingApi;
use crate::error::Result;
use crate::models::VulnDisplay;
use crate::output::print_records;

/// Run the vuln list command
pub async fn list(opts: &GlobalOptions, app_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let spinner = ctx.spinner("Fetching vulnerabilities...");
    let vulns = ctx.client.list_vulnerabilities(app_id).await;
    spinner.finish_and_clear();
    let vulns = vulns?;

    debug!("Fetched {} vulnerabilities for application {}", vulns.len(), app_id);

    print_records::<_, VulnDisplay>(vulns, ctx.format)
}
