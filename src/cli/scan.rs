//! Scan commands

use crate::cli::args::{AppTargetArgs, GlobalOptions};
use crate::cli::{CommandContext, report};
use crate::client::batch;
use crate::client::models::ScanSchedule;
use crate::error::Result;

/// Run the scan run command
pub async fn run(opts: &GlobalOptions, targets: &AppTargetArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let apps = ctx.resolve_apps(targets).await?;

    let reports = batch::run_full_scans(&ctx.client, &apps).await;
    report::finish("full scan", &reports, ctx.format)
}

/// Run the scan schedule command
pub async fn schedule(
    opts: &GlobalOptions,
    targets: &AppTargetArgs,
    time: &str,
    timezone: &str,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let apps = ctx.resolve_apps(targets).await?;

    let schedule = ScanSchedule::daily(timezone, time);
    let reports = batch::schedule_full_scans(&ctx.client, &apps, &schedule).await;
    report::finish("scan schedule", &reports, ctx.format)
}
