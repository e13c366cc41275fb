//! Shared reporting for batch commands
//!
//! Prints one row per item and turns generic failures into a non-zero exit.
//! Conflicts, refusals and skips are expected states, not failures.

use crate::cli::OutputFormat;
use crate::client::batch::{ItemReport, failure_count};
use crate::error::{Error, Result};
use crate::models::ReportDisplay;
use crate::output::Formattable;

/// Print batch reports and fail if any item failed
pub fn finish(action: &str, reports: &[ItemReport], format: OutputFormat) -> Result<()> {
    let rows: Vec<ReportDisplay> = reports.iter().map(ReportDisplay::from).collect();
    rows.print(format)?;

    check(action, reports)
}

fn check(action: &str, reports: &[ItemReport]) -> Result<()> {
    match failure_count(reports) {
        0 => Ok(()),
        failed => Err(Error::Other(format!(
            "{} failed for {} of {} items",
            action,
            failed,
            reports.len()
        ))),
    }
}
