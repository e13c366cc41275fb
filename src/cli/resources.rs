//! API root resources command

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::client::ListingApi;
use crate::error::Result;
use crate::output::json;

/// Print the API root document. Always JSON: the shape is vendor-defined.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let doc = ctx.client.get_resources().await?;
    println!("{}", json::format_json(&doc, None)?);
    Ok(())
}
