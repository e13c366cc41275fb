//! Init command implementation

use colored::Colorize;
use dialoguer::{Confirm, Input, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::client::models::ScmCredentials;
use crate::client::{ListingApi, SentinelClient};
use crate::config::Config;
use crate::error::Result;

/// Run the init command
///
/// Prompts for the API key, verifies it against the API root, optionally
/// collects source-control credentials, and saves the config file. Settings
/// already in the file (blacklists, rewrite rule) are kept.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to sentinelop!".bold().green());
    println!("Let's set up your Sentinel configuration.\n");

    let mut config = Config::load_or_default(opts.config_ref())?;
    if let Some(host) = opts.api_host_ref() {
        config.api_host = Some(host.to_string());
    }

    let theme = ColorfulTheme::default();

    let api_key: String = Password::with_theme(&theme)
        .with_prompt("Enter your Sentinel API key")
        .interact()?;

    println!("\n{}", "Verifying API key...".cyan());
    let client = SentinelClient::with_host(&api_key, config.api_host.clone())?;
    client.get_resources().await?;
    println!("{}", "✓ API key accepted!".green());

    config.api_key = Some(api_key.trim().to_string());

    let configure_scm = Confirm::with_theme(&theme)
        .with_prompt("Configure source-control credentials for `app create`?")
        .default(config.scm.is_none())
        .interact()?;

    if configure_scm {
        let username: String = Input::with_theme(&theme)
            .with_prompt("Source-control username")
            .interact_text()?;
        let password: String = Password::with_theme(&theme)
            .with_prompt("Source-control password")
            .interact()?;
        config.scm = Some(ScmCredentials { username, password });
    }

    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "sentinelop status".cyan());
    println!("  {} - List applications", "sentinelop app list".cyan());

    Ok(())
}
