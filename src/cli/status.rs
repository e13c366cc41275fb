//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::client::sentinel::API_BASE_URL;
use crate::config::Config;
use crate::error::{ConfigError, Error, Result};

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "sentinelop Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    let mut config = match Config::load_at(opts.config_ref()) {
        Ok(config) => {
            println!("Config file: {}", config_path.display().to_string().cyan());
            config
        }
        Err(Error::Config(ConfigError::NotFound)) => {
            println!("{} Configuration not found at {}", "✗".red(), config_path.display());
            Config::default()
        }
        Err(err) => {
            println!("{} Could not read {}: {}", "✗".red(), config_path.display(), err);
            Config::default()
        }
    };
    config.apply_overrides(opts.api_key_ref(), opts.api_host_ref());
    println!();

    // API key status
    if config.require_api_key().is_ok() {
        println!("{} API key configured", "✓".green());
    } else {
        println!("{} API key not configured", "✗".red());
        println!("  → Run 'sentinelop init' or set SENTINELOP_API_KEY");
    }

    let host = config.api_host.as_deref().unwrap_or(API_BASE_URL);
    println!("{} API host: {}", "○".dimmed(), host.cyan());

    // Source control credentials
    match config.scm {
        Some(ref scm) => println!("{} Source control user: {}", "✓".green(), scm.username),
        None => {
            println!("{} Source control credentials not set", "○".dimmed());
            println!("  → Needed for 'sentinelop app create'");
        }
    }

    println!(
        "{} Blacklist: {} projects, {} repositories",
        "○".dimmed(),
        config.blacklist.projects.len(),
        config.blacklist.repos.len()
    );

    let rewrite = config.url_rewrite();
    println!(
        "{} Clone URL rewrite: {} → {}",
        "○".dimmed(),
        rewrite.from,
        rewrite.to
    );
    println!("{} Appliance: {}", "○".dimmed(), config.appliance_id());
    println!();

    Ok(())
}
