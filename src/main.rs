//! sentinelop - CLI companion for the WhiteHat Sentinel platform

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;

use cli::app::CreateArgs;
use cli::args::GlobalOptions;
use cli::{AppCommands, Cli, Commands, ScanCommands, VulnCommands};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// Route `log` output to stderr; `RUST_LOG` overrides the default filter
fn init_logging(debug: bool) {
    let default_filter = if debug {
        "sentinelop=debug"
    } else {
        "sentinelop=info"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("sentinelop version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Resources => cli::resources::run(&opts).await,
        Commands::App(app_cmd) => match app_cmd {
            AppCommands::List => cli::app::list(&opts).await,
            AppCommands::Create {
                repos,
                project_blacklist,
                repo_blacklist,
                appliance,
            } => {
                let args = CreateArgs {
                    repos,
                    project_blacklist,
                    repo_blacklist,
                    appliance,
                };
                cli::app::create(&opts, args).await
            }
            AppCommands::Exclude { targets, dirs } => {
                cli::app::exclude(&opts, &targets, &dirs).await
            }
        },
        Commands::Vuln(vuln_cmd) => match vuln_cmd {
            VulnCommands::List { app_id } => cli::vuln::list(&opts, &app_id).await,
        },
        Commands::Scan(scan_cmd) => match scan_cmd {
            ScanCommands::Run { targets } => cli::scan::run(&opts, &targets).await,
            ScanCommands::Schedule {
                targets,
                time,
                timezone,
            } => cli::scan::schedule(&opts, &targets, &time, &timezone).await,
        },
        Commands::Completion { shell } => {
            cli::completion::run(shell);
            Ok(())
        }
    }
}
