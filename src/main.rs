use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use climate_api::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // The start command initializes tracing itself, from the loaded config
    if !matches!(args.get_command(), cli::Commands::Start) {
        init_tracing("warn", "pretty");
    }

    match args.get_command() {
        cli::Commands::Start => {
            commands::start::execute(&args.config).await?;
        }
        cli::Commands::Test => {
            commands::test::execute(&args.config).await?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&args.config)?,
            cli::ConfigCommands::Validate => commands::config::validate(&args.config)?,
        },
        cli::Commands::Summary => {
            commands::summary::execute(&args.config).await?;
        }
        cli::Commands::Version => {
            println!("Climate API v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
