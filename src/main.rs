mod cli;
mod commands;
mod config;
mod error;
mod mcp;
mod pdf;
mod plan;
mod selection;
mod session;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries results and the MCP transport.
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Mcp => {
            mcp::run_server(config).await?;
        }
        Commands::Info { path } => {
            commands::info::run(&path, &config)?;
        }
        Commands::Check { path } => {
            commands::check::run(&path, &config)?;
        }
        Commands::Preview { path, selection } => {
            let (mode, input) = selection.mode_and_input();
            commands::preview::run(&path, mode, input, &config)?;
        }
        Commands::Split {
            path,
            selection,
            output_dir,
            dry_run,
        } => {
            let (mode, input) = selection.mode_and_input();
            let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            let options = commands::split::SplitOptions {
                mode,
                input,
                output_dir: &output_dir,
                dry_run,
            };
            commands::split::run(&path, &options, &config)?;
        }
    }

    Ok(())
}
