mod cli;
mod core;
mod fixers;
mod reporters;
mod utils;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Fix(args) => {
            cli::commands::fix::execute(args).await?;
        }
        Commands::List => {
            cli::commands::list::execute()?;
        }
    }

    Ok(())
}
