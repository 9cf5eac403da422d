pub mod commands;
pub mod output;
pub mod progress;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "stanfix", version, about = "Fix PHPStan findings in your PHP sources")]
pub struct Cli {
    /// Log filter, e.g. `debug` or `stanfix=trace`
    #[arg(long, env = "STANFIX_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fix the findings of a PHPStan report
    Fix(commands::fix::FixArgs),
    /// List the available fixers
    List,
}
