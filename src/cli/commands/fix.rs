use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

use crate::cli::output::OutputFormatter;
use crate::cli::progress::RunProgress;
use crate::core::config::Config;
use crate::core::report::{self, ReportFormat};
use crate::core::source::{FileSource, PhpstanSource, ReportSource};
use crate::fixers::default_registry;
use crate::fixers::registry::FixerRegistry;
use crate::reporters::json::JsonReporter;
use crate::reporters::traits::Reporter;

#[derive(Args, Debug)]
pub struct FixArgs {
    /// PHPStan report to read (`-` or omitted for stdin)
    #[arg(long, short, conflicts_with = "run")]
    pub report: Option<PathBuf>,

    /// Format of the report
    #[arg(long, value_enum, default_value = "json")]
    pub format: ReportFormat,

    /// Run PHPStan instead of reading a report
    #[arg(long)]
    pub run: bool,

    /// Paths for PHPStan to analyse (with --run)
    #[arg(requires = "run")]
    pub paths: Vec<PathBuf>,

    /// Print what would be fixed without modifying files
    #[arg(long)]
    pub dry_run: bool,

    /// Only use these fixers (comma-separated, e.g. phpdoc-param-missing-type)
    #[arg(long, value_delimiter = ',')]
    pub only: Option<Vec<String>>,

    /// Terminal output format
    #[arg(long, default_value = "table", value_parser = ["table", "json"])]
    pub output_format: String,

    /// Also write a JSON summary to this file
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl FixArgs {
    fn source(&self, config: &Config) -> Box<dyn ReportSource> {
        if self.run {
            Box::new(PhpstanSource {
                binary: config.phpstan_binary(),
                args: config.phpstan_args(),
                paths: self.paths.clone(),
            })
        } else {
            let path = self.report.clone().unwrap_or_else(|| PathBuf::from("-"));
            Box::new(FileSource::new(path))
        }
    }

    fn report_format(&self) -> ReportFormat {
        // PhpstanSource always asks for JSON
        if self.run {
            ReportFormat::Json
        } else {
            self.format
        }
    }

    fn registry(&self, config: &Config) -> FixerRegistry {
        let registry = default_registry().without(&config.disabled_fixers());
        match &self.only {
            Some(only) => registry.only(only),
            None => registry,
        }
    }
}

pub async fn execute(args: &FixArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = Config::load(&cwd);

    let source = args.source(&config);
    let content = if args.run {
        let progress = RunProgress::new(format!("Running {}...", source.name()));
        let content = source.load().await;
        progress.finish();
        content?
    } else {
        source.load().await?
    };

    let errors = report::parse(&content, args.report_format())
        .with_context(|| format!("Invalid report from {}", source.name()))?;
    let errors = report::filter_ignored(errors, &config.ignored_paths());
    info!(count = errors.len(), source = %source.name(), "loaded findings");

    if errors.is_empty() {
        println!("{}", "No findings in report.".green());
        return Ok(());
    }

    let registry = args.registry(&config);
    let report = registry.apply_fixes(&errors, args.dry_run);

    OutputFormatter::new(&args.output_format).display(&report, args.dry_run)?;

    if let Some(output_path) = &args.output {
        let reporter = JsonReporter;
        std::fs::write(output_path, reporter.generate(&report)?)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        eprintln!(
            "  {} {} summary written to {}",
            "DONE".green(),
            reporter.name(),
            output_path.display()
        );
    }

    Ok(())
}
