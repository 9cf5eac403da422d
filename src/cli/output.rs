use anyhow::Result;
use colored::*;

use crate::fixers::registry::{FixOutcome, FixReport};
use crate::reporters::json::JsonReporter;
use crate::reporters::traits::Reporter;

pub struct OutputFormatter {
    format: String,
}

impl OutputFormatter {
    pub fn new(format: &str) -> Self {
        Self {
            format: format.to_string(),
        }
    }

    pub fn display(&self, report: &FixReport, dry_run: bool) -> Result<()> {
        match self.format.as_str() {
            "json" => println!("{}", JsonReporter.generate(report)?),
            _ => self.display_table(report, dry_run),
        }
        Ok(())
    }

    fn display_table(&self, report: &FixReport, dry_run: bool) {
        println!(
            "{} finding(s) in report.\n",
            report.entries.len().to_string().bold()
        );

        for entry in &report.entries {
            let location = format!("{}:{}", entry.error.file.display(), entry.error.line);
            match &entry.outcome {
                FixOutcome::Applied(desc) => {
                    println!("  {} [{}] {}", "FIXED".green(), location, desc);
                }
                FixOutcome::Skipped(reason) => {
                    println!("  {} [{}] {}", "SKIP".yellow(), location, reason.dimmed());
                }
                FixOutcome::DryRun(desc) => {
                    println!("  {} [{}] {}", "DRY-RUN".cyan(), location, desc);
                }
                FixOutcome::Error(err) => {
                    println!("  {} [{}] {}", "ERROR".red(), location, err);
                }
            }
        }

        if dry_run {
            println!("\n{} fix(es) would be applied.", report.planned());
        } else {
            println!(
                "\n{} fixed, {} skipped, {} failed in {:.1}s.",
                report.applied(),
                report.skipped(),
                report.failed(),
                report.duration.as_secs_f64()
            );
        }
    }
}
