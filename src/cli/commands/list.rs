use anyhow::Result;
use colored::Colorize;

use crate::core::config::Config;
use crate::fixers::default_registry;
use crate::fixers::registry::FixerRegistry;

pub fn execute() -> Result<()> {
    let config = Config::load(&std::env::current_dir()?);
    for line in fixer_lines(&default_registry(), &config.disabled_fixers()) {
        println!("{}", line);
    }
    Ok(())
}

fn fixer_lines(registry: &FixerRegistry, disabled: &[String]) -> Vec<String> {
    registry
        .fixers()
        .map(|f| {
            let name = if disabled.iter().any(|d| d == f.name()) {
                format!("{} (disabled)", f.name()).dimmed()
            } else {
                f.name().bold()
            };
            format!("  {}  {}", name, f.description())
        })
        .collect()
}
