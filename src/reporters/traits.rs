use anyhow::Result;

use crate::fixers::registry::FixReport;

pub trait Reporter: Send + Sync {
    /// Reporter name for display
    fn name(&self) -> &str;

    /// Generate the report content as a string
    fn generate(&self, report: &FixReport) -> Result<String>;
}
