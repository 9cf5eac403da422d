use crate::core::report::StanError;

use super::error::FixError;

#[derive(Debug)]
pub enum FixResult {
    Applied { description: String },
    Skipped { reason: String },
}

impl FixResult {
    /// Whether the fixer changed anything on disk
    pub fn is_applied(&self) -> bool {
        matches!(self, FixResult::Applied { .. })
    }
}

pub trait Fixer: Send + Sync {
    /// Stable identifier used by `--only` and `ignore.fixers`
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Whether this fixer knows how to resolve the finding
    fn matches(&self, error: &StanError) -> Result<bool, FixError>;

    /// Describe what would be done (for dry-run)
    fn describe(&self, error: &StanError) -> String;

    /// Apply the fix. Findings the fixer does not match are skipped, not errors.
    fn apply(&self, error: &StanError) -> Result<FixResult, FixError>;
}
