use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::report::StanError;

use super::error::FixError;
use super::traits::{FixResult, Fixer};

pub struct FixerRegistry {
    fixers: Vec<Box<dyn Fixer>>,
}

impl FixerRegistry {
    pub fn new(fixers: Vec<Box<dyn Fixer>>) -> Self {
        Self { fixers }
    }

    pub fn fixers(&self) -> impl Iterator<Item = &dyn Fixer> {
        self.fixers.iter().map(|f| f.as_ref())
    }

    /// Keep only the fixers whose name is listed.
    pub fn only(mut self, names: &[String]) -> Self {
        self.fixers.retain(|f| names.iter().any(|n| n == f.name()));
        self
    }

    /// Drop the fixers whose name is listed.
    pub fn without(mut self, names: &[String]) -> Self {
        self.fixers.retain(|f| !names.iter().any(|n| n == f.name()));
        self
    }

    pub fn find_fixer(&self, error: &StanError) -> Result<Option<&dyn Fixer>, FixError> {
        for fixer in &self.fixers {
            if fixer.matches(error)? {
                return Ok(Some(fixer.as_ref()));
            }
        }
        Ok(None)
    }

    /// Runs fixers against each finding in order, one at a time. A failure is
    /// recorded against its finding and does not stop the run.
    pub fn apply_fixes(&self, errors: &[StanError], dry_run: bool) -> FixReport {
        let start = Instant::now();
        let mut entries = Vec::new();

        for error in errors {
            let outcome = match self.find_fixer(error) {
                Ok(Some(fixer)) => {
                    if dry_run {
                        FixOutcome::DryRun(fixer.describe(error))
                    } else {
                        debug!(fixer = fixer.name(), %error, "applying fix");
                        match fixer.apply(error) {
                            Ok(result) => {
                                debug!(
                                    fixer = fixer.name(),
                                    %error,
                                    applied = result.is_applied(),
                                    "fix finished"
                                );
                                FixOutcome::from(result)
                            }
                            Err(e) => {
                                warn!(fixer = fixer.name(), %error, "fix failed: {}", e);
                                FixOutcome::Error(e.to_string())
                            }
                        }
                    }
                }
                Ok(None) => FixOutcome::Skipped("No fixer available".to_string()),
                Err(e) => FixOutcome::Error(e.to_string()),
            };
            entries.push(FixEntry {
                error: error.clone(),
                outcome,
            });
        }

        FixReport {
            entries,
            duration: start.elapsed(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum FixOutcome {
    Applied(String),
    Skipped(String),
    DryRun(String),
    Error(String),
}

impl From<FixResult> for FixOutcome {
    fn from(result: FixResult) -> Self {
        match result {
            FixResult::Applied { description } => FixOutcome::Applied(description),
            FixResult::Skipped { reason } => FixOutcome::Skipped(reason),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FixEntry {
    pub error: StanError,
    pub outcome: FixOutcome,
}

#[derive(Debug, Clone)]
pub struct FixReport {
    pub entries: Vec<FixEntry>,
    pub duration: Duration,
}

impl FixReport {
    pub fn applied(&self) -> usize {
        self.count(|o| matches!(o, FixOutcome::Applied(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FixOutcome::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FixOutcome::Error(_)))
    }

    pub fn planned(&self) -> usize {
        self.count(|o| matches!(o, FixOutcome::DryRun(_)))
    }

    fn count(&self, pred: impl Fn(&FixOutcome) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.outcome)).count()
    }
}

pub fn default_registry() -> FixerRegistry {
    let fixers: Vec<Box<dyn Fixer>> = vec![Box::new(super::phpdoc_param::PhpDocParamFixer)];
    FixerRegistry::new(fixers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;
    use tempfile::TempDir;

    const MESSAGE: &str = "PHPDoc tag @param has invalid value ($x): Unexpected token \"$x\"";
    const CONTENT: &str = "<?php\n/**\n * @param $x\n */\nfunction f($x) {}\n";

    #[test]
    fn test_registry_finds_correct_fixer() {
        let registry = default_registry();
        let fixer = registry
            .find_fixer(&StanError::new("a.php", 3, MESSAGE))
            .unwrap();
        assert_eq!(fixer.map(|f| f.name()), Some("phpdoc-param-missing-type"));
        assert!(registry
            .find_fixer(&StanError::new("a.php", 3, "Undefined variable: $y"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_dry_run_does_not_modify_files() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.php");
        stdfs::write(&path, CONTENT).unwrap();
        let errors = vec![StanError::new(&path, 3, MESSAGE)];

        let report = default_registry().apply_fixes(&errors, true);

        assert_eq!(report.entries.len(), 1);
        assert!(matches!(report.entries[0].outcome, FixOutcome::DryRun(_)));
        assert_eq!(report.planned(), 1);
        assert_eq!(stdfs::read_to_string(&path).unwrap(), CONTENT);
    }

    #[test]
    fn test_apply_fixes_rewrites_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.php");
        stdfs::write(&path, CONTENT).unwrap();
        let errors = vec![StanError::new(&path, 3, MESSAGE)];

        let report = default_registry().apply_fixes(&errors, false);

        assert_eq!(report.applied(), 1);
        assert!(stdfs::read_to_string(&path)
            .unwrap()
            .contains(" * @param mixed $x\n"));
    }

    #[test]
    fn test_failure_does_not_stop_other_findings() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.php");
        stdfs::write(&path, CONTENT).unwrap();
        let errors = vec![
            StanError::new(tmp.path().join("missing.php"), 3, MESSAGE),
            StanError::new(&path, 1, "Class Foo not found."),
            StanError::new(&path, 3, MESSAGE),
        ];

        let report = default_registry().apply_fixes(&errors, false);

        assert_eq!(report.entries.len(), 3);
        assert!(matches!(report.entries[0].outcome, FixOutcome::Error(_)));
        assert_eq!(
            report.entries[1].outcome,
            FixOutcome::Skipped("No fixer available".to_string())
        );
        assert!(matches!(report.entries[2].outcome, FixOutcome::Applied(_)));
        assert_eq!(report.failed(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.applied(), 1);
    }

    #[test]
    fn test_findings_in_one_block_fix_their_own_lines() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a.php");
        stdfs::write(&path, "<?php\n/**\n * @param $a\n * @param $b\n */\n").unwrap();
        let errors = vec![
            StanError::new(&path, 3, MESSAGE),
            StanError::new(&path, 4, MESSAGE),
        ];

        let report = default_registry().apply_fixes(&errors, false);

        // the scan stops at the opener, so each finding covers the lines above it
        assert_eq!(report.applied(), 2);
        assert_eq!(
            stdfs::read_to_string(&path).unwrap(),
            "<?php\n/**\n * @param mixed $a\n * @param mixed $b\n */\n"
        );
    }

    #[test]
    fn test_only_and_without_filter_by_name() {
        let names = vec!["phpdoc-param-missing-type".to_string()];
        assert_eq!(default_registry().only(&names).fixers().count(), 1);
        assert_eq!(default_registry().without(&names).fixers().count(), 0);
        assert_eq!(
            default_registry()
                .only(&["nope".to_string()])
                .fixers()
                .count(),
            0
        );
    }

    #[test]
    fn test_outcome_from_fix_result() {
        let applied = FixResult::Applied {
            description: "done".to_string(),
        };
        assert!(applied.is_applied());
        assert_eq!(FixOutcome::from(applied), FixOutcome::Applied("done".to_string()));

        let skipped = FixResult::Skipped {
            reason: "nothing".to_string(),
        };
        assert!(!skipped.is_applied());
        assert_eq!(FixOutcome::from(skipped), FixOutcome::Skipped("nothing".to_string()));
    }

    #[test]
    fn test_outcome_serializes_with_status() {
        let json = serde_json::to_value(FixOutcome::Applied("done".to_string())).unwrap();
        assert_eq!(json["status"], "applied");
        assert_eq!(json["detail"], "done");
    }
}
