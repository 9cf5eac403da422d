use anyhow::Result;

use crate::fixers::registry::FixReport;
use crate::reporters::traits::Reporter;

pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &str {
        "JSON"
    }

    fn generate(&self, report: &FixReport) -> Result<String> {
        let output = serde_json::json!({
            "results": report.entries,
            "summary": {
                "total": report.entries.len(),
                "applied": report.applied(),
                "skipped": report.skipped(),
                "failed": report.failed(),
                "dry_run": report.planned(),
            },
            "duration_ms": report.duration.as_millis(),
        });
        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::StanError;
    use crate::fixers::registry::{FixEntry, FixOutcome};
    use std::time::Duration;

    fn make_report(entries: Vec<FixEntry>) -> FixReport {
        FixReport {
            entries,
            duration: Duration::from_millis(42),
        }
    }

    #[test]
    fn test_json_report_valid_json() {
        let reporter = JsonReporter;
        let output = reporter.generate(&make_report(vec![])).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["summary"]["total"], 0);
        assert_eq!(parsed["summary"]["applied"], 0);
        assert_eq!(parsed["duration_ms"], 42);
    }

    #[test]
    fn test_json_report_with_results() {
        let report = make_report(vec![
            FixEntry {
                error: StanError::new("src/Foo.php", 12, "PHPDoc tag @param has invalid value"),
                outcome: FixOutcome::Applied("Added mixed".to_string()),
            },
            FixEntry {
                error: StanError::new("src/Bar.php", 3, "Undefined variable: $x"),
                outcome: FixOutcome::Skipped("No fixer available".to_string()),
            },
        ]);
        let output = JsonReporter.generate(&report).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["summary"]["total"], 2);
        assert_eq!(parsed["summary"]["applied"], 1);
        assert_eq!(parsed["summary"]["skipped"], 1);
        assert_eq!(parsed["results"][0]["error"]["file"], "src/Foo.php");
        assert_eq!(parsed["results"][0]["error"]["line"], 12);
        assert_eq!(parsed["results"][0]["outcome"]["status"], "applied");
        assert_eq!(parsed["results"][1]["outcome"]["detail"], "No fixer available");
    }

    #[test]
    fn test_json_reporter_metadata() {
        let reporter = JsonReporter;
        assert_eq!(reporter.name(), "JSON");
    }
}
