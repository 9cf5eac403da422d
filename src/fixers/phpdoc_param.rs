use regex::{bytes, Regex};
use std::fs;
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::core::report::StanError;
use crate::utils::fs::{read_permissions, write_with_permissions};

use super::error::FixError;
use super::traits::{FixResult, Fixer};

const INVALID_PARAM_MESSAGE: &str = r"^PHPDoc tag @param has invalid value.*";
// PHP identifiers may contain any byte >= 0x80, so match raw bytes
const PARAM_TAG: &str = r"@param\s*(&?(?:\.\.\.)?\$(?-u:[A-Za-z_\x80-\xff][A-Za-z0-9_\x80-\xff]*))";
const PARAM_REPLACEMENT: &[u8] = b"@param mixed ${1}";
const DOC_BLOCK_OPENER: &[u8] = b"/**";

struct Patterns {
    invalid_param: Regex,
    param_tag: bytes::Regex,
}

static PATTERNS: LazyLock<Result<Patterns, regex::Error>> = LazyLock::new(|| {
    Ok(Patterns {
        invalid_param: Regex::new(INVALID_PARAM_MESSAGE)?,
        param_tag: bytes::Regex::new(PARAM_TAG)?,
    })
});

fn patterns() -> Result<&'static Patterns, FixError> {
    PATTERNS
        .as_ref()
        .map_err(|e| FixError::Pattern(e.clone()))
}

/// Adds the `mixed` type to `@param` tags PHPStan rejects for lacking one.
pub struct PhpDocParamFixer;

impl PhpDocParamFixer {
    /// Walks up from `index` until a line opening a doc block (or the first
    /// line of the file) and rewrites every untyped `@param` tag on the way.
    /// Neither the opener line nor line 0 is rewritten. Returns how many lines
    /// changed.
    fn fix_doc_block_before(
        lines: &mut [Vec<u8>],
        mut index: usize,
        param_tag: &bytes::Regex,
    ) -> usize {
        let mut changed = 0;
        while index > 0 && !opens_doc_block(&lines[index]) {
            let fixed = param_tag
                .replace_all(&lines[index], PARAM_REPLACEMENT)
                .into_owned();
            if fixed != lines[index] {
                debug!(
                    line = index + 1,
                    before = %String::from_utf8_lossy(&lines[index]),
                    after = %String::from_utf8_lossy(&fixed),
                    "rewrote @param tag"
                );
                lines[index] = fixed;
                changed += 1;
            }
            index -= 1;
        }
        changed
    }
}

fn opens_doc_block(line: &[u8]) -> bool {
    line.windows(DOC_BLOCK_OPENER.len())
        .any(|w| w == DOC_BLOCK_OPENER)
}

impl Fixer for PhpDocParamFixer {
    fn name(&self) -> &'static str {
        "phpdoc-param-missing-type"
    }

    fn description(&self) -> &'static str {
        "Adds the mixed type to untyped @param tags in the doc block above the reported line"
    }

    fn matches(&self, error: &StanError) -> Result<bool, FixError> {
        Ok(patterns()?.invalid_param.is_match(&error.message))
    }

    fn describe(&self, error: &StanError) -> String {
        format!(
            "Add mixed type to @param tags above {}:{}",
            error.file.display(),
            error.line
        )
    }

    fn apply(&self, error: &StanError) -> Result<FixResult, FixError> {
        if !self.matches(error)? {
            return Ok(FixResult::Skipped {
                reason: "Not an invalid @param finding".to_string(),
            });
        }
        let param_tag = &patterns()?.param_tag;

        let permissions =
            read_permissions(&error.file).map_err(|e| FixError::file_access(&error.file, e))?;
        // sources are not necessarily UTF-8 (legacy Latin-1 files)
        let content = fs::read(&error.file).map_err(|e| FixError::file_access(&error.file, e))?;

        let mut lines: Vec<Vec<u8>> = content
            .split(|b| *b == b'\n')
            .map(<[u8]>::to_vec)
            .collect();

        let index = match error.line.checked_sub(1) {
            Some(i) if i < lines.len() => i,
            _ => {
                return Ok(FixResult::Skipped {
                    reason: format!(
                        "Line {} is outside {} ({} lines)",
                        error.line,
                        error.file.display(),
                        lines.len()
                    ),
                })
            }
        };

        let changed = Self::fix_doc_block_before(&mut lines, index, param_tag);
        if changed == 0 {
            debug!(file = %error.file.display(), line = error.line, "no untyped @param tag found");
            return Ok(FixResult::Skipped {
                reason: "No untyped @param tag in the doc block".to_string(),
            });
        }

        write_with_permissions(&error.file, &lines.join(&b'\n'), permissions)
            .map_err(|e| FixError::write(&error.file, e))?;

        info!(file = %error.file.display(), line = error.line, changed, "added mixed to @param tags");
        Ok(FixResult::Applied {
            description: format!(
                "Added mixed type to {} @param line(s) above {}:{}",
                changed,
                error.file.display(),
                error.line
            ),
        })
    }
}
