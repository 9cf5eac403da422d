use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single fix attempt. Never aborts processing of other findings.
#[derive(Debug, Error)]
pub enum FixError {
    /// The fixer's matching pattern could not be compiled.
    #[error("invalid fixer pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Opening, statting or reading the target file failed. Nothing was written.
    #[error("cannot read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Overwriting the target file or restoring its permissions failed.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FixError {
    pub fn file_access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FixError::FileAccess {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FixError::Write {
            path: path.into(),
            source,
        }
    }
}
