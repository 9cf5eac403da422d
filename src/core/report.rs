use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

/// One finding reported by PHPStan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StanError {
    pub file: PathBuf,
    /// 1-based line number
    pub line: usize,
    pub message: String,
}

impl StanError {
    pub fn new(file: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for StanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.file.display(), self.line, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// `phpstan analyse --error-format=json`
    Json,
    /// `phpstan analyse --error-format=raw`
    Raw,
}

#[derive(Debug, Deserialize)]
struct JsonReport {
    #[serde(default)]
    files: JsonFiles,
    #[serde(default)]
    errors: Vec<String>,
}

// PHPStan encodes an empty `files` object as `[]`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonFiles {
    Map(BTreeMap<String, JsonFile>),
    Empty(#[allow(dead_code)] Vec<serde_json::Value>),
}

impl Default for JsonFiles {
    fn default() -> Self {
        JsonFiles::Map(BTreeMap::new())
    }
}

#[derive(Debug, Deserialize)]
struct JsonFile {
    #[serde(default)]
    messages: Vec<JsonMessage>,
}

#[derive(Debug, Deserialize)]
struct JsonMessage {
    message: String,
    line: Option<usize>,
}

pub fn parse(content: &str, format: ReportFormat) -> Result<Vec<StanError>> {
    match format {
        ReportFormat::Json => parse_json(content),
        ReportFormat::Raw => Ok(parse_raw(content)),
    }
}

fn parse_json(content: &str) -> Result<Vec<StanError>> {
    let report: JsonReport =
        serde_json::from_str(content).context("Failed to parse PHPStan JSON report")?;

    for general in &report.errors {
        debug!(message = %general, "dropping error without file");
    }

    let files = match report.files {
        JsonFiles::Map(files) => files,
        JsonFiles::Empty(_) => BTreeMap::new(),
    };

    let mut errors = Vec::new();
    for (file, entry) in files {
        for message in entry.messages {
            match message.line {
                Some(line) => errors.push(StanError::new(&file, line, message.message)),
                None => debug!(file = %file, message = %message.message, "dropping error without line"),
            }
        }
    }
    Ok(errors)
}

fn parse_raw(content: &str) -> Vec<StanError> {
    content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| {
            let parsed = parse_raw_line(l);
            if parsed.is_none() {
                debug!(line = %l, "skipping unparseable raw report line");
            }
            parsed
        })
        .collect()
}

fn parse_raw_line(line: &str) -> Option<StanError> {
    let mut parts = line.splitn(3, ':');
    let file = parts.next()?.trim();
    let number = parts.next()?.trim().parse::<usize>().ok()?;
    let message = parts.next()?.trim();
    if file.is_empty() {
        return None;
    }
    Some(StanError::new(file, number, message))
}

/// Drop findings whose path contains one of the ignore fragments.
pub fn filter_ignored(errors: Vec<StanError>, ignore: &[String]) -> Vec<StanError> {
    if ignore.is_empty() {
        return errors;
    }
    errors
        .into_iter()
        .filter(|e| {
            let path = e.file.to_string_lossy();
            let ignored = ignore.iter().any(|frag| path.contains(frag.as_str()));
            if ignored {
                debug!(file = %path, line = e.line, "ignoring finding by path");
            }
            !ignored
        })
        .collect()
}
