use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::{debug, info};

/// Where the PHPStan report text comes from.
#[async_trait]
pub trait ReportSource: Send + Sync {
    fn name(&self) -> String;
    async fn load(&self) -> Result<String>;
}

/// A report file on disk, or stdin when the path is `-`.
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_stdin(&self) -> bool {
        self.path.as_os_str() == "-"
    }
}

#[async_trait]
impl ReportSource for FileSource {
    fn name(&self) -> String {
        if self.is_stdin() {
            "stdin".to_string()
        } else {
            self.path.display().to_string()
        }
    }

    async fn load(&self) -> Result<String> {
        if self.is_stdin() {
            let mut content = String::new();
            tokio::io::stdin()
                .read_to_string(&mut content)
                .await
                .context("Failed to read report from stdin")?;
            return Ok(content);
        }
        debug!(path = %self.path.display(), "reading report");
        tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read report {}", self.path.display()))
    }
}

/// Runs `phpstan analyse` and captures its JSON output.
pub struct PhpstanSource {
    pub binary: String,
    pub args: Vec<String>,
    pub paths: Vec<PathBuf>,
}

impl PhpstanSource {
    fn command_args(&self) -> Vec<String> {
        let mut args = vec![
            "analyse".to_string(),
            "--error-format=json".to_string(),
            "--no-progress".to_string(),
        ];
        args.extend(self.args.iter().cloned());
        args.extend(self.paths.iter().map(|p| p.to_string_lossy().into_owned()));
        args
    }
}

#[async_trait]
impl ReportSource for PhpstanSource {
    fn name(&self) -> String {
        self.binary.clone()
    }

    async fn load(&self) -> Result<String> {
        let args = self.command_args();
        info!(binary = %self.binary, args = ?args, "running phpstan");
        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .await
            .with_context(|| format!("Failed to run {}", self.binary))?;

        // phpstan exits with 1 when it reports errors
        match output.status.code() {
            Some(0) | Some(1) => Ok(String::from_utf8_lossy(&output.stdout).into_owned()),
            _ => bail!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        }
    }
}
