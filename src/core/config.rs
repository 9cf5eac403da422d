use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

pub const CONFIG_FILE: &str = ".stanfix.yml";
const DEFAULT_PHPSTAN_BINARY: &str = "vendor/bin/phpstan";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub phpstan: Option<PhpstanConfig>,
    pub ignore: Option<IgnoreConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhpstanConfig {
    pub binary: Option<String>,
    /// Extra arguments appended after `analyse`
    pub args: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IgnoreConfig {
    /// Path fragments; findings in matching files are not fixed
    pub paths: Option<Vec<String>>,
    /// Fixer names to disable
    pub fixers: Option<Vec<String>>,
}

impl Config {
    pub fn load(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_yaml::from_str::<Config>(&content) {
                    Ok(config) => return config,
                    Err(e) => warn!(path = %config_path.display(), "ignoring invalid config: {}", e),
                },
                Err(e) => warn!(path = %config_path.display(), "cannot read config: {}", e),
            }
        }
        Config::default()
    }

    pub fn phpstan_binary(&self) -> String {
        self.phpstan
            .as_ref()
            .and_then(|p| p.binary.clone())
            .unwrap_or_else(|| DEFAULT_PHPSTAN_BINARY.to_string())
    }

    pub fn phpstan_args(&self) -> Vec<String> {
        self.phpstan
            .as_ref()
            .and_then(|p| p.args.clone())
            .unwrap_or_default()
    }

    pub fn ignored_paths(&self) -> Vec<String> {
        self.ignore
            .as_ref()
            .and_then(|i| i.paths.clone())
            .unwrap_or_default()
    }

    pub fn disabled_fixers(&self) -> Vec<String> {
        self.ignore
            .as_ref()
            .and_then(|i| i.fixers.clone())
            .unwrap_or_default()
    }
}
