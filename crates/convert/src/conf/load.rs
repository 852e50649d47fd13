//! Load: config loading from file and environment variables.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use super::model::ConvertConfig;

const DEFAULT_CONFIG_FILE: &str = "convert.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConvertConfig {
    /// Load configuration.
    /// Priority: Environment Variables > Config File > Defaults
    ///
    /// `path` names the file explicitly; otherwise `CONVERT_CONFIG_FILE`
    /// or `convert.toml` is used, and a missing default file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("CONVERT_CONFIG_FILE").map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => {
                info!("Loading configuration from: {}", path.display());
                Self::from_file(&path)?
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => {
                info!("No config file, using defaults and environment variables");
                Self::default()
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Override settings from environment variables, read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(suffix) = lookup("CONVERT_OUTPUT_SUFFIX") {
            self.output_suffix = suffix;
        }
        if let Some(suffix) = lookup("CONVERT_PROBLEMS_SUFFIX") {
            self.problems_suffix = suffix;
        }
        if let Some(json) = flag(&lookup, "CONVERT_JSON_OUTPUT") {
            self.json_output = json;
        }
        if let Some(stats) = flag(&lookup, "CONVERT_REPORT_STATS") {
            self.report_stats = stats;
        }
    }

    /// Validate that configuration values are sane
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_suffix.is_empty() {
            return Err(ConfigError::Invalid("output_suffix must not be empty".to_string()));
        }
        if self.problems_suffix.is_empty() {
            return Err(ConfigError::Invalid("problems_suffix must not be empty".to_string()));
        }
        if self.output_suffix == self.problems_suffix {
            return Err(ConfigError::Invalid(format!(
                "output_suffix and problems_suffix are both {:?}",
                self.output_suffix
            )));
        }
        Ok(())
    }
}

fn flag<F>(lookup: &F, key: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: expected true or false", key, raw);
            None
        }
    }
}
