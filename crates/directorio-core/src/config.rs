//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/directorio/config.toml)
//! 3. Environment variables (DIRECTORIO_* prefix)
//!
//! Environment variables take precedence over config file values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::query::SortKey;
use crate::snapshot::DIRECTORY_FILE_NAME;

/// Environment variable prefix
const ENV_PREFIX: &str = "DIRECTORIO";

/// Base location used when none is configured: the working directory
pub const DEFAULT_SOURCE: &str = ".";

/// Where the external directory file lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// Fetched over HTTP(S)
    Url(String),
    /// Read from the local filesystem
    Path(PathBuf),
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base location of the external directory (URL or local directory);
    /// empty disables the startup load
    #[serde(default = "default_source", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Timeout for the startup fetch; unset means wait indefinitely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_timeout_secs: Option<u64>,

    /// Sort key used when none is given
    #[serde(default)]
    pub default_sort: SortKey,

    /// Log file (logging goes to stderr when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

fn default_source() -> Option<String> {
    Some(DEFAULT_SOURCE.to_string())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: default_source(),
            fetch_timeout_secs: None,
            default_sort: SortKey::default(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (DIRECTORIO_SOURCE, DIRECTORIO_FETCH_TIMEOUT, ...)
    /// 2. Config file (~/.config/directorio/config.toml or DIRECTORIO_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        // DIRECTORIO_SOURCE
        if let Ok(val) = std::env::var(format!("{}_SOURCE", ENV_PREFIX)) {
            self.source = Some(val);
        }

        // DIRECTORIO_FETCH_TIMEOUT
        if let Ok(val) = std::env::var(format!("{}_FETCH_TIMEOUT", ENV_PREFIX)) {
            self.fetch_timeout_secs = if val.is_empty() {
                None
            } else {
                Some(val.parse().with_context(|| {
                    format!("Invalid {}_FETCH_TIMEOUT: '{}'", ENV_PREFIX, val)
                })?)
            };
        }

        // DIRECTORIO_SORT
        if let Ok(val) = std::env::var(format!("{}_SORT", ENV_PREFIX)) {
            self.default_sort = val.parse()?;
        }

        // DIRECTORIO_LOG_FILE
        if let Ok(val) = std::env::var(format!("{}_LOG_FILE", ENV_PREFIX)) {
            self.log_file = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }

        Ok(())
    }

    /// Save configuration to the default file
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_file_path())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with DIRECTORIO_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("directorio")
            .join("config.toml")
    }

    /// Full location of the external directory file, `None` when disabled
    pub fn source_location(&self) -> Option<SourceLocation> {
        let base = self.source.as_deref().filter(|base| !base.is_empty())?;
        if base.starts_with("http://") || base.starts_with("https://") {
            Some(SourceLocation::Url(format!(
                "{}/{}",
                base.trim_end_matches('/'),
                DIRECTORY_FILE_NAME
            )))
        } else {
            Some(SourceLocation::Path(Path::new(base).join(DIRECTORY_FILE_NAME)))
        }
    }

    /// Fetch timeout as a `Duration`
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }
}
