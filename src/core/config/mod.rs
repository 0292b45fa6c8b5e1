//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Locations
//!
//! Searched in order:
//! 1. `$CQLINE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/cqline/config.toml`
//! 3. `~/.cqline/config.toml` (canonical write location)
//!
//! # Example
//!
//! ```no_run
//! use cqline::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("Work dir: {}", config.work_dir().display());
//! println!("Photo extensions: {:?}", config.photo_extensions());
//! ```

pub mod schema;

pub use schema::{CheckConfig, FileConfig, ReportConfig, KEYS};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CQLINE_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("unknown configuration key '{0}' (known keys: {keys})", keys = KEYS.join(", "))]
    UnknownKey(String),

    #[error("{0} is not configured (set it with `cqline config set {0} <PATH>` or a flag)")]
    Missing(&'static str),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded configuration with defaults applied by accessors.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub file: FileConfig,
    /// Path the file was loaded from, if any
    loaded_from: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed or
    /// fails validation. A missing file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::locate() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: FileConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        file.validate()?;

        Ok(Self {
            file,
            loaded_from: Some(path.to_path_buf()),
        })
    }

    /// Find the first existing config file.
    fn locate() -> Option<PathBuf> {
        let candidates = [
            std::env::var_os(CONFIG_ENV).map(PathBuf::from),
            std::env::var_os("XDG_CONFIG_HOME")
                .map(|xdg| PathBuf::from(xdg).join("cqline/config.toml")),
            dirs::home_dir().map(|home| home.join(".cqline/config.toml")),
        ];
        candidates.into_iter().flatten().find(|p| p.exists())
    }

    /// Get the canonical path for the config file.
    ///
    /// Returns `~/.cqline/config.toml`.
    pub fn canonical_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".cqline/config.toml"))
    }

    /// Path to write to: the loaded file, else `$CQLINE_CONFIG`, else the
    /// canonical location.
    pub fn write_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.loaded_from {
            return Ok(path.clone());
        }
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Ok(PathBuf::from(path)),
            None => Self::canonical_path(),
        }
    }

    /// Write a config file atomically.
    ///
    /// Creates parent directories if needed. Writes to a temp file in the
    /// same directory, then renames it over the target.
    pub fn write_atomic(path: &Path, config: &FileConfig) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Root holding one submission folder per line.
    pub fn upload_dir(&self) -> Result<&Path, ConfigError> {
        self.file
            .upload_dir
            .as_deref()
            .ok_or(ConfigError::Missing("upload_dir"))
    }

    /// Directory with the persisted reference layers.
    pub fn reference_dir(&self) -> Result<&Path, ConfigError> {
        self.file
            .reference_dir
            .as_deref()
            .ok_or(ConfigError::Missing("reference_dir"))
    }

    /// Root for locks and scratch workspaces.
    ///
    /// Defaults to `<tmp>/cqline`.
    pub fn work_dir(&self) -> PathBuf {
        self.file
            .work_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("cqline"))
    }

    /// Wall-clock budget for one run. `None` means unlimited.
    pub fn time_budget(&self) -> Option<Duration> {
        self.file
            .check
            .as_ref()
            .and_then(|c| c.time_budget_secs)
            .map(Duration::from_secs)
    }

    /// Photo file extensions, lowercased.
    ///
    /// Defaults to `["jpg"]`.
    pub fn photo_extensions(&self) -> Vec<String> {
        self.file
            .check
            .as_ref()
            .and_then(|c| c.photo_extensions.as_ref())
            .map(|exts| exts.iter().map(|e| e.to_lowercase()).collect())
            .unwrap_or_else(|| vec!["jpg".to_string()])
    }

    /// Directory for the text log of each run, if configured.
    pub fn report_dir(&self) -> Option<&Path> {
        self.file.report.as_ref().and_then(|r| r.dir.as_deref())
    }

    /// Get the path the configuration was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }
}
