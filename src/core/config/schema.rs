//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Location
//!
//! Searched in order:
//! 1. `$CQLINE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/cqline/config.toml`
//! 3. `~/.cqline/config.toml` (canonical write location)
//!
//! # Validation
//!
//! Config values are validated after parsing (e.g. a time budget must be
//! positive, photo extensions must be bare extensions without a dot).
//!
//! # Keys
//!
//! Values are addressed by dotted keys for `config get/set`:
//! `upload_dir`, `work_dir`, `reference_dir`, `check.time_budget_secs`,
//! `check.photo_extensions` (comma separated), `report.dir`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// All keys accepted by `get`/`set`, in listing order.
pub const KEYS: [&str; 6] = [
    "upload_dir",
    "work_dir",
    "reference_dir",
    "check.time_budget_secs",
    "check.photo_extensions",
    "report.dir",
];

/// On-disk configuration.
///
/// # Example
///
/// ```toml
/// upload_dir = "/srv/delimitation/upload"
/// work_dir = "/srv/delimitation/work"
/// reference_dir = "/srv/delimitation/sidm3"
///
/// [check]
/// time_budget_secs = 300
/// photo_extensions = ["jpg"]
///
/// [report]
/// dir = "/srv/delimitation/reports"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Root holding one submission folder per line
    pub upload_dir: Option<PathBuf>,

    /// Root for locks and scratch workspaces
    pub work_dir: Option<PathBuf>,

    /// Directory with the persisted reference layers
    pub reference_dir: Option<PathBuf>,

    /// Check run settings
    pub check: Option<CheckConfig>,

    /// Report persistence settings
    pub report: Option<ReportConfig>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, path) in [
            ("upload_dir", &self.upload_dir),
            ("work_dir", &self.work_dir),
            ("reference_dir", &self.reference_dir),
        ] {
            if path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
                return Err(ConfigError::InvalidValue(format!("{key} cannot be empty")));
            }
        }

        if let Some(check) = &self.check {
            check.validate()?;
        }

        Ok(())
    }

    /// Read a value by dotted key. `Ok(None)` means the key is unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownKey` for keys outside [`KEYS`].
    pub fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let path_str = |p: &Option<PathBuf>| p.as_ref().map(|p| p.display().to_string());
        let check = self.check.as_ref();
        Ok(match key {
            "upload_dir" => path_str(&self.upload_dir),
            "work_dir" => path_str(&self.work_dir),
            "reference_dir" => path_str(&self.reference_dir),
            "check.time_budget_secs" => check
                .and_then(|c| c.time_budget_secs)
                .map(|s| s.to_string()),
            "check.photo_extensions" => check
                .and_then(|c| c.photo_extensions.as_ref())
                .map(|exts| exts.join(",")),
            "report.dir" => self
                .report
                .as_ref()
                .and_then(|r| path_str(&r.dir)),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        })
    }

    /// Set a value by dotted key, then validate the result.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownKey` or `ConfigError::InvalidValue`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "upload_dir" => self.upload_dir = Some(PathBuf::from(value)),
            "work_dir" => self.work_dir = Some(PathBuf::from(value)),
            "reference_dir" => self.reference_dir = Some(PathBuf::from(value)),
            "check.time_budget_secs" => {
                let secs = value.trim().parse().map_err(|_| {
                    ConfigError::InvalidValue(format!("'{value}' is not a number of seconds"))
                })?;
                self.check.get_or_insert_with(Default::default).time_budget_secs = Some(secs);
            }
            "check.photo_extensions" => {
                let exts = value
                    .split(',')
                    .map(|e| e.trim().to_string())
                    .filter(|e| !e.is_empty())
                    .collect();
                self.check.get_or_insert_with(Default::default).photo_extensions = Some(exts);
            }
            "report.dir" => {
                self.report.get_or_insert_with(Default::default).dir = Some(PathBuf::from(value))
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        self.validate()
    }
}

/// Check run settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Wall-clock budget for one run; absent means unlimited
    pub time_budget_secs: Option<u64>,

    /// Photo file extensions, matched case-insensitively (default: jpg)
    pub photo_extensions: Option<Vec<String>>,
}

impl CheckConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_budget_secs == Some(0) {
            return Err(ConfigError::InvalidValue(
                "check.time_budget_secs must be positive".to_string(),
            ));
        }
        if let Some(exts) = &self.photo_extensions {
            if exts.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "check.photo_extensions cannot be empty".to_string(),
                ));
            }
            if let Some(bad) = exts.iter().find(|e| e.is_empty() || e.contains('.')) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid photo extension '{bad}', use e.g. \"jpg\""
                )));
            }
        }
        Ok(())
    }
}

/// Report persistence settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Directory receiving the text log of each run
    pub dir: Option<PathBuf>,
}
