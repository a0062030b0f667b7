//! Path resolution for mypa configuration and data files.
//!
//! All mypa data is stored in `~/.mypa/` unless `MYPA_HOME` points elsewhere:
//! - `config.yaml` - Main configuration file
//! - `mypa.db` - SQLite key-value store for tasks, focus history and stats

use std::path::PathBuf;

use crate::error::MypaError;

/// Environment variable overriding the data root.
pub const HOME_ENV: &str = "MYPA_HOME";

/// Paths to mypa configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.mypa/`
    pub root: PathBuf,
    /// Config file: `~/.mypa/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.mypa/mypa.db`
    pub database: PathBuf,
}

impl Paths {
    /// Resolve paths from `MYPA_HOME`, falling back to `~/.mypa`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither `MYPA_HOME` nor `HOME` is set.
    pub fn new() -> Result<Self, MypaError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            MypaError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".mypa")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("mypa.db"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), MypaError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                MypaError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }
        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::with_root(PathBuf::from(".mypa")))
    }
}
