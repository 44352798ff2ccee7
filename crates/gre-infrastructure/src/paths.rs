//! Path management for the dashboard's configuration and local state.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/gre-dashboard/     # Config directory
//! ├── config.toml              # DashboardConfig
//! ├── local_storage.json       # Persisted session (token, identity, flags)
//! └── logs/                    # Application logs
//!     └── gre.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

use gre_core::GreError;

pub const APP_DIR_NAME: &str = "gre-dashboard";
/// Overrides the platform config directory, mainly for tests and scripts.
pub const CONFIG_DIR_ENV: &str = "GRE_CONFIG_DIR";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for GreError {
    fn from(err: PathError) -> Self {
        GreError::config(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrePaths {
    root: PathBuf,
}

impl GrePaths {
    /// Resolves the root from `GRE_CONFIG_DIR`, else the platform config directory.
    pub fn resolve() -> Result<Self, PathError> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(dir)));
        }
        let base = dirs::config_dir().ok_or(PathError::ConfigDirNotFound)?;
        Ok(Self::with_root(base.join(APP_DIR_NAME)))
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn config_dir(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn storage_file(&self) -> PathBuf {
        self.root.join("local_storage.json")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }
}
