//! Unified path management for sophi files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/sophi/             # Config directory
//! ├── config.toml              # Application configuration
//! └── secret.json              # API keys
//!
//! ~/.local/share/sophi/        # Data directory
//! ├── sophi_data.json          # Persisted aggregate
//! └── logs/                    # Application logs
//!     └── sophi.log.YYYY-MM-DD
//! ```
//!
//! When a base directory is supplied (tests, portable installs) both trees
//! collapse into it.

use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "sophi";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Platform directories could not be determined.
    #[error("Cannot determine the {0} directory")]
    DirNotFound(&'static str),
}

/// Resolves every path sophi reads or writes.
#[derive(Debug, Clone, Default)]
pub struct SophiPaths {
    base: Option<PathBuf>,
}

impl SophiPaths {
    /// Creates a resolver; `base` overrides the platform directories.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::DirNotFound("config"))
    }

    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::DirNotFound("data"))
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    /// Resolves the aggregate file; absolute names are used as-is.
    pub fn data_file(&self, file_name: &str) -> Result<PathBuf, PathError> {
        let candidate = Path::new(file_name);
        if candidate.is_absolute() {
            return Ok(candidate.to_path_buf());
        }
        Ok(self.data_dir()?.join(candidate))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("logs"))
    }
}
