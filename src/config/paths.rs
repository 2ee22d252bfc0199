//! Path management for zen-export
//!
//! ## Path Resolution Order
//!
//! 1. `ZEN_EXPORT_DATA_DIR` environment variable (if set)
//! 2. `$XDG_CONFIG_HOME/zen-export` (if set)
//! 3. The platform config directory (`~/.config/zen-export`, `%APPDATA%\zen-export`, ...)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::ExportError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "ZEN_EXPORT_DATA_DIR";

const APP_DIR_NAME: &str = "zen-export";

/// Manages all paths used by zen-export
#[derive(Debug, Clone)]
pub struct ZenPaths {
    /// Base directory for settings and default exports
    base_dir: PathBuf,
}

impl ZenPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, ExportError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create ZenPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the persisted settings (branding) file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("settings.json")
    }

    /// Get the default directory exported artifacts are written to
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Ensure the base and export directories exist
    pub fn ensure_directories(&self) -> Result<(), ExportError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ExportError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.export_dir())
            .map_err(|e| ExportError::Io(format!("Failed to create export directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, ExportError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join(APP_DIR_NAME));
    }

    BaseDirs::new()
        .map(|dirs| dirs.config_dir().join(APP_DIR_NAME))
        .ok_or_else(|| ExportError::Config("Could not determine a config directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ZenPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.export_dir(), temp_dir.path().join("exports"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("settings.json"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ZenPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.export_dir().exists());
    }
}
