//! Path management for Hearth
//!
//! ## Path Resolution Order
//!
//! 1. `HEARTH_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory from `directories`
//!    (`~/.config/hearth` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::HearthError;

/// Manages all paths used by Hearth
#[derive(Debug, Clone)]
pub struct HearthPaths {
    base_dir: PathBuf,
}

impl HearthPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, HearthError> {
        let base_dir = match std::env::var("HEARTH_DATA_DIR") {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "hearth")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    HearthError::Config("Could not determine a configuration directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create HearthPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the collection documents
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    /// Permanent category tree
    pub fn categories_file(&self) -> PathBuf {
        self.data_dir().join("categories.json")
    }

    /// Temporary category tree
    pub fn temp_categories_file(&self) -> PathBuf {
        self.data_dir().join("temp_categories.json")
    }

    /// Permanent budgets
    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    /// Temporary budget periods
    pub fn temp_budgets_file(&self) -> PathBuf {
        self.data_dir().join("temp_budgets.json")
    }

    pub fn records_file(&self) -> PathBuf {
        self.data_dir().join("records.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), HearthError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| HearthError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| HearthError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if Hearth has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HearthPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(
            paths.temp_budgets_file(),
            temp_dir.path().join("data").join("temp_budgets.json")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HearthPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }
}
