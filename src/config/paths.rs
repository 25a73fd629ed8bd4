//! Path management for fluxo
//!
//! Provides XDG-compliant path resolution for configuration and data.
//!
//! ## Path Resolution Order
//!
//! 1. `FLUXO_CLI_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/fluxo-cli` or `~/.config/fluxo-cli`
//! 3. Windows: `%APPDATA%\fluxo-cli`

use std::path::PathBuf;

use crate::error::FluxoError;

/// Manages all paths used by fluxo
#[derive(Debug, Clone)]
pub struct FluxoPaths {
    /// Base directory for all fluxo data
    base_dir: PathBuf,
}

impl FluxoPaths {
    /// Create a new FluxoPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, FluxoError> {
        let base_dir = if let Ok(custom) = std::env::var("FLUXO_CLI_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create FluxoPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// The base directory (~/.config/fluxo-cli/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// The data directory (~/.config/fluxo-cli/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// The path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// The path to store_transactions.json
    pub fn store_transactions_file(&self) -> PathBuf {
        self.data_dir().join("store_transactions.json")
    }

    /// The path to household_entries.json
    pub fn household_entries_file(&self) -> PathBuf {
        self.data_dir().join("household_entries.json")
    }

    /// The path to stock_items.json
    pub fn stock_items_file(&self) -> PathBuf {
        self.data_dir().join("stock_items.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), FluxoError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FluxoError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FluxoError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if fluxo has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, FluxoError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .map_err(|_| FluxoError::Config("Could not determine home directory".into()))
        })?;
    Ok(config_base.join("fluxo-cli"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, FluxoError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| FluxoError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("fluxo-cli"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FluxoPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FluxoPaths::with_base_dir(temp_dir.path().to_path_buf());

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FluxoPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.store_transactions_file(),
            temp_dir.path().join("data").join("store_transactions.json")
        );
        assert_eq!(
            paths.stock_items_file(),
            temp_dir.path().join("data").join("stock_items.json")
        );
    }

    #[test]
    fn test_not_initialized_without_settings() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FluxoPaths::with_base_dir(temp_dir.path().to_path_buf());
        assert!(!paths.is_initialized());
    }
}
