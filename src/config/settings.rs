//! User settings for fluxo
//!
//! Manages user preferences: currency display, projection defaults, and the
//! projection cache time-to-live.

use serde::{Deserialize, Serialize};

use super::paths::FluxoPaths;
use crate::error::FluxoError;
use crate::projection::EmptySeriesPolicy;

/// User settings for fluxo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used for terminal display
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Default projection horizon: days after "today" the series covers
    /// when no movement extends further
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,

    /// What to emit when there are no forward movements
    #[serde(default)]
    pub empty_series: EmptySeriesPolicy,

    /// Time-to-live of cached projections, in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_horizon_days() -> u32 {
    30
}

fn default_cache_ttl_secs() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            horizon_days: default_horizon_days(),
            empty_series: EmptySeriesPolicy::default(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FluxoPaths) -> Result<Self, FluxoError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FluxoError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| FluxoError::Config(format!("Failed to parse settings file: {}", e)))?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FluxoPaths) -> Result<(), FluxoError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FluxoError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FluxoError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.horizon_days, 30);
        assert_eq!(settings.empty_series, EmptySeriesPolicy::Empty);
        assert_eq!(settings.cache_ttl_secs, 30);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FluxoPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.horizon_days = 10;
        settings.empty_series = EmptySeriesPolicy::OpeningPoint;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.horizon_days, 10);
        assert_eq!(loaded.empty_series, EmptySeriesPolicy::OpeningPoint);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FluxoPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.horizon_days, 30);
    }

    #[test]
    fn test_serde_round_trip() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let deserialized: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings.horizon_days, deserialized.horizon_days);
        assert_eq!(settings.empty_series, deserialized.empty_series);
    }
}
