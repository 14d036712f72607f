//! User settings for expense-cli
//!
//! Manages user preferences: currency symbol, date format, an optional data
//! file override, and the default log level.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;

/// User settings for expense-cli
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Data file to use instead of `data/expenses.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,

    /// Default log filter when neither `RUST_LOG` nor `--verbose` is given
    #[serde(default = "default_log_level")]
    pub log_level: String,
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

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            data_file: None,
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| ExpenseError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ExpenseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ExpenseError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ExpenseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Persist these settings if no settings file exists yet
    ///
    /// Returns `true` when a file was written. An existing file is never
    /// overwritten.
    pub fn save_if_missing(&self, paths: &ExpensePaths) -> Result<bool, ExpenseError> {
        if paths.settings_file().exists() {
            return Ok(false);
        }
        self.save(paths)?;
        Ok(true)
    }

    /// Resolve the data file: explicit override first, then settings, then the default path
    pub fn resolve_data_file(&self, paths: &ExpensePaths, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.data_file.clone())
            .unwrap_or_else(|| paths.expenses_file())
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
        assert_eq!(settings.date_format, "%Y-%m-%d");
        assert_eq!(settings.log_level, "warn");
        assert!(settings.data_file.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            currency_symbol: "€".into(),
            data_file: Some(temp_dir.path().join("elsewhere.json")),
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_save_if_missing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().join("fresh"));

        assert!(Settings::default().save_if_missing(&paths).unwrap());
        assert!(paths.settings_file().exists());
        assert!(paths.data_dir().is_dir());

        let custom = Settings {
            currency_symbol: "€".into(),
            ..Settings::default()
        };
        assert!(!custom.save_if_missing(&paths).unwrap());
        assert_eq!(
            Settings::load_or_create(&paths).unwrap(),
            Settings::default()
        );
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"currency_symbol": "£"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "£");
        assert_eq!(loaded.log_level, "warn");
    }

    #[test]
    fn test_malformed_settings_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, ExpenseError::Config(_)));
    }

    #[test]
    fn test_resolve_data_file_priority() {
        let paths = ExpensePaths::with_base_dir(PathBuf::from("/base"));
        let mut settings = Settings::default();

        assert_eq!(
            settings.resolve_data_file(&paths, None),
            PathBuf::from("/base/data/expenses.json")
        );

        settings.data_file = Some(PathBuf::from("/from/settings.json"));
        assert_eq!(
            settings.resolve_data_file(&paths, None),
            PathBuf::from("/from/settings.json")
        );

        assert_eq!(
            settings.resolve_data_file(&paths, Some(PathBuf::from("/from/cli.json"))),
            PathBuf::from("/from/cli.json")
        );
    }
}
