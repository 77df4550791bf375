//! User settings for fintrack

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::paths::FintrackPaths;
use crate::error::{FintrackError, FintrackResult};
use crate::models::{Money, DEFAULT_BUDGET_LIMIT};

/// Settings layout written by this build
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// strftime format used when printing dates
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Limit used when the budget is reset or cleared
    #[serde(default = "default_budget_limit")]
    pub default_budget_limit: Money,

    #[serde(default)]
    pub setup_completed: bool,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

fn default_currency() -> String {
    "Rp".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_budget_limit() -> Money {
    DEFAULT_BUDGET_LIMIT
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_budget_limit: default_budget_limit(),
            setup_completed: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, falling back to defaults when absent
    ///
    /// Defaults are not written; the caller decides when to persist. A file
    /// from a newer build is refused; an older one is brought up to
    /// [`SCHEMA_VERSION`].
    pub fn load_or_create(paths: &FintrackPaths) -> FintrackResult<Self> {
        let settings_path = paths.settings_file();
        if !settings_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FintrackError::Io(format!("Failed to read settings file: {}", e)))?;
        let settings: Self = serde_json::from_str(&contents)
            .map_err(|e| FintrackError::Config(format!("Failed to parse settings file: {}", e)))?;
        settings.migrate()
    }

    fn migrate(mut self) -> FintrackResult<Self> {
        if self.schema_version > SCHEMA_VERSION {
            return Err(FintrackError::Config(format!(
                "Settings schema version {} is newer than supported version {}",
                self.schema_version, SCHEMA_VERSION
            )));
        }
        if self.schema_version < SCHEMA_VERSION {
            debug!(from = self.schema_version, to = SCHEMA_VERSION, "migrating settings");
            self.schema_version = SCHEMA_VERSION;
        }
        Ok(self)
    }

    pub fn save(&self, paths: &FintrackPaths) -> FintrackResult<()> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FintrackError::Config(format!("Failed to serialize settings: {}", e)))?;
        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FintrackError::Io(format!("Failed to write settings file: {}", e)))
    }

    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Set a value by key, as used by `fintrack config`
    pub fn set(&mut self, key: &str, value: &str) -> FintrackResult<()> {
        match key {
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "date_format" => self.date_format = value.to_string(),
            "default_budget_limit" => {
                let limit = Money::parse(value)
                    .map_err(|e| FintrackError::Validation(e.to_string()))?;
                if limit.is_negative() {
                    return Err(FintrackError::Validation(
                        "Default budget limit cannot be negative".into(),
                    ));
                }
                self.default_budget_limit = limit;
            }
            other => {
                return Err(FintrackError::Config(format!(
                    "Unknown setting '{}'. Valid keys: currency_symbol, date_format, default_budget_limit",
                    other
                )))
            }
        }
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
        assert_eq!(settings.currency_symbol, "Rp");
        assert_eq!(settings.default_budget_limit, Money::from_major(5_000_000));
        assert!(!settings.setup_completed);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.set("currency_symbol", "$").unwrap();
        settings.setup_completed = true;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol":"€"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_schema_version_checked_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        std::fs::write(paths.settings_file(), r#"{"schema_version":0,"currency_symbol":"$"}"#).unwrap();
        let upgraded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(upgraded.schema_version, SCHEMA_VERSION);
        assert_eq!(upgraded.currency_symbol, "$");

        std::fs::write(paths.settings_file(), r#"{"schema_version":99}"#).unwrap();
        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(FintrackError::Config(_))
        ));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut settings = Settings::default();
        assert!(settings.set("default_budget_limit", "-5").unwrap_err().is_validation());
        assert!(matches!(
            settings.set("colour", "blue"),
            Err(FintrackError::Config(_))
        ));
        settings.set("default_budget_limit", "2500000").unwrap();
        assert_eq!(settings.default_budget_limit, Money::from_major(2_500_000));
    }
}
