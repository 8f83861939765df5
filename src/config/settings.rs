//! User settings for finboard
//!
//! Display preferences, dashboard defaults and the log filter.

use serde::{Deserialize, Serialize};

use super::paths::{FinboardPaths, DEFAULT_PROFILE};
use crate::error::FinboardError;
use crate::models::money::DEFAULT_CURRENCY_SYMBOL;

/// User settings for finboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
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

    /// How many months the dashboard comparison shows
    #[serde(default = "default_comparison_months")]
    pub comparison_months: usize,

    /// A card is flagged when its bill is due within this many days
    #[serde(default = "default_due_soon_days")]
    pub due_soon_days: i64,

    /// Profile used when `--profile` is not given
    #[serde(default = "default_profile")]
    pub default_profile: String,

    /// `tracing` filter directive used when `FINBOARD_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_comparison_months() -> usize {
    6
}

fn default_due_soon_days() -> i64 {
    5
}

fn default_profile() -> String {
    DEFAULT_PROFILE.to_string()
}

fn default_log_filter() -> String {
    "finboard=warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            comparison_months: default_comparison_months(),
            due_soon_days: default_due_soon_days(),
            default_profile: default_profile(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FinboardPaths) -> Result<Self, FinboardError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FinboardError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinboardError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinboardPaths) -> Result<(), FinboardError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinboardError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinboardError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
