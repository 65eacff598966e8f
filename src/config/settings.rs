//! User settings for MoneyTrack
//!
//! A small JSON config file holding the schema version and display
//! preferences.

use serde::{Deserialize, Serialize};

use super::paths::MoneyTrackPaths;
use crate::error::MoneyTrackResult;
use crate::storage::file_io::{read_json, write_json_atomic};

fn default_schema_version() -> u32 {
    1
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

/// User settings for MoneyTrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used for display
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl Settings {
    /// Load settings, creating the file with defaults if it does not exist
    pub fn load_or_create(paths: &MoneyTrackPaths) -> MoneyTrackResult<Self> {
        let path = paths.settings_file();
        if path.exists() {
            read_json(&path)
        } else {
            let settings = Self::default();
            settings.save(paths)?;
            Ok(settings)
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &MoneyTrackPaths) -> MoneyTrackResult<()> {
        write_json_atomic(paths.settings_file(), self)
    }
}
