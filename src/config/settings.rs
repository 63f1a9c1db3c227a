//! Application settings for Walletline
//!
//! Settings hold everything that is not a user-facing presentation
//! preference: where the API lives and which date-picker protocol the
//! platform uses. Theme and locale live in the preference store instead.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::paths::AppPaths;
use crate::draft::DateProtocol;
use crate::error::WalletError;
use crate::storage::file_io::{read_json, write_json_atomic};

/// User settings for Walletline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the transaction API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// How the date picker commits a chosen date
    #[serde(default = "DateProtocol::platform_default")]
    pub date_picker: DateProtocol,

    /// Currency symbol shown next to amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:8000/".to_string()
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_currency() -> String {
    "₸".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            date_picker: DateProtocol::platform_default(),
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Load settings from disk, writing the defaults on first run
    pub fn load_or_create(paths: &AppPaths) -> Result<Self, WalletError> {
        if paths.settings_file().exists() {
            return read_json(paths.settings_file()).map_err(|e| {
                WalletError::Config(format!("Failed to load settings: {}", e))
            });
        }

        let settings = Settings::default();
        settings.save(paths)?;
        debug!(path = %paths.settings_file().display(), "wrote default settings");
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AppPaths) -> Result<(), WalletError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
