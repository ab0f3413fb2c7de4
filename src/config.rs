use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "PracticeDesk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Config file name inside the application data directory.
pub const CONFIG_FILE: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot determine home directory")]
    NoHomeDir,

    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info,practice_desk=debug"
}

/// Get the application data directory
/// ~/PracticeDesk/ on all platforms
pub fn app_data_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(APP_NAME))
}

/// Get the config file path
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_data_dir()?.join(CONFIG_FILE))
}

/// Tunable thresholds for the form layer. Every field has a default so a
/// partial config file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Stock above this is rejected on save as unrealistic.
    pub stock_sanity_limit: u32,
    /// Pre-filled quantity in the refill dialog.
    pub default_refill_quantity: u32,
    /// Days remaining at or below which a low-stock alert is raised.
    pub low_stock_threshold_days: u32,
    /// Days remaining at or below which the refill action is offered.
    pub refill_action_threshold_days: u32,
    /// Half-width of the "due now" window, in minutes.
    pub due_window_minutes: u32,
    /// How far ahead a schedule may start, in days.
    pub max_start_lead_days: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stock_sanity_limit: 1000,
            default_refill_quantity: 30,
            low_stock_threshold_days: 5,
            refill_action_threshold_days: 10,
            due_window_minutes: 30,
            max_start_lead_days: 365,
        }
    }
}

impl AppConfig {
    /// Load from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `~/PracticeDesk/config.json`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_path()?)
    }
}
