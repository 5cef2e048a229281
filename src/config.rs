//! Application configuration.
//!
//! Loads settings from config.json at startup. Missing fields take their
//! default values, and a missing or broken file means all defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::analysis::DEFAULT_TOP_PLAYERS;

/// Global configuration instance, initialized once at startup.
static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Complete application configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Ledger table file (relative paths are next to the executable)
    pub ledger_file: PathBuf,
    /// Report JSON output file
    pub report_file: PathBuf,
    /// Size of the "top players" view
    pub top_players: usize,
    /// Whether log lines are also appended to logs/chest_tally.log
    pub log_to_file: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ledger_file: PathBuf::from("chests.csv"),
            report_file: PathBuf::from("report.json"),
            top_players: DEFAULT_TOP_PLAYERS,
            log_to_file: true,
        }
    }
}

impl AppConfig {
    /// Load config from file, or return defaults if it is missing or invalid.
    pub fn load(config_path: &Path) -> Self {
        crate::log(&format!("Looking for config at: {}", config_path.display()));

        if !config_path.exists() {
            crate::log("config.json not found. Using default config.");
            return Self::default();
        }

        match fs::read_to_string(config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    crate::log("Config loaded from config.json");
                    config
                }
                Err(e) => {
                    crate::log(&format!(
                        "Failed to parse config.json: {}. Using defaults.",
                        e
                    ));
                    Self::default()
                }
            },
            Err(e) => {
                crate::log(&format!(
                    "Failed to read config.json: {}. Using defaults.",
                    e
                ));
                Self::default()
            }
        }
    }

    /// Save default config to file (for reference).
    pub fn save_default(config_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&Self::default())
            .context("Failed to serialize default config")?;
        fs::write(config_path, json)
            .context(format!("Failed to write config: {}", config_path.display()))
    }
}

/// Initializes the global configuration from config.json next to the executable.
pub fn init_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| AppConfig::load(&crate::paths::get_config_path()))
}

/// Returns the global configuration if it has been loaded.
pub fn try_get_config() -> Option<&'static AppConfig> {
    CONFIG.get()
}
