use std::collections::HashMap;
use std::path::PathBuf;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::daterange::{DailyAutoWindow, ResolverOptions, WeekStart};

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct Profile {
    /// IANA timezone name used for datetime query filters (default: UTC).
    #[serde(default)]
    pub timezone: Option<String>,
    /// First day of the week for DAILY week presets.
    #[serde(default)]
    pub week_start: WeekStart,
    /// Policy for the DAILY `auto` preset.
    #[serde(default)]
    pub daily_auto: DailyAutoWindow,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub active_profile: String,
    /// Path the config was read from; `None` when running on defaults.
    pub source: Option<PathBuf>,
    pub timezone: Tz,
    pub resolver: ResolverOptions,
    pub logging: LoggingConfig,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            active_profile: "default".to_string(),
            source: None,
            timezone: Tz::UTC,
            resolver: ResolverOptions::default(),
            logging: LoggingConfig::default(),
        }
    }
}
