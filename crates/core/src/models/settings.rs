use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::index::{IndexRegistry, DEFAULT_SYMBOL};
use crate::errors::CoreError;

pub const ENV_BIND: &str = "DASHBOARD_BIND";
pub const ENV_SYMBOL: &str = "DASHBOARD_SYMBOL";
pub const ENV_START: &str = "DASHBOARD_START";
pub const ENV_END: &str = "DASHBOARD_END";
pub const ENV_DEBUG: &str = "DASHBOARD_DEBUG";

/// Process-level settings for the dashboard host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Address the HTTP server binds to (e.g., "127.0.0.1:8050").
    pub bind_address: String,

    /// Index selected when the page loads.
    pub default_symbol: String,

    /// Default analysis window shown in the date inputs.
    pub default_start: NaiveDate,
    pub default_end: NaiveDate,

    /// Development mode: verbose logging. On by default.
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8050".to_string(),
            default_symbol: DEFAULT_SYMBOL.to_string(),
            default_start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
            default_end: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default(),
            debug: true,
        }
    }
}

impl Settings {
    /// Defaults overlaid with `DASHBOARD_*` environment variables.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] with an arbitrary key source (used by tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(bind) = lookup(ENV_BIND) {
            settings.bind_address = bind.trim().to_string();
        }
        if let Some(symbol) = lookup(ENV_SYMBOL) {
            settings.default_symbol = symbol.trim().to_string();
        }
        if let Some(start) = lookup(ENV_START) {
            settings.default_start = parse_setting_date(ENV_START, &start)?;
        }
        if let Some(end) = lookup(ENV_END) {
            settings.default_end = parse_setting_date(ENV_END, &end)?;
        }
        if let Some(debug) = lookup(ENV_DEBUG) {
            settings.debug = parse_bool(ENV_DEBUG, &debug)?;
        }

        settings.validate(&IndexRegistry::builtin())?;
        Ok(settings)
    }

    /// The default symbol must be selectable.
    pub fn validate(&self, registry: &IndexRegistry) -> Result<(), CoreError> {
        if !registry.contains(&self.default_symbol) {
            return Err(CoreError::UnknownIndex(self.default_symbol.clone()));
        }
        if self.bind_address.is_empty() {
            return Err(CoreError::InvalidSetting {
                key: ENV_BIND.into(),
                message: "bind address must not be empty".into(),
            });
        }
        Ok(())
    }
}

fn parse_setting_date(key: &str, value: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| CoreError::InvalidSetting {
        key: key.to_string(),
        message: format!("'{value}' is not a YYYY-MM-DD date: {e}"),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, CoreError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(CoreError::InvalidSetting {
            key: key.to_string(),
            message: format!("'{other}' is not a boolean"),
        }),
    }
}
