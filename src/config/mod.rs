//! Application configuration
//!
//! Settings are layered: hardcoded defaults, then an optional TOML file,
//! then `BIZDAYS_*` environment variables (highest priority).

use crate::calculator::{
    CalculatorSettings, YearSelection, YearSelectionMode, DEFAULT_NEXT_YEAR_THRESHOLD,
};
use crate::calendar::WeekendDays;
use crate::error::{Error, Result};
use crate::holidays::source::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// File picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "bizdays.toml";

/// Valid log levels for configuration validation.
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging level (trace, debug, info, warn, error).
    pub log_level: String,
    pub server: ServerConfig,
    pub holidays: HolidaysConfig,
    pub business_days: BusinessDaysConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HolidaysConfig {
    /// Base URL; the year is appended as a final path segment.
    pub base_url: String,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessDaysConfig {
    pub weekend_days: WeekendDays,
    pub year_selection: YearSelectionMode,
    /// Only used by the `next_year_threshold` selection mode.
    pub next_year_threshold: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            server: ServerConfig::default(),
            holidays: HolidaysConfig::default(),
            business_days: BusinessDaysConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

impl Default for HolidaysConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
        }
    }
}

impl Default for BusinessDaysConfig {
    fn default() -> Self {
        Self {
            weekend_days: WeekendDays::default(),
            year_selection: YearSelectionMode::default(),
            next_year_threshold: DEFAULT_NEXT_YEAR_THRESHOLD,
        }
    }
}

impl AppConfig {
    /// Load defaults, then `path` (or `bizdays.toml` if present), then the
    /// process environment, and validate the result.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.merge_env_vars()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn merge_env_vars(&mut self) -> Result<()> {
        self.merge_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps variable names to values.
    pub fn merge_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("BIZDAYS_LOG_LEVEL") {
            self.log_level = level;
        }

        if let Some(host) = lookup("BIZDAYS_HOST") {
            self.server.host = host;
        }

        if let Some((key, port)) = lookup("BIZDAYS_PORT")
            .map(|v| ("BIZDAYS_PORT", v))
            .or_else(|| lookup("PORT").map(|v| ("PORT", v)))
        {
            self.server.port = port
                .parse()
                .map_err(|_| Error::Config(format!("{key} must be a port number, got {port:?}")))?;
        }

        if let Some(url) = lookup("BIZDAYS_HOLIDAYS_URL") {
            self.holidays.base_url = url;
        }

        if let Some(timeout) = lookup("BIZDAYS_HOLIDAYS_TIMEOUT_MS") {
            self.holidays.timeout_ms = timeout.parse().map_err(|_| {
                Error::Config(format!(
                    "BIZDAYS_HOLIDAYS_TIMEOUT_MS must be a number of milliseconds, got {timeout:?}"
                ))
            })?;
        }

        if let Some(mode) = lookup("BIZDAYS_YEAR_SELECTION") {
            self.business_days.year_selection = mode.parse().map_err(Error::Config)?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(Error::Config(format!(
                "Invalid log level '{}', expected one of {}",
                self.log_level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }

        if self.server.port == 0 {
            return Err(Error::Config("server.port must be non-zero".to_string()));
        }

        if self.holidays.base_url.trim().is_empty() {
            return Err(Error::Config("holidays.base_url must not be empty".to_string()));
        }

        if self.holidays.timeout_ms == 0 {
            return Err(Error::Config(
                "holidays.timeout_ms must be greater than zero".to_string(),
            ));
        }

        if self.business_days.weekend_days.len() >= 7 {
            return Err(Error::Config(
                "business_days.weekend_days must leave at least one working day".to_string(),
            ));
        }

        if self.business_days.next_year_threshold == 0 {
            return Err(Error::Config(
                "business_days.next_year_threshold must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn holiday_timeout(&self) -> Duration {
        Duration::from_millis(self.holidays.timeout_ms)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn calculator_settings(&self) -> CalculatorSettings {
        CalculatorSettings {
            weekend: self.business_days.weekend_days.clone(),
            year_selection: YearSelection::from_mode(
                self.business_days.year_selection,
                self.business_days.next_year_threshold,
            ),
        }
    }
}
