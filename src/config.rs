use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_SCAN_LIMIT_DAYS, DEFAULT_THIRTEENTH_WEEKDAY, DEFAULT_WEEKEND_DAYS, SATURDAY,
};

/// Minutes in a day; reference offsets stay strictly inside `±1 day`.
const MAX_OFFSET_MINUTES: i32 = 24 * 60;

/// Settings a [`Calendar`](crate::Calendar) is built from.
///
/// Every field has a default, so an empty TOML document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Offset of the reference ("local") zone from UTC, in minutes east.
    pub reference_offset_minutes: i32,
    /// Maximum number of days the Friday-the-13th scan walks before giving up.
    pub scan_limit_days: u32,
    /// Weekday indices (Sunday = 0) the weekend counter treats as weekend.
    pub weekend_days: Vec<u8>,
    /// Weekday index the Friday-the-13th scan matches on.
    pub thirteenth_weekday: u8,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            reference_offset_minutes: 0,
            scan_limit_days:          DEFAULT_SCAN_LIMIT_DAYS,
            weekend_days:             DEFAULT_WEEKEND_DAYS.to_vec(),
            thirteenth_weekday:       DEFAULT_THIRTEENTH_WEEKDAY,
        }
    }
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML document could not be read into a config.
    #[error("Invalid calendar config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Reference offset is a day or more away from UTC.
    #[error("Invalid reference offset: {0} minutes (must be within ±{max})", max = MAX_OFFSET_MINUTES - 1)]
    InvalidOffset(i32),

    /// Weekday index outside `0..=6`.
    #[error("Invalid weekday index: {0} (must be 0-{max})", max = SATURDAY)]
    InvalidWeekday(u8),
}

impl CalendarConfig {
    /// Parses a config from a TOML document.
    ///
    /// # Errors
    /// Returns `ConfigError::Toml` on malformed TOML or mistyped fields, and
    /// the validation errors of [`CalendarConfig::validate`].
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks offset and weekday ranges.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidOffset` or `ConfigError::InvalidWeekday`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reference_offset_minutes.abs() >= MAX_OFFSET_MINUTES {
            return Err(ConfigError::InvalidOffset(self.reference_offset_minutes));
        }
        if let Some(&day) = self.weekend_days.iter().find(|&&d| d > SATURDAY) {
            return Err(ConfigError::InvalidWeekday(day));
        }
        if self.thirteenth_weekday > SATURDAY {
            return Err(ConfigError::InvalidWeekday(self.thirteenth_weekday));
        }
        Ok(())
    }
}
