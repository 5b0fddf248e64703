mod calendar;
mod config;
mod consts;
mod period;
mod prelude;
mod types;

pub use calendar::{Calendar, CalendarError, get_count_days_in_month};
pub use config::{CalendarConfig, ConfigError};
pub use consts::*;
pub use period::{
    Period, ScheduleError, WorkSchedule, dmy_to_iso, format_dmy, get_work_schedule, iso_to_dmy,
    parse_dmy,
};
pub use types::{Fields, Instant, Zone};

use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

// The free functions below read "local" fields in UTC. Use a `Calendar`
// built from a `CalendarConfig` for another reference offset.

/// Milliseconds since the epoch of a date/time string.
///
/// Accepts RFC 3339, ISO 8601 dates and offset-less date-times, and RFC 2822
/// (e.g. `04 Dec 1995 00:12:00 UTC`).
///
/// # Errors
/// Returns `ParseError` when the string is not a recognised date.
pub fn date_to_timestamp(s: &str) -> Result<i64, ParseError> {
    Calendar::utc().date_to_timestamp(s)
}

/// `HH:MM:SS` of an instant.
pub fn get_time(instant: Instant) -> String {
    Calendar::utc().get_time(instant)
}

/// English weekday name (`"Monday"`) of a date string, in UTC.
///
/// # Errors
/// Returns `ParseError` when the string is not a recognised date.
pub fn get_day_name(s: &str) -> Result<&'static str, ParseError> {
    Calendar::utc().get_day_name(s)
}

/// Next Friday strictly after `instant`, time of day preserved.
///
/// # Errors
/// Returns `CalendarError::OutOfRange` at the end of the representable range.
pub fn get_next_friday(instant: Instant) -> Result<Instant, CalendarError> {
    Calendar::utc().get_next_friday(instant)
}

/// Inclusive number of days between two date strings.
///
/// # Errors
/// Returns `ParseError` when either string is not a recognised date.
pub fn get_count_days_on_period(start: &str, end: &str) -> Result<i64, ParseError> {
    Calendar::utc().get_count_days_on_period(start, end)
}

/// Whether `date` lies in `period`, both ends inclusive.
///
/// # Errors
/// Returns `ParseError` when any string is not a recognised date.
pub fn is_date_in_period(date: &str, period: &Period) -> Result<bool, ParseError> {
    Calendar::utc().is_date_in_period(date, period)
}

/// `M/D/YYYY, h:mm:ss AM` of a date string's UTC wall clock.
///
/// # Errors
/// Returns `CalendarError::Parse` when the string is not a recognised date.
pub fn format_date(s: &str) -> Result<String, CalendarError> {
    Calendar::utc().format_date(s)
}

/// Weekend days in a month. Counts Fridays and Saturdays.
///
/// # Errors
/// Returns `CalendarError::OutOfRange` for unrepresentable years.
pub fn get_count_weekends_in_month(month: i32, year: i32) -> Result<u32, CalendarError> {
    Calendar::utc().get_count_weekends_in_month(month, year)
}

/// Monday-based week number; week 1 contains January 1.
pub fn get_week_number_by_date(instant: Instant) -> u32 {
    Calendar::utc().get_week_number_by_date(instant)
}

/// Next 13th, at or after `instant`, falling on weekday index 4.
///
/// # Errors
/// Returns `CalendarError::ScanLimitExceeded` or `CalendarError::OutOfRange`.
pub fn get_next_friday_the_13th(instant: Instant) -> Result<Instant, CalendarError> {
    Calendar::utc().get_next_friday_the_13th(instant)
}

/// Quarter (1-4) of an instant's month.
pub fn get_quarter(instant: Instant) -> u8 {
    Calendar::utc().get_quarter(instant)
}

/// Whether an instant's year is a Gregorian leap year.
pub fn is_leap_year(instant: Instant) -> bool {
    Calendar::utc().is_leap_year(instant)
}
