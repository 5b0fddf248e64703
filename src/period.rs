use std::iter::FusedIterator;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Calendar, DMY_FORMAT, ISO_DATE_FORMAT, MS_PER_DAY, ParseError, RANGE_SEPARATOR, prelude::*,
};

/// An inclusive pair of date strings.
///
/// The strings are kept as given; ordering is not checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{start}/{end}")]
pub struct Period {
    pub start: String,
    pub end:   String,
}

/// Error type for work schedule generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// Zero work days and zero off days never advance.
    #[error("Empty schedule cycle: work and off day counts are both zero")]
    EmptyCycle,

    /// Error parsing a period bound.
    #[error(transparent)]
    ParseError(#[from] ParseError),
}

impl Period {
    /// Creates a period from its two bounds.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end:   end.into(),
        }
    }
}

impl FromStr for Period {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            1 => {
                let (start, end) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    ParseError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;
                Ok(Self::new(start.trim(), end.trim()))
            },
            0 => Err(ParseError::InvalidFormat(format!(
                "No period separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            _ => Err(ParseError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl Calendar {
    /// Inclusive day count between two date strings:
    /// `round((end - start) / 1 day) + 1`, halves rounding up.
    ///
    /// # Errors
    /// Returns `ParseError` when either bound is not a recognised date.
    #[allow(clippy::cast_possible_truncation)]
    pub fn get_count_days_on_period(&self, start: &str, end: &str) -> Result<i64, ParseError> {
        let start = i128::from(self.parse(start)?.millis());
        let end = i128::from(self.parse(end)?.millis());
        let day = i128::from(MS_PER_DAY);
        // Representable instants span well under i64::MAX days
        Ok(((end - start + day / 2).div_euclid(day) + 1) as i64)
    }

    /// Whether `date` lies within `period`, both bounds included.
    ///
    /// # Errors
    /// Returns `ParseError` when any of the three strings is not a recognised date.
    pub fn is_date_in_period(&self, date: &str, period: &Period) -> Result<bool, ParseError> {
        let date = self.parse(date)?;
        let start = self.parse(&period.start)?;
        let end = self.parse(&period.end)?;
        Ok(start <= date && date <= end)
    }
}

/// Parses a `DD-MM-YYYY` date.
///
/// # Errors
/// Returns `ParseError::EmptyInput` or `ParseError::InvalidFormat`.
pub fn parse_dmy(s: &str) -> Result<NaiveDate, ParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    NaiveDate::parse_from_str(trimmed, DMY_FORMAT).map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

/// Formats a date as `DD-MM-YYYY`.
pub fn format_dmy(date: NaiveDate) -> String {
    date.format(DMY_FORMAT).to_string()
}

/// `DD-MM-YYYY` to `YYYY-MM-DD`.
///
/// # Errors
/// Returns `ParseError` when the input is not a `DD-MM-YYYY` date.
pub fn dmy_to_iso(s: &str) -> Result<String, ParseError> {
    parse_dmy(s).map(|date| date.format(ISO_DATE_FORMAT).to_string())
}

/// `YYYY-MM-DD` (optionally followed by `T` and a time) to `DD-MM-YYYY`.
///
/// Only the written calendar date is used; a time or offset suffix does not
/// move the date.
///
/// # Errors
/// Returns `ParseError` when the input does not start with an ISO date.
pub fn iso_to_dmy(s: &str) -> Result<String, ParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let date_part = trimmed.split_once('T').map_or(trimmed, |(date, _)| date);
    NaiveDate::parse_from_str(date_part, ISO_DATE_FORMAT)
        .map(format_dmy)
        .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

/// Days worked in a repeating "N on, M off" rotation, from the start of a
/// period through its end.
///
/// The first emitted day is the period start. Cloning before iteration gives
/// an independent restart of the same sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkSchedule {
    next:      Option<NaiveDate>,
    end:       NaiveDate,
    work_days: u32,
    off_days:  u32,
    worked:    u32,
}

impl WorkSchedule {
    /// Creates a schedule over concrete dates.
    ///
    /// # Errors
    /// Returns `ScheduleError::EmptyCycle` if both counts are zero.
    pub fn new(start: NaiveDate, end: NaiveDate, work_days: u32, off_days: u32) -> Result<Self, ScheduleError> {
        if work_days == 0 && off_days == 0 {
            return Err(ScheduleError::EmptyCycle);
        }
        Ok(Self {
            // No work days in a cycle means nothing is ever emitted
            next: (work_days > 0).then_some(start),
            end,
            work_days,
            off_days,
            worked: 0,
        })
    }

    /// Creates a schedule over a period of `DD-MM-YYYY` strings.
    ///
    /// # Errors
    /// Returns `ScheduleError::ParseError` for a malformed bound, or
    /// `ScheduleError::EmptyCycle`.
    pub fn from_period(period: &Period, work_days: u32, off_days: u32) -> Result<Self, ScheduleError> {
        let start = parse_dmy(&period.start)?;
        let end = parse_dmy(&period.end)?;
        Self::new(start, end, work_days, off_days)
    }
}

impl Iterator for WorkSchedule {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|date| *date <= self.end)?;

        self.worked += 1;
        let step = if self.worked == self.work_days {
            self.worked = 0;
            1 + u64::from(self.off_days)
        } else {
            1
        };
        self.next = current.checked_add_days(Days::new(step));

        Some(current)
    }
}

impl FusedIterator for WorkSchedule {}

/// Work days of a rotation over a `DD-MM-YYYY` period, as `DD-MM-YYYY` strings.
///
/// # Errors
/// Returns `ScheduleError::ParseError` for a malformed bound, or
/// `ScheduleError::EmptyCycle` when both counts are zero.
pub fn get_work_schedule(period: &Period, work_days: u32, off_days: u32) -> Result<Vec<String>, ScheduleError> {
    let schedule = WorkSchedule::from_period(period, work_days, off_days)?;
    let days: Vec<String> = schedule.map(format_dmy).collect();
    debug!(%period, work_days, off_days, count = days.len(), "generated work schedule");
    Ok(days)
}
