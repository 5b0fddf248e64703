use std::borrow::Cow;
use std::fmt::Write as _;

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta,
    TimeZone, Timelike, Utc, Weekday,
};
use tracing::{debug, warn};

use crate::config::{CalendarConfig, ConfigError};
use crate::consts::{
    DAYS_BEFORE_FIRST_MONDAY, DAYS_PER_WEEK, FRIDAY, ISO_DATE_FORMAT, MS_PER_DAY, MS_PER_HOUR,
    MS_PER_MINUTE, MS_PER_SECOND, QUARTER_OF_MONTH, TIME_FORMAT, UNLUCKY_DAY, US_DATE_TIME_FORMAT,
    WEEKDAY_NAMES,
};
use crate::types::{self, Fields, Instant, Zone, days_in_month, normalize_month};
use crate::ParseError;

/// ISO 8601 date-times without an offset; read in the reference offset.
const LOCAL_DATE_TIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Error type for calendar arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Input string did not parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Result falls outside the representable range.
    #[error("Date out of representable range")]
    OutOfRange,

    /// The day-by-day scan found nothing within its limit.
    #[error("No matching 13th within {limit} days")]
    ScanLimitExceeded { limit: u32 },

    /// strftime pattern rejected by the formatter.
    #[error("Invalid format pattern: {0}")]
    InvalidPattern(String),
}

/// Date/calendar engine with a fixed reference ("local") offset.
///
/// All operations are pure; a `Calendar` is `Copy` and holds no state that
/// changes between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    offset:             FixedOffset,
    scan_limit_days:    u32,
    weekend_mask:       u8,
    thirteenth_weekday: u8,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::utc()
    }
}

impl Calendar {
    /// A calendar whose reference offset is UTC, with default settings.
    pub fn utc() -> Self {
        let config = CalendarConfig::default();
        Self {
            offset:             Utc.fix(),
            scan_limit_days:    config.scan_limit_days,
            weekend_mask:       weekday_mask(&config.weekend_days),
            thirteenth_weekday: config.thirteenth_weekday,
        }
    }

    /// Builds a calendar from a validated config.
    ///
    /// # Errors
    /// Returns `ConfigError` if the config fails validation.
    pub fn from_config(config: &CalendarConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let offset = FixedOffset::east_opt(config.reference_offset_minutes * 60)
            .ok_or(ConfigError::InvalidOffset(config.reference_offset_minutes))?;
        Ok(Self {
            offset,
            scan_limit_days: config.scan_limit_days,
            weekend_mask: weekday_mask(&config.weekend_days),
            thirteenth_weekday: config.thirteenth_weekday,
        })
    }

    /// Same settings, different reference offset.
    #[must_use]
    pub const fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// The reference offset
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    // --- engine primitives ---

    /// Parses a date/time string.
    ///
    /// Accepted forms, tried in order:
    /// - RFC 3339 with `Z` or a numeric offset
    /// - `YYYY-MM-DD`, as UTC midnight
    /// - `YYYY-MM-DDTHH:MM[:SS[.fff]]` without offset, in the reference offset;
    ///   a space may stand in for the `T`
    /// - RFC 2822 (weekday optional; `UTC` is read as `GMT`)
    ///
    /// # Errors
    /// Returns `ParseError::EmptyInput` for blank input and
    /// `ParseError::InvalidFormat` for anything else that does not match.
    pub fn parse(&self, s: &str) -> Result<Instant, ParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Instant::from(dt.with_timezone(&Utc)));
        }

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT) {
            return Ok(Instant::from(date.and_time(NaiveTime::MIN).and_utc()));
        }

        for pattern in LOCAL_DATE_TIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, pattern) {
                return self
                    .offset
                    .from_local_datetime(&naive)
                    .single()
                    .map(|dt| Instant::from(dt.with_timezone(&Utc)))
                    .ok_or_else(|| ParseError::InvalidFormat(s.to_owned()));
            }
        }

        if let Ok(dt) = DateTime::parse_from_rfc2822(&rfc2822_zone(trimmed)) {
            return Ok(Instant::from(dt.with_timezone(&Utc)));
        }

        debug!(input = trimmed, "no date format matched");
        Err(ParseError::InvalidFormat(s.to_owned()))
    }

    /// Calendar fields of `instant` as seen from `zone`.
    pub fn fields(&self, instant: Instant, zone: Zone) -> Fields {
        let utc = instant.as_utc();
        match zone {
            Zone::Utc => fields_of(&utc),
            Zone::Reference => fields_of(&utc.with_timezone(&self.offset)),
        }
    }

    /// Weekday index of `instant` in `zone`, Sunday = 0 through Saturday = 6.
    pub fn weekday(&self, instant: Instant, zone: Zone) -> u8 {
        let utc = instant.as_utc();
        let weekday = match zone {
            Zone::Utc => utc.weekday(),
            Zone::Reference => utc.with_timezone(&self.offset).weekday(),
        };
        weekday_index(weekday)
    }

    /// Moves `instant` by whole calendar days, keeping the wall-clock time.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the result is not representable.
    pub fn add_days(&self, instant: Instant, days: i64) -> Result<Instant, CalendarError> {
        // A fixed offset has no DST, so a calendar day is always 24 hours.
        TimeDelta::try_days(days)
            .and_then(|delta| instant.as_utc().checked_add_signed(delta))
            .map(Instant::from)
            .ok_or(CalendarError::OutOfRange)
    }

    /// Builds an instant from calendar fields read in `zone`.
    ///
    /// Out-of-range fields roll over the way a calendar does: month 13 is
    /// January of the next year, day 0 is the last day of the previous month,
    /// hour 24 is midnight of the next day.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the result is not representable.
    pub fn compose(&self, fields: Fields, zone: Zone) -> Result<Instant, CalendarError> {
        let time_of_day = i64::from(fields.hour) * MS_PER_HOUR
            + i64::from(fields.minute) * MS_PER_MINUTE
            + i64::from(fields.second) * MS_PER_SECOND
            + i64::from(fields.millisecond);
        let month = i32::try_from(fields.month).map_err(|_| CalendarError::OutOfRange)?;
        self.compose_millis(fields.year, month, i64::from(fields.day), time_of_day, zone)
    }

    /// Midnight of the given (possibly overflowing) date in `zone`.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` if the result is not representable.
    pub fn midnight(&self, year: i32, month: i32, day: i64, zone: Zone) -> Result<Instant, CalendarError> {
        self.compose_millis(year, month, day, 0, zone)
    }

    fn compose_millis(
        &self,
        year: i32,
        month: i32,
        day: i64,
        time_of_day: i64,
        zone: Zone,
    ) -> Result<Instant, CalendarError> {
        let (year, month) = normalize_month(year, month);
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::OutOfRange)?;
        let wall_clock = first.and_time(NaiveTime::MIN).and_utc().timestamp_millis();
        let offset = match zone {
            Zone::Utc => 0,
            Zone::Reference => i64::from(self.offset.local_minus_utc()) * MS_PER_SECOND,
        };

        (day - 1)
            .checked_mul(MS_PER_DAY)
            .and_then(|days| wall_clock.checked_add(days))
            .and_then(|millis| millis.checked_add(time_of_day))
            .and_then(|millis| millis.checked_sub(offset))
            .and_then(Instant::from_millis)
            .ok_or(CalendarError::OutOfRange)
    }

    /// Renders `instant` in `zone` with a strftime pattern.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidPattern` if chrono rejects the pattern.
    pub fn format(&self, instant: Instant, zone: Zone, pattern: &str) -> Result<String, CalendarError> {
        let utc = instant.as_utc();
        let mut out = String::new();
        let written = match zone {
            Zone::Utc => write!(out, "{}", utc.format(pattern)),
            Zone::Reference => write!(out, "{}", utc.with_timezone(&self.offset).format(pattern)),
        };
        written.map_err(|_| CalendarError::InvalidPattern(pattern.to_owned()))?;
        Ok(out)
    }

    fn is_weekend(&self, weekday: u8) -> bool {
        self.weekend_mask & (1 << weekday) != 0
    }

    // --- operations ---

    /// Milliseconds since the epoch for a date/time string.
    ///
    /// # Errors
    /// Returns `ParseError` when the string is not a recognised date.
    pub fn date_to_timestamp(&self, s: &str) -> Result<i64, ParseError> {
        self.parse(s).map(Instant::millis)
    }

    /// Zero-padded 24-hour `HH:MM:SS` of `instant` in the reference offset.
    pub fn get_time(&self, instant: Instant) -> String {
        instant
            .as_utc()
            .with_timezone(&self.offset)
            .format(TIME_FORMAT)
            .to_string()
    }

    /// Full English weekday name of a date string, evaluated in UTC.
    ///
    /// # Errors
    /// Returns `ParseError` when the string is not a recognised date.
    pub fn get_day_name(&self, s: &str) -> Result<&'static str, ParseError> {
        let instant = self.parse(s)?;
        Ok(WEEKDAY_NAMES[usize::from(self.weekday(instant, Zone::Utc))])
    }

    /// The next Friday strictly after `instant`, same time of day.
    ///
    /// The weekday is read in UTC; a Friday input moves a full week ahead.
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` near the end of the representable range.
    pub fn get_next_friday(&self, instant: Instant) -> Result<Instant, CalendarError> {
        let today = i64::from(self.weekday(instant, Zone::Utc));
        let friday = i64::from(FRIDAY);
        let days = if today >= friday {
            DAYS_PER_WEEK - today + friday
        } else {
            friday - today
        };
        self.add_days(instant, days)
    }

    /// Number of weekend days in a month, evaluating each day's reference
    /// midnight by its UTC weekday.
    ///
    /// Which weekday indices count is configurable; the default is 5 and 6
    /// (Friday and Saturday).
    ///
    /// # Errors
    /// Returns `CalendarError::OutOfRange` for years outside the representable range.
    pub fn get_count_weekends_in_month(&self, month: i32, year: i32) -> Result<u32, CalendarError> {
        let (norm_year, norm_month) = normalize_month(year, month);
        let mut count = 0;
        for day in 1..=days_in_month(norm_year, norm_month) {
            let midnight = self.midnight(year, month, i64::from(day), Zone::Reference)?;
            if self.is_weekend(self.weekday(midnight, Zone::Utc)) {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Monday-based week number in which week 1 is the (possibly partial)
    /// week containing January 1. Evaluated in UTC.
    ///
    /// This is not ISO 8601 week numbering.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn get_week_number_by_date(&self, instant: Instant) -> u32 {
        let ordinal = i64::from(instant.as_utc().ordinal());
        let jan_first = (i64::from(self.weekday(instant, Zone::Utc)) - (ordinal - 1)).rem_euclid(DAYS_PER_WEEK);
        let days_before_monday = DAYS_BEFORE_FIRST_MONDAY[jan_first as usize];
        // ceil((ordinal - days_before_monday) / 7) + 1, always in 1..=54
        ((ordinal - days_before_monday + DAYS_PER_WEEK - 1).div_euclid(DAYS_PER_WEEK) + 1) as u32
    }

    /// The first instant at or after `instant`, in whole-day steps, whose
    /// reference day of month is 13 and whose UTC weekday is the configured
    /// index (4, Thursday, by default).
    ///
    /// # Errors
    /// Returns `CalendarError::ScanLimitExceeded` if nothing matches within
    /// the configured number of days, or `CalendarError::OutOfRange`.
    pub fn get_next_friday_the_13th(&self, instant: Instant) -> Result<Instant, CalendarError> {
        for step in 0..=i64::from(self.scan_limit_days) {
            let candidate = self.add_days(instant, step)?;
            if self.fields(candidate, Zone::Reference).day == UNLUCKY_DAY
                && self.weekday(candidate, Zone::Utc) == self.thirteenth_weekday
            {
                debug!(%instant, %candidate, step, "found matching 13th");
                return Ok(candidate);
            }
        }

        warn!(%instant, limit = self.scan_limit_days, "scan limit reached without a matching 13th");
        Err(CalendarError::ScanLimitExceeded {
            limit: self.scan_limit_days,
        })
    }

    /// Quarter (1-4) of the reference month.
    pub fn get_quarter(&self, instant: Instant) -> u8 {
        let month = self.fields(instant, Zone::Reference).month;
        QUARTER_OF_MONTH[(month - 1) as usize]
    }

    /// Whether the reference year of `instant` is a Gregorian leap year.
    pub fn is_leap_year(&self, instant: Instant) -> bool {
        types::is_leap_year(self.fields(instant, Zone::Reference).year)
    }

    /// `M/D/YYYY, h:mm:ss AM` rendering of a date string's UTC wall clock.
    ///
    /// The UTC fields are re-read as reference-offset fields before
    /// rendering, so the printed wall clock is the UTC one.
    ///
    /// # Errors
    /// Returns `CalendarError::Parse` for unrecognised input.
    pub fn format_date(&self, s: &str) -> Result<String, CalendarError> {
        let instant = self.parse(s)?;
        let wall_clock = self.compose(self.fields(instant, Zone::Utc), Zone::Reference)?;
        self.format(wall_clock, Zone::Reference, US_DATE_TIME_FORMAT)
    }
}

/// Days in a 1-based month. Months outside `1..=12` roll into the
/// neighbouring years.
pub const fn get_count_days_in_month(month: i32, year: i32) -> u32 {
    let (year, month) = normalize_month(year, month);
    days_in_month(year, month)
}

fn fields_of<T: Datelike + Timelike>(dt: &T) -> Fields {
    Fields {
        year:        dt.year(),
        month:       dt.month(),
        day:         dt.day(),
        hour:        dt.hour(),
        minute:      dt.minute(),
        second:      dt.second(),
        millisecond: dt.nanosecond() / 1_000_000,
    }
}

const fn weekday_index(weekday: Weekday) -> u8 {
    match weekday {
        Weekday::Sun => 0,
        Weekday::Mon => 1,
        Weekday::Tue => 2,
        Weekday::Wed => 3,
        Weekday::Thu => 4,
        Weekday::Fri => 5,
        Weekday::Sat => 6,
    }
}

fn weekday_mask(days: &[u8]) -> u8 {
    days.iter().fold(0, |mask, &day| mask | (1 << day))
}

/// chrono's RFC 2822 parser knows `GMT` and `UT` but not `UTC`.
fn rfc2822_zone(s: &str) -> Cow<'_, str> {
    match s.strip_suffix("UTC") {
        Some(head) => Cow::Owned(format!("{head}GMT")),
        None => Cow::Borrowed(s),
    }
}
