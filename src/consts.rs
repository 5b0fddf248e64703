/// Maximum valid month (December)
pub const MAX_MONTH: u32 = 12;

/// Month number for February
pub const FEBRUARY: u32 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u32 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u32; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

pub const DAYS_PER_WEEK: i64 = 7;

/// Weekday indices, Sunday-based
pub const SUNDAY: u8 = 0;
pub const THURSDAY: u8 = 4;
pub const FRIDAY: u8 = 5;
pub const SATURDAY: u8 = 6;

/// Full English weekday names, indexed Sunday = 0
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Days from Jan 1 up to (not including) the first Monday after it,
/// indexed by the weekday of Jan 1 (Sunday = 0). A Monday Jan 1 counts a full week.
pub const DAYS_BEFORE_FIRST_MONDAY: [i64; 7] = [1, 7, 6, 5, 4, 3, 2];

/// Quarter for each zero-based month
pub const QUARTER_OF_MONTH: [u8; 12] = [1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4];

/// Day of month the Friday-the-13th scan looks for
pub const UNLUCKY_DAY: u32 = 13;

/// Weekday indices counted by the weekend counter. These are Friday and
/// Saturday, not Saturday and Sunday; existing callers depend on it.
pub const DEFAULT_WEEKEND_DAYS: [u8; 2] = [FRIDAY, SATURDAY];

/// Weekday index matched by the Friday-the-13th scan (Thursday, kept as observed)
pub const DEFAULT_THIRTEENTH_WEEKDAY: u8 = THURSDAY;

/// Upper bound on days scanned when looking for the next 13th. Two 13ths on
/// the same weekday are at most 14 months apart.
pub const DEFAULT_SCAN_LIMIT_DAYS: u32 = 1_000;

/// Period separator (ISO 8601 interval format)
pub const RANGE_SEPARATOR: char = '/';

/// strftime pattern for `DD-MM-YYYY`
pub const DMY_FORMAT: &str = "%d-%m-%Y";
/// strftime pattern for ISO 8601 calendar dates
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
/// strftime pattern for the 24-hour time of day
pub const TIME_FORMAT: &str = "%H:%M:%S";
/// strftime pattern for the US short date with a 12-hour clock; no field is
/// zero-padded except minutes and seconds
pub const US_DATE_TIME_FORMAT: &str = "%-m/%-d/%-Y, %-I:%M:%S %p";
