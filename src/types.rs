use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_MONTH,
};
use crate::prelude::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point in time, stored as a UTC `DateTime` and exchanged as milliseconds
/// since 1970-01-01T00:00:00Z.
///
/// Always within chrono's representable range, so field access never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into)]
#[derive(Serialize, Deserialize)]
#[display(fmt = "{}", "_0.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)")]
#[serde(transparent)]
pub struct Instant(#[serde(with = "chrono::serde::ts_milliseconds")] DateTime<Utc>);

impl Instant {
    /// The epoch itself
    pub const EPOCH: Self = Self(DateTime::<Utc>::UNIX_EPOCH);

    /// Creates an instant from epoch milliseconds.
    /// Returns `None` outside the representable range.
    pub fn from_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self)
    }

    /// Milliseconds since the epoch
    #[inline]
    pub fn millis(self) -> i64 {
        self.0.timestamp_millis()
    }

    /// The underlying UTC `DateTime`
    #[inline]
    pub const fn as_utc(self) -> DateTime<Utc> {
        self.0
    }
}

/// Which offset calendar fields are evaluated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Zone {
    /// Coordinated Universal Time
    #[display(fmt = "UTC")]
    Utc,
    /// The calendar's reference ("local") offset
    #[display(fmt = "reference")]
    Reference,
}

/// Calendar fields of an instant as seen from one zone. `month` is 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fields {
    pub year:        i32,
    pub month:       u32,
    pub day:         u32,
    pub hour:        u32,
    pub minute:      u32,
    pub second:      u32,
    pub millisecond: u32,
}

// Helper functions

pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: i32, month: u32) -> u32 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Folds an out-of-range 1-based month into the neighbouring years, so month
/// 13 of 2024 is January 2025 and month 0 is December of the previous year.
pub const fn normalize_month(year: i32, month: i32) -> (i32, u32) {
    let zero_based = month - 1;
    #[allow(clippy::cast_possible_wrap)]
    let months = MAX_MONTH as i32;
    #[allow(clippy::cast_sign_loss)]
    let normalized = (zero_based.rem_euclid(months) + 1) as u32;
    (year.saturating_add(zero_based.div_euclid(months)), normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instant_from_millis() {
        let instant = Instant::from_millis(818_035_920_000).unwrap();
        assert_eq!(instant.millis(), 818_035_920_000);
        assert_eq!(Instant::from_millis(0), Some(Instant::EPOCH));
    }

    #[test]
    fn test_instant_from_millis_out_of_range() {
        assert!(Instant::from_millis(i64::MAX).is_none());
        assert!(Instant::from_millis(i64::MIN).is_none());
    }

    #[test]
    fn test_instant_display() {
        let instant = Instant::from_millis(1_704_067_200_123).unwrap();
        assert_eq!(instant.to_string(), "2024-01-01T00:00:00.123Z");
    }

    #[test]
    fn test_instant_ordering() {
        let earlier = Instant::from_millis(1_000).unwrap();
        let later = Instant::from_millis(2_000).unwrap();
        assert!(earlier < later);
        assert_eq!(earlier, earlier);
    }

    #[test]
    fn test_instant_serde() {
        let instant = Instant::from_millis(818_035_920_000).unwrap();
        let json = serde_json::to_string(&instant).unwrap();
        assert_eq!(json, "818035920000");

        let parsed: Instant = serde_json::from_str(&json).unwrap();
        assert_eq!(instant, parsed);
    }

    #[test]
    fn test_zone_display() {
        assert_eq!(Zone::Utc.to_string(), "UTC");
        assert_eq!(Zone::Reference.to_string(), "reference");
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year:        i32,
            is_leap:     bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year:        2020,
                is_leap:     true,
                description: "divisible by 4",
            },
            TestCase {
                year:        2024,
                is_leap:     true,
                description: "divisible by 4",
            },
            TestCase {
                year:        2022,
                is_leap:     false,
                description: "not divisible by 4",
            },
            TestCase {
                year:        1900,
                is_leap:     false,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        2100,
                is_leap:     false,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        2000,
                is_leap:     true,
                description: "divisible by 400",
            },
            TestCase {
                year:        -4,
                is_leap:     true,
                description: "proleptic year before 1 BCE",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
        }
    }

    #[test]
    fn test_days_in_month_february() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28, "Century year not divisible by 400");
        assert_eq!(days_in_month(2000, 2), 29, "Century year divisible by 400");
    }

    #[test]
    fn test_all_months_have_valid_days() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12 {
            assert_eq!(
                days_in_month(2023, month),
                expected[month as usize],
                "Month {month} has incorrect day count"
            );
        }
    }

    #[test]
    fn test_normalize_month() {
        assert_eq!(normalize_month(2024, 1), (2024, 1));
        assert_eq!(normalize_month(2024, 12), (2024, 12));
        assert_eq!(normalize_month(2024, 13), (2025, 1));
        assert_eq!(normalize_month(2024, 0), (2023, 12));
        assert_eq!(normalize_month(2024, -11), (2023, 1));
        assert_eq!(normalize_month(2024, 25), (2026, 1));
    }
}
