//! Time module for Julian day and Julian date conversions
//!
//! Converts between civil instants (`chrono::DateTime<Utc>`) and the
//! continuous Julian day count used throughout the ephemeris. Julian date
//! 0.0 is noon UTC on 1 January 4713 BCE in the Julian calendar, which is
//! 24 November 4714 BCE in the proleptic Gregorian calendar chrono uses.
//!
//! [`JulianDay`] and [`JulianDate`] share the same zero point and scale;
//! the two types only distinguish day-granularity call sites from
//! date-plus-time call sites. Both delegate to one pair of conversion
//! routines so the formulas cannot drift apart, and the instant conversion
//! is the exact algebraic inverse of the day-count conversion.

use std::fmt;
use std::ops::{Add, Sub};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DAY_S, JD_UNIX_EPOCH};

/// Error type for time operations
#[derive(Debug, Error)]
pub enum TimeError {
    #[error("Julian date out of range: {0}")]
    OutOfRange(f64),
}

/// Result type for time operations
pub type Result<T> = std::result::Result<T, TimeError>;

/// Julian day count from a fractional Unix timestamp.
///
/// Shared by both wrapper types below; this is the only place the zero
/// point enters a conversion.
fn jd_from_unix_seconds(seconds: f64) -> f64 {
    seconds / DAY_S + JD_UNIX_EPOCH
}

/// Exact algebraic inverse of [`jd_from_unix_seconds`].
fn unix_seconds_from_jd(jd: f64) -> f64 {
    (jd - JD_UNIX_EPOCH) * DAY_S
}

fn datetime_to_unix_seconds(datetime: &DateTime<Utc>) -> f64 {
    datetime.timestamp() as f64 + datetime.timestamp_subsec_nanos() as f64 / 1e9
}

fn unix_seconds_to_datetime(seconds: f64) -> Result<DateTime<Utc>> {
    if !seconds.is_finite() {
        return Err(TimeError::OutOfRange(seconds));
    }

    let mut whole = seconds.floor();
    let mut nanos = ((seconds - whole) * 1e9).round();
    if nanos >= 1e9 {
        whole += 1.0;
        nanos = 0.0;
    }

    if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
        return Err(TimeError::OutOfRange(seconds));
    }

    DateTime::<Utc>::from_timestamp(whole as i64, nanos as u32)
        .ok_or(TimeError::OutOfRange(seconds))
}

macro_rules! julian_wrapper {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
        pub struct $name(f64);

        impl $name {
            /// Wrap a raw day count.
            pub fn new(value: f64) -> Self {
                Self(value)
            }

            /// The raw day count.
            pub fn value(&self) -> f64 {
                self.0
            }

            /// Day count for a civil instant. Total over all finite instants.
            pub fn from_datetime(datetime: &DateTime<Utc>) -> Self {
                Self(jd_from_unix_seconds(datetime_to_unix_seconds(datetime)))
            }

            /// Day count for a fractional Unix timestamp.
            pub fn from_unix_seconds(seconds: f64) -> Self {
                Self(jd_from_unix_seconds(seconds))
            }

            /// The civil instant of this day count.
            ///
            /// Fails only when the value falls outside chrono's
            /// representable datetime range.
            pub fn to_datetime(&self) -> Result<DateTime<Utc>> {
                unix_seconds_to_datetime(unix_seconds_from_jd(self.0))
            }

            /// This day count as a fractional Unix timestamp.
            pub fn as_unix_seconds(&self) -> f64 {
                unix_seconds_from_jd(self.0)
            }
        }

        impl From<f64> for $name {
            fn from(value: f64) -> Self {
                Self(value)
            }
        }

        impl From<&DateTime<Utc>> for $name {
            fn from(datetime: &DateTime<Utc>) -> Self {
                Self::from_datetime(datetime)
            }
        }

        impl Add<f64> for $name {
            type Output = $name;

            fn add(self, days: f64) -> Self::Output {
                Self(self.0 + days)
            }
        }

        impl Sub<f64> for $name {
            type Output = $name;

            fn sub(self, days: f64) -> Self::Output {
                Self(self.0 - days)
            }
        }

        impl Sub<$name> for $name {
            type Output = f64;

            fn sub(self, other: $name) -> Self::Output {
                self.0 - other.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "JD {:.6}", self.0)
            }
        }
    };
}

julian_wrapper!(
    JulianDay,
    "A Julian day count, used at day-granularity call sites."
);
julian_wrapper!(
    JulianDate,
    "A Julian date (day count plus time-of-day fraction)."
);

impl From<JulianDay> for JulianDate {
    fn from(day: JulianDay) -> Self {
        JulianDate(day.0)
    }
}

impl From<JulianDate> for JulianDay {
    fn from(date: JulianDate) -> Self {
        JulianDay(date.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use chrono::TimeZone;
    use rstest::rstest;

    fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
            .unwrap()
    }

    // Reference values from Astronomical Algorithms chapter 7 and
    // planetcalc. The literature quotes pre-1582 rows in the Julian
    // calendar; the civil dates here are proleptic Gregorian throughout
    // (chrono's calendar), so those rows shift by the calendar offset of
    // their era: Julian 837-04-10 is Gregorian 837-04-14 (4 days), and
    // JD 0.0 lands on Gregorian -4713-11-24 rather than -4712-01-01
    // (38 days).
    #[rstest]
    #[case(utc(2000, 1, 1, 12, 0), 2451545.0)]
    #[case(utc(1999, 1, 1, 0, 0), 2451179.5)]
    #[case(utc(1987, 1, 27, 0, 0), 2446822.5)]
    #[case(utc(1987, 6, 19, 12, 0), 2446966.0)]
    #[case(utc(1988, 1, 27, 0, 0), 2447187.5)]
    #[case(utc(1988, 6, 19, 12, 0), 2447332.0)]
    #[case(utc(1966, 8, 18, 0, 0), 2439355.5)]
    #[case(utc(1900, 1, 1, 0, 0), 2415020.5)]
    #[case(utc(837, 4, 10, 7, 12), 2026867.8)]
    #[case(utc(-4712, 1, 1, 12, 0), 38.0)]
    #[case(utc(-4713, 11, 24, 12, 0), 0.0)]
    fn test_golden_julian_dates(#[case] datetime: DateTime<Utc>, #[case] expected: f64) {
        assert_abs_diff_eq!(
            JulianDate::from_datetime(&datetime).value(),
            expected,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            JulianDay::from_datetime(&datetime).value(),
            expected,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_round_trip_datetime() {
        let dates = [
            utc(2023, 1, 1, 0, 0),
            utc(1969, 12, 31, 23, 59),
            utc(1900, 1, 1, 0, 0),
            utc(2000, 1, 1, 12, 0),
            utc(-4712, 1, 1, 12, 0),
        ];
        for date in dates {
            let jd = JulianDate::from_datetime(&date);
            let back = jd.to_datetime().unwrap();
            let drift = (datetime_to_unix_seconds(&back) - datetime_to_unix_seconds(&date)).abs();
            // 1e-6 day is just under a tenth of a second.
            assert!(drift <= 1e-6 * DAY_S, "drift {} s for {}", drift, date);
        }
    }

    #[test]
    fn test_round_trip_raw_value() {
        for jd in [0.0, 2415020.5, 2451545.0, 2459945.5] {
            let date = JulianDate::new(jd).to_datetime().unwrap();
            assert_abs_diff_eq!(
                JulianDate::from_datetime(&date).value(),
                jd,
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn test_monotonicity() {
        let mut previous = JulianDate::from_datetime(&utc(1900, 1, 1, 0, 0));
        for year in 1901..2100 {
            let current = JulianDate::from_datetime(&utc(year, 1, 1, 0, 0));
            assert!(current > previous, "not increasing at year {}", year);
            previous = current;
        }
    }

    #[test]
    fn test_day_and_date_share_zero_point() {
        let datetime = utc(2023, 6, 15, 18, 30);
        let day = JulianDay::from_datetime(&datetime);
        let date = JulianDate::from_datetime(&datetime);
        assert_relative_eq!(day.value(), date.value());
        assert_relative_eq!(JulianDate::from(day).value(), date.value());
        assert_relative_eq!(JulianDay::from(date).value(), day.value());
    }

    #[test]
    fn test_arithmetic() {
        let jd = JulianDate::new(2451545.0);
        assert_relative_eq!((jd + 1.5).value(), 2451546.5);
        assert_relative_eq!((jd - 0.5).value(), 2451544.5);
        assert_relative_eq!(jd + 1.0 - jd, 1.0);
    }

    #[test]
    fn test_unix_seconds_accessors() {
        let jd = JulianDate::from_unix_seconds(0.0);
        assert_relative_eq!(jd.value(), JD_UNIX_EPOCH);
        assert_relative_eq!(jd.as_unix_seconds(), 0.0);
    }

    #[test]
    fn test_out_of_range_is_an_error() {
        assert!(JulianDate::new(f64::NAN).to_datetime().is_err());
        assert!(JulianDate::new(1e18).to_datetime().is_err());
    }
}
