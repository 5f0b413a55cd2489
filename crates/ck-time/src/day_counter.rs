//! `DayCounter` trait and the built-in day-count conventions.
//!
//! A day counter computes the fraction of a year between two dates —
//! the `tau` used when discounting or accruing interest.

use ck_core::errors::{Error, Result};
use ck_core::{Real, Time};
use chrono::Datelike;
use std::sync::Arc;

use crate::date::{days_between, Date};

/// A convention for counting the fraction of a year between two dates.
pub trait DayCounter: std::fmt::Debug + Send + Sync {
    /// Human-readable name of this convention (e.g. `"Actual/360"`).
    fn name(&self) -> &str;

    /// Number of days between `d1` and `d2` according to this convention.
    fn day_count(&self, d1: Date, d2: Date) -> i64;

    /// Fraction of a year between `d1` and `d2`.
    fn year_fraction(&self, d1: Date, d2: Date) -> Time;
}

/// Actual/360 day counter: `year_fraction = actual_days / 360`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual360;

impl DayCounter for Actual360 {
    fn name(&self) -> &str {
        "Actual/360"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        days_between(d1, d2)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}

/// Actual/365 (Fixed) day counter: `year_fraction = actual_days / 365`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual365Fixed;

impl DayCounter for Actual365Fixed {
    fn name(&self) -> &str {
        "Actual/365 (Fixed)"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        days_between(d1, d2)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 365.0
    }
}

/// 30/360 (Bond Basis) day counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Thirty360;

impl DayCounter for Thirty360 {
    fn name(&self) -> &str {
        "30/360 (Bond Basis)"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        let dd1 = (d1.day() as i64).min(30);
        let dd2 = if dd1 == 30 {
            (d2.day() as i64).min(30)
        } else {
            d2.day() as i64
        };
        360 * (d2.year() as i64 - d1.year() as i64)
            + 30 * (d2.month() as i64 - d1.month() as i64)
            + (dd2 - dd1)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}

/// Parse a day-count convention name.
///
/// Accepts the common spellings used in market configuration documents.
pub fn parse_day_counter(s: &str) -> Result<Arc<dyn DayCounter>> {
    match s {
        "Act360" | "Actual360" | "ACT360" => Ok(Arc::new(Actual360)),
        "Act365" | "Actual365" | "Act365Fixed" | "Actual365Fixed" => Ok(Arc::new(Actual365Fixed)),
        "Thirty360" | "30/360" => Ok(Arc::new(Thirty360)),
        other => Err(Error::UnsupportedType(format!(
            "day counter '{other}' not supported"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::parse_date;
    use approx::assert_abs_diff_eq;

    #[test]
    fn act360_year_fraction() {
        let d1 = parse_date("2022-08-22").unwrap();
        let d2 = parse_date("2023-08-22").unwrap();
        assert_abs_diff_eq!(
            Actual360.year_fraction(d1, d2),
            365.0 / 360.0,
            epsilon = 1e-15
        );
    }

    #[test]
    fn act365_year_fraction() {
        let d1 = parse_date("2022-08-22").unwrap();
        let d2 = parse_date("2023-08-22").unwrap();
        assert_abs_diff_eq!(Actual365Fixed.year_fraction(d1, d2), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn thirty360_full_year_is_one() {
        let d1 = parse_date("2022-01-15").unwrap();
        let d2 = parse_date("2023-01-15").unwrap();
        assert_abs_diff_eq!(Thirty360.year_fraction(d1, d2), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!(parse_day_counter("Act360").unwrap().name(), "Actual/360");
        assert_eq!(
            parse_day_counter("Actual365Fixed").unwrap().name(),
            "Actual/365 (Fixed)"
        );
        assert!(parse_day_counter("Act252").is_err());
    }
}
