//! The `Date` type.
//!
//! Dates are `chrono::NaiveDate`; this module adds the string-parsing
//! contract used by configuration documents and a couple of arithmetic
//! helpers that the rest of the workspace needs.

use ck_core::errors::{Error, Result};
use chrono::{Datelike, Months, NaiveDate};

use crate::period::{Period, TimeUnit};

/// A calendar date (no time component).
pub type Date = NaiveDate;

/// Parse an ISO `yyyy-mm-dd` date string.
pub fn parse_date(s: &str) -> Result<Date> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| Error::Validation(format!("invalid date '{s}', expected yyyy-mm-dd")))
}

/// Advance `date` by a (possibly negative) period.
pub fn advance(date: Date, period: Period) -> Result<Date> {
    let n = period.length;
    let out = match period.unit {
        TimeUnit::Days => date.checked_add_signed(chrono::Duration::days(n as i64)),
        TimeUnit::Weeks => date.checked_add_signed(chrono::Duration::days(7 * n as i64)),
        TimeUnit::Months => add_months(date, n),
        TimeUnit::Years => add_months(date, 12 * n),
    };
    out.ok_or_else(|| Error::Domain(format!("date {date} + {period} out of range")))
}

fn add_months(date: Date, n: i32) -> Option<Date> {
    if n >= 0 {
        date.checked_add_months(Months::new(n as u32))
    } else {
        date.checked_sub_months(Months::new((-n) as u32))
    }
}

/// Actual number of days from `d1` to `d2` (negative if `d2 < d1`).
pub fn days_between(d1: Date, d2: Date) -> i64 {
    (d2 - d1).num_days()
}

/// Return `true` if `date` falls on a Saturday or Sunday.
pub fn is_weekend(date: Date) -> bool {
    matches!(
        date.weekday(),
        chrono::Weekday::Sat | chrono::Weekday::Sun
    )
}

/// The last calendar day of the month containing `date`.
pub fn end_of_month(date: Date) -> Date {
    let first_of_next = add_months(date.with_day(1).expect("day 1 is valid"), 1)
        .expect("date in range");
    first_of_next - chrono::Duration::days(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        let d = parse_date("2022-08-22").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2022, 8, 22).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_date("22/08/2022").is_err());
        assert!(parse_date("not a date").is_err());
    }

    #[test]
    fn advances_by_months_clamping_day() {
        let d = parse_date("2023-01-31").unwrap();
        let out = advance(d, "1M".parse().unwrap()).unwrap();
        assert_eq!(out, parse_date("2023-02-28").unwrap());
    }

    #[test]
    fn advances_by_years_and_days() {
        let d = parse_date("2022-08-22").unwrap();
        assert_eq!(
            advance(d, "2Y".parse().unwrap()).unwrap(),
            parse_date("2024-08-22").unwrap()
        );
        assert_eq!(
            advance(d, "10D".parse().unwrap()).unwrap(),
            parse_date("2022-09-01").unwrap()
        );
    }

    #[test]
    fn end_of_month_handles_leap_years() {
        assert_eq!(
            end_of_month(parse_date("2024-02-10").unwrap()),
            parse_date("2024-02-29").unwrap()
        );
    }
}
