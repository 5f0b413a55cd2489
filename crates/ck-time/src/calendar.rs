//! `Calendar` trait and concrete calendar implementations.
//!
//! A calendar knows which dates are business days and can adjust dates
//! according to a [`BusinessDayConvention`].

use ck_core::errors::{Error, Result};
use chrono::{Datelike, Duration};
use std::sync::Arc;

use crate::business_day_convention::BusinessDayConvention;
use crate::date::{self, advance, Date};
use crate::period::Period;

/// A financial calendar.
pub trait Calendar: std::fmt::Debug + Send + Sync {
    /// Human-readable name (e.g. `"Weekends Only"`).
    fn name(&self) -> &str;

    /// Return `true` if `date` is a business day in this calendar.
    fn is_business_day(&self, date: Date) -> bool;

    /// Return `true` if `date` is a holiday (non-business) day.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Return `true` if `date` is a weekend according to this calendar.
    fn is_weekend(&self, date: Date) -> bool {
        date::is_weekend(date)
    }

    /// Return the last business day of the month containing `date`.
    fn end_of_month(&self, date: Date) -> Date {
        self.adjust(date::end_of_month(date), BusinessDayConvention::Preceding)
    }

    /// Adjust `date` according to the given business-day convention.
    fn adjust(&self, mut date: Date, convention: BusinessDayConvention) -> Date {
        match convention {
            BusinessDayConvention::Unadjusted => date,
            BusinessDayConvention::Following => {
                while self.is_holiday(date) {
                    date += Duration::days(1);
                }
                date
            }
            BusinessDayConvention::ModifiedFollowing => {
                let adjusted = self.adjust(date, BusinessDayConvention::Following);
                if adjusted.month() != date.month() {
                    self.adjust(date, BusinessDayConvention::Preceding)
                } else {
                    adjusted
                }
            }
            BusinessDayConvention::Preceding => {
                while self.is_holiday(date) {
                    date -= Duration::days(1);
                }
                date
            }
            BusinessDayConvention::ModifiedPreceding => {
                let adjusted = self.adjust(date, BusinessDayConvention::Preceding);
                if adjusted.month() != date.month() {
                    self.adjust(date, BusinessDayConvention::Following)
                } else {
                    adjusted
                }
            }
        }
    }

    /// Advance `date` by `n` business days.
    fn advance_business_days(&self, mut date: Date, n: i32) -> Date {
        let step = Duration::days(if n >= 0 { 1 } else { -1 });
        let mut remaining = n.abs();
        while remaining > 0 {
            date += step;
            if self.is_business_day(date) {
                remaining -= 1;
            }
        }
        date
    }

    /// Advance `date` by a calendar period, then adjust the result.
    fn advance_period(
        &self,
        date: Date,
        period: Period,
        convention: BusinessDayConvention,
        end_of_month: bool,
    ) -> Result<Date> {
        let raw = advance(date, period)?;
        if end_of_month && date == date::end_of_month(date) {
            return Ok(self.end_of_month(raw));
        }
        Ok(self.adjust(raw, convention))
    }
}

/// A null calendar, treating every day as a business day.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCalendar;

impl Calendar for NullCalendar {
    fn name(&self) -> &str {
        "Null"
    }

    fn is_business_day(&self, _date: Date) -> bool {
        true
    }

    fn is_weekend(&self, _date: Date) -> bool {
        false
    }
}

/// A calendar with no holidays other than Saturdays and Sundays.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendsOnly;

impl Calendar for WeekendsOnly {
    fn name(&self) -> &str {
        "Weekends Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !self.is_weekend(date)
    }
}

/// Parse a calendar name from configuration.
pub fn parse_calendar(s: &str) -> Result<Arc<dyn Calendar>> {
    match s {
        "NullCalendar" | "Null" => Ok(Arc::new(NullCalendar)),
        "WeekendsOnly" => Ok(Arc::new(WeekendsOnly)),
        other => Err(Error::UnsupportedType(format!(
            "calendar '{other}' not supported"
        ))),
    }
}
