//! `Schedule` — the sequence of coupon dates for a swap leg.

use ck_core::errors::{Error, Result};

use crate::business_day_convention::BusinessDayConvention;
use crate::calendar::Calendar;
use crate::date::{advance, Date};
use crate::period::Period;

/// An ordered sequence of coupon/payment dates, first date included.
#[derive(Debug, Clone)]
pub struct Schedule {
    dates: Vec<Date>,
}

impl Schedule {
    /// All dates in the schedule, in ascending order.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Number of dates.
    pub fn size(&self) -> usize {
        self.dates.len()
    }

    /// The start (effective) date.
    pub fn start_date(&self) -> Date {
        self.dates[0]
    }

    /// The end (termination) date.
    pub fn end_date(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }

    /// Build a schedule from an explicit list of dates.
    pub fn from_dates(dates: Vec<Date>) -> Result<Self> {
        if dates.len() < 2 {
            return Err(Error::Validation(
                "a schedule needs at least two dates".into(),
            ));
        }
        if dates.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::Validation(
                "schedule dates must be strictly increasing".into(),
            ));
        }
        Ok(Self { dates })
    }

    /// Generate coupon dates forward from `start` to `end` every `tenor`,
    /// adjusting each date with `calendar` and `convention`. The last
    /// period is a short stub if the tenor does not divide evenly.
    pub fn generate_forward(
        start: Date,
        end: Date,
        tenor: Period,
        calendar: &dyn Calendar,
        convention: BusinessDayConvention,
    ) -> Result<Self> {
        if start >= end {
            return Err(Error::Validation(format!(
                "schedule start {start} must be before end {end}"
            )));
        }
        if tenor.is_zero() {
            return Self::from_dates(vec![
                calendar.adjust(start, convention),
                calendar.adjust(end, convention),
            ]);
        }

        let mut dates = vec![calendar.adjust(start, convention)];
        let mut n: i32 = 1;
        loop {
            let raw = advance(start, Period::new(n * tenor.length, tenor.unit))?;
            if raw >= end {
                break;
            }
            let adjusted = calendar.adjust(raw, convention);
            if adjusted > *dates.last().expect("schedule is non-empty") {
                dates.push(adjusted);
            }
            n += 1;
        }
        let terminal = calendar.adjust(end, convention);
        if terminal > *dates.last().expect("schedule is non-empty") {
            dates.push(terminal);
        }
        Self::from_dates(dates)
    }

    /// Generate a schedule whose end date is `start + length`.
    pub fn generate_forward_by_tenor(
        start: Date,
        length: Period,
        tenor: Period,
        calendar: &dyn Calendar,
        convention: BusinessDayConvention,
    ) -> Result<Self> {
        let end = advance(start, length)?;
        Self::generate_forward(start, end, tenor, calendar, convention)
    }
}

impl std::ops::Index<usize> for Schedule {
    type Output = Date;

    fn index(&self, i: usize) -> &Date {
        &self.dates[i]
    }
}
