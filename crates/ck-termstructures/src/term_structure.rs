//! Base trait shared by every term structure.

use ck_core::Time;
use ck_time::{Date, DayCounter};

/// Common interface of all term structures: a reference date from which
/// time is measured, a day counter for date-to-time conversion, and the
/// furthest date the structure covers.
pub trait TermStructure: std::fmt::Debug + Send + Sync {
    /// The date at which discount = 1.0 and from which time is measured.
    fn reference_date(&self) -> Date;

    /// The day counter used for date to time-fraction conversions.
    fn day_counter(&self) -> &dyn DayCounter;

    /// The latest date covered by this structure.
    fn max_date(&self) -> Date;

    /// The latest time covered by this structure.
    fn max_time(&self) -> Time {
        self.time_from_reference(self.max_date())
    }

    /// Convert a date to a year fraction relative to the reference date.
    fn time_from_reference(&self, date: Date) -> Time {
        self.day_counter()
            .year_fraction(self.reference_date(), date)
    }
}
