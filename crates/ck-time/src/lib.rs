//! # ck-time
//!
//! Dates, periods, day counters, calendars, frequencies, business-day
//! conventions, interest-rate conversions, and payment schedules.
//!
//! Everything here is parseable from the strings that appear in market
//! configuration documents (`"2022-08-22"`, `"3M"`, `"Act360"`,
//! `"ModifiedFollowing"`, ...), which is the contract the curve engine
//! consumes this crate through.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Business-day adjustment conventions.
pub mod business_day_convention;

/// Calendars and date adjustment.
pub mod calendar;

/// The `Date` type and string parsing.
pub mod date;

/// Day-count conventions.
pub mod day_counter;

/// Payment / compounding frequencies.
pub mod frequency;

/// Interest rates with compounding conventions.
pub mod interest_rate;

/// Time spans (`"3M"`, `"2Y"`).
pub mod period;

/// Coupon / payment date schedules.
pub mod schedule;

pub use business_day_convention::BusinessDayConvention;
pub use calendar::{parse_calendar, Calendar, NullCalendar, WeekendsOnly};
pub use date::{parse_date, Date};
pub use day_counter::{parse_day_counter, Actual360, Actual365Fixed, DayCounter, Thirty360};
pub use frequency::Frequency;
pub use interest_rate::InterestRate;
pub use period::{Period, TimeUnit};
pub use schedule::Schedule;
