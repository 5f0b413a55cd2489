//! # ck-indexes
//!
//! Interest-rate indexes: term (Ibor-style) and overnight. An index
//! carries the conventions of its fixings and a relinkable handle to the
//! curve its forwards are projected from.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Currency codes.
pub mod currency;

pub use currency::Currency;

use ck_core::errors::{Error, Result};
use ck_termstructures::CurveHandle;
use ck_time::{BusinessDayConvention, Calendar, Date, DayCounter, Period};
use std::sync::Arc;

/// A term index (Libor/Euribor style): fixes today, accrues from the
/// value date to the maturity one tenor later.
#[derive(Debug, Clone)]
pub struct IborIndex {
    name: String,
    tenor: Period,
    fixing_days: u32,
    currency: Currency,
    calendar: Arc<dyn Calendar>,
    convention: BusinessDayConvention,
    end_of_month: bool,
    day_counter: Arc<dyn DayCounter>,
    forwarding: CurveHandle,
}

impl IborIndex {
    /// Create a term index.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        tenor: Period,
        fixing_days: u32,
        currency: Currency,
        calendar: Arc<dyn Calendar>,
        convention: BusinessDayConvention,
        end_of_month: bool,
        day_counter: Arc<dyn DayCounter>,
        forwarding: CurveHandle,
    ) -> Self {
        Self {
            name: name.into(),
            tenor,
            fixing_days,
            currency,
            calendar,
            convention,
            end_of_month,
            day_counter,
            forwarding,
        }
    }

    /// The index name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The index tenor.
    pub fn tenor(&self) -> Period {
        self.tenor
    }

    /// The index currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// The accrual day counter.
    pub fn day_counter(&self) -> &Arc<dyn DayCounter> {
        &self.day_counter
    }

    /// The fixing calendar.
    pub fn calendar(&self) -> &Arc<dyn Calendar> {
        &self.calendar
    }

    /// The roll convention for value and maturity dates.
    pub fn convention(&self) -> BusinessDayConvention {
        self.convention
    }

    /// The handle forwards are projected from.
    pub fn forwarding_handle(&self) -> &CurveHandle {
        &self.forwarding
    }

    /// Spot date for a fixing date.
    pub fn value_date(&self, fixing_date: Date) -> Date {
        self.calendar
            .advance_business_days(fixing_date, self.fixing_days as i32)
    }

    /// Maturity date one tenor after a value date.
    pub fn maturity_date(&self, value_date: Date) -> Result<Date> {
        self.calendar
            .advance_period(value_date, self.tenor, self.convention, self.end_of_month)
    }
}

/// An overnight index (SOFR, ESTR, ...): fixes daily with no tenor.
#[derive(Debug, Clone)]
pub struct OvernightIndex {
    name: String,
    fixing_days: u32,
    currency: Currency,
    calendar: Arc<dyn Calendar>,
    day_counter: Arc<dyn DayCounter>,
    forwarding: CurveHandle,
}

impl OvernightIndex {
    /// Create an overnight index.
    pub fn new(
        name: impl Into<String>,
        fixing_days: u32,
        currency: Currency,
        calendar: Arc<dyn Calendar>,
        day_counter: Arc<dyn DayCounter>,
        forwarding: CurveHandle,
    ) -> Self {
        Self {
            name: name.into(),
            fixing_days,
            currency,
            calendar,
            day_counter,
            forwarding,
        }
    }

    /// The index name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The index currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// The accrual day counter.
    pub fn day_counter(&self) -> &Arc<dyn DayCounter> {
        &self.day_counter
    }

    /// The fixing calendar.
    pub fn calendar(&self) -> &Arc<dyn Calendar> {
        &self.calendar
    }

    /// The handle forwards are projected from.
    pub fn forwarding_handle(&self) -> &CurveHandle {
        &self.forwarding
    }

    /// Spot date for a fixing date.
    pub fn value_date(&self, fixing_date: Date) -> Date {
        self.calendar
            .advance_business_days(fixing_date, self.fixing_days as i32)
    }
}

/// Either kind of index, as stored in the index registry.
#[derive(Debug, Clone)]
pub enum Index {
    /// A term index.
    Ibor(IborIndex),
    /// An overnight index.
    Overnight(OvernightIndex),
}

impl Index {
    /// The index name.
    pub fn name(&self) -> &str {
        match self {
            Index::Ibor(ix) => ix.name(),
            Index::Overnight(ix) => ix.name(),
        }
    }

    /// The handle forwards are projected from.
    pub fn forwarding_handle(&self) -> &CurveHandle {
        match self {
            Index::Ibor(ix) => ix.forwarding_handle(),
            Index::Overnight(ix) => ix.forwarding_handle(),
        }
    }

    /// This index as a term index.
    pub fn as_ibor(&self) -> Result<&IborIndex> {
        match self {
            Index::Ibor(ix) => Ok(ix),
            Index::Overnight(ix) => Err(Error::Validation(format!(
                "index '{}' is an overnight index, expected a term index",
                ix.name()
            ))),
        }
    }

    /// This index as an overnight index.
    pub fn as_overnight(&self) -> Result<&OvernightIndex> {
        match self {
            Index::Overnight(ix) => Ok(ix),
            Index::Ibor(ix) => Err(Error::Validation(format!(
                "index '{}' is a term index, expected an overnight index",
                ix.name()
            ))),
        }
    }
}
