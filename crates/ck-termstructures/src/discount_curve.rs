//! `DiscountCurve` — a yield term structure on explicit discount factors.

use ck_core::errors::{Error, Result};
use ck_core::{DiscountFactor, Time};
use ck_time::{Date, DayCounter};
use std::sync::Arc;

use crate::interpolation::LogLinearInterpolation;
use crate::term_structure::TermStructure;
use crate::yield_term_structure::YieldTermStructure;

/// A curve defined by `(date, discount factor)` nodes, interpolated
/// log-linearly so forwards are piecewise constant between nodes.
#[derive(Debug)]
pub struct DiscountCurve {
    reference_date: Date,
    day_counter: Arc<dyn DayCounter>,
    dates: Vec<Date>,
    discounts: Vec<DiscountFactor>,
    interp: LogLinearInterpolation,
    extrapolate: bool,
}

impl DiscountCurve {
    /// Build from ascending dates and their discount factors.
    ///
    /// The first node must be the reference date with a discount factor
    /// of exactly 1.0.
    pub fn new(
        dates: Vec<Date>,
        discounts: Vec<DiscountFactor>,
        day_counter: Arc<dyn DayCounter>,
    ) -> Result<Self> {
        if dates.len() < 2 {
            return Err(Error::Validation(
                "a discount curve needs at least two nodes".into(),
            ));
        }
        if dates.len() != discounts.len() {
            return Err(Error::Validation(format!(
                "got {} dates but {} discount factors",
                dates.len(),
                discounts.len()
            )));
        }
        if (discounts[0] - 1.0).abs() > 1e-12 {
            return Err(Error::Validation(format!(
                "the discount factor at the reference date must be 1.0, got {}",
                discounts[0]
            )));
        }
        if dates.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::Validation(
                "discount curve dates must be strictly increasing".into(),
            ));
        }

        let reference_date = dates[0];
        let times: Vec<Time> = dates
            .iter()
            .map(|&d| day_counter.year_fraction(reference_date, d))
            .collect();
        let interp = LogLinearInterpolation::new(&times, &discounts)?;

        Ok(Self {
            reference_date,
            day_counter,
            dates,
            discounts,
            interp,
            extrapolate: false,
        })
    }

    /// Allow queries past the last node.
    pub fn with_extrapolation(mut self, flag: bool) -> Self {
        self.extrapolate = flag;
        self
    }

    /// The node dates.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }
}

impl TermStructure for DiscountCurve {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn day_counter(&self) -> &dyn DayCounter {
        &*self.day_counter
    }

    fn max_date(&self) -> Date {
        *self.dates.last().expect("at least two nodes")
    }
}

impl YieldTermStructure for DiscountCurve {
    fn discount_impl(&self, t: Time) -> Result<DiscountFactor> {
        if t <= 0.0 {
            return Ok(1.0);
        }
        Ok(self.interp.value(t))
    }

    fn allows_extrapolation(&self) -> bool {
        self.extrapolate
    }

    fn nodes(&self) -> Option<Vec<(Date, DiscountFactor)>> {
        Some(self.dates.iter().copied().zip(self.discounts.clone()).collect())
    }
}
