//! The [`YieldTermStructure`] trait.
//!
//! A yield term structure answers three questions: the discount factor to a
//! date, the zero rate to a date, and the forward rate between two dates.
//! Rates are returned as [`InterestRate`]s under the caller's day-count,
//! compounding, and frequency conventions.

use ck_core::errors::{Error, Result};
use ck_core::{Compounding, DiscountFactor, RelinkableHandle, Time};
use ck_time::{Date, DayCounter, Frequency, InterestRate};
use std::sync::Arc;

use crate::term_structure::TermStructure;

/// A relinkable reference to a yield curve.
///
/// Handles can be registered before the curve they point to exists; linking
/// the curve later is visible through every clone of the handle.
pub type CurveHandle = RelinkableHandle<dyn YieldTermStructure>;

/// Time step used when a rate is requested over a degenerate interval.
const DT: Time = 1.0e-4;

/// A yield (interest-rate) term structure.
///
/// Implementors provide [`discount_impl`](YieldTermStructure::discount_impl);
/// the zero-rate and forward-rate queries are derived from it.
pub trait YieldTermStructure: TermStructure {
    /// Discount factor at time `t`, expressed in the curve's own day count.
    ///
    /// Called after range checks; `t` is non-negative.
    fn discount_impl(&self, t: Time) -> Result<DiscountFactor>;

    /// Whether queries past the last pillar are allowed.
    fn allows_extrapolation(&self) -> bool {
        false
    }

    /// Suspend recalculation while quotes are being updated in bulk.
    fn freeze(&self) {}

    /// Resume recalculation. The next query sees the updated quotes.
    fn unfreeze(&self) {}

    /// The curve's `(pillar date, discount factor)` nodes, if it has any.
    fn nodes(&self) -> Option<Vec<(Date, DiscountFactor)>> {
        None
    }

    /// Check that `date` is inside the curve's usable range.
    fn check_range(&self, date: Date) -> Result<()> {
        if date < self.reference_date() {
            return Err(Error::Domain(format!(
                "date {date} is before the curve reference date {}",
                self.reference_date()
            )));
        }
        if date > self.max_date() && !self.allows_extrapolation() {
            return Err(Error::Domain(format!(
                "date {date} is past the last pillar {} and extrapolation is not enabled",
                self.max_date()
            )));
        }
        Ok(())
    }

    /// Discount factor for a time (in the curve's own day count).
    fn discount(&self, t: Time) -> Result<DiscountFactor> {
        if t < 0.0 {
            return Err(Error::Domain(format!("negative time {t} not allowed")));
        }
        if t > self.max_time() && !self.allows_extrapolation() {
            return Err(Error::Domain(format!(
                "time {t} is past the curve end {} and extrapolation is not enabled",
                self.max_time()
            )));
        }
        self.discount_impl(t)
    }

    /// Discount factor for a date.
    fn discount_date(&self, date: Date) -> Result<DiscountFactor> {
        self.check_range(date)?;
        self.discount_impl(self.time_from_reference(date))
    }

    /// Zero rate from the reference date to `date`, expressed under the
    /// requested conventions.
    ///
    /// The discount factor is looked up by date, in the curve's own day
    /// count; the requested day counter only annualizes the result.
    fn zero_rate(
        &self,
        date: Date,
        dc: Arc<dyn DayCounter>,
        comp: Compounding,
        freq: Frequency,
    ) -> Result<InterestRate> {
        self.check_range(date)?;
        let compound = 1.0 / self.discount_impl(self.time_from_reference(date).max(DT))?;
        let t = dc.year_fraction(self.reference_date(), date).max(DT);
        InterestRate::implied_rate(compound, dc, comp, freq, t)
    }

    /// Forward rate between two dates, expressed under the requested
    /// conventions. Coincident dates give the instantaneous forward.
    ///
    /// As with [`zero_rate`](YieldTermStructure::zero_rate), the discount
    /// factors are taken at the dates under the curve's own day count and
    /// the requested day counter only annualizes.
    fn forward_rate(
        &self,
        d1: Date,
        d2: Date,
        dc: Arc<dyn DayCounter>,
        comp: Compounding,
        freq: Frequency,
    ) -> Result<InterestRate> {
        if d2 < d1 {
            return Err(Error::Domain(format!(
                "forward rate end date {d2} is before start date {d1}"
            )));
        }
        self.check_range(d1)?;
        self.check_range(d2)?;
        let t1 = self.time_from_reference(d1);
        let mut t2 = self.time_from_reference(d2);
        let mut tau = dc.year_fraction(d1, d2);
        if t2 - t1 < DT {
            t2 = t1 + DT;
            tau = DT;
        }
        let compound = self.discount_impl(t1)? / self.discount_impl(t2)?;
        InterestRate::implied_rate(compound, dc, comp, freq, tau.max(DT))
    }
}
