//! `FlatForward` — a yield term structure with a constant forward rate.

use ck_core::errors::Result;
use ck_core::{Compounding, DiscountFactor, Rate, Time};
use ck_time::{Date, DayCounter, Frequency, InterestRate};
use std::sync::Arc;

use crate::term_structure::TermStructure;
use crate::yield_term_structure::YieldTermStructure;

/// The simplest yield curve: one continuously-compounded rate for all
/// maturities, `P(t) = exp(-r t)`.
#[derive(Debug)]
pub struct FlatForward {
    reference_date: Date,
    day_counter: Arc<dyn DayCounter>,
    /// The continuously-compounded equivalent of the supplied rate.
    rate: Rate,
    extrapolate: bool,
}

impl FlatForward {
    /// Create a flat-forward curve.
    ///
    /// The supplied rate is converted to its continuously-compounded
    /// equivalent via the compound factor over one year.
    pub fn new(
        reference_date: Date,
        rate: Rate,
        day_counter: Arc<dyn DayCounter>,
        compounding: Compounding,
        frequency: Frequency,
    ) -> Result<Self> {
        let ir = InterestRate::new(rate, Arc::clone(&day_counter), compounding, frequency);
        let continuous_rate = ir.compound_factor_time(1.0)?.ln();
        Ok(Self {
            reference_date,
            day_counter,
            rate: continuous_rate,
            extrapolate: false,
        })
    }

    /// Allow queries arbitrarily far in the future.
    pub fn with_extrapolation(mut self, flag: bool) -> Self {
        self.extrapolate = flag;
        self
    }

    /// The continuously-compounded flat rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }
}

impl TermStructure for FlatForward {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn day_counter(&self) -> &dyn DayCounter {
        &*self.day_counter
    }

    fn max_date(&self) -> Date {
        Date::MAX
    }
}

impl YieldTermStructure for FlatForward {
    fn discount_impl(&self, t: Time) -> Result<DiscountFactor> {
        Ok((-self.rate * t).exp())
    }

    fn allows_extrapolation(&self) -> bool {
        self.extrapolate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ck_time::{parse_date, Actual360, Actual365Fixed};

    fn act365() -> Arc<dyn DayCounter> {
        Arc::new(Actual365Fixed)
    }

    fn continuous(rate: Rate) -> FlatForward {
        FlatForward::new(
            parse_date("2025-01-02").unwrap(),
            rate,
            act365(),
            Compounding::Continuous,
            Frequency::NoFrequency,
        )
        .unwrap()
    }

    #[test]
    fn discounts_at_flat_rate() {
        let curve = continuous(0.05);
        assert_abs_diff_eq!(curve.discount(0.0).unwrap(), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(
            curve.discount(1.0).unwrap(),
            (-0.05_f64).exp(),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            curve.discount(10.0).unwrap(),
            (-0.5_f64).exp(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn annual_compounding_converts_to_continuous() {
        let curve = FlatForward::new(
            parse_date("2025-01-02").unwrap(),
            0.05,
            act365(),
            Compounding::Compounded,
            Frequency::Annual,
        )
        .unwrap();
        assert_abs_diff_eq!(curve.rate(), (1.05_f64).ln(), epsilon = 1e-12);
    }

    #[test]
    fn zero_rate_round_trips() {
        let curve = continuous(0.05);
        let d = parse_date("2026-01-02").unwrap();
        let zr = curve
            .zero_rate(d, act365(), Compounding::Continuous, Frequency::NoFrequency)
            .unwrap();
        assert_abs_diff_eq!(zr.rate(), 0.05, epsilon = 1e-10);
    }

    #[test]
    fn forward_rate_is_flat() {
        let curve = continuous(0.04);
        let d1 = parse_date("2026-01-02").unwrap();
        let d2 = parse_date("2027-01-02").unwrap();
        let fwd = curve
            .forward_rate(
                d1,
                d2,
                act365(),
                Compounding::Continuous,
                Frequency::NoFrequency,
            )
            .unwrap();
        assert_abs_diff_eq!(fwd.rate(), 0.04, epsilon = 1e-10);
    }

    #[test]
    fn zero_rate_honors_the_requested_day_count() {
        let curve = continuous(0.05);
        // 365 days out: the curve's Act365 time is exactly 1.0.
        let d = parse_date("2026-01-02").unwrap();
        let zr = curve
            .zero_rate(d, Arc::new(Actual360), Compounding::Simple, Frequency::Annual)
            .unwrap();
        // The discount factor comes from the curve's own day count; the
        // requested Act360 counter only annualizes it.
        let t360 = 365.0 / 360.0;
        assert_abs_diff_eq!(zr.rate(), (0.05_f64.exp() - 1.0) / t360, epsilon = 1e-12);
    }

    #[test]
    fn forward_rate_honors_the_requested_day_count() {
        let curve = continuous(0.05);
        let d1 = parse_date("2026-01-02").unwrap();
        let d2 = parse_date("2027-01-02").unwrap();
        let fwd = curve
            .forward_rate(
                d1,
                d2,
                Arc::new(Actual360),
                Compounding::Continuous,
                Frequency::NoFrequency,
            )
            .unwrap();
        // compound = exp(0.05 * 1y Act365), annualized over 365/360.
        assert_abs_diff_eq!(fwd.rate(), 0.05 * 360.0 / 365.0, epsilon = 1e-12);
    }

    #[test]
    fn rejects_dates_before_reference() {
        let curve = continuous(0.05);
        assert!(curve
            .discount_date(parse_date("2024-12-31").unwrap())
            .is_err());
    }
}
