//! Rate helpers: the calibration instruments consumed by the bootstrap.
//!
//! A rate helper pairs a market quote with the conventions needed to
//! reprice the instrument from a curve. The bootstrapper adjusts the
//! discount factor at the helper's pillar date until
//! `implied_quote(curve) == quote()`.

use ck_core::errors::Result;
use ck_core::{DiscountFactor, Real, Time};
use ck_time::{Date, DayCounter};

use crate::interpolation::lerp;

/// Read-only view of the partially bootstrapped curve.
///
/// During the bootstrap the solver probes discount factors from the pillars
/// solved so far, including the trial value at the pillar currently being
/// solved. Log-discounts are interpolated linearly, so queries beyond the
/// last pillar continue its segment at a constant forward rate.
#[derive(Debug)]
pub struct BootstrapCurve<'a> {
    /// Reference date of the curve under construction.
    pub reference_date: Date,
    /// Day counter for date-to-time conversion.
    pub day_counter: &'a dyn DayCounter,
    /// Pillar times, first entry 0 for the reference date.
    pub times: &'a [Time],
    /// Log discount factors at each pillar, first entry 0.
    pub log_discounts: &'a [Real],
}

impl BootstrapCurve<'_> {
    /// Time from the reference date to `date`.
    pub fn time_from_reference(&self, date: Date) -> Time {
        self.day_counter.year_fraction(self.reference_date, date)
    }

    /// Discount factor at time `t`.
    pub fn discount(&self, t: Time) -> DiscountFactor {
        if t <= 0.0 {
            return 1.0;
        }
        lerp(self.times, self.log_discounts, t).exp()
    }

    /// Discount factor at a date.
    pub fn discount_date(&self, date: Date) -> DiscountFactor {
        self.discount(self.time_from_reference(date))
    }
}

/// A single market quote constraining the curve at one pillar date.
pub trait RateHelper: std::fmt::Debug + Send + Sync {
    /// The date up to which this helper constrains the curve.
    fn pillar_date(&self) -> Date;

    /// The current market quote.
    fn quote(&self) -> Real;

    /// The quote implied by the partially bootstrapped curve.
    ///
    /// Helpers that price off other curves read those through their own
    /// handles; only the curve being bootstrapped is seen through `curve`.
    fn implied_quote(&self, curve: &BootstrapCurve<'_>) -> Result<Real>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ck_time::{parse_date, Actual360};

    #[test]
    fn flat_log_discounts_give_flat_curve() {
        let ref_date = parse_date("2025-01-02").unwrap();
        // 5% continuous: log df = -0.05 t.
        let times = [0.0, 1.0, 2.0];
        let log_dfs = [0.0, -0.05, -0.10];
        let bc = BootstrapCurve {
            reference_date: ref_date,
            day_counter: &Actual360,
            times: &times,
            log_discounts: &log_dfs,
        };
        assert_abs_diff_eq!(bc.discount(0.0), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(bc.discount(1.5), (-0.075_f64).exp(), epsilon = 1e-12);
        // Past the last pillar the forward stays constant.
        assert_abs_diff_eq!(bc.discount(3.0), (-0.15_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn date_queries_use_day_counter() {
        let ref_date = parse_date("2025-01-02").unwrap();
        let times = [0.0, 1.0];
        let log_dfs = [0.0, -0.04];
        let bc = BootstrapCurve {
            reference_date: ref_date,
            day_counter: &Actual360,
            times: &times,
            log_discounts: &log_dfs,
        };
        let d = parse_date("2025-07-02").unwrap();
        let t = Actual360.year_fraction(ref_date, d);
        assert_abs_diff_eq!(bc.discount_date(d), (-0.04 * t).exp(), epsilon = 1e-12);
    }
}
