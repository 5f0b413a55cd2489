//! Interest rates bundled with compounding and day-counting conventions.
//!
//! An `InterestRate` can compute compound and discount factors and, going
//! the other way, the rate implied by an observed compound factor. Query
//! results are expressed through this type so the caller's requested
//! conventions are honored.

use ck_core::errors::{Error, Result};
use ck_core::{Compounding, Rate, Real, Time};
use std::sync::Arc;

use crate::date::Date;
use crate::day_counter::DayCounter;
use crate::frequency::Frequency;

/// An interest rate with associated compounding and day-counting conventions.
#[derive(Debug, Clone)]
pub struct InterestRate {
    rate: Rate,
    dc: Arc<dyn DayCounter>,
    compounding: Compounding,
    frequency: Frequency,
}

impl InterestRate {
    /// Create a new interest rate.
    ///
    /// `rate` is the annual rate as a decimal (0.05 = 5%). `frequency` is
    /// only meaningful for `Compounded`.
    pub fn new(
        rate: Rate,
        dc: Arc<dyn DayCounter>,
        compounding: Compounding,
        frequency: Frequency,
    ) -> Self {
        Self {
            rate,
            dc,
            compounding,
            frequency,
        }
    }

    /// The rate value.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// The day counter.
    pub fn day_counter(&self) -> &dyn DayCounter {
        &*self.dc
    }

    /// The compounding convention.
    pub fn compounding(&self) -> Compounding {
        self.compounding
    }

    /// The compounding frequency.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Compound factor over `t` years.
    pub fn compound_factor_time(&self, t: Time) -> Result<Real> {
        if t < 0.0 {
            return Err(Error::Domain(format!("negative time {t} not allowed")));
        }
        if t == 0.0 {
            return Ok(1.0);
        }
        match self.compounding {
            Compounding::Simple => {
                let factor = 1.0 + self.rate * t;
                if factor <= 0.0 {
                    return Err(Error::Domain(format!(
                        "simple compound factor {factor} is not positive"
                    )));
                }
                Ok(factor)
            }
            Compounding::Compounded => {
                let f = freq_value(self.frequency);
                Ok((1.0 + self.rate / f).powf(f * t))
            }
            Compounding::Continuous => Ok((self.rate * t).exp()),
        }
    }

    /// Compound factor between two dates.
    pub fn compound_factor(&self, d1: Date, d2: Date) -> Result<Real> {
        self.compound_factor_time(self.dc.year_fraction(d1, d2))
    }

    /// Discount factor over `t` years (the reciprocal of the compound factor).
    pub fn discount_factor_time(&self, t: Time) -> Result<Real> {
        Ok(1.0 / self.compound_factor_time(t)?)
    }

    /// Discount factor between two dates.
    pub fn discount_factor(&self, d1: Date, d2: Date) -> Result<Real> {
        Ok(1.0 / self.compound_factor(d1, d2)?)
    }

    /// The rate implied by a compound factor observed over `t` years,
    /// annualized under the given conventions.
    pub fn implied_rate(
        compound: Real,
        dc: Arc<dyn DayCounter>,
        comp: Compounding,
        freq: Frequency,
        t: Time,
    ) -> Result<InterestRate> {
        if compound <= 0.0 {
            return Err(Error::Domain(format!(
                "compound factor {compound} must be positive"
            )));
        }
        if t <= 0.0 {
            return Err(Error::Domain(format!(
                "implied rate needs a positive time, got {t}"
            )));
        }
        let r = match comp {
            Compounding::Simple => (compound - 1.0) / t,
            Compounding::Compounded => {
                let f = freq_value(freq);
                (compound.powf(1.0 / (f * t)) - 1.0) * f
            }
            Compounding::Continuous => compound.ln() / t,
        };
        Ok(InterestRate {
            rate: r,
            dc,
            compounding: comp,
            frequency: freq,
        })
    }
}

fn freq_value(freq: Frequency) -> Real {
    match freq {
        Frequency::NoFrequency | Frequency::Once => 1.0,
        _ => freq.periods_per_year().unwrap_or(1) as Real,
    }
}

impl std::fmt::Display for InterestRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.4}% {} {} {}",
            self.rate * 100.0,
            self.compounding,
            self.frequency,
            self.dc.name(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day_counter::Actual365Fixed;
    use approx::assert_abs_diff_eq;

    fn act365() -> Arc<dyn DayCounter> {
        Arc::new(Actual365Fixed)
    }

    #[test]
    fn simple_compound_factor() {
        let ir = InterestRate::new(0.05, act365(), Compounding::Simple, Frequency::Annual);
        assert_abs_diff_eq!(ir.compound_factor_time(1.0).unwrap(), 1.05, epsilon = 1e-12);
        assert_abs_diff_eq!(ir.compound_factor_time(2.0).unwrap(), 1.10, epsilon = 1e-12);
    }

    #[test]
    fn compounded_semiannual() {
        let ir = InterestRate::new(
            0.10,
            act365(),
            Compounding::Compounded,
            Frequency::Semiannual,
        );
        // (1 + 0.10/2)^(2*1) = 1.1025
        assert_abs_diff_eq!(
            ir.compound_factor_time(1.0).unwrap(),
            1.1025,
            epsilon = 1e-12
        );
    }

    #[test]
    fn continuous_factor() {
        let ir = InterestRate::new(
            0.05,
            act365(),
            Compounding::Continuous,
            Frequency::NoFrequency,
        );
        assert_abs_diff_eq!(
            ir.compound_factor_time(1.0).unwrap(),
            (0.05_f64).exp(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn discount_is_reciprocal() {
        let ir = InterestRate::new(0.05, act365(), Compounding::Simple, Frequency::Annual);
        assert_abs_diff_eq!(
            ir.discount_factor_time(1.0).unwrap(),
            1.0 / 1.05,
            epsilon = 1e-12
        );
    }

    #[test]
    fn implied_rate_simple() {
        let ir = InterestRate::implied_rate(
            1.10,
            act365(),
            Compounding::Simple,
            Frequency::Annual,
            2.0,
        )
        .unwrap();
        assert_abs_diff_eq!(ir.rate(), 0.05, epsilon = 1e-12);
    }

    #[test]
    fn implied_rate_continuous_roundtrip() {
        let compound = (0.05_f64 * 3.0).exp();
        let ir = InterestRate::implied_rate(
            compound,
            act365(),
            Compounding::Continuous,
            Frequency::NoFrequency,
            3.0,
        )
        .unwrap();
        assert_abs_diff_eq!(ir.rate(), 0.05, epsilon = 1e-12);
    }

    mod roundtrip {
        use super::*;
        use proptest::prelude::*;

        fn conventions() -> impl Strategy<Value = (Compounding, Frequency)> {
            prop_oneof![
                Just((Compounding::Simple, Frequency::Annual)),
                Just((Compounding::Compounded, Frequency::Annual)),
                Just((Compounding::Compounded, Frequency::Semiannual)),
                Just((Compounding::Compounded, Frequency::Quarterly)),
                Just((Compounding::Continuous, Frequency::NoFrequency)),
            ]
        }

        proptest! {
            #[test]
            fn implied_rate_inverts_compound_factor(
                rate in 0.001f64..0.20,
                t in 0.1f64..30.0,
                (comp, freq) in conventions(),
            ) {
                let ir = InterestRate::new(rate, act365(), comp, freq);
                let factor = ir.compound_factor_time(t).unwrap();
                let implied =
                    InterestRate::implied_rate(factor, act365(), comp, freq, t).unwrap();
                prop_assert!((implied.rate() - rate).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn negative_time_is_domain_error() {
        let ir = InterestRate::new(0.05, act365(), Compounding::Simple, Frequency::Annual);
        assert!(ir.compound_factor_time(-1.0).is_err());
    }

    #[test]
    fn zero_time_compounds_to_one() {
        let ir = InterestRate::new(0.10, act365(), Compounding::Continuous, Frequency::Annual);
        assert_abs_diff_eq!(ir.compound_factor_time(0.0).unwrap(), 1.0, epsilon = 1e-15);
    }
}
