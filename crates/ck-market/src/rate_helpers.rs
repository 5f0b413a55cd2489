//! Concrete calibration instruments.
//!
//! Each helper prices its instrument off the curve being bootstrapped,
//! reading any *other* curve through a [`CurveHandle`]. A handle that is
//! still empty resolves to the in-progress curve itself, which is how a
//! self-referential configuration (an instrument in curve X discounting
//! against curve X) prices without recursion.

use std::sync::Arc;

use ck_core::errors::Result;
use ck_core::{Rate, Real, Spread};
use ck_quotes::QuoteHandle;
use ck_termstructures::{BootstrapCurve, CurveHandle, RateHelper};
use ck_time::{Date, DayCounter};

/// Discount factor at `date`, from the handle's curve if it is linked,
/// otherwise from the curve under construction.
fn df(handle: &CurveHandle, bc: &BootstrapCurve<'_>, date: Date) -> Result<Real> {
    match handle.current() {
        Some(curve) => curve.discount_date(date),
        None => Ok(bc.discount_date(date)),
    }
}

/// PV of a unit-notional floating leg at zero spread, and its annuity.
///
/// `periods` holds the n+1 accrual dates, `pay_dates` the n payment
/// dates. Forwards are projected period by period off `forwarding`.
fn float_leg(
    periods: &[Date],
    pay_dates: &[Date],
    dc: &dyn DayCounter,
    forwarding: &CurveHandle,
    discounting: &CurveHandle,
    bc: &BootstrapCurve<'_>,
) -> Result<(Real, Real)> {
    let mut pv = 0.0;
    let mut annuity = 0.0;
    for (w, &pay) in periods.windows(2).zip(pay_dates) {
        let tau = dc.year_fraction(w[0], w[1]);
        let fwd = (df(forwarding, bc, w[0])? / df(forwarding, bc, w[1])? - 1.0) / tau;
        let d = df(discounting, bc, pay)?;
        pv += fwd * tau * d;
        annuity += tau * d;
    }
    Ok((pv, annuity))
}

/// Annuity of a unit-notional fixed leg: sum of year fractions times
/// the payment-date discount factors.
fn annuity(
    periods: &[Date],
    pay_dates: &[Date],
    dc: &dyn DayCounter,
    discounting: &CurveHandle,
    bc: &BootstrapCurve<'_>,
) -> Result<Real> {
    let mut total = 0.0;
    for (w, &pay) in periods.windows(2).zip(pay_dates) {
        total += dc.year_fraction(w[0], w[1]) * df(discounting, bc, pay)?;
    }
    Ok(total)
}

/// PV of a floating leg with final and initial notional exchange, at
/// spread `spread`. Used by the cross-currency helpers.
fn float_leg_with_notionals(
    periods: &[Date],
    dc: &dyn DayCounter,
    forwarding: &CurveHandle,
    discounting: &CurveHandle,
    spread: Spread,
    bc: &BootstrapCurve<'_>,
) -> Result<Real> {
    let pay_dates = &periods[1..];
    let (pv0, ann) = float_leg(periods, pay_dates, dc, forwarding, discounting, bc)?;
    let start = periods[0];
    let end = periods[periods.len() - 1];
    Ok(pv0 + spread * ann - df(discounting, bc, start)? + df(discounting, bc, end)?)
}

// ── Deposit ───────────────────────────────────────────────────────────────────

/// An interbank deposit: one simple-rate accrual from the value date to
/// maturity, priced entirely off the curve under construction.
#[derive(Debug)]
pub struct DepositHelper {
    pub(crate) quote: QuoteHandle,
    pub(crate) day_counter: Arc<dyn DayCounter>,
    pub(crate) start: Date,
    pub(crate) end: Date,
}

impl RateHelper for DepositHelper {
    fn pillar_date(&self) -> Date {
        self.end
    }

    fn quote(&self) -> Real {
        self.quote.value()
    }

    fn implied_quote(&self, bc: &BootstrapCurve<'_>) -> Result<Real> {
        let tau = self.day_counter.year_fraction(self.start, self.end);
        let ratio = bc.discount_date(self.start) / bc.discount_date(self.end);
        Ok((ratio - 1.0) / tau)
    }
}

// ── FX swap ───────────────────────────────────────────────────────────────────

/// An FX swap quoted in forward points over the spot rate.
///
/// Covered interest parity prices the forward off two discount curves:
/// the collateral curve and the curve under construction. Which of the
/// two discounts the base currency is set by `base_collateral`.
#[derive(Debug)]
pub struct FxSwapHelper {
    pub(crate) points: QuoteHandle,
    pub(crate) spot: QuoteHandle,
    pub(crate) start: Date,
    pub(crate) end: Date,
    pub(crate) collateral: CurveHandle,
    pub(crate) base_collateral: bool,
}

impl RateHelper for FxSwapHelper {
    fn pillar_date(&self) -> Date {
        self.end
    }

    fn quote(&self) -> Real {
        self.points.value()
    }

    fn implied_quote(&self, bc: &BootstrapCurve<'_>) -> Result<Real> {
        let coll = df(&self.collateral, bc, self.end)? / df(&self.collateral, bc, self.start)?;
        let own = bc.discount_date(self.end) / bc.discount_date(self.start);
        let (base, quote_ccy) = if self.base_collateral {
            (coll, own)
        } else {
            (own, coll)
        };
        let spot = self.spot.value();
        Ok(spot * base / quote_ccy - spot)
    }
}

// ── Fixed-rate bond ───────────────────────────────────────────────────────────

/// A fixed-rate bond constraining the curve through its clean price.
///
/// The market quote arrives as a yield; the factory converts it to a
/// clean price once, at construction, and the bootstrap reprices the
/// bond's cashflows against that target.
#[derive(Debug)]
pub struct BondHelper {
    /// Target clean price per 100 face, derived from the quoted yield.
    pub(crate) clean_price: Real,
    pub(crate) coupon: Rate,
    /// Coupon dates, first entry the accrual start.
    pub(crate) schedule: Vec<Date>,
    pub(crate) settlement: Date,
    pub(crate) coupon_day_counter: Arc<dyn DayCounter>,
    /// Coupon accrued between the last coupon date and settlement,
    /// per unit face.
    pub(crate) accrued: Real,
}

impl BondHelper {
    /// Clean price per 100 face implied by discounting every cashflow
    /// after settlement with `discount`, then deducting accrued.
    pub(crate) fn clean_price_with(
        schedule: &[Date],
        coupon: Rate,
        settlement: Date,
        dc: &dyn DayCounter,
        accrued: Real,
        mut discount: impl FnMut(Date) -> Result<Real>,
    ) -> Result<Real> {
        let mut npv = 0.0;
        for w in schedule.windows(2) {
            if w[1] <= settlement {
                continue;
            }
            npv += coupon * dc.year_fraction(w[0], w[1]) * discount(w[1])?;
        }
        let maturity = schedule[schedule.len() - 1];
        npv += discount(maturity)?;
        Ok(100.0 * (npv - accrued))
    }

    /// Accrued coupon per unit face at `settlement`.
    pub(crate) fn accrued_at(
        schedule: &[Date],
        coupon: Rate,
        settlement: Date,
        dc: &dyn DayCounter,
    ) -> Real {
        for w in schedule.windows(2) {
            if w[0] <= settlement && settlement < w[1] {
                return coupon * dc.year_fraction(w[0], settlement);
            }
        }
        0.0
    }
}

impl RateHelper for BondHelper {
    fn pillar_date(&self) -> Date {
        self.schedule[self.schedule.len() - 1]
    }

    fn quote(&self) -> Real {
        self.clean_price
    }

    fn implied_quote(&self, bc: &BootstrapCurve<'_>) -> Result<Real> {
        let df_settlement = bc.discount_date(self.settlement);
        Self::clean_price_with(
            &self.schedule,
            self.coupon,
            self.settlement,
            &*self.coupon_day_counter,
            self.accrued,
            |date| Ok(bc.discount_date(date) / df_settlement),
        )
    }
}

// ── Vanilla swap ──────────────────────────────────────────────────────────────

/// A fixed-vs-term-float swap quoted in the par fixed rate.
#[derive(Debug)]
pub struct SwapHelper {
    pub(crate) quote: QuoteHandle,
    pub(crate) spread: Spread,
    pub(crate) fixed_schedule: Vec<Date>,
    pub(crate) float_schedule: Vec<Date>,
    pub(crate) fixed_day_counter: Arc<dyn DayCounter>,
    pub(crate) float_day_counter: Arc<dyn DayCounter>,
    pub(crate) forwarding: CurveHandle,
    pub(crate) discounting: CurveHandle,
}

impl RateHelper for SwapHelper {
    fn pillar_date(&self) -> Date {
        self.fixed_schedule[self.fixed_schedule.len() - 1]
    }

    fn quote(&self) -> Real {
        self.quote.value()
    }

    fn implied_quote(&self, bc: &BootstrapCurve<'_>) -> Result<Real> {
        let (float_pv, float_annuity) = float_leg(
            &self.float_schedule,
            &self.float_schedule[1..],
            &*self.float_day_counter,
            &self.forwarding,
            &self.discounting,
            bc,
        )?;
        let fixed_annuity = annuity(
            &self.fixed_schedule,
            &self.fixed_schedule[1..],
            &*self.fixed_day_counter,
            &self.discounting,
            bc,
        )?;
        Ok((float_pv + self.spread * float_annuity) / fixed_annuity)
    }
}

// ── Overnight-indexed swap ────────────────────────────────────────────────────

/// A fixed-vs-overnight-compounded swap quoted in the par fixed rate.
///
/// The compounded floating coupon over a period telescopes into the
/// ratio of the forwarding discount factors at its endpoints.
#[derive(Debug)]
pub struct OisHelper {
    pub(crate) quote: QuoteHandle,
    pub(crate) spread: Spread,
    /// Accrual dates shared by both legs.
    pub(crate) schedule: Vec<Date>,
    /// Payment date per period, the period end shifted by the lag.
    pub(crate) pay_dates: Vec<Date>,
    pub(crate) fixed_day_counter: Arc<dyn DayCounter>,
    pub(crate) float_day_counter: Arc<dyn DayCounter>,
    pub(crate) forwarding: CurveHandle,
    pub(crate) discounting: CurveHandle,
}

impl RateHelper for OisHelper {
    fn pillar_date(&self) -> Date {
        self.pay_dates[self.pay_dates.len() - 1]
    }

    fn quote(&self) -> Real {
        self.quote.value()
    }

    fn implied_quote(&self, bc: &BootstrapCurve<'_>) -> Result<Real> {
        let mut float_pv = 0.0;
        let mut fixed_annuity = 0.0;
        for (w, &pay) in self.schedule.windows(2).zip(&self.pay_dates) {
            let compounded =
                df(&self.forwarding, bc, w[0])? / df(&self.forwarding, bc, w[1])? - 1.0;
            let tau_float = self.float_day_counter.year_fraction(w[0], w[1]);
            let d = df(&self.discounting, bc, pay)?;
            float_pv += (compounded + self.spread * tau_float) * d;
            fixed_annuity += self.fixed_day_counter.year_fraction(w[0], w[1]) * d;
        }
        Ok(float_pv / fixed_annuity)
    }
}

// ── Cross-currency fix-float swap ─────────────────────────────────────────────

/// A cross-currency fixed-vs-float swap quoted in the par fixed rate.
///
/// The fixed leg (with notional exchange) is discounted on the curve
/// under construction; the floating leg on its own discounting curve.
/// With both notionals struck at the spot rate the FX conversion drops
/// out of the par-rate condition.
#[derive(Debug)]
pub struct XccyHelper {
    pub(crate) quote: QuoteHandle,
    pub(crate) spread: Spread,
    pub(crate) fixed_schedule: Vec<Date>,
    pub(crate) float_schedule: Vec<Date>,
    pub(crate) fixed_day_counter: Arc<dyn DayCounter>,
    pub(crate) float_day_counter: Arc<dyn DayCounter>,
    pub(crate) forwarding: CurveHandle,
    pub(crate) float_discounting: CurveHandle,
}

impl RateHelper for XccyHelper {
    fn pillar_date(&self) -> Date {
        self.fixed_schedule[self.fixed_schedule.len() - 1]
    }

    fn quote(&self) -> Real {
        self.quote.value()
    }

    fn implied_quote(&self, bc: &BootstrapCurve<'_>) -> Result<Real> {
        let own = CurveHandle::empty();
        let float_pv = float_leg_with_notionals(
            &self.float_schedule,
            &*self.float_day_counter,
            &self.forwarding,
            &self.float_discounting,
            self.spread,
            bc,
        )?;
        let fixed_annuity = annuity(
            &self.fixed_schedule,
            &self.fixed_schedule[1..],
            &*self.fixed_day_counter,
            &own,
            bc,
        )?;
        let start = self.fixed_schedule[0];
        let end = self.fixed_schedule[self.fixed_schedule.len() - 1];
        let notionals = bc.discount_date(start) - bc.discount_date(end);
        Ok((float_pv + notionals) / fixed_annuity)
    }
}

// ── Cross-currency basis swap ─────────────────────────────────────────────────

/// A cross-currency float-vs-float basis swap quoted in the spread on
/// the spread leg. Both legs carry notional exchange; the fair spread
/// equates their PVs on their respective discounting curves.
#[derive(Debug)]
pub struct XccyBasisHelper {
    pub(crate) quote: QuoteHandle,
    pub(crate) flat_schedule: Vec<Date>,
    pub(crate) spread_schedule: Vec<Date>,
    pub(crate) flat_day_counter: Arc<dyn DayCounter>,
    pub(crate) spread_day_counter: Arc<dyn DayCounter>,
    pub(crate) flat_forwarding: CurveHandle,
    pub(crate) spread_forwarding: CurveHandle,
    pub(crate) flat_discounting: CurveHandle,
    pub(crate) spread_discounting: CurveHandle,
}

impl RateHelper for XccyBasisHelper {
    fn pillar_date(&self) -> Date {
        self.spread_schedule[self.spread_schedule.len() - 1]
    }

    fn quote(&self) -> Real {
        self.quote.value()
    }

    fn implied_quote(&self, bc: &BootstrapCurve<'_>) -> Result<Real> {
        let flat_pv = float_leg_with_notionals(
            &self.flat_schedule,
            &*self.flat_day_counter,
            &self.flat_forwarding,
            &self.flat_discounting,
            0.0,
            bc,
        )?;
        let spread_pv0 = float_leg_with_notionals(
            &self.spread_schedule,
            &*self.spread_day_counter,
            &self.spread_forwarding,
            &self.spread_discounting,
            0.0,
            bc,
        )?;
        let spread_annuity = annuity(
            &self.spread_schedule,
            &self.spread_schedule[1..],
            &*self.spread_day_counter,
            &self.spread_discounting,
            bc,
        )?;
        Ok((flat_pv - spread_pv0) / spread_annuity)
    }
}

// ── Tenor basis swap ──────────────────────────────────────────────────────────

/// A single-currency float-vs-float basis swap between two index tenors,
/// quoted in the spread on one leg.
#[derive(Debug)]
pub struct TenorBasisHelper {
    pub(crate) quote: QuoteHandle,
    pub(crate) short_schedule: Vec<Date>,
    pub(crate) long_schedule: Vec<Date>,
    pub(crate) short_day_counter: Arc<dyn DayCounter>,
    pub(crate) long_day_counter: Arc<dyn DayCounter>,
    pub(crate) short_forwarding: CurveHandle,
    pub(crate) long_forwarding: CurveHandle,
    pub(crate) discounting: CurveHandle,
    pub(crate) spread_on_short: bool,
}

impl RateHelper for TenorBasisHelper {
    fn pillar_date(&self) -> Date {
        self.long_schedule[self.long_schedule.len() - 1]
    }

    fn quote(&self) -> Real {
        self.quote.value()
    }

    fn implied_quote(&self, bc: &BootstrapCurve<'_>) -> Result<Real> {
        let (short_pv, short_annuity) = float_leg(
            &self.short_schedule,
            &self.short_schedule[1..],
            &*self.short_day_counter,
            &self.short_forwarding,
            &self.discounting,
            bc,
        )?;
        let (long_pv, long_annuity) = float_leg(
            &self.long_schedule,
            &self.long_schedule[1..],
            &*self.long_day_counter,
            &self.long_forwarding,
            &self.discounting,
            bc,
        )?;
        if self.spread_on_short {
            Ok((long_pv - short_pv) / short_annuity)
        } else {
            Ok((short_pv - long_pv) / long_annuity)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ck_core::Compounding;
    use ck_quotes::SimpleQuote;
    use ck_termstructures::FlatForward;
    use ck_time::{parse_date, Actual360, Frequency};

    fn act360() -> Arc<dyn DayCounter> {
        Arc::new(Actual360)
    }

    /// Flat 5% continuous curve as bootstrap data, Act360, out to 30y.
    fn flat_bc_data() -> (Date, Vec<Real>, Vec<Real>) {
        let ref_date = parse_date("2025-01-02").unwrap();
        let times = vec![0.0, 30.0];
        let log_dfs = vec![0.0, -1.5];
        (ref_date, times, log_dfs)
    }

    fn date(s: &str) -> Date {
        parse_date(s).unwrap()
    }

    fn flat_handle(rate: Real) -> CurveHandle {
        let curve = FlatForward::new(
            date("2025-01-02"),
            rate,
            Arc::new(ck_time::Actual365Fixed),
            Compounding::Continuous,
            Frequency::NoFrequency,
        )
        .unwrap()
        .with_extrapolation(true);
        CurveHandle::new(Arc::new(curve))
    }

    #[test]
    fn deposit_implies_simple_rate_of_the_curve() {
        let (ref_date, times, log_dfs) = flat_bc_data();
        let bc = BootstrapCurve {
            reference_date: ref_date,
            day_counter: &Actual360,
            times: &times,
            log_discounts: &log_dfs,
        };
        let helper = DepositHelper {
            quote: SimpleQuote::handle(0.05),
            day_counter: act360(),
            start: date("2025-01-02"),
            end: date("2026-01-02"),
        };
        let t = Actual360.year_fraction(helper.start, helper.end);
        let expected = ((0.05 * t).exp() - 1.0) / t;
        assert_abs_diff_eq!(helper.implied_quote(&bc).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn fx_swap_points_vanish_when_both_curves_match() {
        let (ref_date, times, log_dfs) = flat_bc_data();
        let bc = BootstrapCurve {
            reference_date: ref_date,
            day_counter: &Actual360,
            times: &times,
            log_discounts: &log_dfs,
        };
        // Collateral handle left empty: both legs discount on the curve
        // under construction, so the implied forward equals spot.
        let helper = FxSwapHelper {
            points: SimpleQuote::handle(0.0),
            spot: SimpleQuote::handle(900.0),
            start: date("2025-01-02"),
            end: date("2026-01-02"),
            collateral: CurveHandle::empty(),
            base_collateral: true,
        };
        assert_abs_diff_eq!(helper.implied_quote(&bc).unwrap(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn fx_swap_points_sign_follows_rate_differential() {
        let (ref_date, times, log_dfs) = flat_bc_data();
        let bc = BootstrapCurve {
            reference_date: ref_date,
            day_counter: &Actual360,
            times: &times,
            log_discounts: &log_dfs,
        };
        // Base (collateral) curve at 3% vs own curve at 5%: the base
        // currency discounts less, so the forward sits above spot.
        let helper = FxSwapHelper {
            points: SimpleQuote::handle(0.0),
            spot: SimpleQuote::handle(100.0),
            start: date("2025-01-02"),
            end: date("2026-01-02"),
            collateral: flat_handle(0.03),
            base_collateral: true,
        };
        assert!(helper.implied_quote(&bc).unwrap() > 0.0);
    }

    #[test]
    fn swap_par_rate_matches_flat_curve() {
        let (ref_date, times, log_dfs) = flat_bc_data();
        let bc = BootstrapCurve {
            reference_date: ref_date,
            day_counter: &Actual360,
            times: &times,
            log_discounts: &log_dfs,
        };
        let schedule: Vec<Date> = ["2025-01-02", "2026-01-02", "2027-01-02"]
            .iter()
            .map(|s| date(s))
            .collect();
        let helper = SwapHelper {
            quote: SimpleQuote::handle(0.05),
            spread: 0.0,
            fixed_schedule: schedule.clone(),
            float_schedule: schedule.clone(),
            fixed_day_counter: act360(),
            float_day_counter: act360(),
            forwarding: CurveHandle::empty(),
            discounting: CurveHandle::empty(),
        };
        // With matching schedules and day counters the par rate is the
        // annuity-weighted average of the simple forwards.
        let implied = helper.implied_quote(&bc).unwrap();
        let mut num = 0.0;
        let mut den = 0.0;
        for w in schedule.windows(2) {
            let tau = Actual360.year_fraction(w[0], w[1]);
            let fwd = (bc.discount_date(w[0]) / bc.discount_date(w[1]) - 1.0) / tau;
            let d = bc.discount_date(w[1]);
            num += fwd * tau * d;
            den += tau * d;
        }
        assert_abs_diff_eq!(implied, num / den, epsilon = 1e-12);

        // A positive spread on the floating leg raises the fair fixed rate.
        let with_spread = SwapHelper {
            spread: 0.002,
            quote: SimpleQuote::handle(0.05),
            fixed_schedule: schedule.clone(),
            float_schedule: schedule,
            fixed_day_counter: act360(),
            float_day_counter: act360(),
            forwarding: CurveHandle::empty(),
            discounting: CurveHandle::empty(),
        };
        assert_abs_diff_eq!(
            with_spread.implied_quote(&bc).unwrap(),
            implied + 0.002,
            epsilon = 1e-12
        );
    }

    #[test]
    fn ois_telescopes_to_the_same_par_rate_as_a_swap() {
        let (ref_date, times, log_dfs) = flat_bc_data();
        let bc = BootstrapCurve {
            reference_date: ref_date,
            day_counter: &Actual360,
            times: &times,
            log_discounts: &log_dfs,
        };
        let schedule: Vec<Date> = ["2025-01-02", "2026-01-02", "2027-01-02"]
            .iter()
            .map(|s| date(s))
            .collect();
        let ois = OisHelper {
            quote: SimpleQuote::handle(0.05),
            spread: 0.0,
            pay_dates: schedule[1..].to_vec(),
            schedule: schedule.clone(),
            fixed_day_counter: act360(),
            float_day_counter: act360(),
            forwarding: CurveHandle::empty(),
            discounting: CurveHandle::empty(),
        };
        let swap = SwapHelper {
            quote: SimpleQuote::handle(0.05),
            spread: 0.0,
            fixed_schedule: schedule.clone(),
            float_schedule: schedule,
            fixed_day_counter: act360(),
            float_day_counter: act360(),
            forwarding: CurveHandle::empty(),
            discounting: CurveHandle::empty(),
        };
        // The compounded overnight coupon telescopes into the same df
        // ratio a term forward produces over the same period.
        assert_abs_diff_eq!(
            ois.implied_quote(&bc).unwrap(),
            swap.implied_quote(&bc).unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn tenor_basis_spread_is_zero_off_one_curve() {
        let (ref_date, times, log_dfs) = flat_bc_data();
        let bc = BootstrapCurve {
            reference_date: ref_date,
            day_counter: &Actual360,
            times: &times,
            log_discounts: &log_dfs,
        };
        // Both legs project and discount off the same curve: quarterly
        // vs semiannual compounding telescopes to the same leg PV.
        let short: Vec<Date> = [
            "2025-01-02",
            "2025-04-02",
            "2025-07-02",
            "2025-10-02",
            "2026-01-02",
        ]
        .iter()
        .map(|s| date(s))
        .collect();
        let long: Vec<Date> = ["2025-01-02", "2025-07-02", "2026-01-02"]
            .iter()
            .map(|s| date(s))
            .collect();
        let helper = TenorBasisHelper {
            quote: SimpleQuote::handle(0.0),
            short_schedule: short,
            long_schedule: long,
            short_day_counter: act360(),
            long_day_counter: act360(),
            short_forwarding: CurveHandle::empty(),
            long_forwarding: CurveHandle::empty(),
            discounting: CurveHandle::empty(),
            spread_on_short: true,
        };
        assert_abs_diff_eq!(helper.implied_quote(&bc).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn xccy_basis_spread_reflects_discounting_gap() {
        let (ref_date, times, log_dfs) = flat_bc_data();
        let bc = BootstrapCurve {
            reference_date: ref_date,
            day_counter: &Actual360,
            times: &times,
            log_discounts: &log_dfs,
        };
        let schedule: Vec<Date> = ["2025-01-02", "2025-07-02", "2026-01-02"]
            .iter()
            .map(|s| date(s))
            .collect();
        // Identical legs on identical curves: fair spread is zero.
        let helper = XccyBasisHelper {
            quote: SimpleQuote::handle(0.0),
            flat_schedule: schedule.clone(),
            spread_schedule: schedule.clone(),
            flat_day_counter: act360(),
            spread_day_counter: act360(),
            flat_forwarding: CurveHandle::empty(),
            spread_forwarding: CurveHandle::empty(),
            flat_discounting: CurveHandle::empty(),
            spread_discounting: CurveHandle::empty(),
        };
        assert_abs_diff_eq!(helper.implied_quote(&bc).unwrap(), 0.0, epsilon = 1e-12);

        // Discounting the spread leg on a higher-rate curve makes the
        // fair spread non-zero.
        let skewed = XccyBasisHelper {
            spread_discounting: flat_handle(0.07),
            quote: SimpleQuote::handle(0.0),
            flat_schedule: schedule.clone(),
            spread_schedule: schedule,
            flat_day_counter: act360(),
            spread_day_counter: act360(),
            flat_forwarding: CurveHandle::empty(),
            spread_forwarding: CurveHandle::empty(),
            flat_discounting: CurveHandle::empty(),
        };
        assert!(skewed.implied_quote(&bc).unwrap().abs() > 1e-6);
    }

    #[test]
    fn bond_accrued_and_clean_price_are_consistent() {
        let schedule: Vec<Date> = ["2025-01-02", "2026-01-02", "2027-01-02"]
            .iter()
            .map(|s| date(s))
            .collect();
        // Settlement on the accrual start: no accrued interest.
        let accrued = BondHelper::accrued_at(&schedule, 0.04, date("2025-01-02"), &Actual360);
        assert_abs_diff_eq!(accrued, 0.0, epsilon = 1e-15);

        // Half a year into the first period accrues half a coupon-ish.
        let accrued = BondHelper::accrued_at(&schedule, 0.04, date("2025-07-02"), &Actual360);
        assert_abs_diff_eq!(
            accrued,
            0.04 * Actual360.year_fraction(date("2025-01-02"), date("2025-07-02")),
            epsilon = 1e-15
        );

        // Discounting at zero yield prices the bond at par plus the
        // undiscounted coupons.
        let clean = BondHelper::clean_price_with(
            &schedule,
            0.04,
            date("2025-01-02"),
            &Actual360,
            0.0,
            |_| Ok(1.0),
        )
        .unwrap();
        let coupon_sum: Real = schedule
            .windows(2)
            .map(|w| 0.04 * Actual360.year_fraction(w[0], w[1]))
            .sum();
        assert_abs_diff_eq!(clean, 100.0 * (1.0 + coupon_sum), epsilon = 1e-12);
    }

    #[test]
    fn bond_reprices_its_own_yield_curve() {
        let (ref_date, times, log_dfs) = flat_bc_data();
        let bc = BootstrapCurve {
            reference_date: ref_date,
            day_counter: &Actual360,
            times: &times,
            log_discounts: &log_dfs,
        };
        let schedule: Vec<Date> = ["2025-01-02", "2026-01-02", "2027-01-02"]
            .iter()
            .map(|s| date(s))
            .collect();
        let settlement = date("2025-01-02");
        let accrued = BondHelper::accrued_at(&schedule, 0.04, settlement, &Actual360);
        // Target price computed from the very curve the helper prices
        // off: implied and target must coincide.
        let target = BondHelper::clean_price_with(&schedule, 0.04, settlement, &Actual360, accrued, |d| {
            Ok(bc.discount_date(d) / bc.discount_date(settlement))
        })
        .unwrap();
        let helper = BondHelper {
            clean_price: target,
            coupon: 0.04,
            schedule,
            settlement,
            coupon_day_counter: act360(),
            accrued,
        };
        assert_abs_diff_eq!(
            helper.implied_quote(&bc).unwrap(),
            helper.quote(),
            epsilon = 1e-12
        );
    }
}
