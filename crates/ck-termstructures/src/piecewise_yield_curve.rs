//! `PiecewiseYieldCurve` — iterative bootstrap of a discount curve.
//!
//! Given a set of [`RateHelper`]s the bootstrapper solves for the discount
//! factor at each pillar date, in maturity order, so that every helper's
//! implied quote matches its market quote. Log-discounts are interpolated
//! linearly between pillars, which keeps forward rates piecewise constant.
//!
//! The curve re-reads its helpers' quotes lazily: after [`unfreeze`] the
//! next query triggers exactly one re-bootstrap.
//!
//! [`unfreeze`]: crate::yield_term_structure::YieldTermStructure::unfreeze

use ck_core::errors::{Error, Result};
use ck_core::{DiscountFactor, Rate, Real, Time};
use ck_time::{Date, DayCounter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tracing::debug;

use crate::interpolation::lerp;
use crate::rate_helper::{BootstrapCurve, RateHelper};
use crate::term_structure::TermStructure;
use crate::yield_term_structure::YieldTermStructure;

/// Accuracy target for the per-pillar root solve.
const ACCURACY: Real = 1.0e-12;

/// Lowest zero rate the solver searches.
const MIN_RATE: Rate = -0.10;

/// Highest zero rate the solver searches.
const MAX_RATE: Rate = 0.30;

#[derive(Debug, Default)]
struct CurveNodes {
    dates: Vec<Date>,
    times: Vec<Time>,
    log_discounts: Vec<Real>,
}

/// A yield curve bootstrapped from market instruments.
#[derive(Debug)]
pub struct PiecewiseYieldCurve {
    reference_date: Date,
    day_counter: Arc<dyn DayCounter>,
    /// Helpers sorted by pillar date.
    helpers: Vec<Arc<dyn RateHelper>>,
    nodes: RwLock<CurveNodes>,
    frozen: AtomicBool,
    stale: AtomicBool,
    extrapolate: bool,
}

impl PiecewiseYieldCurve {
    /// Bootstrap a curve from rate helpers.
    ///
    /// Pillar dates must be distinct and strictly after `reference_date`.
    pub fn new(
        reference_date: Date,
        mut helpers: Vec<Arc<dyn RateHelper>>,
        day_counter: Arc<dyn DayCounter>,
        enable_extrapolation: bool,
    ) -> Result<Self> {
        if helpers.is_empty() {
            return Err(Error::Validation(
                "at least one rate helper is required".into(),
            ));
        }
        helpers.sort_by_key(|h| h.pillar_date());
        for pair in helpers.windows(2) {
            if pair[0].pillar_date() == pair[1].pillar_date() {
                return Err(Error::Validation(format!(
                    "duplicate pillar date {}",
                    pair[0].pillar_date()
                )));
            }
        }
        if helpers[0].pillar_date() <= reference_date {
            return Err(Error::Validation(format!(
                "pillar date {} is not after reference date {reference_date}",
                helpers[0].pillar_date()
            )));
        }

        let curve = Self {
            reference_date,
            day_counter,
            helpers,
            nodes: RwLock::new(CurveNodes::default()),
            frozen: AtomicBool::new(false),
            stale: AtomicBool::new(false),
            extrapolate: enable_extrapolation,
        };
        curve.calibrate()?;
        Ok(curve)
    }

    /// Run the bootstrap against the helpers' current quotes.
    fn calibrate(&self) -> Result<()> {
        let n = self.helpers.len() + 1;
        let mut dates = Vec::with_capacity(n);
        let mut times = Vec::with_capacity(n);
        dates.push(self.reference_date);
        times.push(0.0);
        for helper in &self.helpers {
            let pillar = helper.pillar_date();
            dates.push(pillar);
            times.push(
                self.day_counter
                    .year_fraction(self.reference_date, pillar),
            );
        }

        let mut log_discounts = vec![0.0_f64; n];
        for (k, helper) in self.helpers.iter().enumerate() {
            let k = k + 1;
            let market = helper.quote();
            let t = times[k];
            let min_df = (-MAX_RATE * t).exp();
            let max_df = (-MIN_RATE * t).exp();
            let solved = brent(
                |df| {
                    log_discounts[k] = df.ln();
                    let bc = BootstrapCurve {
                        reference_date: self.reference_date,
                        day_counter: &*self.day_counter,
                        times: &times[..=k],
                        log_discounts: &log_discounts[..=k],
                    };
                    Ok(helper.implied_quote(&bc)? - market)
                },
                min_df,
                max_df,
                ACCURACY,
            )
            .map_err(|e| e.context(format!("bootstrap failed at pillar {k} ({})", dates[k])))?;
            log_discounts[k] = solved.ln();
        }

        debug!(
            pillars = self.helpers.len(),
            reference_date = %self.reference_date,
            "bootstrapped curve"
        );

        let mut nodes = self.nodes.write().expect("curve lock poisoned");
        nodes.dates = dates;
        nodes.times = times;
        nodes.log_discounts = log_discounts;
        Ok(())
    }

    /// Re-bootstrap if quotes changed since the last calibration.
    fn ensure_fresh(&self) -> Result<()> {
        if self.stale.load(Ordering::Acquire) && !self.frozen.load(Ordering::Acquire) {
            self.calibrate()?;
            self.stale.store(false, Ordering::Release);
        }
        Ok(())
    }

    /// The helpers this curve was built from, in pillar order.
    pub fn helpers(&self) -> &[Arc<dyn RateHelper>] {
        &self.helpers
    }
}

impl TermStructure for PiecewiseYieldCurve {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn day_counter(&self) -> &dyn DayCounter {
        &*self.day_counter
    }

    fn max_date(&self) -> Date {
        self.nodes
            .read()
            .expect("curve lock poisoned")
            .dates
            .last()
            .copied()
            .unwrap_or(self.reference_date)
    }
}

impl YieldTermStructure for PiecewiseYieldCurve {
    fn discount_impl(&self, t: Time) -> Result<DiscountFactor> {
        self.ensure_fresh()?;
        if t <= 0.0 {
            return Ok(1.0);
        }
        let nodes = self.nodes.read().expect("curve lock poisoned");
        Ok(lerp(&nodes.times, &nodes.log_discounts, t).exp())
    }

    fn allows_extrapolation(&self) -> bool {
        self.extrapolate
    }

    fn freeze(&self) {
        self.frozen.store(true, Ordering::Release);
    }

    fn unfreeze(&self) {
        self.frozen.store(false, Ordering::Release);
        self.stale.store(true, Ordering::Release);
    }

    /// `None` when a pending recalibration fails: the previous nodes are
    /// stale and must not be reported as current.
    fn nodes(&self) -> Option<Vec<(Date, DiscountFactor)>> {
        self.ensure_fresh().ok()?;
        let nodes = self.nodes.read().expect("curve lock poisoned");
        Some(
            nodes
                .dates
                .iter()
                .zip(&nodes.log_discounts)
                .map(|(&d, &ld)| (d, ld.exp()))
                .collect(),
        )
    }
}

// Brent's method over a bracketing interval. The objective may fail (a
// helper pricing off an unusable curve), in which case the error is
// propagated to the caller.
fn brent<F>(mut f: F, x_min: Real, x_max: Real, accuracy: Real) -> Result<Real>
where
    F: FnMut(Real) -> Result<Real>,
{
    const MAX_ITER: u32 = 100;

    let mut a = x_min;
    let mut b = x_max;
    let mut fa = f(a)?;
    let mut fb = f(b)?;

    if fa.abs() < accuracy {
        return Ok(a);
    }
    if fb.abs() < accuracy {
        return Ok(b);
    }
    if fa * fb > 0.0 {
        return Err(Error::Solver(format!(
            "root not bracketed: f({a}) = {fa} and f({b}) = {fb} have the same sign"
        )));
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for _ in 0..MAX_ITER {
        if fb * fc > 0.0 {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * accuracy;
        let m = 0.5 * (c - b);

        if m.abs() <= tol || fb.abs() <= accuracy {
            return Ok(b);
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            // Inverse quadratic interpolation where it helps.
            let s = fb / fa;
            let (p, q) = if (a - c).abs() < f64::EPSILON {
                (2.0 * m * s, 1.0 - s)
            } else {
                let q0 = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * m * q0 * (q0 - r) - (b - a) * (r - 1.0)),
                    (q0 - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            let (p, q) = if p > 0.0 { (p, -q) } else { (-p, q) };

            if 2.0 * p < (3.0 * m * q - (tol * q).abs()).min(e * q.abs()) {
                e = d;
                d = p / q;
            } else {
                d = m;
                e = m;
            }
        } else {
            d = m;
            e = m;
        }

        a = b;
        fa = fb;

        if d.abs() > tol {
            b += d;
        } else {
            b += if m > 0.0 { tol } else { -tol };
        }
        fb = f(b)?;
    }

    Ok(b)
}
