//! Linear and log-linear interpolation on sorted node arrays.
//!
//! Outside the node range the last segment is continued, so a curve whose
//! log-discounts are interpolated linearly keeps a constant forward rate
//! beyond its final pillar.

use ck_core::errors::{Error, Result};
use ck_core::Real;

/// Linearly interpolate `ys` over sorted `xs` at the point `x`.
///
/// Points outside `[xs[0], xs[n-1]]` are extrapolated along the first or
/// last segment. Both slices must have the same length, at least two.
pub fn lerp(xs: &[Real], ys: &[Real], x: Real) -> Real {
    let i = locate(xs, x);
    let dx = xs[i + 1] - xs[i];
    if dx.abs() < f64::EPSILON {
        return ys[i];
    }
    ys[i] + (x - xs[i]) * (ys[i + 1] - ys[i]) / dx
}

/// Index of the segment `[xs[i], xs[i+1]]` to use for `x`.
fn locate(xs: &[Real], x: Real) -> usize {
    let n = xs.len();
    if x <= xs[0] {
        return 0;
    }
    if x >= xs[n - 1] {
        return n - 2;
    }
    let mut lo = 0;
    let mut hi = n - 1;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if xs[mid] <= x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}

fn check_nodes(xs: &[Real], ys: &[Real]) -> Result<()> {
    if xs.len() < 2 {
        return Err(Error::Validation(
            "interpolation needs at least 2 points".into(),
        ));
    }
    if xs.len() != ys.len() {
        return Err(Error::Validation(format!(
            "interpolation got {} x values but {} y values",
            xs.len(),
            ys.len()
        )));
    }
    if xs.windows(2).any(|w| w[0] >= w[1]) {
        return Err(Error::Validation(
            "interpolation x values must be strictly increasing".into(),
        ));
    }
    Ok(())
}

/// Owned linear interpolation over `(x, y)` nodes.
#[derive(Debug, Clone)]
pub struct LinearInterpolation {
    xs: Vec<Real>,
    ys: Vec<Real>,
}

impl LinearInterpolation {
    /// Construct from sorted `xs` and corresponding `ys`.
    pub fn new(xs: &[Real], ys: &[Real]) -> Result<Self> {
        check_nodes(xs, ys)?;
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        })
    }

    /// Evaluate at `x`.
    pub fn value(&self, x: Real) -> Real {
        lerp(&self.xs, &self.ys, x)
    }

    /// Upper bound of the node range.
    pub fn x_max(&self) -> Real {
        *self.xs.last().expect("at least 2 nodes")
    }
}

/// Log-linear interpolation: `log(y)` is interpolated linearly.
#[derive(Debug, Clone)]
pub struct LogLinearInterpolation {
    inner: LinearInterpolation,
}

impl LogLinearInterpolation {
    /// Construct from sorted `xs` and strictly positive `ys`.
    pub fn new(xs: &[Real], ys: &[Real]) -> Result<Self> {
        if ys.iter().any(|&y| y <= 0.0) {
            return Err(Error::Validation(
                "log-linear interpolation needs positive y values".into(),
            ));
        }
        let log_ys: Vec<Real> = ys.iter().map(|&y| y.ln()).collect();
        Ok(Self {
            inner: LinearInterpolation::new(xs, &log_ys)?,
        })
    }

    /// Evaluate at `x`.
    pub fn value(&self, x: Real) -> Real {
        self.inner.value(x).exp()
    }

    /// Upper bound of the node range.
    pub fn x_max(&self) -> Real {
        self.inner.x_max()
    }
}
