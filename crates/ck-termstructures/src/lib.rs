//! # ck-termstructures
//!
//! Yield term structures: the [`YieldTermStructure`] trait, the flat-forward
//! and interpolated-discount curves, and the iterative bootstrap that turns a
//! set of [`RateHelper`]s into a [`PiecewiseYieldCurve`].
//!
//! Curves are shared through [`CurveHandle`]s, which can be relinked after a
//! curve is rebuilt without touching the holders of the handle.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Discount-factor curve on explicit nodes.
pub mod discount_curve;

/// Constant-forward-rate curve.
pub mod flat_forward;

/// Linear and log-linear interpolation on node arrays.
pub mod interpolation;

/// Bootstrapped curve and its solver.
pub mod piecewise_yield_curve;

/// The `RateHelper` trait and the in-progress bootstrap view.
pub mod rate_helper;

/// Base trait shared by every term structure.
pub mod term_structure;

/// Yield-curve query interface.
pub mod yield_term_structure;

pub use discount_curve::DiscountCurve;
pub use flat_forward::FlatForward;
pub use piecewise_yield_curve::PiecewiseYieldCurve;
pub use rate_helper::{BootstrapCurve, RateHelper};
pub use term_structure::TermStructure;
pub use yield_term_structure::{CurveHandle, YieldTermStructure};
