//! # ck-core
//!
//! Core types shared across the curvekit workspace – numeric type
//! aliases, the error taxonomy, the compounding conventions, and the
//! relinkable handle used to resolve forward references between curves.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Compounding conventions.
pub mod compounding;

/// Error types and the `Result` alias.
pub mod errors;

/// Shared, relinkable reference cell (`RelinkableHandle<T>`).
pub mod handle;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A spread over a reference rate.
pub type Spread = Real;

/// A discount factor in (0, 1].
pub type DiscountFactor = Real;

/// A time measurement in years.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use compounding::Compounding;
pub use errors::{Error, Result};
pub use handle::RelinkableHandle;
