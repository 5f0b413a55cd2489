//! # ck-quotes
//!
//! Shared, mutable market quotes.
//!
//! A [`SimpleQuote`] is a thread-safe cell holding one market value. Rate
//! helpers keep an `Arc` to the quote they were built from, so setting a
//! new value is immediately visible to every curve that references it.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

use ck_core::Real;
use std::sync::{Arc, RwLock};

/// Shared ownership of a quote. Cloning the handle shares the value.
pub type QuoteHandle = Arc<SimpleQuote>;

/// A market-observable value with interior mutability.
#[derive(Debug)]
pub struct SimpleQuote {
    value: RwLock<Real>,
}

impl SimpleQuote {
    /// Create a new quote with the given value.
    pub fn new(value: Real) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Create a new quote wrapped in a shareable handle.
    pub fn handle(value: Real) -> QuoteHandle {
        Arc::new(Self::new(value))
    }

    /// The current value.
    pub fn value(&self) -> Real {
        *self.value.read().expect("quote lock poisoned")
    }

    /// Set a new value, visible to all holders of the handle.
    pub fn set_value(&self, value: Real) {
        *self.value.write().expect("quote lock poisoned") = value;
    }
}
