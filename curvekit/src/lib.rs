//! # curvekit
//!
//! Bootstrapped interest-rate yield curves from JSON market
//! configurations.
//!
//! This crate is a **façade** that re-exports the public items of the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `ck-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use curvekit::market::{build_market, DiscountRequest, MarketConfig};
//!
//! let config = MarketConfig::from_json(r#"{
//!     "refDate": "2022-08-22",
//!     "curves": [{
//!         "curveName": "SOFR",
//!         "curveConfig": {
//!             "curveType": "Discount",
//!             "nodes": [
//!                 {"date": "2022-08-22", "value": 1.0},
//!                 {"date": "2024-08-22", "value": 0.95}
//!             ]
//!         }
//!     }],
//!     "indexes": []
//! }"#).unwrap();
//!
//! let store = build_market(config).unwrap();
//! let out = store
//!     .discounts(&DiscountRequest {
//!         ref_date: None,
//!         curve: "SOFR".into(),
//!         dates: vec!["2024-08-22".into()],
//!     })
//!     .unwrap();
//! assert!((out[0].value - 0.95).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, error definitions, and the relinkable handle.
pub use ck_core as core;

/// Dates, calendars, day counters, schedules, and interest rates.
pub use ck_time as time;

/// Shared, mutable market quotes.
pub use ck_quotes as quotes;

/// Floating-rate index definitions.
pub use ck_indexes as indexes;

/// Yield term structures and the piecewise bootstrap.
pub use ck_termstructures as termstructures;

/// JSON configuration, curve builder, market store, and query layer.
pub use ck_market as market;
