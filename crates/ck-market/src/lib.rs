//! # ck-market
//!
//! The JSON-driven market layer: configuration model, curve builder with
//! dependency resolution, the market store, and the query layer.
//!
//! A [`MarketConfig`] document describes curves (flat-forward, explicit
//! discount nodes, or piecewise-bootstrapped from calibration
//! instruments) and indexes. [`build_market`] turns it into a
//! [`MarketStore`], which answers discount / zero-rate / forward-rate
//! requests and supports atomic batch quote updates.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Dependency-ordered curve construction.
pub mod builder;

/// The JSON configuration model.
pub mod config;

/// The calibration-instrument factory.
pub mod factory;

/// Query request and response types.
pub mod requests;

/// Concrete calibration instruments.
pub mod rate_helpers;

/// The quote / curve / index registry.
pub mod store;

pub use builder::{build_market, CurveBuilder};
pub use config::{CurveConfig, CurveEntry, IndexConfig, MarketConfig, NodeConfig, RateHelperConfig};
pub use requests::{
    DatePair, DateValue, DiscountRequest, ForwardRateRequest, ForwardValue, ZeroRateRequest,
};
pub use store::{CurveNodesReport, MarketStore, QuoteUpdate};
