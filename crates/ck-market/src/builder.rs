//! The curve builder: dependency-ordered construction of every curve in
//! a [`MarketConfig`].
//!
//! Handles for all curves are registered up front, and indexes are built
//! immediately against those (still empty) handles. Curves are then
//! built in document order; a curve that depends on another forces that
//! curve first, an already-built dependency is a no-op, and a dependency
//! on the curve currently being built resolves to a permanently empty
//! handle read as the in-progress bootstrap. A genuine cycle between
//! two distinct curves is detected and reported.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use ck_core::errors::{Error, Result};
use ck_indexes::{IborIndex, Index, OvernightIndex};
use ck_quotes::QuoteHandle;
use ck_termstructures::{
    CurveHandle, DiscountCurve, FlatForward, PiecewiseYieldCurve, YieldTermStructure,
};
use ck_time::{parse_calendar, parse_date, parse_day_counter, Date};
use tracing::info;

use crate::config::{CurveConfig, IndexConfig, MarketConfig};
use crate::factory::make_helper;
use crate::store::MarketStore;

/// Builds every curve of one configuration document into a [`MarketStore`].
#[derive(Debug)]
pub struct CurveBuilder {
    valuation_date: Date,
    curve_configs: HashMap<String, CurveConfig>,
    /// Curve names in document order.
    curve_order: Vec<String>,
    in_progress: HashSet<String>,
    store: MarketStore,
}

impl CurveBuilder {
    /// Register handles, quotes-to-be, and indexes from `config`.
    ///
    /// No curve is built yet; call [`build`](CurveBuilder::build).
    pub fn new(config: MarketConfig) -> Result<Self> {
        let valuation_date = parse_date(&config.ref_date)?;
        let mut builder = Self {
            valuation_date,
            curve_configs: HashMap::new(),
            curve_order: Vec::new(),
            in_progress: HashSet::new(),
            store: MarketStore::new(),
        };

        for entry in config.curves {
            if builder.curve_configs.contains_key(&entry.curve_name) {
                return Err(Error::Validation(format!(
                    "duplicate curve name '{}'",
                    entry.curve_name
                )));
            }
            builder
                .store
                .add_curve_handle(&entry.curve_name, CurveHandle::empty());
            builder.curve_order.push(entry.curve_name.clone());
            builder
                .curve_configs
                .insert(entry.curve_name, entry.curve_config);
        }

        for index_config in config.indexes {
            builder.register_index(index_config)?;
        }
        Ok(builder)
    }

    /// Build an index against the handle of the curve sharing its name.
    /// An index with no matching curve gets a fresh handle that is never
    /// linked, so its forwards come from whichever curve prices it.
    fn register_index(&mut self, config: IndexConfig) -> Result<()> {
        let name = config.name().to_string();
        let forwarding = match self.store.curve_handle(&name) {
            Ok(handle) => handle,
            Err(_) => {
                let handle = CurveHandle::empty();
                self.store.add_curve_handle(&name, handle.clone());
                handle
            }
        };
        let index = match config {
            IndexConfig::IborIndex {
                index_name,
                tenor,
                day_counter,
                currency,
                calendar,
                convention,
                end_of_month,
                fixing_days,
            } => Index::Ibor(IborIndex::new(
                index_name,
                tenor.parse()?,
                fixing_days,
                currency.parse()?,
                parse_calendar(&calendar)?,
                convention.parse()?,
                end_of_month,
                parse_day_counter(&day_counter)?,
                forwarding,
            )),
            IndexConfig::OvernightIndex {
                index_name,
                day_counter,
                currency,
                calendar,
                fixing_days,
            } => Index::Overnight(OvernightIndex::new(
                index_name,
                fixing_days,
                currency.parse()?,
                parse_calendar(&calendar)?,
                parse_day_counter(&day_counter)?,
                forwarding,
            )),
        };
        self.store.add_index(index);
        Ok(())
    }

    /// The valuation date of this build.
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Build every configured curve. Already-built curves (pulled in
    /// earlier as dependencies) are skipped, so the call is idempotent.
    pub fn build(&mut self) -> Result<()> {
        for name in self.curve_order.clone() {
            self.build_curve(&name)?;
        }
        Ok(())
    }

    /// The store as built so far.
    pub fn store(&self) -> &MarketStore {
        &self.store
    }

    /// Consume the builder, yielding the finished store.
    pub fn into_store(self) -> MarketStore {
        self.store
    }

    /// Ensure the curve named `name` exists, building it (and anything
    /// it depends on) if needed.
    pub(crate) fn build_curve(&mut self, name: &str) -> Result<()> {
        if self.store.has_curve(name) {
            return Ok(());
        }
        if !self.curve_configs.contains_key(name) {
            return Err(Error::not_found("curve configuration", name));
        }
        if self.in_progress.contains(name) {
            return Err(Error::Domain(format!(
                "circular dependency on curve '{name}', which is already being built"
            )));
        }

        self.in_progress.insert(name.to_string());
        let result = self.build_curve_inner(name);
        self.in_progress.remove(name);
        result
    }

    fn build_curve_inner(&mut self, name: &str) -> Result<()> {
        let config = self
            .curve_configs
            .get(name)
            .cloned()
            .expect("presence checked by build_curve");

        let curve: Arc<dyn YieldTermStructure> = match config {
            CurveConfig::Discount {
                nodes,
                day_counter,
                enable_extrapolation,
            } => {
                let mut dates = Vec::with_capacity(nodes.len());
                let mut values = Vec::with_capacity(nodes.len());
                for node in &nodes {
                    dates.push(parse_date(&node.date)?);
                    values.push(node.value);
                }
                if dates.first() != Some(&self.valuation_date) {
                    return Err(Error::Validation(format!(
                        "curve '{name}': the first node must sit on the valuation date {}",
                        self.valuation_date
                    )));
                }
                let curve = DiscountCurve::new(dates, values, parse_day_counter(&day_counter)?)
                    .map_err(|e| e.context(format!("curve '{name}'")))?;
                Arc::new(curve.with_extrapolation(enable_extrapolation))
            }

            CurveConfig::FlatForward {
                rate,
                day_counter,
                compounding,
                frequency,
                enable_extrapolation,
            } => {
                let curve = FlatForward::new(
                    self.valuation_date,
                    rate,
                    parse_day_counter(&day_counter)?,
                    compounding.parse()?,
                    frequency.parse()?,
                )
                .map_err(|e| e.context(format!("curve '{name}'")))?;
                Arc::new(curve.with_extrapolation(enable_extrapolation))
            }

            CurveConfig::Piecewise {
                rate_helpers,
                day_counter,
                enable_extrapolation,
            } => {
                let mut helpers = Vec::with_capacity(rate_helpers.len());
                for (position, helper_config) in rate_helpers.iter().enumerate() {
                    let helper = make_helper(self, name, helper_config).map_err(|e| {
                        e.context(format!("curve '{name}', helper #{position}"))
                    })?;
                    helpers.push(helper);
                }
                let curve = PiecewiseYieldCurve::new(
                    self.valuation_date,
                    helpers,
                    parse_day_counter(&day_counter)?,
                    enable_extrapolation,
                )
                .map_err(|e| e.context(format!("curve '{name}'")))?;
                Arc::new(curve)
            }
        };

        // Relink exactly once: dependents that captured the handle while
        // this curve was still pending now see the built curve.
        self.store.curve_handle(name)?.link_to(Arc::clone(&curve));
        self.store.add_curve(name, curve);
        info!(curve = name, "built curve");
        Ok(())
    }

    // ── Accessors used by the instrument factory ──────────────────────────────

    /// The quote registered under `ticker`, created from `value` if this
    /// is its first mention.
    pub(crate) fn price_quote(&mut self, value: f64, ticker: &str) -> QuoteHandle {
        self.store.add_quote(ticker, value)
    }

    /// The index named `name`, building its forwarding curve first
    /// unless that curve is `current` or has no configuration.
    pub(crate) fn index(&mut self, name: &str, current: &str) -> Result<Index> {
        if name != current && self.curve_configs.contains_key(name) {
            self.build_curve(name)?;
        }
        Ok(self.store.index(name)?.clone())
    }

    /// The handle of the curve named `name`, building the curve first.
    ///
    /// A reference to `current` itself yields a handle that is never
    /// linked: an empty handle inside a helper means "the curve under
    /// construction", and it must stay empty so recalibrations keep
    /// pricing off the bootstrap state instead of a stale snapshot.
    pub(crate) fn dependency_handle(&mut self, name: &str, current: &str) -> Result<CurveHandle> {
        if name == current {
            return Ok(CurveHandle::empty());
        }
        self.build_curve(name)?;
        self.store.curve_handle(name)
    }
}

/// Build a whole market in one call: parse nothing, build everything,
/// hand back the store.
pub fn build_market(config: MarketConfig) -> Result<MarketStore> {
    let mut builder = CurveBuilder::new(config)?;
    builder.build()?;
    Ok(builder.into_store())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use serde_json::json;

    fn config(doc: serde_json::Value) -> MarketConfig {
        MarketConfig::from_json(&doc.to_string()).unwrap()
    }

    #[test]
    fn builds_discount_curve_and_links_handle() {
        let store = build_market(config(json!({
            "refDate": "2022-08-22",
            "curves": [{
                "curveName": "SOFR",
                "curveConfig": {
                    "curveType": "Discount",
                    "nodes": [
                        {"date": "2022-08-22", "value": 1.0},
                        {"date": "2024-08-22", "value": 0.95}
                    ]
                }
            }],
            "indexes": []
        })))
        .unwrap();

        let handle = store.curve_handle("SOFR").unwrap();
        let curve = handle.current().expect("handle must be linked");
        let df = curve
            .discount_date(parse_date("2024-08-22").unwrap())
            .unwrap();
        assert_abs_diff_eq!(df, 0.95, epsilon = 1e-12);
    }

    #[test]
    fn discount_curve_first_node_must_match_valuation_date() {
        let err = build_market(config(json!({
            "refDate": "2022-08-22",
            "curves": [{
                "curveName": "SOFR",
                "curveConfig": {
                    "curveType": "Discount",
                    "nodes": [
                        {"date": "2022-08-23", "value": 1.0},
                        {"date": "2024-08-22", "value": 0.95}
                    ]
                }
            }],
            "indexes": []
        })))
        .unwrap_err();
        assert!(err.to_string().contains("SOFR"), "got: {err}");
    }

    #[test]
    fn duplicate_curve_names_are_rejected() {
        let flat = json!({
            "curveType": "FlatForward", "rate": 0.03,
            "compounding": "Continuous", "frequency": "NoFrequency"
        });
        let err = CurveBuilder::new(config(json!({
            "refDate": "2025-01-02",
            "curves": [
                {"curveName": "X", "curveConfig": flat.clone()},
                {"curveName": "X", "curveConfig": flat}
            ],
            "indexes": []
        })))
        .unwrap_err();
        assert!(err.to_string().contains("duplicate curve name"));
    }

    #[test]
    fn build_is_idempotent() {
        let mut builder = CurveBuilder::new(config(json!({
            "refDate": "2025-01-02",
            "curves": [{
                "curveName": "FLAT",
                "curveConfig": {
                    "curveType": "FlatForward", "rate": 0.03,
                    "compounding": "Continuous", "frequency": "NoFrequency",
                    "enableExtrapolation": true
                }
            }],
            "indexes": []
        })))
        .unwrap();
        builder.build().unwrap();
        let first = builder.store().curve("FLAT").unwrap();
        builder.build().unwrap();
        let second = builder.store().curve("FLAT").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
