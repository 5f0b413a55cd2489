//! `MarketStore` — the registry of quotes, curves, handles, and indexes
//! produced by a build.

use std::collections::HashMap;
use std::sync::Arc;

use ck_core::errors::{Error, Result};
use ck_core::Real;
use ck_quotes::{QuoteHandle, SimpleQuote};
use ck_termstructures::{CurveHandle, YieldTermStructure};
use ck_time::Date;
use serde::Deserialize;
use tracing::info;

use crate::requests::DateValue;

/// One ticker / value pair of a bulk quote update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteUpdate {
    /// The quote ticker.
    pub ticker: String,
    /// The new value.
    pub value: Real,
}

/// The bootstrap nodes of one curve, for reporting.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveNodesReport {
    /// The curve name.
    pub curve_name: String,
    /// `(date, discount factor)` per pillar.
    pub nodes: Vec<DateValue>,
}

/// Everything a finished build exposes: quotes by ticker, curves and
/// their handles by name, and indexes by name.
///
/// The store owns the handles its curves were distributed through, so a
/// curve can be rebuilt and relinked without touching its dependents.
#[derive(Debug, Default)]
pub struct MarketStore {
    quotes: HashMap<String, QuoteHandle>,
    handles: HashMap<String, CurveHandle>,
    curves: HashMap<String, Arc<dyn YieldTermStructure>>,
    indexes: HashMap<String, ck_indexes::Index>,
}

impl MarketStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a quote under `ticker` unless one is already there; in
    /// either case return the registered handle. The first value wins.
    pub fn add_quote(&mut self, ticker: &str, value: Real) -> QuoteHandle {
        Arc::clone(
            self.quotes
                .entry(ticker.to_string())
                .or_insert_with(|| SimpleQuote::handle(value)),
        )
    }

    /// The quote registered under `ticker`.
    pub fn quote(&self, ticker: &str) -> Result<QuoteHandle> {
        self.quotes
            .get(ticker)
            .cloned()
            .ok_or_else(|| Error::not_found("quote", ticker))
    }

    /// Whether a quote is registered under `ticker`.
    pub fn has_quote(&self, ticker: &str) -> bool {
        self.quotes.contains_key(ticker)
    }

    /// Register an (initially empty) handle under `name`.
    pub fn add_curve_handle(&mut self, name: &str, handle: CurveHandle) {
        self.handles.insert(name.to_string(), handle);
    }

    /// The handle registered under `name`. Clones share the cell, so a
    /// later relink is visible through the returned handle.
    pub fn curve_handle(&self, name: &str) -> Result<CurveHandle> {
        self.handles
            .get(name)
            .cloned()
            .ok_or_else(|| Error::not_found("curve handle", name))
    }

    /// Register a built curve under `name`.
    pub fn add_curve(&mut self, name: &str, curve: Arc<dyn YieldTermStructure>) {
        self.curves.insert(name.to_string(), curve);
    }

    /// Whether a curve has been built under `name`.
    pub fn has_curve(&self, name: &str) -> bool {
        self.curves.contains_key(name)
    }

    /// The curve built under `name`.
    pub fn curve(&self, name: &str) -> Result<Arc<dyn YieldTermStructure>> {
        self.curves
            .get(name)
            .cloned()
            .ok_or_else(|| Error::not_found("curve", name))
    }

    /// Register an index under its own name.
    pub fn add_index(&mut self, index: ck_indexes::Index) {
        self.indexes.insert(index.name().to_string(), index);
    }

    /// The index registered under `name`.
    pub fn index(&self, name: &str) -> Result<&ck_indexes::Index> {
        self.indexes
            .get(name)
            .ok_or_else(|| Error::not_found("index", name))
    }

    /// Names of all built curves, sorted.
    pub fn curve_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.curves.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Names of all registered indexes, sorted.
    pub fn index_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.indexes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Suspend recalculation on every curve.
    pub fn freeze(&self) {
        for curve in self.curves.values() {
            curve.freeze();
        }
    }

    /// Resume recalculation on every curve; the next query on a curve
    /// whose quotes changed triggers one re-bootstrap.
    pub fn unfreeze(&self) {
        for curve in self.curves.values() {
            curve.unfreeze();
        }
    }

    /// Apply a batch of quote updates atomically.
    ///
    /// Every ticker is checked first; if any is unknown, nothing is
    /// written. Curves are frozen while the values are set so no query
    /// can observe a half-applied batch, then unfrozen together.
    pub fn update_quotes(&self, updates: &[QuoteUpdate]) -> Result<()> {
        for update in updates {
            if !self.has_quote(&update.ticker) {
                return Err(Error::not_found("quote", &update.ticker));
            }
        }
        self.freeze();
        for update in updates {
            self.quotes[&update.ticker].set_value(update.value);
        }
        self.unfreeze();
        info!(count = updates.len(), "applied quote updates");
        Ok(())
    }

    /// The bootstrap nodes of every curve that has them, sorted by name.
    ///
    /// Each curve is queried first so a recalibration pending after a
    /// quote update runs now; if it fails, the error surfaces here
    /// instead of the stale nodes being reported as current.
    pub fn bootstrap_results(&self) -> Result<Vec<CurveNodesReport>> {
        let mut reports = Vec::new();
        for (name, curve) in &self.curves {
            curve
                .discount(0.0)
                .map_err(|e| e.context(format!("curve '{name}'")))?;
            if let Some(nodes) = curve.nodes() {
                reports.push(CurveNodesReport {
                    curve_name: name.clone(),
                    nodes: nodes
                        .into_iter()
                        .map(|(date, value)| DateValue {
                            date: date.to_string(),
                            value,
                        })
                        .collect(),
                });
            }
        }
        reports.sort_by(|a, b| a.curve_name.cmp(&b.curve_name));
        Ok(reports)
    }

    /// The reference date shared by all curves, taken from any of them.
    pub fn reference_date(&self) -> Option<Date> {
        self.curves.values().next().map(|c| c.reference_date())
    }
}
