//! The JSON market-configuration model.
//!
//! A [`MarketConfig`] document names a reference date, a list of curves,
//! and a list of indexes. Dates, tenors, day counters, calendars, and
//! conventions arrive as strings and are parsed when the builder turns
//! the configuration into live objects, so an error there can carry the
//! curve name and instrument position it belongs to.

use serde::Deserialize;

/// The root market-configuration document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketConfig {
    /// The valuation date (`"YYYY-MM-DD"`).
    pub ref_date: String,
    /// Curves to build, in document order.
    #[serde(default)]
    pub curves: Vec<CurveEntry>,
    /// Indexes to register before any curve is built.
    #[serde(default)]
    pub indexes: Vec<IndexConfig>,
}

impl MarketConfig {
    /// Parse a configuration document from JSON text.
    pub fn from_json(text: &str) -> ck_core::Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| ck_core::Error::Validation(format!("invalid market configuration: {e}")))
    }
}

/// One named curve in the configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveEntry {
    /// The name the curve is registered under.
    pub curve_name: String,
    /// How to build it.
    pub curve_config: CurveConfig,
}

/// Curve construction recipes, dispatched on the `curveType` tag.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "curveType")]
pub enum CurveConfig {
    /// Explicit `(date, discount factor)` nodes, log-linearly interpolated.
    #[serde(rename_all = "camelCase")]
    Discount {
        /// The nodes; the first must sit on the reference date with value 1.
        nodes: Vec<NodeConfig>,
        /// Day counter for date-to-time conversion.
        #[serde(default = "defaults::day_counter")]
        day_counter: String,
        /// Allow queries past the last node.
        #[serde(default)]
        enable_extrapolation: bool,
    },
    /// A single constant forward rate.
    #[serde(rename_all = "camelCase")]
    FlatForward {
        /// The rate, as a decimal.
        rate: f64,
        /// Day counter for date-to-time conversion.
        #[serde(default = "defaults::day_counter")]
        day_counter: String,
        /// Compounding of the supplied rate.
        #[serde(default = "defaults::compounding")]
        compounding: String,
        /// Compounding frequency of the supplied rate.
        #[serde(default = "defaults::frequency")]
        frequency: String,
        /// Allow queries arbitrarily far out.
        #[serde(default)]
        enable_extrapolation: bool,
    },
    /// Bootstrapped from market instruments.
    #[serde(rename_all = "camelCase")]
    Piecewise {
        /// The calibration instruments, one pillar each.
        rate_helpers: Vec<RateHelperConfig>,
        /// Day counter for date-to-time conversion.
        #[serde(default = "defaults::day_counter")]
        day_counter: String,
        /// Allow queries past the last pillar.
        #[serde(default)]
        enable_extrapolation: bool,
    },
}

/// A `(date, value)` pair of an explicit discount curve.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfig {
    /// Node date (`"YYYY-MM-DD"`).
    pub date: String,
    /// Discount factor at that date.
    pub value: f64,
}

/// Index definitions, dispatched on the `indexType` tag.
///
/// An index shares its name with the curve its forwards are projected
/// from; the builder links the two through one curve handle.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "indexType")]
pub enum IndexConfig {
    /// A term (Libor-style) index.
    #[serde(rename_all = "camelCase")]
    IborIndex {
        /// The index (and forwarding curve) name.
        index_name: String,
        /// The index tenor (`"3M"`, `"6M"`, ...).
        tenor: String,
        /// Accrual day counter.
        #[serde(default = "defaults::day_counter")]
        day_counter: String,
        /// Index currency.
        currency: String,
        /// Fixing calendar.
        #[serde(default = "defaults::calendar")]
        calendar: String,
        /// Roll convention for value and maturity dates.
        #[serde(default = "defaults::convention")]
        convention: String,
        /// Roll maturities to month end when the value date is one.
        #[serde(default)]
        end_of_month: bool,
        /// Business days from fixing to value date.
        #[serde(default)]
        fixing_days: u32,
    },
    /// An overnight index.
    #[serde(rename_all = "camelCase")]
    OvernightIndex {
        /// The index (and forwarding curve) name.
        index_name: String,
        /// Accrual day counter.
        #[serde(default = "defaults::day_counter")]
        day_counter: String,
        /// Index currency.
        currency: String,
        /// Fixing calendar.
        #[serde(default = "defaults::calendar")]
        calendar: String,
        /// Business days from fixing to value date.
        #[serde(default)]
        fixing_days: u32,
    },
}

impl IndexConfig {
    /// The index name.
    pub fn name(&self) -> &str {
        match self {
            IndexConfig::IborIndex { index_name, .. } => index_name,
            IndexConfig::OvernightIndex { index_name, .. } => index_name,
        }
    }
}

/// Calibration-instrument definitions, dispatched on the `helperType` tag.
///
/// Every helper carries a quote value and the ticker it is registered
/// under; the first configuration to mention a ticker creates the quote,
/// later mentions share it.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "helperType")]
pub enum RateHelperConfig {
    /// An interbank deposit.
    #[serde(rename_all = "camelCase")]
    Deposit {
        /// The deposit rate, simple, as a decimal.
        rate: f64,
        /// Quote ticker for the rate.
        rate_ticker: String,
        /// Deposit tenor.
        tenor: String,
        /// Accrual day counter.
        #[serde(default = "defaults::day_counter")]
        day_counter: String,
        /// Fixing calendar.
        #[serde(default = "defaults::calendar")]
        calendar: String,
        /// Roll convention.
        #[serde(default = "defaults::convention")]
        convention: String,
        /// Business days from the valuation date to the value date.
        #[serde(default)]
        fixing_days: u32,
        /// End-of-month rolling.
        #[serde(default)]
        end_of_month: bool,
    },
    /// An FX swap quoted in forward points.
    #[serde(rename_all = "camelCase")]
    FxSwap {
        /// Forward points (forward minus spot).
        fx_points: f64,
        /// Quote ticker for the points.
        fx_points_ticker: String,
        /// FX spot rate.
        fx_spot: f64,
        /// Quote ticker for the spot.
        fx_spot_ticker: String,
        /// Tenor from the value date to the far date.
        #[serde(default)]
        tenor: Option<String>,
        /// Explicit far date; used when no tenor is given.
        #[serde(default)]
        end_date: Option<String>,
        /// Business days from the valuation date to the value date.
        #[serde(default)]
        fixing_days: u32,
        /// Settlement calendar.
        #[serde(default = "defaults::calendar")]
        calendar: String,
        /// Roll convention.
        #[serde(default = "defaults::convention")]
        convention: String,
        /// End-of-month rolling.
        #[serde(default)]
        end_of_month: bool,
        /// Collateral posted in the base currency.
        #[serde(default)]
        base_currency_collateral: bool,
        /// Curve discounting the collateralized leg.
        #[serde(default)]
        collateral_curve: Option<String>,
    },
    /// A fixed-rate bond quoted in yield.
    #[serde(rename_all = "camelCase")]
    Bond {
        /// The bond yield, compounded annually, as a decimal.
        rate: f64,
        /// Quote ticker for the yield.
        rate_ticker: String,
        /// Annual coupon rate, as a decimal.
        coupon: f64,
        /// Tenor from the start date to maturity; ignored when an
        /// explicit end date is given.
        #[serde(default)]
        tenor: Option<String>,
        /// Coupon frequency.
        #[serde(default = "defaults::frequency")]
        frequency: String,
        /// Day counter for coupon accrual.
        #[serde(default = "defaults::day_counter")]
        coupon_day_counter: String,
        /// Day counter for the yield-to-price conversion.
        #[serde(default = "defaults::day_counter")]
        irr_day_counter: String,
        /// Coupon calendar.
        #[serde(default = "defaults::calendar")]
        calendar: String,
        /// Roll convention.
        #[serde(default = "defaults::convention")]
        convention: String,
        /// Business days from the valuation date to settlement.
        #[serde(default)]
        settlement_days: u32,
        /// Issue / accrual start date; defaults to the valuation date.
        #[serde(default)]
        start_date: Option<String>,
        /// Maturity date; used when no tenor is given.
        #[serde(default)]
        end_date: Option<String>,
    },
    /// A fixed-vs-term-float interest rate swap.
    #[serde(rename_all = "camelCase")]
    Swap {
        /// The par fixed rate, as a decimal.
        rate: f64,
        /// Quote ticker for the rate.
        rate_ticker: String,
        /// Swap tenor from the spot date.
        tenor: String,
        /// Fixed-leg day counter.
        #[serde(default = "defaults::day_counter")]
        day_counter: String,
        /// Schedule calendar.
        #[serde(default = "defaults::calendar")]
        calendar: String,
        /// Roll convention.
        #[serde(default = "defaults::convention")]
        convention: String,
        /// Fixed-leg payment frequency.
        #[serde(default = "defaults::frequency")]
        frequency: String,
        /// Spread over the floating fixings, as a decimal.
        #[serde(default)]
        spread: f64,
        /// Business days from the valuation date to the spot date.
        #[serde(default)]
        settlement_days: u32,
        /// Forward start from the spot date.
        #[serde(default = "defaults::fwd_start")]
        fwd_start: String,
        /// End-of-month rolling.
        #[serde(default)]
        end_of_month: bool,
        /// Curve discounting both legs; the curve under construction
        /// when absent.
        #[serde(default)]
        discounting_curve: Option<String>,
        /// The floating-leg index name.
        index: String,
    },
    /// A fixed-vs-overnight-compounded swap.
    #[serde(rename_all = "camelCase")]
    OIS {
        /// The par fixed rate, as a decimal.
        rate: f64,
        /// Quote ticker for the rate.
        rate_ticker: String,
        /// Swap tenor from the spot date.
        tenor: String,
        /// Fixed-leg day counter.
        #[serde(default = "defaults::day_counter")]
        day_counter: String,
        /// Schedule calendar.
        #[serde(default = "defaults::calendar")]
        calendar: String,
        /// Roll convention.
        #[serde(default = "defaults::convention")]
        convention: String,
        /// Payment frequency of both legs.
        #[serde(default = "defaults::frequency")]
        frequency: String,
        /// Spread over the compounded fixings, as a decimal.
        #[serde(default)]
        spread: f64,
        /// Business days from the valuation date to the spot date.
        #[serde(default)]
        settlement_days: u32,
        /// Business days from each period end to its payment.
        #[serde(default)]
        payment_lag: u32,
        /// Forward start from the spot date.
        #[serde(default = "defaults::fwd_start")]
        fwd_start: String,
        /// End-of-month rolling.
        #[serde(default)]
        end_of_month: bool,
        /// Curve discounting both legs; the curve under construction
        /// when absent.
        #[serde(default)]
        discounting_curve: Option<String>,
        /// The overnight index name.
        index: String,
    },
    /// A cross-currency fixed-vs-float swap.
    #[serde(rename_all = "camelCase")]
    Xccy {
        /// The par fixed rate, as a decimal.
        rate: f64,
        /// Quote ticker for the rate.
        rate_ticker: String,
        /// FX spot rate (float currency per unit of fixed currency).
        fx_spot: f64,
        /// Quote ticker for the spot.
        fx_spot_ticker: String,
        /// Swap tenor from the spot date.
        tenor: String,
        /// Currency of the fixed leg.
        currency: String,
        /// Fixed-leg day counter.
        #[serde(default = "defaults::day_counter")]
        day_counter: String,
        /// Schedule calendar.
        #[serde(default = "defaults::calendar")]
        calendar: String,
        /// Roll convention.
        #[serde(default = "defaults::convention")]
        convention: String,
        /// Fixed-leg payment frequency.
        #[serde(default = "defaults::frequency")]
        frequency: String,
        /// Spread over the floating fixings, as a decimal.
        #[serde(default)]
        spread: f64,
        /// Business days from the valuation date to the spot date.
        #[serde(default)]
        settlement_days: u32,
        /// End-of-month rolling.
        #[serde(default)]
        end_of_month: bool,
        /// Curve discounting the floating leg; the curve under
        /// construction discounts the fixed leg.
        discounting_curve: String,
        /// The floating-leg index name.
        index: String,
    },
    /// A cross-currency float-vs-float basis swap.
    #[serde(rename_all = "camelCase")]
    XccyBasis {
        /// The basis spread on the spread leg, as a decimal.
        spread: f64,
        /// Quote ticker for the spread.
        spread_ticker: String,
        /// FX spot rate between the two legs' currencies.
        fx_spot: f64,
        /// Quote ticker for the spot.
        fx_spot_ticker: String,
        /// Swap tenor from the spot date.
        tenor: String,
        /// Schedule calendar.
        #[serde(default = "defaults::calendar")]
        calendar: String,
        /// Roll convention.
        #[serde(default = "defaults::convention")]
        convention: String,
        /// Business days from the valuation date to the spot date.
        #[serde(default)]
        settlement_days: u32,
        /// End-of-month rolling.
        #[serde(default)]
        end_of_month: bool,
        /// The index of the leg paid flat.
        flat_index: String,
        /// The index of the leg paying the spread.
        spread_index: String,
        /// Curve discounting the flat leg.
        #[serde(default)]
        flat_discounting_curve: Option<String>,
        /// Curve discounting the spread leg. At least one of the two
        /// discounting overrides must be given.
        #[serde(default)]
        spread_discounting_curve: Option<String>,
    },
    /// A single-currency float-vs-float tenor basis swap.
    #[serde(rename_all = "camelCase")]
    TenorBasis {
        /// The basis spread, as a decimal.
        spread: f64,
        /// Quote ticker for the spread.
        spread_ticker: String,
        /// Swap tenor from the spot date.
        tenor: String,
        /// The short-tenor leg's index name.
        short_index: String,
        /// The long-tenor leg's index name.
        long_index: String,
        /// Payment tenor of the short leg; the short index tenor when
        /// absent.
        #[serde(default)]
        short_pay_tenor: Option<String>,
        /// Whether the spread is paid on the short leg.
        #[serde(default = "defaults::spread_on_short")]
        spread_on_short: bool,
        /// Curve discounting both legs; the curve under construction
        /// when absent.
        #[serde(default)]
        discounting_curve: Option<String>,
    },
}

impl RateHelperConfig {
    /// The ticker of the helper's primary quote.
    pub fn ticker(&self) -> &str {
        match self {
            RateHelperConfig::Deposit { rate_ticker, .. } => rate_ticker,
            RateHelperConfig::FxSwap {
                fx_points_ticker, ..
            } => fx_points_ticker,
            RateHelperConfig::Bond { rate_ticker, .. } => rate_ticker,
            RateHelperConfig::Swap { rate_ticker, .. } => rate_ticker,
            RateHelperConfig::OIS { rate_ticker, .. } => rate_ticker,
            RateHelperConfig::Xccy { rate_ticker, .. } => rate_ticker,
            RateHelperConfig::XccyBasis { spread_ticker, .. } => spread_ticker,
            RateHelperConfig::TenorBasis { spread_ticker, .. } => spread_ticker,
        }
    }
}

mod defaults {
    pub fn day_counter() -> String {
        "Act360".into()
    }

    pub fn calendar() -> String {
        "NullCalendar".into()
    }

    pub fn convention() -> String {
        "Unadjusted".into()
    }

    pub fn frequency() -> String {
        "Annual".into()
    }

    pub fn compounding() -> String {
        "Simple".into()
    }

    pub fn fwd_start() -> String {
        "0D".into()
    }

    pub fn spread_on_short() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_discount_curve_entry() {
        let doc = json!({
            "refDate": "2022-08-22",
            "curves": [{
                "curveName": "SOFR",
                "curveConfig": {
                    "curveType": "Discount",
                    "dayCounter": "Act365",
                    "nodes": [
                        {"date": "2022-08-22", "value": 1.0},
                        {"date": "2027-08-22", "value": 0.95}
                    ]
                }
            }],
            "indexes": []
        });
        let cfg = MarketConfig::from_json(&doc.to_string()).unwrap();
        assert_eq!(cfg.curves.len(), 1);
        match &cfg.curves[0].curve_config {
            CurveConfig::Discount { nodes, day_counter, .. } => {
                assert_eq!(nodes.len(), 2);
                assert_eq!(day_counter, "Act365");
            }
            other => panic!("expected a discount curve, got {other:?}"),
        }
    }

    #[test]
    fn deposit_defaults_fill_in() {
        let doc = json!({
            "helperType": "Deposit",
            "rate": 0.03,
            "rateTicker": "USOSFR2Z CURNCY",
            "tenor": "3M"
        });
        let helper: RateHelperConfig = serde_json::from_value(doc).unwrap();
        match helper {
            RateHelperConfig::Deposit {
                day_counter,
                calendar,
                convention,
                fixing_days,
                end_of_month,
                ..
            } => {
                assert_eq!(day_counter, "Act360");
                assert_eq!(calendar, "NullCalendar");
                assert_eq!(convention, "Unadjusted");
                assert_eq!(fixing_days, 0);
                assert!(!end_of_month);
            }
            other => panic!("expected a deposit, got {other:?}"),
        }
    }

    #[test]
    fn unknown_helper_type_is_rejected() {
        let doc = json!({"helperType": "Future", "rate": 0.03});
        assert!(serde_json::from_value::<RateHelperConfig>(doc).is_err());
    }

    #[test]
    fn unknown_curve_type_is_rejected() {
        let doc = json!({"curveType": "NelsonSiegel", "beta0": 0.02});
        assert!(serde_json::from_value::<CurveConfig>(doc).is_err());
    }

    #[test]
    fn primary_ticker_per_helper_kind() {
        let depo = json!({
            "helperType": "Deposit", "rate": 0.03,
            "rateTicker": "DEPO3M", "tenor": "3M"
        });
        let helper: RateHelperConfig = serde_json::from_value(depo).unwrap();
        assert_eq!(helper.ticker(), "DEPO3M");

        let basis = json!({
            "helperType": "TenorBasis", "spread": 0.001,
            "spreadTicker": "BASIS36", "tenor": "2Y",
            "shortIndex": "USD-3M", "longIndex": "USD-6M"
        });
        let helper: RateHelperConfig = serde_json::from_value(basis).unwrap();
        assert_eq!(helper.ticker(), "BASIS36");
    }
}
