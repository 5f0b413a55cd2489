//! The query layer: discount-factor, zero-rate, and forward-rate
//! requests against a built [`MarketStore`].
//!
//! Requests name a curve and a list of dates; rates come back under the
//! requested day-count / compounding / frequency conventions, defaulting
//! to Act360 / Simple / Annual.

use std::sync::Arc;

use ck_core::errors::{Error, Result};
use ck_core::{Compounding, Real};
use ck_time::{parse_date, parse_day_counter, DayCounter, Frequency};
use serde::{Deserialize, Serialize};

use crate::store::MarketStore;

/// A dated result value.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DateValue {
    /// The query date (`"YYYY-MM-DD"`).
    pub date: String,
    /// The discount factor or rate at that date.
    pub value: Real,
}

/// A forward-rate result over one date pair.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForwardValue {
    /// Accrual start date.
    pub start_date: String,
    /// Accrual end date.
    pub end_date: String,
    /// The forward rate.
    pub value: Real,
}

/// Discount factors from one curve at a list of dates.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRequest {
    /// Expected valuation date; checked against the curve when present.
    #[serde(default)]
    pub ref_date: Option<String>,
    /// The curve name.
    pub curve: String,
    /// Query dates.
    pub dates: Vec<String>,
}

/// Zero rates from one curve at a list of dates.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZeroRateRequest {
    /// Expected valuation date; checked against the curve when present.
    #[serde(default)]
    pub ref_date: Option<String>,
    /// The curve name.
    pub curve: String,
    /// Day counter of the returned rates.
    #[serde(default = "default_day_counter")]
    pub day_counter: String,
    /// Compounding of the returned rates.
    #[serde(default = "default_compounding")]
    pub compounding: String,
    /// Frequency of the returned rates.
    #[serde(default = "default_frequency")]
    pub frequency: String,
    /// Query dates.
    pub dates: Vec<String>,
}

/// A start / end date pair of a forward-rate request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatePair {
    /// Accrual start date.
    pub start_date: String,
    /// Accrual end date.
    pub end_date: String,
}

/// Forward rates from one curve over a list of date pairs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardRateRequest {
    /// Expected valuation date; checked against the curve when present.
    #[serde(default)]
    pub ref_date: Option<String>,
    /// The curve name.
    pub curve: String,
    /// Day counter of the returned rates.
    #[serde(default = "default_day_counter")]
    pub day_counter: String,
    /// Compounding of the returned rates.
    #[serde(default = "default_compounding")]
    pub compounding: String,
    /// Frequency of the returned rates.
    #[serde(default = "default_frequency")]
    pub frequency: String,
    /// Query date pairs.
    pub dates: Vec<DatePair>,
}

fn default_day_counter() -> String {
    "Act360".into()
}

fn default_compounding() -> String {
    "Simple".into()
}

fn default_frequency() -> String {
    "Annual".into()
}

fn check_ref_date(
    curve: &dyn ck_termstructures::YieldTermStructure,
    requested: &Option<String>,
) -> Result<()> {
    if let Some(text) = requested {
        let date = parse_date(text)?;
        if date != curve.reference_date() {
            return Err(Error::Validation(format!(
                "request reference date {date} does not match the curve reference date {}",
                curve.reference_date()
            )));
        }
    }
    Ok(())
}

fn conventions(
    day_counter: &str,
    compounding: &str,
    frequency: &str,
) -> Result<(Arc<dyn DayCounter>, Compounding, Frequency)> {
    Ok((
        parse_day_counter(day_counter)?,
        compounding.parse()?,
        frequency.parse()?,
    ))
}

impl MarketStore {
    /// Answer a [`DiscountRequest`].
    pub fn discounts(&self, request: &DiscountRequest) -> Result<Vec<DateValue>> {
        let curve = self.curve(&request.curve)?;
        check_ref_date(&*curve, &request.ref_date)?;
        request
            .dates
            .iter()
            .map(|text| {
                let date = parse_date(text)?;
                Ok(DateValue {
                    date: date.to_string(),
                    value: curve.discount_date(date)?,
                })
            })
            .collect()
    }

    /// Answer a [`ZeroRateRequest`].
    pub fn zero_rates(&self, request: &ZeroRateRequest) -> Result<Vec<DateValue>> {
        let curve = self.curve(&request.curve)?;
        check_ref_date(&*curve, &request.ref_date)?;
        let (dc, comp, freq) =
            conventions(&request.day_counter, &request.compounding, &request.frequency)?;
        request
            .dates
            .iter()
            .map(|text| {
                let date = parse_date(text)?;
                let rate = curve.zero_rate(date, Arc::clone(&dc), comp, freq)?;
                Ok(DateValue {
                    date: date.to_string(),
                    value: rate.rate(),
                })
            })
            .collect()
    }

    /// Answer a [`ForwardRateRequest`].
    pub fn forward_rates(&self, request: &ForwardRateRequest) -> Result<Vec<ForwardValue>> {
        let curve = self.curve(&request.curve)?;
        check_ref_date(&*curve, &request.ref_date)?;
        let (dc, comp, freq) =
            conventions(&request.day_counter, &request.compounding, &request.frequency)?;
        request
            .dates
            .iter()
            .map(|pair| {
                let d1 = parse_date(&pair.start_date)?;
                let d2 = parse_date(&pair.end_date)?;
                let rate = curve.forward_rate(d1, d2, Arc::clone(&dc), comp, freq)?;
                Ok(ForwardValue {
                    start_date: d1.to_string(),
                    end_date: d2.to_string(),
                    value: rate.rate(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ck_termstructures::FlatForward;
    use ck_time::Actual365Fixed;
    use serde_json::json;

    fn flat_store() -> MarketStore {
        let mut store = MarketStore::new();
        let curve = FlatForward::new(
            parse_date("2025-01-02").unwrap(),
            0.05,
            Arc::new(Actual365Fixed),
            Compounding::Continuous,
            Frequency::NoFrequency,
        )
        .unwrap()
        .with_extrapolation(true);
        store.add_curve("FLAT", Arc::new(curve));
        store
    }

    #[test]
    fn discount_request_round_trips_json() {
        let store = flat_store();
        let request: DiscountRequest = serde_json::from_value(json!({
            "curve": "FLAT",
            "dates": ["2026-01-02"]
        }))
        .unwrap();
        let out = store.discounts(&request).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].date, "2026-01-02");
        assert_abs_diff_eq!(out[0].value, (-0.05_f64).exp(), epsilon = 1e-10);
    }

    #[test]
    fn zero_rate_defaults_are_simple_annual_act360() {
        let store = flat_store();
        let request: ZeroRateRequest = serde_json::from_value(json!({
            "curve": "FLAT",
            "dates": ["2026-01-02"]
        }))
        .unwrap();
        assert_eq!(request.day_counter, "Act360");
        assert_eq!(request.compounding, "Simple");
        assert_eq!(request.frequency, "Annual");
        let out = store.zero_rates(&request).unwrap();
        // Simple Act360 rate reproducing exp(-0.05 * 1y Act365).
        let t = 365.0 / 360.0;
        let compound = (0.05_f64 * 1.0).exp();
        assert_abs_diff_eq!(out[0].value, (compound - 1.0) / t, epsilon = 1e-10);
    }

    #[test]
    fn forward_rate_reproduces_flat_rate() {
        let store = flat_store();
        let request: ForwardRateRequest = serde_json::from_value(json!({
            "curve": "FLAT",
            "dayCounter": "Act365",
            "compounding": "Continuous",
            "frequency": "NoFrequency",
            "dates": [{"startDate": "2026-01-02", "endDate": "2027-01-02"}]
        }))
        .unwrap();
        let out = store.forward_rates(&request).unwrap();
        assert_abs_diff_eq!(out[0].value, 0.05, epsilon = 1e-10);
    }

    #[test]
    fn annual_flat_rate_converts_to_continuous() {
        let mut store = MarketStore::new();
        let curve = FlatForward::new(
            parse_date("2025-01-02").unwrap(),
            0.05,
            Arc::new(Actual365Fixed),
            Compounding::Compounded,
            Frequency::Annual,
        )
        .unwrap()
        .with_extrapolation(true);
        store.add_curve("ANNUAL", Arc::new(curve));

        let request: ZeroRateRequest = serde_json::from_value(json!({
            "curve": "ANNUAL",
            "dayCounter": "Act365",
            "compounding": "Continuous",
            "frequency": "NoFrequency",
            "dates": ["2027-01-02"]
        }))
        .unwrap();
        let out = store.zero_rates(&request).unwrap();
        assert_abs_diff_eq!(out[0].value, 1.05_f64.ln(), epsilon = 1e-10);
    }

    #[test]
    fn mismatched_reference_date_is_rejected() {
        let store = flat_store();
        let request: DiscountRequest = serde_json::from_value(json!({
            "refDate": "2024-01-02",
            "curve": "FLAT",
            "dates": ["2026-01-02"]
        }))
        .unwrap();
        assert!(store.discounts(&request).is_err());
    }

    #[test]
    fn unknown_curve_is_not_found() {
        let store = flat_store();
        let request: DiscountRequest = serde_json::from_value(json!({
            "curve": "NOPE",
            "dates": ["2026-01-02"]
        }))
        .unwrap();
        assert_eq!(
            store.discounts(&request).unwrap_err().to_string(),
            "curve not found: NOPE"
        );
    }
}
