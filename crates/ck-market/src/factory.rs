//! The calibration-instrument factory.
//!
//! Turns one [`RateHelperConfig`] into a live [`RateHelper`], resolving
//! quote tickers, index names, and curve names through the builder. A
//! dependency on another curve triggers its construction; a dependency
//! on the curve currently being built resolves to a permanently empty
//! handle, which the helper reads as the in-progress bootstrap.

use std::sync::Arc;

use ck_core::errors::{Error, Result};
use ck_core::Compounding;
use ck_indexes::Currency;
use ck_termstructures::{CurveHandle, RateHelper};
use ck_time::{
    parse_calendar, parse_date, parse_day_counter, BusinessDayConvention, Calendar, Date,
    Frequency, InterestRate, Period, Schedule,
};

use crate::builder::CurveBuilder;
use crate::config::RateHelperConfig;
use crate::rate_helpers::{
    BondHelper, DepositHelper, FxSwapHelper, OisHelper, SwapHelper, TenorBasisHelper,
    XccyBasisHelper, XccyHelper,
};

/// Build the helper described by `cfg` for the curve named `current`.
pub(crate) fn make_helper(
    builder: &mut CurveBuilder,
    current: &str,
    cfg: &RateHelperConfig,
) -> Result<Arc<dyn RateHelper>> {
    match cfg {
        RateHelperConfig::Deposit {
            rate,
            rate_ticker,
            tenor,
            day_counter,
            calendar,
            convention,
            fixing_days,
            end_of_month,
        } => {
            let calendar = parse_calendar(calendar)?;
            let convention: BusinessDayConvention = convention.parse()?;
            let tenor: Period = tenor.parse()?;
            let start =
                calendar.advance_business_days(builder.valuation_date(), *fixing_days as i32);
            let end = calendar.advance_period(start, tenor, convention, *end_of_month)?;
            Ok(Arc::new(DepositHelper {
                quote: builder.price_quote(*rate, rate_ticker),
                day_counter: parse_day_counter(day_counter)?,
                start,
                end,
            }))
        }

        RateHelperConfig::FxSwap {
            fx_points,
            fx_points_ticker,
            fx_spot,
            fx_spot_ticker,
            tenor,
            end_date,
            fixing_days,
            calendar,
            convention,
            end_of_month,
            base_currency_collateral,
            collateral_curve,
        } => {
            let calendar = parse_calendar(calendar)?;
            let convention: BusinessDayConvention = convention.parse()?;
            let start =
                calendar.advance_business_days(builder.valuation_date(), *fixing_days as i32);
            let end = match (tenor, end_date) {
                (Some(tenor), _) => {
                    calendar.advance_period(start, tenor.parse()?, convention, *end_of_month)?
                }
                (None, Some(text)) => parse_date(text)?,
                (None, None) => {
                    return Err(Error::Validation(
                        "an fx swap needs a tenor or an end date".into(),
                    ))
                }
            };
            if end <= builder.valuation_date() {
                return Err(Error::Validation(format!(
                    "fx swap end date {end} is not after the valuation date {}",
                    builder.valuation_date()
                )));
            }
            let collateral = match collateral_curve {
                Some(name) => builder.dependency_handle(name, current)?,
                None => CurveHandle::empty(),
            };
            Ok(Arc::new(FxSwapHelper {
                points: builder.price_quote(*fx_points, fx_points_ticker),
                spot: builder.price_quote(*fx_spot, fx_spot_ticker),
                start,
                end,
                collateral,
                base_collateral: *base_currency_collateral,
            }))
        }

        RateHelperConfig::Bond {
            rate,
            rate_ticker,
            coupon,
            tenor,
            frequency,
            coupon_day_counter,
            irr_day_counter,
            calendar,
            convention,
            settlement_days,
            start_date,
            end_date,
        } => {
            let calendar = parse_calendar(calendar)?;
            let convention: BusinessDayConvention = convention.parse()?;
            let frequency: Frequency = frequency.parse()?;
            let coupon_dc = parse_day_counter(coupon_day_counter)?;
            let irr_dc = parse_day_counter(irr_day_counter)?;

            let settlement =
                calendar.advance_business_days(builder.valuation_date(), *settlement_days as i32);
            let start = match start_date {
                Some(text) => parse_date(text)?,
                None => builder.valuation_date(),
            };
            let end = match (end_date, tenor) {
                (Some(text), _) => parse_date(text)?,
                (None, Some(tenor)) => {
                    calendar.advance_period(start, tenor.parse()?, convention, false)?
                }
                (None, None) => {
                    return Err(Error::Validation(
                        "a bond needs a tenor or an end date".into(),
                    ))
                }
            };
            if end <= settlement {
                return Err(Error::Validation(format!(
                    "bond maturity {end} is not after settlement {settlement}"
                )));
            }

            let period = frequency.period().unwrap_or_else(Period::zero);
            let schedule =
                Schedule::generate_forward(start, end, period, &*calendar, convention)?;
            let schedule = schedule.dates().to_vec();
            let accrued = BondHelper::accrued_at(&schedule, *coupon, settlement, &*coupon_dc);

            // The quoted yield is converted to a clean price once, here;
            // later updates to the ticker take effect on rebuild.
            let yield_quote = builder.price_quote(*rate, rate_ticker);
            let irr = InterestRate::new(
                yield_quote.value(),
                Arc::clone(&irr_dc),
                Compounding::Compounded,
                Frequency::Annual,
            );
            let clean_price = BondHelper::clean_price_with(
                &schedule,
                *coupon,
                settlement,
                &*coupon_dc,
                accrued,
                |date| irr.discount_factor(settlement, date),
            )?;

            Ok(Arc::new(BondHelper {
                clean_price,
                coupon: *coupon,
                schedule,
                settlement,
                coupon_day_counter: coupon_dc,
                accrued,
            }))
        }

        RateHelperConfig::Swap {
            rate,
            rate_ticker,
            tenor,
            day_counter,
            calendar,
            convention,
            frequency,
            spread,
            settlement_days,
            fwd_start,
            end_of_month,
            discounting_curve,
            index,
        } => {
            let calendar = parse_calendar(calendar)?;
            let convention: BusinessDayConvention = convention.parse()?;
            let frequency: Frequency = frequency.parse()?;
            let (start, end) = swap_dates(
                builder.valuation_date(),
                &*calendar,
                convention,
                *settlement_days,
                fwd_start,
                tenor,
                *end_of_month,
            )?;

            let ibor = builder.index(index, current)?.as_ibor()?.clone();
            let fixed_period = frequency.period().unwrap_or_else(Period::zero);
            let fixed_schedule =
                Schedule::generate_forward(start, end, fixed_period, &*calendar, convention)?;
            let float_schedule = Schedule::generate_forward(
                start,
                end,
                ibor.tenor(),
                &**ibor.calendar(),
                ibor.convention(),
            )?;

            let discounting = match discounting_curve {
                Some(name) => builder.dependency_handle(name, current)?,
                None => CurveHandle::empty(),
            };
            Ok(Arc::new(SwapHelper {
                quote: builder.price_quote(*rate, rate_ticker),
                spread: *spread,
                fixed_schedule: fixed_schedule.dates().to_vec(),
                float_schedule: float_schedule.dates().to_vec(),
                fixed_day_counter: parse_day_counter(day_counter)?,
                float_day_counter: Arc::clone(ibor.day_counter()),
                forwarding: forwarding_for(ibor.forwarding_handle(), index, current),
                discounting,
            }))
        }

        RateHelperConfig::OIS {
            rate,
            rate_ticker,
            tenor,
            day_counter,
            calendar,
            convention,
            frequency,
            spread,
            settlement_days,
            payment_lag,
            fwd_start,
            end_of_month,
            discounting_curve,
            index,
        } => {
            let calendar = parse_calendar(calendar)?;
            let convention: BusinessDayConvention = convention.parse()?;
            let frequency: Frequency = frequency.parse()?;
            let (start, end) = swap_dates(
                builder.valuation_date(),
                &*calendar,
                convention,
                *settlement_days,
                fwd_start,
                tenor,
                *end_of_month,
            )?;

            let overnight = builder.index(index, current)?.as_overnight()?.clone();
            let period = frequency.period().unwrap_or_else(Period::zero);
            let schedule = Schedule::generate_forward(start, end, period, &*calendar, convention)?;
            let schedule = schedule.dates().to_vec();
            let pay_dates: Vec<Date> = schedule[1..]
                .iter()
                .map(|&d| calendar.advance_business_days(d, *payment_lag as i32))
                .collect();

            let discounting = match discounting_curve {
                Some(name) => builder.dependency_handle(name, current)?,
                None => CurveHandle::empty(),
            };
            Ok(Arc::new(OisHelper {
                quote: builder.price_quote(*rate, rate_ticker),
                spread: *spread,
                schedule,
                pay_dates,
                fixed_day_counter: parse_day_counter(day_counter)?,
                float_day_counter: Arc::clone(overnight.day_counter()),
                forwarding: forwarding_for(overnight.forwarding_handle(), index, current),
                discounting,
            }))
        }

        RateHelperConfig::Xccy {
            rate,
            rate_ticker,
            fx_spot,
            fx_spot_ticker,
            tenor,
            currency,
            day_counter,
            calendar,
            convention,
            frequency,
            spread,
            settlement_days,
            end_of_month,
            discounting_curve,
            index,
        } => {
            currency.parse::<Currency>()?;
            let calendar = parse_calendar(calendar)?;
            let convention: BusinessDayConvention = convention.parse()?;
            let frequency: Frequency = frequency.parse()?;
            let (start, end) = swap_dates(
                builder.valuation_date(),
                &*calendar,
                convention,
                *settlement_days,
                "0D",
                tenor,
                *end_of_month,
            )?;

            let ibor = builder.index(index, current)?.as_ibor()?.clone();
            let fixed_period = frequency.period().unwrap_or_else(Period::zero);
            let fixed_schedule =
                Schedule::generate_forward(start, end, fixed_period, &*calendar, convention)?;
            let float_schedule = Schedule::generate_forward(
                start,
                end,
                ibor.tenor(),
                &**ibor.calendar(),
                ibor.convention(),
            )?;

            // The spot quote is registered so batch updates can address
            // it; the par-rate condition itself is spot-invariant when
            // both notionals are struck at spot.
            builder.price_quote(*fx_spot, fx_spot_ticker);

            Ok(Arc::new(XccyHelper {
                quote: builder.price_quote(*rate, rate_ticker),
                spread: *spread,
                fixed_schedule: fixed_schedule.dates().to_vec(),
                float_schedule: float_schedule.dates().to_vec(),
                fixed_day_counter: parse_day_counter(day_counter)?,
                float_day_counter: Arc::clone(ibor.day_counter()),
                forwarding: forwarding_for(ibor.forwarding_handle(), index, current),
                float_discounting: builder.dependency_handle(discounting_curve, current)?,
            }))
        }

        RateHelperConfig::XccyBasis {
            spread,
            spread_ticker,
            fx_spot,
            fx_spot_ticker,
            tenor,
            calendar,
            convention,
            settlement_days,
            end_of_month,
            flat_index,
            spread_index,
            flat_discounting_curve,
            spread_discounting_curve,
        } => {
            if flat_discounting_curve.is_none() && spread_discounting_curve.is_none() {
                return Err(Error::Domain(
                    "a cross-currency basis helper needs a discounting curve on at least one leg"
                        .into(),
                ));
            }
            let calendar = parse_calendar(calendar)?;
            let convention: BusinessDayConvention = convention.parse()?;
            let (start, end) = swap_dates(
                builder.valuation_date(),
                &*calendar,
                convention,
                *settlement_days,
                "0D",
                tenor,
                *end_of_month,
            )?;

            let flat = builder.index(flat_index, current)?.as_ibor()?.clone();
            let spread_ix = builder.index(spread_index, current)?.as_ibor()?.clone();
            let flat_schedule = Schedule::generate_forward(
                start,
                end,
                flat.tenor(),
                &**flat.calendar(),
                flat.convention(),
            )?;
            let spread_schedule = Schedule::generate_forward(
                start,
                end,
                spread_ix.tenor(),
                &**spread_ix.calendar(),
                spread_ix.convention(),
            )?;

            let leg_handle = |builder: &mut CurveBuilder, name: &Option<String>| match name {
                Some(name) => builder.dependency_handle(name, current),
                None => Ok(CurveHandle::empty()),
            };
            let flat_discounting = leg_handle(builder, flat_discounting_curve)?;
            let spread_discounting = leg_handle(builder, spread_discounting_curve)?;

            builder.price_quote(*fx_spot, fx_spot_ticker);

            Ok(Arc::new(XccyBasisHelper {
                quote: builder.price_quote(*spread, spread_ticker),
                flat_schedule: flat_schedule.dates().to_vec(),
                spread_schedule: spread_schedule.dates().to_vec(),
                flat_day_counter: Arc::clone(flat.day_counter()),
                spread_day_counter: Arc::clone(spread_ix.day_counter()),
                flat_forwarding: forwarding_for(flat.forwarding_handle(), flat_index, current),
                spread_forwarding: forwarding_for(
                    spread_ix.forwarding_handle(),
                    spread_index,
                    current,
                ),
                flat_discounting,
                spread_discounting,
            }))
        }

        RateHelperConfig::TenorBasis {
            spread,
            spread_ticker,
            tenor,
            short_index,
            long_index,
            short_pay_tenor,
            spread_on_short,
            discounting_curve,
        } => {
            let short = builder.index(short_index, current)?.as_ibor()?.clone();
            let long = builder.index(long_index, current)?.as_ibor()?.clone();

            // When neither leg has a forwarding curve yet, resolve the
            // short leg's; if that leg is the curve under construction,
            // fall back to the long leg. Exactly one side resolves.
            if short.forwarding_handle().is_empty() && long.forwarding_handle().is_empty() {
                let resolved = builder.dependency_handle(short_index, current)?;
                if resolved.is_empty() {
                    builder.dependency_handle(long_index, current)?;
                }
            }

            let start = short.value_date(builder.valuation_date());
            let end = short.calendar().advance_period(
                start,
                tenor.parse()?,
                short.convention(),
                false,
            )?;
            let short_period = match short_pay_tenor {
                Some(text) => text.parse()?,
                None => short.tenor(),
            };
            let short_schedule = Schedule::generate_forward(
                start,
                end,
                short_period,
                &**short.calendar(),
                short.convention(),
            )?;
            let long_schedule = Schedule::generate_forward(
                start,
                end,
                long.tenor(),
                &**long.calendar(),
                long.convention(),
            )?;

            let discounting = match discounting_curve {
                Some(name) => builder.dependency_handle(name, current)?,
                None => CurveHandle::empty(),
            };
            Ok(Arc::new(TenorBasisHelper {
                quote: builder.price_quote(*spread, spread_ticker),
                short_schedule: short_schedule.dates().to_vec(),
                long_schedule: long_schedule.dates().to_vec(),
                short_day_counter: Arc::clone(short.day_counter()),
                long_day_counter: Arc::clone(long.day_counter()),
                short_forwarding: forwarding_for(short.forwarding_handle(), short_index, current),
                long_forwarding: forwarding_for(long.forwarding_handle(), long_index, current),
                discounting,
                spread_on_short: *spread_on_short,
            }))
        }
    }
}

/// The forwarding handle a helper captures for an index: the index's
/// own handle, unless the index forwards off the curve under
/// construction. That one must stay empty so the helper keeps pricing
/// off the bootstrap state (see [`CurveBuilder::dependency_handle`]).
fn forwarding_for(handle: &CurveHandle, index_name: &str, current: &str) -> CurveHandle {
    if index_name == current {
        CurveHandle::empty()
    } else {
        handle.clone()
    }
}

/// Spot and maturity dates of a swap-style instrument: the valuation
/// date advanced by the settlement days, an optional forward start,
/// then the tenor.
fn swap_dates(
    valuation: Date,
    calendar: &dyn Calendar,
    convention: BusinessDayConvention,
    settlement_days: u32,
    fwd_start: &str,
    tenor: &str,
    end_of_month: bool,
) -> Result<(Date, Date)> {
    let spot = calendar.advance_business_days(valuation, settlement_days as i32);
    let fwd: Period = fwd_start.parse()?;
    let start = if fwd.is_zero() {
        spot
    } else {
        calendar.advance_period(spot, fwd, convention, end_of_month)?
    };
    let end = calendar.advance_period(start, tenor.parse()?, convention, end_of_month)?;
    Ok((start, end))
}
