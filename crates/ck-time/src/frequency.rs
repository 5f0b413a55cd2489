//! `Frequency` — how often coupons pay or rates compound.

use ck_core::errors::Error;
use std::str::FromStr;

use crate::period::{Period, TimeUnit};

/// Event / payment frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// No events — used as a sentinel for continuous compounding.
    NoFrequency,
    /// Once (maturity only).
    Once,
    /// Annual (once per year).
    Annual,
    /// Semi-annual (twice per year).
    Semiannual,
    /// Quarterly (four times per year).
    Quarterly,
    /// Bi-monthly (six times per year).
    Bimonthly,
    /// Monthly (twelve times per year).
    Monthly,
    /// Weekly (fifty-two times per year).
    Weekly,
    /// Daily.
    Daily,
}

impl Frequency {
    /// Number of periods per year. Returns `None` for `NoFrequency`.
    pub fn periods_per_year(&self) -> Option<u32> {
        match self {
            Frequency::NoFrequency => None,
            Frequency::Once => Some(0),
            Frequency::Annual => Some(1),
            Frequency::Semiannual => Some(2),
            Frequency::Quarterly => Some(4),
            Frequency::Bimonthly => Some(6),
            Frequency::Monthly => Some(12),
            Frequency::Weekly => Some(52),
            Frequency::Daily => Some(365),
        }
    }

    /// The coupon period implied by this frequency.
    ///
    /// Returns `None` for `NoFrequency` and `Once`.
    pub fn period(&self) -> Option<Period> {
        match self {
            Frequency::NoFrequency | Frequency::Once => None,
            Frequency::Annual => Some(Period::new(1, TimeUnit::Years)),
            Frequency::Semiannual => Some(Period::new(6, TimeUnit::Months)),
            Frequency::Quarterly => Some(Period::new(3, TimeUnit::Months)),
            Frequency::Bimonthly => Some(Period::new(2, TimeUnit::Months)),
            Frequency::Monthly => Some(Period::new(1, TimeUnit::Months)),
            Frequency::Weekly => Some(Period::new(1, TimeUnit::Weeks)),
            Frequency::Daily => Some(Period::new(1, TimeUnit::Days)),
        }
    }
}

impl FromStr for Frequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NoFrequency" => Ok(Frequency::NoFrequency),
            "Once" => Ok(Frequency::Once),
            "Annual" => Ok(Frequency::Annual),
            "Semiannual" => Ok(Frequency::Semiannual),
            "Quarterly" => Ok(Frequency::Quarterly),
            "Bimonthly" => Ok(Frequency::Bimonthly),
            "Monthly" => Ok(Frequency::Monthly),
            "Weekly" => Ok(Frequency::Weekly),
            "Daily" => Ok(Frequency::Daily),
            other => Err(Error::UnsupportedType(format!(
                "frequency '{other}' not supported"
            ))),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Frequency::NoFrequency => "NoFrequency",
            Frequency::Once => "Once",
            Frequency::Annual => "Annual",
            Frequency::Semiannual => "Semiannual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Bimonthly => "Bimonthly",
            Frequency::Monthly => "Monthly",
            Frequency::Weekly => "Weekly",
            Frequency::Daily => "Daily",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_periods_per_year() {
        let f: Frequency = "Semiannual".parse().unwrap();
        assert_eq!(f.periods_per_year(), Some(2));
        assert_eq!(f.period(), Some(Period::new(6, TimeUnit::Months)));
    }

    #[test]
    fn unknown_frequency_fails() {
        assert!("Fortnightly".parse::<Frequency>().is_err());
    }
}
