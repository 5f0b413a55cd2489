//! `BusinessDayConvention` — how to roll a date that falls on a holiday.

use ck_core::errors::Error;
use std::str::FromStr;

/// Business-day adjustment conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessDayConvention {
    /// Do not adjust.
    Unadjusted,
    /// Roll forward to the next business day.
    Following,
    /// Roll forward unless that crosses a month boundary, then roll back.
    ModifiedFollowing,
    /// Roll back to the previous business day.
    Preceding,
    /// Roll back unless that crosses a month boundary, then roll forward.
    ModifiedPreceding,
}

impl FromStr for BusinessDayConvention {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Unadjusted" => Ok(Self::Unadjusted),
            "Following" => Ok(Self::Following),
            "ModifiedFollowing" => Ok(Self::ModifiedFollowing),
            "Preceding" => Ok(Self::Preceding),
            "ModifiedPreceding" => Ok(Self::ModifiedPreceding),
            other => Err(Error::UnsupportedType(format!(
                "business day convention '{other}' not supported"
            ))),
        }
    }
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unadjusted => "Unadjusted",
            Self::Following => "Following",
            Self::ModifiedFollowing => "ModifiedFollowing",
            Self::Preceding => "Preceding",
            Self::ModifiedPreceding => "ModifiedPreceding",
        };
        write!(f, "{s}")
    }
}
