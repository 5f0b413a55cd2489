//! Currency codes.

use ck_core::errors::Error;
use std::str::FromStr;

/// ISO 4217 currency codes supported by index and helper configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Currency {
    USD,
    EUR,
    GBP,
    JPY,
    CHF,
    CLP,
    CLF,
    MXN,
    COP,
    BRL,
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "JPY" => Ok(Self::JPY),
            "CHF" => Ok(Self::CHF),
            "CLP" => Ok(Self::CLP),
            "CLF" => Ok(Self::CLF),
            "MXN" => Ok(Self::MXN),
            "COP" => Ok(Self::COP),
            "BRL" => Ok(Self::BRL),
            other => Err(Error::UnsupportedType(format!(
                "currency '{other}' not supported"
            ))),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::JPY => "JPY",
            Self::CHF => "CHF",
            Self::CLP => "CLP",
            Self::CLF => "CLF",
            Self::MXN => "MXN",
            Self::COP => "COP",
            Self::BRL => "BRL",
        };
        write!(f, "{s}")
    }
}
