//! Compounding conventions.

use crate::errors::Error;
use std::str::FromStr;

/// How an interest rate accrues over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compounding {
    /// `1 + r·t`
    Simple,
    /// `(1 + r/f)^(f·t)`
    Compounded,
    /// `exp(r·t)`
    Continuous,
}

impl FromStr for Compounding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Simple" => Ok(Compounding::Simple),
            "Compounded" => Ok(Compounding::Compounded),
            "Continuous" => Ok(Compounding::Continuous),
            other => Err(Error::UnsupportedType(format!(
                "compounding '{other}' not supported"
            ))),
        }
    }
}

impl std::fmt::Display for Compounding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Compounding::Simple => "Simple",
            Compounding::Compounded => "Compounded",
            Compounding::Continuous => "Continuous",
        };
        write!(f, "{s}")
    }
}
