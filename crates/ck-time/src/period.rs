//! `Period` — a time span expressed in a [`TimeUnit`].

use ck_core::errors::Error;
use std::str::FromStr;

/// Unit of a time span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    /// Calendar days.
    Days,
    /// Weeks (7 days).
    Weeks,
    /// Calendar months.
    Months,
    /// Calendar years.
    Years,
}

/// A time span made up of an integer length and a [`TimeUnit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    /// Number of units (may be negative).
    pub length: i32,
    /// The unit of time.
    pub unit: TimeUnit,
}

impl Period {
    /// Create a new period.
    pub fn new(length: i32, unit: TimeUnit) -> Self {
        Self { length, unit }
    }

    /// A zero-length period, used where an optional tenor is absent.
    pub fn zero() -> Self {
        Self::new(0, TimeUnit::Days)
    }

    /// Return `true` if the period has zero length.
    pub fn is_zero(&self) -> bool {
        self.length == 0
    }

    /// Approximate length in months, for tenor-ordering comparisons
    /// (days and weeks count as fractional months).
    pub fn approximate_months(&self) -> f64 {
        match self.unit {
            TimeUnit::Days => self.length as f64 / 30.0,
            TimeUnit::Weeks => self.length as f64 * 7.0 / 30.0,
            TimeUnit::Months => self.length as f64,
            TimeUnit::Years => self.length as f64 * 12.0,
        }
    }
}

impl FromStr for Period {
    type Err = Error;

    /// Parse tenor strings such as `"3M"`, `"2Y"`, `"1W"`, `"90D"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || Error::Validation(format!("invalid period '{s}'"));
        if s.len() < 2 {
            return Err(err());
        }
        let (num, unit) = s.split_at(s.len() - 1);
        let length: i32 = num.parse().map_err(|_| err())?;
        let unit = match unit {
            "D" | "d" => TimeUnit::Days,
            "W" | "w" => TimeUnit::Weeks,
            "M" | "m" => TimeUnit::Months,
            "Y" | "y" => TimeUnit::Years,
            _ => return Err(err()),
        };
        Ok(Period::new(length, unit))
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let u = match self.unit {
            TimeUnit::Days => "D",
            TimeUnit::Weeks => "W",
            TimeUnit::Months => "M",
            TimeUnit::Years => "Y",
        };
        write!(f, "{}{}", self.length, u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_standard_tenors() {
        assert_eq!("3M".parse::<Period>().unwrap(), Period::new(3, TimeUnit::Months));
        assert_eq!("2Y".parse::<Period>().unwrap(), Period::new(2, TimeUnit::Years));
        assert_eq!("1W".parse::<Period>().unwrap(), Period::new(1, TimeUnit::Weeks));
        assert_eq!("90D".parse::<Period>().unwrap(), Period::new(90, TimeUnit::Days));
    }

    #[test]
    fn rejects_malformed_tenors() {
        assert!("M".parse::<Period>().is_err());
        assert!("3X".parse::<Period>().is_err());
        assert!("".parse::<Period>().is_err());
    }

    #[test]
    fn orders_by_approximate_months() {
        let short: Period = "3M".parse().unwrap();
        let long: Period = "1Y".parse().unwrap();
        assert!(short.approximate_months() < long.approximate_months());
    }
}
