//! Currency and rate primitives
//!
//! Monetary amounts in this system are whole currency units carried as `i64`
//! (the marketplace charges whole rupees; plan tables and stored records
//! never hold fractional amounts). The places that need fractional
//! arithmetic - GST and commission percentages - go through [`Rate`], which
//! uses rust_decimal and rounds half away from zero back to whole units.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Currency codes following ISO 4217
///
/// The marketplace settles in INR; the currency still travels with every
/// amount so stored records stay unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    INR,
    USD,
}

impl Currency {
    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
        }
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "₹",
            Currency::USD => "$",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INR" => Ok(Currency::INR),
            "USD" => Ok(Currency::USD),
            other => Err(MoneyError::UnsupportedCurrency(other.to_string())),
        }
    }
}

/// Errors that can occur during rate arithmetic
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid rate: {0}")]
    InvalidRate(String),

    #[error("Unsupported currency code: {0}")]
    UnsupportedCurrency(String),

    #[error("Overflow during calculation")]
    Overflow,
}

/// A percentage rate (GST, commission percentage)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// The rate as a decimal (e.g. 0.18 for 18%)
    value: Decimal,
}

impl Rate {
    /// Creates a rate from a decimal value (e.g. 0.18 for 18%)
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Creates a rate from a percentage (e.g. 18.0 for 18%)
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self {
            value: percentage / dec!(100),
        }
    }

    /// Returns the rate as a decimal
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Returns the rate as a percentage
    pub fn as_percentage(&self) -> Decimal {
        self.value * dec!(100)
    }

    /// Applies this rate to a whole-unit amount, rounding half away from
    /// zero back to whole units
    pub fn apply_to_units(&self, units: i64) -> Result<i64, MoneyError> {
        let exact = Decimal::from(units)
            .checked_mul(self.value)
            .ok_or(MoneyError::Overflow)?;
        round_to_units(exact)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().round_dp(4))
    }
}

/// Rounds a decimal amount to whole currency units, half away from zero
pub fn round_to_units(amount: Decimal) -> Result<i64, MoneyError> {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(MoneyError::Overflow)
}
