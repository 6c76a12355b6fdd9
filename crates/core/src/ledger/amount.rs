//! Positive money amounts.

use std::fmt;
use std::str::FromStr;

use cartera_shared::types::{format_money, from_minor, round_money, to_minor};
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::LedgerError;

/// A strictly positive amount, rounded to centavos.
///
/// Every movement carries one. The minor-unit form is computed once at
/// construction so persisting it can never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Amount {
    value: Decimal,
    #[serde(skip)]
    minor: i64,
}

impl Amount {
    /// Creates an amount, rounding to centavos.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NonPositiveAmount`] when the rounded value is not
    /// above zero and [`LedgerError::AmountOutOfRange`] when it cannot be stored.
    pub fn new(value: Decimal) -> Result<Self, LedgerError> {
        let value = round_money(value);
        if value <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount);
        }
        let minor = to_minor(value).ok_or(LedgerError::AmountOutOfRange)?;
        Ok(Self { value, minor })
    }

    /// Creates an amount from centavos.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NonPositiveAmount`] for zero or negative input.
    pub fn from_minor(minor: i64) -> Result<Self, LedgerError> {
        if minor <= 0 {
            return Err(LedgerError::NonPositiveAmount);
        }
        Ok(Self {
            value: from_minor(minor),
            minor,
        })
    }

    /// Returns the decimal value.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.value
    }

    /// Returns the value in centavos.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.minor
    }
}

impl FromStr for Amount {
    type Err = LedgerError;

    /// Parses user input such as `6450`, `8.5` or `$22`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
        let value = Decimal::from_str(digits)
            .map_err(|_| LedgerError::InvalidAmount(trimmed.to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_money(self.value))
    }
}
