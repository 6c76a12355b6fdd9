//! Money helpers with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts travel as `rust_decimal::Decimal` and are persisted as integer
//! centavos (minor units) so that sums stay exact inside the database.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept for every amount.
pub const MINOR_DIGITS: u32 = 2;

/// Rounds an amount to centavos, midpoint away from zero.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MINOR_DIGITS, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts an amount to integer minor units.
///
/// Returns `None` when the amount does not fit in an `i64` of centavos.
#[must_use]
pub fn to_minor(amount: Decimal) -> Option<i64> {
    round_money(amount)
        .checked_mul(Decimal::ONE_HUNDRED)?
        .to_i64()
}

/// Converts integer minor units back to a decimal amount.
#[must_use]
pub fn from_minor(minor: i64) -> Decimal {
    Decimal::new(minor, MINOR_DIGITS)
}

/// Renders an amount as `$1,234.50` (negative amounts as `-$1,234.50`).
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    let rounded = round_money(amount);
    let digits = format!("{:.2}", rounded.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{fraction}")
}
