//! Ledger error types for value and posting validation.

use thiserror::Error;

/// Errors that can occur while building movements and postings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Amount Errors ==========
    /// Amount text is not a number.
    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),

    /// Amount is zero or negative after rounding to centavos.
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    /// Amount does not fit in the persisted minor-unit range.
    #[error("Amount is out of range")]
    AmountOutOfRange,

    // ========== Account Errors ==========
    /// Account name is empty after trimming.
    #[error("Account name cannot be empty")]
    EmptyAccountName,

    /// A real-money account cannot be the counter-party of this movement.
    #[error("Account '{0}' cannot be used for this movement")]
    ReservedAccount(String),

    // ========== Storage Format Errors ==========
    /// Stored movement kind is not recognised.
    #[error("Unknown movement kind: '{0}'")]
    UnknownMovementKind(String),
}

impl LedgerError {
    /// Returns a stable error code for logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Self::AmountOutOfRange => "AMOUNT_OUT_OF_RANGE",
            Self::EmptyAccountName => "EMPTY_ACCOUNT_NAME",
            Self::ReservedAccount(_) => "RESERVED_ACCOUNT",
            Self::UnknownMovementKind(_) => "UNKNOWN_MOVEMENT_KIND",
        }
    }

    /// Returns true if the error comes from malformed user input
    /// rather than from a rule about accounts.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_)
                | Self::NonPositiveAmount
                | Self::AmountOutOfRange
                | Self::EmptyAccountName
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LedgerError::InvalidAmount("x".into()).error_code(),
            "INVALID_AMOUNT"
        );
        assert_eq!(
            LedgerError::NonPositiveAmount.error_code(),
            "NON_POSITIVE_AMOUNT"
        );
        assert_eq!(
            LedgerError::ReservedAccount("Efectivo".into()).error_code(),
            "RESERVED_ACCOUNT"
        );
    }

    #[test]
    fn test_input_errors() {
        assert!(LedgerError::InvalidAmount("abc".into()).is_input_error());
        assert!(LedgerError::EmptyAccountName.is_input_error());
        assert!(!LedgerError::ReservedAccount("Efectivo".into()).is_input_error());
        assert!(!LedgerError::UnknownMovementKind("GASTO".into()).is_input_error());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            LedgerError::InvalidAmount("abc".into()).to_string(),
            "Invalid amount: 'abc'"
        );
        assert_eq!(
            LedgerError::ReservedAccount("Efectivo".into()).to_string(),
            "Account 'Efectivo' cannot be used for this movement"
        );
    }
}
