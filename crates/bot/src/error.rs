//! Command error types.

use cartera_core::ledger::LedgerError;
use cartera_db::StoreError;
use thiserror::Error;

/// Errors that can occur while handling a chat command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Missing or malformed arguments; carries the usage hint to show.
    #[error("Bad arguments, expected: {0}")]
    Usage(&'static str),

    /// The movement breaks a bookkeeping rule.
    #[error(transparent)]
    Ledger(LedgerError),

    /// Storage failure.
    #[error(transparent)]
    Store(StoreError),
}

impl CommandError {
    /// Returns a stable error code for logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Usage(_) => "USAGE",
            Self::Ledger(e) => e.error_code(),
            Self::Store(_) => "STORAGE_ERROR",
        }
    }
}

impl From<LedgerError> for CommandError {
    fn from(err: LedgerError) -> Self {
        Self::Ledger(err)
    }
}

impl From<StoreError> for CommandError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Ledger(e) => Self::Ledger(e),
            other => Self::Store(other),
        }
    }
}
