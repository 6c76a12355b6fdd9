//! Single-user bookkeeping logic.
//!
//! This module implements the balance-mutation rules:
//! - Amounts and normalized account names
//! - Account classification (real money vs. liability)
//! - Movement kinds and their balance effects
//! - Posting plans for each store operation
//! - Balance replay and summary aggregates

pub mod account;
pub mod amount;
pub mod balance;
pub mod error;
pub mod movement;
pub mod posting;
pub mod summary;

#[cfg(test)]
mod props;

pub use account::{AccountBook, AccountClass, AccountName, DEFAULT_CASH_ACCOUNT};
pub use amount::Amount;
pub use balance::{BalanceAdjustment, Balances, apply_adjustments, replay};
pub use error::LedgerError;
pub use movement::{Movement, MovementDraft, MovementKind};
pub use posting::Posting;
pub use summary::{BalanceLine, FinancialSummary};
