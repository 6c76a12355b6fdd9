//! Movements: the immutable entries of the ledger.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::account::AccountName;
use super::amount::Amount;
use super::balance::BalanceAdjustment;
use super::error::LedgerError;

/// Kind of a movement. Stored in the `tipo` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementKind {
    /// Money coming into the cash account.
    Income,
    /// Spending paid with cash, possibly through a debit-like account.
    RealExpense,
    /// Spending charged to a liability account.
    CreditExpense,
    /// Cash paid towards a liability.
    DebtPayment,
    /// Cash received from someone who owed the user.
    PaymentReceived,
    /// Money lent to someone.
    LoanGiven,
}

impl MovementKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Income,
        Self::RealExpense,
        Self::CreditExpense,
        Self::DebtPayment,
        Self::PaymentReceived,
        Self::LoanGiven,
    ];

    /// Returns the persisted representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::RealExpense => "REAL_EXPENSE",
            Self::CreditExpense => "CREDIT_EXPENSE",
            Self::DebtPayment => "DEBT_PAYMENT",
            Self::PaymentReceived => "PAYMENT_RECEIVED",
            Self::LoanGiven => "LOAN_GIVEN",
        }
    }

    /// Returns the balance adjustments a movement of this kind applies.
    ///
    /// `account` is the account recorded on the movement. Real expenses
    /// always come out of `cash`; transfers touch both.
    #[must_use]
    pub fn effects(
        self,
        amount: Amount,
        account: &AccountName,
        cash: &AccountName,
    ) -> Vec<BalanceAdjustment> {
        let value = amount.value();
        match self {
            Self::Income | Self::LoanGiven => {
                vec![BalanceAdjustment::new(account.clone(), value)]
            }
            Self::RealExpense => vec![BalanceAdjustment::new(cash.clone(), -value)],
            Self::CreditExpense => vec![BalanceAdjustment::new(account.clone(), -value)],
            Self::DebtPayment => vec![
                BalanceAdjustment::new(cash.clone(), -value),
                BalanceAdjustment::new(account.clone(), value),
            ],
            Self::PaymentReceived => vec![
                BalanceAdjustment::new(cash.clone(), value),
                BalanceAdjustment::new(account.clone(), -value),
            ],
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| LedgerError::UnknownMovementKind(s.to_string()))
    }
}

/// A movement that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovementDraft {
    /// Movement kind.
    pub kind: MovementKind,
    /// Positive amount.
    pub amount: Amount,
    /// Account recorded on the movement.
    pub account: AccountName,
    /// Free-form category (`Transporte`, `Comida`, ...).
    pub category: String,
    /// Free-form description.
    pub description: String,
}

/// A persisted movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movement {
    /// Row id, increasing with insertion order.
    pub id: i64,
    /// When the movement was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Movement kind.
    pub kind: MovementKind,
    /// Positive amount.
    pub amount: Amount,
    /// Account recorded on the movement.
    pub account: AccountName,
    /// Category.
    pub category: String,
    /// Description.
    pub description: String,
}

impl Movement {
    /// Returns the balance adjustments this movement applied.
    #[must_use]
    pub fn effects(&self, cash: &AccountName) -> Vec<BalanceAdjustment> {
        self.kind.effects(self.amount, &self.account, cash)
    }
}
