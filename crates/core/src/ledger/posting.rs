//! Posting plans: which movement to log and which balances to adjust.
//!
//! A [`Posting`] is computed before touching storage. The store persists the
//! draft and applies the adjustments inside one database transaction.

use serde::Serialize;

use super::account::{AccountBook, AccountClass, AccountName};
use super::amount::Amount;
use super::balance::BalanceAdjustment;
use super::error::LedgerError;
use super::movement::{MovementDraft, MovementKind};

/// Category recorded on income.
pub const INCOME_CATEGORY: &str = "Ingreso";
/// Category recorded when a new debt is noted.
pub const DEBT_CATEGORY: &str = "Deuda";
/// Category recorded on debt payments.
pub const DEBT_PAYMENT_CATEGORY: &str = "Pago de deuda";
/// Category recorded on money lent.
pub const RECEIVABLE_CATEGORY: &str = "Préstamo";
/// Category recorded when a loan is paid back.
pub const PAYMENT_RECEIVED_CATEGORY: &str = "Cobro";

/// A movement draft together with the balance adjustments it implies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Posting {
    /// The movement to append to the ledger.
    pub draft: MovementDraft,
    /// The balance changes to apply.
    pub adjustments: Vec<BalanceAdjustment>,
}

impl Posting {
    fn from_draft(draft: MovementDraft, cash: &AccountName) -> Self {
        let adjustments = draft.kind.effects(draft.amount, &draft.account, cash);
        Self { draft, adjustments }
    }

    fn build(
        book: &AccountBook,
        kind: MovementKind,
        amount: Amount,
        account: AccountName,
        category: &str,
        description: &str,
    ) -> Self {
        Self::from_draft(
            MovementDraft {
                kind,
                amount,
                account,
                category: category.to_string(),
                description: description.trim().to_string(),
            },
            book.cash(),
        )
    }

    /// Income credited to the cash account.
    #[must_use]
    pub fn income(book: &AccountBook, amount: Amount, description: &str) -> Self {
        Self::build(
            book,
            MovementKind::Income,
            amount,
            book.cash().clone(),
            INCOME_CATEGORY,
            description,
        )
    }

    /// Spending. On a real-money account the cash account pays and the named
    /// account is only recorded (`REAL_EXPENSE`); any other account is a
    /// liability and goes further negative (`CREDIT_EXPENSE`).
    #[must_use]
    pub fn expense(
        book: &AccountBook,
        amount: Amount,
        account: AccountName,
        category: &str,
        description: &str,
    ) -> Self {
        let kind = match book.classify(&account) {
            AccountClass::RealMoney => MovementKind::RealExpense,
            AccountClass::Liability => MovementKind::CreditExpense,
        };
        Self::build(book, kind, amount, account, category, description)
    }

    /// A debt noted on a liability account without moving cash.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ReservedAccount`] for real-money accounts.
    pub fn debt(
        book: &AccountBook,
        amount: Amount,
        account: AccountName,
        description: &str,
    ) -> Result<Self, LedgerError> {
        reject_real_money(book, &account)?;
        Ok(Self::build(
            book,
            MovementKind::CreditExpense,
            amount,
            account,
            DEBT_CATEGORY,
            description,
        ))
    }

    /// Cash paid towards the named account, moving it toward zero.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ReservedAccount`] for real-money accounts.
    pub fn debt_payment(
        book: &AccountBook,
        amount: Amount,
        account: AccountName,
    ) -> Result<Self, LedgerError> {
        reject_real_money(book, &account)?;
        let description = format!("Pago a {account}");
        Ok(Self::build(
            book,
            MovementKind::DebtPayment,
            amount,
            account,
            DEBT_PAYMENT_CATEGORY,
            &description,
        ))
    }

    /// Money lent to a person; their balance grows positive.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ReservedAccount`] for real-money accounts.
    pub fn receivable(
        book: &AccountBook,
        amount: Amount,
        person: AccountName,
        description: &str,
    ) -> Result<Self, LedgerError> {
        reject_real_money(book, &person)?;
        Ok(Self::build(
            book,
            MovementKind::LoanGiven,
            amount,
            person,
            RECEIVABLE_CATEGORY,
            description,
        ))
    }

    /// Money paid back by a person: cash goes up, their balance goes down.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ReservedAccount`] for real-money accounts.
    pub fn payment_received(
        book: &AccountBook,
        amount: Amount,
        person: AccountName,
    ) -> Result<Self, LedgerError> {
        reject_real_money(book, &person)?;
        let description = format!("Cobro a {person}");
        Ok(Self::build(
            book,
            MovementKind::PaymentReceived,
            amount,
            person,
            PAYMENT_RECEIVED_CATEGORY,
            &description,
        ))
    }

    /// Returns the distinct accounts this posting touches, in adjustment order.
    #[must_use]
    pub fn accounts(&self) -> Vec<&AccountName> {
        let mut accounts: Vec<&AccountName> = Vec::with_capacity(self.adjustments.len());
        for adjustment in &self.adjustments {
            if !accounts.contains(&&adjustment.account) {
                accounts.push(&adjustment.account);
            }
        }
        accounts
    }
}

fn reject_real_money(book: &AccountBook, account: &AccountName) -> Result<(), LedgerError> {
    if book.is_real_money(account) {
        return Err(LedgerError::ReservedAccount(account.to_string()));
    }
    Ok(())
}
