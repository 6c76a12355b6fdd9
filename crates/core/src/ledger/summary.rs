//! Financial summary aggregates.

use rust_decimal::Decimal;
use serde::Serialize;

use super::account::{AccountBook, AccountClass, AccountName};
use super::balance::Balances;

/// One account in a summary breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceLine {
    /// The account.
    pub account: AccountName,
    /// Amount shown for the account (absolute value for debts).
    pub amount: Decimal,
}

/// Aggregated view of every balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialSummary {
    /// Balance of the cash account.
    pub available: Decimal,
    /// Accounts that owe the user money.
    pub receivables: Vec<BalanceLine>,
    /// Sum of receivables.
    pub total_receivable: Decimal,
    /// Accounts the user owes, as positive amounts.
    pub payables: Vec<BalanceLine>,
    /// Sum of payables.
    pub total_debt: Decimal,
    /// `available - total_debt + total_receivable`.
    pub net_worth: Decimal,
}

impl FinancialSummary {
    /// Builds the summary from the full account→balance mapping.
    ///
    /// Real-money accounts other than cash never carry a balance of their
    /// own and are left out.
    #[must_use]
    pub fn from_balances(balances: &Balances, book: &AccountBook) -> Self {
        let mut available = Decimal::ZERO;
        let mut receivables = Vec::new();
        let mut payables = Vec::new();
        let mut total_receivable = Decimal::ZERO;
        let mut total_debt = Decimal::ZERO;

        for (account, &amount) in balances {
            match book.classify(account) {
                AccountClass::RealMoney if book.is_cash(account) => available += amount,
                AccountClass::RealMoney => {}
                AccountClass::Liability if amount > Decimal::ZERO => {
                    total_receivable += amount;
                    receivables.push(BalanceLine {
                        account: account.clone(),
                        amount,
                    });
                }
                AccountClass::Liability if amount < Decimal::ZERO => {
                    total_debt += amount.abs();
                    payables.push(BalanceLine {
                        account: account.clone(),
                        amount: amount.abs(),
                    });
                }
                AccountClass::Liability => {}
            }
        }

        Self {
            available,
            receivables,
            total_receivable,
            payables,
            total_debt,
            net_worth: available - total_debt + total_receivable,
        }
    }
}
