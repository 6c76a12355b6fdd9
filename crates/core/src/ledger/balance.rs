//! Running balance calculations.
//!
//! Sign convention: positive is money on hand or money owed to the user,
//! negative is money the user owes.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::account::AccountName;
use super::movement::Movement;

/// A signed change to one account balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceAdjustment {
    /// The account being adjusted.
    pub account: AccountName,
    /// Signed delta added to the balance.
    pub delta: Decimal,
}

impl BalanceAdjustment {
    /// Creates a new adjustment.
    #[must_use]
    pub const fn new(account: AccountName, delta: Decimal) -> Self {
        Self { account, delta }
    }
}

/// Account balances keyed by normalized account name.
pub type Balances = BTreeMap<AccountName, Decimal>;

/// Applies adjustments to a balance map, creating accounts at zero on first touch.
pub fn apply_adjustments(balances: &mut Balances, adjustments: &[BalanceAdjustment]) {
    for adjustment in adjustments {
        *balances
            .entry(adjustment.account.clone())
            .or_insert(Decimal::ZERO) += adjustment.delta;
    }
}

/// Recomputes balances from scratch by replaying movements in order.
///
/// For a consistent store, replaying every movement yields the persisted
/// balance of every account that has been touched.
#[must_use]
pub fn replay<'a, I>(movements: I, cash: &AccountName) -> Balances
where
    I: IntoIterator<Item = &'a Movement>,
{
    let mut balances = Balances::new();
    for movement in movements {
        apply_adjustments(&mut balances, &movement.effects(cash));
    }
    balances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Amount, MovementKind};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn name(raw: &str) -> AccountName {
        AccountName::parse(raw).unwrap()
    }

    fn movement(id: i64, kind: MovementKind, amount: Decimal, account: &str) -> Movement {
        Movement {
            id,
            recorded_at: Utc::now(),
            kind,
            amount: Amount::new(amount).unwrap(),
            account: name(account),
            category: String::new(),
            description: String::new(),
        }
    }

    #[test]
    fn test_apply_creates_missing_accounts() {
        let mut balances = Balances::new();
        apply_adjustments(
            &mut balances,
            &[BalanceAdjustment::new(name("Nu"), dec!(-200))],
        );
        assert_eq!(balances.get(&name("Nu")), Some(&dec!(-200)));
    }

    #[test]
    fn test_replay_income_then_expense() {
        let cash = name("Efectivo");
        let movements = vec![
            movement(1, MovementKind::Income, dec!(1000), "Efectivo"),
            movement(2, MovementKind::RealExpense, dec!(50), "Efectivo"),
            movement(3, MovementKind::CreditExpense, dec!(200), "Nu"),
        ];

        let balances = replay(&movements, &cash);
        assert_eq!(balances.get(&cash), Some(&dec!(950)));
        assert_eq!(balances.get(&name("Nu")), Some(&dec!(-200)));
    }

    #[test]
    fn test_replay_receivable_cycle_returns_to_zero() {
        let cash = name("Efectivo");
        let movements = vec![
            movement(1, MovementKind::LoanGiven, dec!(300), "Juan"),
            movement(2, MovementKind::PaymentReceived, dec!(300), "Juan"),
        ];

        let balances = replay(&movements, &cash);
        assert_eq!(balances.get(&name("Juan")), Some(&Decimal::ZERO));
        assert_eq!(balances.get(&cash), Some(&dec!(300)));
    }
}
