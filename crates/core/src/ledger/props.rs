//! Property-based tests for the balance-mutation rules.

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::{
    AccountBook, AccountName, Amount, Balances, FinancialSummary, Movement, Posting,
    apply_adjustments, replay,
};

const ACCOUNTS: [&str; 6] = ["Efectivo", "Revolut", "Nu", "Tc", "Juan", "Ana"];

/// One store operation with its arguments.
#[derive(Debug, Clone)]
enum Op {
    Income(i64),
    Expense(i64, usize),
    Debt(i64, usize),
    DebtPayment(i64, usize),
    Receivable(i64, usize),
    PaymentReceived(i64, usize),
}

fn cents() -> impl Strategy<Value = i64> {
    1i64..10_000_000i64
}

fn account_index() -> impl Strategy<Value = usize> {
    0..ACCOUNTS.len()
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        cents().prop_map(Op::Income),
        (cents(), account_index()).prop_map(|(c, a)| Op::Expense(c, a)),
        (cents(), account_index()).prop_map(|(c, a)| Op::Debt(c, a)),
        (cents(), account_index()).prop_map(|(c, a)| Op::DebtPayment(c, a)),
        (cents(), account_index()).prop_map(|(c, a)| Op::Receivable(c, a)),
        (cents(), account_index()).prop_map(|(c, a)| Op::PaymentReceived(c, a)),
    ]
}

fn account(index: usize) -> AccountName {
    AccountName::parse(ACCOUNTS[index]).unwrap()
}

/// Builds the posting for an operation; rejected operations yield `None`.
fn posting_for(book: &AccountBook, op: &Op) -> Option<Posting> {
    let amount = |c: i64| Amount::from_minor(c).unwrap();
    match *op {
        Op::Income(c) => Some(Posting::income(book, amount(c), "")),
        Op::Expense(c, a) => Some(Posting::expense(book, amount(c), account(a), "Varios", "")),
        Op::Debt(c, a) => Posting::debt(book, amount(c), account(a), "").ok(),
        Op::DebtPayment(c, a) => Posting::debt_payment(book, amount(c), account(a)).ok(),
        Op::Receivable(c, a) => Posting::receivable(book, amount(c), account(a), "").ok(),
        Op::PaymentReceived(c, a) => Posting::payment_received(book, amount(c), account(a)).ok(),
    }
}

/// Applies postings the way the store does and also logs them as movements.
fn run(book: &AccountBook, ops: &[Op]) -> (Balances, Vec<Movement>) {
    let mut balances = Balances::new();
    let mut movements = Vec::new();
    for (id, posting) in ops.iter().filter_map(|op| posting_for(book, op)).enumerate() {
        apply_adjustments(&mut balances, &posting.adjustments);
        movements.push(Movement {
            id: i64::try_from(id).unwrap() + 1,
            recorded_at: Utc::now(),
            kind: posting.draft.kind,
            amount: posting.draft.amount,
            account: posting.draft.account,
            category: posting.draft.category,
            description: posting.draft.description,
        });
    }
    (balances, movements)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Replaying the movement log reproduces the running balances.
    #[test]
    fn prop_replay_matches_running_balances(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let book = AccountBook::default();
        let (balances, movements) = run(&book, &ops);
        prop_assert_eq!(replay(&movements, book.cash()), balances);
    }

    /// The cash balance equals the signed sum of every movement touching cash.
    #[test]
    fn prop_cash_is_signed_sum_of_cash_effects(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let book = AccountBook::default();
        let (balances, movements) = run(&book, &ops);

        let signed_sum: Decimal = movements
            .iter()
            .flat_map(|m| m.effects(book.cash()))
            .filter(|adj| &adj.account == book.cash())
            .map(|adj| adj.delta)
            .sum();

        let cash = balances.get(book.cash()).copied().unwrap_or(Decimal::ZERO);
        prop_assert_eq!(cash, signed_sum);
    }

    /// Net worth equals the plain sum of all balances.
    #[test]
    fn prop_net_worth_is_sum_of_balances(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let book = AccountBook::default();
        let (balances, _) = run(&book, &ops);

        let summary = FinancialSummary::from_balances(&balances, &book);
        let total: Decimal = balances.values().copied().sum();
        prop_assert_eq!(summary.net_worth, total);
    }

    /// Spending through a debit-like account is paid from cash.
    #[test]
    fn prop_debit_accounts_never_hold_a_balance(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let book = AccountBook::default();
        let revolut = AccountName::parse("Revolut").unwrap();
        let (balances, _) = run(&book, &ops);
        prop_assert_eq!(balances.get(&revolut), None);
    }

    /// A payment received from one person never touches another account.
    #[test]
    fn prop_payment_received_leaves_unrelated_accounts(
        paid in cents(),
        received in cents(),
    ) {
        let book = AccountBook::default();
        let nu = AccountName::parse("Nu").unwrap();
        let ops = vec![Op::DebtPayment(paid, 2), Op::PaymentReceived(received, 4)];

        let (after_payment, _) = run(&book, &ops[..1]);
        let (after_both, _) = run(&book, &ops);
        prop_assert_eq!(after_payment.get(&nu), after_both.get(&nu));
    }

    /// Every posting logs a positive amount and touches one or two accounts.
    #[test]
    fn prop_postings_are_well_formed(op in op_strategy()) {
        let book = AccountBook::default();
        if let Some(posting) = posting_for(&book, &op) {
            prop_assert!(posting.draft.amount.value() > Decimal::ZERO);
            prop_assert!((1..=2).contains(&posting.accounts().len()));
        }
    }
}
