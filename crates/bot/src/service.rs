//! Command dispatch.
//!
//! Each recognized command passes the guard, then runs exactly one balance
//! store operation and renders its reply.

use cartera_core::ledger::{AccountName, Amount, FinancialSummary};
use cartera_db::BalanceStore;
use tracing::{error, info, warn};

use crate::commands::{
    CREDIT_CARD_ACCOUNT, CREDIT_CARD_CATEGORY, Command, EXPENSE_CATEGORY, Shortcut,
};
use crate::error::CommandError;
use crate::guard::Guard;
use crate::replies::{self, Reply};

const DEFAULT_INCOME_DESCRIPTION: &str = "Ingreso";
const DEFAULT_EXPENSE_DESCRIPTION: &str = "Gasto";
const DEFAULT_DEBT_DESCRIPTION: &str = "Deuda";
const DEFAULT_RECEIVABLE_DESCRIPTION: &str = "Préstamo";

/// Maps chat commands to balance store operations.
#[derive(Debug, Clone)]
pub struct CommandService {
    store: BalanceStore,
    guard: Guard,
}

impl CommandService {
    /// Creates a new command service.
    #[must_use]
    pub const fn new(store: BalanceStore, guard: Guard) -> Self {
        Self { store, guard }
    }

    /// Returns the underlying balance store.
    #[must_use]
    pub const fn store(&self) -> &BalanceStore {
        &self.store
    }

    /// Handles one message from `user_id`.
    ///
    /// Returns `None` when the message is not a known command.
    pub async fn handle(&self, user_id: i64, text: &str) -> Option<Reply> {
        let parsed = Command::parse(text).transpose()?;

        if let Err(e) = self.guard.check(user_id) {
            warn!(user_id, error = %e, "Rejected command from unauthorized user");
            return Some(Reply::plain(replies::UNAUTHORIZED));
        }

        let command = match parsed {
            Ok(command) => command,
            Err(e) => return Some(error_reply(text, &e)),
        };

        let name = command.name();
        info!(command = name, user_id, "Executing command");

        Some(match self.execute(command).await {
            Ok(reply) => reply,
            Err(e) => error_reply(name, &e),
        })
    }

    /// Runs a parsed command against the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects or fails the operation.
    pub async fn execute(&self, command: Command) -> Result<Reply, CommandError> {
        let book = self.store.book();

        match command {
            Command::Start => Ok(replies::help()),
            Command::Income {
                amount,
                description,
            } => {
                let description = or_default(description, DEFAULT_INCOME_DESCRIPTION);
                let posted = self.store.record_income(amount, &description).await?;
                Ok(replies::income(amount, &posted.movement.account))
            }
            Command::Expense { amount, words } => {
                let (account, description) = self.split_expense_words(words).await?;
                self.expense(amount, account, EXPENSE_CATEGORY, description)
                    .await
            }
            Command::CreditCard {
                amount,
                description,
            } => {
                let account = AccountName::parse(CREDIT_CARD_ACCOUNT)?;
                let description = or_default(description, CREDIT_CARD_CATEGORY);
                self.expense(amount, account, CREDIT_CARD_CATEGORY, description)
                    .await
            }
            Command::Shortcut(shortcut) => self.shortcut(&shortcut).await,
            Command::PayDebt { amount, account } => {
                let posted = self.store.record_debt_payment(amount, account).await?;
                Ok(replies::debt_payment(amount, &posted.movement.account))
            }
            Command::Debt {
                amount,
                account,
                description,
            } => {
                let description = or_default(description, DEFAULT_DEBT_DESCRIPTION);
                let posted = self
                    .store
                    .record_debt(amount, account, &description)
                    .await?;
                Ok(replies::debt(amount, &posted.movement.account))
            }
            Command::Receivable {
                amount,
                person,
                description,
            } => {
                let description = or_default(description, DEFAULT_RECEIVABLE_DESCRIPTION);
                let posted = self
                    .store
                    .record_receivable(amount, person, &description)
                    .await?;
                let person = &posted.movement.account;
                let owed = posted.balance_of(person).unwrap_or(amount.value());
                Ok(replies::receivable(person, owed))
            }
            Command::PaymentReceived { amount, person } => {
                let posted = self.store.record_payment_received(amount, person).await?;
                Ok(replies::payment_received(amount, &posted.movement.account))
            }
            Command::Summary => {
                let balances = self.store.get_summary().await?;
                Ok(replies::summary(&FinancialSummary::from_balances(
                    &balances, book,
                )))
            }
            Command::History { limit } => {
                let movements = self.store.recent_movements(limit).await?;
                Ok(replies::history(&movements))
            }
        }
    }

    /// The first word is the account only when that account already exists.
    async fn split_expense_words(
        &self,
        words: Vec<String>,
    ) -> Result<(AccountName, String), CommandError> {
        if let Some(account) = words.first().and_then(|w| AccountName::parse(w).ok())
            && self.store.find_balance(&account).await?.is_some()
        {
            let description = words[1..].join(" ");
            return Ok((account, or_default(description, DEFAULT_EXPENSE_DESCRIPTION)));
        }

        let description = or_default(words.join(" "), DEFAULT_EXPENSE_DESCRIPTION);
        Ok((self.store.book().cash().clone(), description))
    }

    async fn expense(
        &self,
        amount: Amount,
        account: AccountName,
        category: &str,
        description: String,
    ) -> Result<Reply, CommandError> {
        let book = self.store.book();
        let posted = self
            .store
            .record_expense(amount, account, category, &description)
            .await?;
        let account = &posted.movement.account;

        if book.is_real_money(account) {
            let via = (!book.is_cash(account)).then_some(account);
            Ok(replies::real_expense(amount, via, &posted.movement.description))
        } else {
            Ok(replies::credit_expense(
                amount,
                account,
                &posted.movement.description,
                posted.balance_of(account),
            ))
        }
    }

    async fn shortcut(&self, shortcut: &Shortcut) -> Result<Reply, CommandError> {
        let amount = Amount::from_minor(shortcut.minor)?;
        let cash = self.store.book().cash().clone();
        self.store
            .record_expense(amount, cash, shortcut.category, shortcut.description)
            .await?;
        Ok(replies::shortcut(shortcut, amount))
    }
}

fn or_default(description: String, default: &str) -> String {
    if description.trim().is_empty() {
        default.to_string()
    } else {
        description
    }
}

fn error_reply(command: &str, err: &CommandError) -> Reply {
    match err {
        CommandError::Usage(hint) => replies::usage(hint),
        CommandError::Ledger(e) => {
            warn!(command, error_code = e.error_code(), error = %e, "Command rejected");
            replies::ledger_error(e)
        }
        CommandError::Store(e) => {
            error!(command, error = %e, "Storage failure while executing command");
            Reply::plain(replies::INTERNAL_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartera_core::ledger::AccountBook;
    use cartera_db::{connect, migrate};
    use rust_decimal_macros::dec;
    use sea_orm::ConnectionTrait;

    const OWNER: i64 = 1001;

    async fn service() -> CommandService {
        let db = connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");
        migrate(&db).await.expect("Failed to run migrations");
        CommandService::new(BalanceStore::new(db, AccountBook::default()), Guard::new(OWNER))
    }

    async fn send(service: &CommandService, text: &str) -> Reply {
        service
            .handle(OWNER, text)
            .await
            .unwrap_or_else(|| panic!("no reply for {text}"))
    }

    async fn balance(service: &CommandService, account: &str) -> Option<rust_decimal::Decimal> {
        service
            .store()
            .find_balance(&AccountName::parse(account).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_unknown_text_gets_no_reply() {
        let service = service().await;
        assert_eq!(service.handle(OWNER, "hola").await, None);
        assert_eq!(service.handle(OWNER, "/nada").await, None);
    }

    #[tokio::test]
    async fn test_other_users_are_rejected_before_anything_runs() {
        let service = service().await;

        let reply = service.handle(7, "/ingreso 1000").await.unwrap();
        assert_eq!(reply.text, replies::UNAUTHORIZED);

        let reply = service.handle(7, "/ingreso").await.unwrap();
        assert_eq!(reply.text, replies::UNAUTHORIZED);

        assert_eq!(balance(&service, "Efectivo").await, Some(dec!(0)));
    }

    #[tokio::test]
    async fn test_income_and_cash_expense() {
        let service = service().await;

        let reply = send(&service, "/ingreso 1000 Nomina").await;
        assert_eq!(reply.text, "✅ Recibido: *$1,000.00* en Efectivo.");

        let reply = send(&service, "/gasto 50 lunch").await;
        assert_eq!(reply.text, "💸 Restados *$50.00* de tu efectivo por: lunch.");
        assert_eq!(balance(&service, "Efectivo").await, Some(dec!(950)));
    }

    #[tokio::test]
    async fn test_expense_on_debit_account_comes_out_of_cash() {
        let service = service().await;
        send(&service, "/ingreso 500").await;

        let reply = send(&service, "/gasto 80 revolut super").await;
        assert_eq!(
            reply.text,
            "💸 Restados *$80.00* de tu efectivo (Revolut) por: super."
        );
        assert_eq!(balance(&service, "Efectivo").await, Some(dec!(420)));
        assert_eq!(balance(&service, "Revolut").await, Some(dec!(0)));

        let last = &service.store().recent_movements(1).await.unwrap()[0];
        assert_eq!(last.account.as_str(), "Revolut");
    }

    #[tokio::test]
    async fn test_expense_on_existing_credit_account() {
        let service = service().await;

        let reply = send(&service, "/gasto 200 nu shoes").await;
        assert!(reply.text.starts_with("💳 Cargados *$200.00* a Nu por: shoes."));
        assert_eq!(balance(&service, "Nu").await, Some(dec!(-200)));
        assert_eq!(balance(&service, "Efectivo").await, Some(dec!(0)));
    }

    #[tokio::test]
    async fn test_expense_unknown_first_word_is_description() {
        let service = service().await;

        send(&service, "/gasto 30 Oxxo refresco").await;

        assert_eq!(balance(&service, "Oxxo").await, None);
        assert_eq!(balance(&service, "Efectivo").await, Some(dec!(-30)));
        let last = &service.store().recent_movements(1).await.unwrap()[0];
        assert_eq!(last.description, "Oxxo refresco");
        assert_eq!(last.category, EXPENSE_CATEGORY);
    }

    #[tokio::test]
    async fn test_expense_default_description() {
        let service = service().await;
        send(&service, "/gasto 12").await;
        let last = &service.store().recent_movements(1).await.unwrap()[0];
        assert_eq!(last.description, DEFAULT_EXPENSE_DESCRIPTION);
    }

    #[tokio::test]
    async fn test_shortcuts_debit_cash() {
        let service = service().await;

        let reply = send(&service, "/camion").await;
        assert_eq!(
            reply.text,
            "🚌 Camión registrado: *$8.50* restados de tu efectivo."
        );
        send(&service, "/escuela").await;
        assert_eq!(balance(&service, "Efectivo").await, Some(dec!(-30.50)));
    }

    #[tokio::test]
    async fn test_credit_card_shortcut() {
        let service = service().await;

        send(&service, "/tc 350").await;

        assert_eq!(balance(&service, "Tc").await, Some(dec!(-350)));
        let last = &service.store().recent_movements(1).await.unwrap()[0];
        assert_eq!(last.category, CREDIT_CARD_CATEGORY);
        assert_eq!(last.description, CREDIT_CARD_CATEGORY);
    }

    #[tokio::test]
    async fn test_receivable_cycle() {
        let service = service().await;

        let reply = send(&service, "/debe 300 juan comida").await;
        assert_eq!(reply.text, "💰 Registro: Juan ahora te debe *$300.00*.");

        send(&service, "/pago 300 Juan").await;
        assert_eq!(balance(&service, "Juan").await, Some(dec!(0)));
        assert_eq!(balance(&service, "Efectivo").await, Some(dec!(300)));
    }

    #[tokio::test]
    async fn test_debt_and_payment() {
        let service = service().await;

        let reply = send(&service, "/deuda 500 Nu super").await;
        assert_eq!(reply.text, "💳 Anotada deuda de *$500.00* en Nu.");

        let reply = send(&service, "/pagar 150 nu").await;
        assert_eq!(
            reply.text,
            "✅ Pagado: *$150.00* a Nu. Se descontó de tu efectivo."
        );
        assert_eq!(balance(&service, "Nu").await, Some(dec!(-350)));
        assert_eq!(balance(&service, "Efectivo").await, Some(dec!(-150)));
    }

    #[tokio::test]
    async fn test_cash_as_counter_party_is_rejected() {
        let service = service().await;

        let reply = send(&service, "/pagar 10 efectivo").await;
        assert_eq!(
            reply.text,
            "❌ La cuenta Efectivo no se puede usar para este movimiento."
        );
        assert!(service.store().all_movements().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_gets_generic_reply() {
        let service = service().await;
        service
            .store()
            .connection()
            .execute_unprepared("DROP TABLE saldos")
            .await
            .unwrap();

        let reply = send(&service, "/saldo").await;
        assert_eq!(reply.text, replies::INTERNAL_ERROR);
        assert!(!reply.markdown);

        let reply = send(&service, "/ingreso 100").await;
        assert_eq!(reply.text, replies::INTERNAL_ERROR);
        assert!(service.store().all_movements().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bad_arguments_get_usage_hint() {
        let service = service().await;
        let reply = send(&service, "/pago 300").await;
        assert!(reply.text.starts_with("❌ Uso: /pago"));
        assert!(!reply.markdown);
    }

    #[tokio::test]
    async fn test_summary_and_history() {
        let service = service().await;
        send(&service, "/ingreso 1000").await;
        send(&service, "/gasto 200 Nu").await;
        send(&service, "/debe 300 Juan").await;

        let reply = send(&service, "/saldo").await;
        assert!(reply.text.contains("💰 *Dinero Disponible:* $1,000.00"));
        assert!(reply.text.ends_with("✨ *Ahorro Neto Real:* $1,100.00"));

        let reply = send(&service, "/historial 2").await;
        assert!(reply.text.starts_with("📜 *Últimos 2 movimientos*"));
        assert!(reply.text.contains("🤝 Préstamo Juan"));
        assert!(!reply.text.contains("Ingreso"));
    }
}
