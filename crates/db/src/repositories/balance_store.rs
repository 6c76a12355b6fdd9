//! Balance store: the movement log plus the running balance per account.
//!
//! Every mutating operation appends one movement and adjusts the affected
//! balance rows inside a single database transaction.

use cartera_core::ledger::{
    AccountBook, AccountName, Amount, Balances, LedgerError, Movement, MovementDraft, Posting,
};
use cartera_shared::types::{from_minor, to_minor};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::debug;

use crate::entities::{movimientos, saldos};

/// Error types for balance store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested movement breaks a bookkeeping rule.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A persisted row could not be read back into a domain value.
    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Balance of one account right after a posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedBalance {
    /// The account.
    pub account: AccountName,
    /// Its new signed balance.
    pub balance: Decimal,
}

/// Result of a successful mutation.
#[derive(Debug, Clone)]
pub struct PostedMovement {
    /// The movement as persisted.
    pub movement: Movement,
    /// New balances of every account the movement touched.
    pub balances: Vec<UpdatedBalance>,
}

impl PostedMovement {
    /// Returns the new balance of an account touched by this movement.
    #[must_use]
    pub fn balance_of(&self, account: &AccountName) -> Option<Decimal> {
        self.balances
            .iter()
            .find(|updated| &updated.account == account)
            .map(|updated| updated.balance)
    }
}

/// Repository owning `movimientos` and `saldos`.
#[derive(Debug, Clone)]
pub struct BalanceStore {
    db: DatabaseConnection,
    book: AccountBook,
}

impl BalanceStore {
    /// Creates a new balance store.
    #[must_use]
    pub const fn new(db: DatabaseConnection, book: AccountBook) -> Self {
        Self { db, book }
    }

    /// Returns the account classification in use.
    #[must_use]
    pub const fn book(&self) -> &AccountBook {
        &self.book
    }

    /// Returns the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Credits the cash account and logs `INCOME`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database transaction fails.
    pub async fn record_income(
        &self,
        amount: Amount,
        description: &str,
    ) -> Result<PostedMovement, StoreError> {
        self.post(Posting::income(&self.book, amount, description))
            .await
    }

    /// Debits cash when `account` is a real-money account (`REAL_EXPENSE`),
    /// otherwise the liability account itself (`CREDIT_EXPENSE`).
    ///
    /// # Errors
    ///
    /// Returns an error if the database transaction fails.
    pub async fn record_expense(
        &self,
        amount: Amount,
        account: AccountName,
        category: &str,
        description: &str,
    ) -> Result<PostedMovement, StoreError> {
        self.post(Posting::expense(
            &self.book,
            amount,
            account,
            category,
            description,
        ))
        .await
    }

    /// Notes a new debt on a liability account without moving cash.
    ///
    /// # Errors
    ///
    /// Returns an error for real-money accounts or if the database
    /// transaction fails.
    pub async fn record_debt(
        &self,
        amount: Amount,
        account: AccountName,
        description: &str,
    ) -> Result<PostedMovement, StoreError> {
        let posting = Posting::debt(&self.book, amount, account, description)?;
        self.post(posting).await
    }

    /// Debits cash and credits the named account, logging `DEBT_PAYMENT`.
    ///
    /// # Errors
    ///
    /// Returns an error for real-money accounts or if the database
    /// transaction fails.
    pub async fn record_debt_payment(
        &self,
        amount: Amount,
        account: AccountName,
    ) -> Result<PostedMovement, StoreError> {
        let posting = Posting::debt_payment(&self.book, amount, account)?;
        self.post(posting).await
    }

    /// Credits the person's account (money owed to the user), logging `LOAN_GIVEN`.
    ///
    /// # Errors
    ///
    /// Returns an error for real-money accounts or if the database
    /// transaction fails.
    pub async fn record_receivable(
        &self,
        amount: Amount,
        person: AccountName,
        description: &str,
    ) -> Result<PostedMovement, StoreError> {
        let posting = Posting::receivable(&self.book, amount, person, description)?;
        self.post(posting).await
    }

    /// Credits cash and debits the person's account, logging `PAYMENT_RECEIVED`.
    ///
    /// # Errors
    ///
    /// Returns an error for real-money accounts or if the database
    /// transaction fails.
    pub async fn record_payment_received(
        &self,
        amount: Amount,
        person: AccountName,
    ) -> Result<PostedMovement, StoreError> {
        let posting = Posting::payment_received(&self.book, amount, person)?;
        self.post(posting).await
    }

    /// Returns every account with its current balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_summary(&self) -> Result<Balances, StoreError> {
        let rows = saldos::Entity::find()
            .order_by_asc(saldos::Column::Account)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|row| {
                let account = AccountName::parse(&row.account)
                    .map_err(|e| StoreError::CorruptRow(format!("saldo '{}': {e}", row.account)))?;
                Ok((account, from_minor(row.balance_minor)))
            })
            .collect()
    }

    /// Returns the balance of one account, or `None` if it was never touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_balance(&self, account: &AccountName) -> Result<Option<Decimal>, StoreError> {
        let row = saldos::Entity::find_by_id(account.as_str().to_owned())
            .one(&self.db)
            .await?;
        Ok(row.map(|row| from_minor(row.balance_minor)))
    }

    /// Returns the latest movements, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn recent_movements(&self, limit: u64) -> Result<Vec<Movement>, StoreError> {
        movimientos::Entity::find()
            .order_by_desc(movimientos::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?
            .into_iter()
            .map(to_movement)
            .collect()
    }

    /// Returns the whole movement log in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn all_movements(&self) -> Result<Vec<Movement>, StoreError> {
        movimientos::Entity::find()
            .order_by_asc(movimientos::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(to_movement)
            .collect()
    }

    /// Persists a posting atomically.
    ///
    /// Dropping `txn` on any early return rolls everything back.
    async fn post(&self, posting: Posting) -> Result<PostedMovement, StoreError> {
        let txn = self.db.begin().await?;

        for account in posting.accounts() {
            ensure_account(&txn, account).await?;
        }

        let movement = insert_movement(&txn, &posting.draft).await?;

        let mut balances = Vec::with_capacity(posting.adjustments.len());
        for adjustment in &posting.adjustments {
            let balance = adjust_balance(&txn, &adjustment.account, adjustment.delta).await?;
            balances.push(UpdatedBalance {
                account: adjustment.account.clone(),
                balance,
            });
        }

        txn.commit().await?;

        debug!(
            movement_id = movement.id,
            kind = %movement.kind,
            account = %movement.account,
            amount = %movement.amount.value(),
            adjustments = posting.adjustments.len(),
            "Movement posted"
        );

        Ok(PostedMovement { movement, balances })
    }
}

/// Creates the balance row at zero if the account was never referenced.
async fn ensure_account(txn: &DatabaseTransaction, account: &AccountName) -> Result<(), DbErr> {
    let existing = saldos::Entity::find_by_id(account.as_str().to_owned())
        .one(txn)
        .await?;

    if existing.is_none() {
        saldos::Entity::insert(saldos::ActiveModel {
            account: Set(account.as_str().to_owned()),
            balance_minor: Set(0),
        })
        .exec_without_returning(txn)
        .await?;
        debug!(account = %account, "Account created");
    }

    Ok(())
}

async fn insert_movement(
    txn: &DatabaseTransaction,
    draft: &MovementDraft,
) -> Result<Movement, StoreError> {
    let model = movimientos::ActiveModel {
        recorded_at: Set(Utc::now()),
        amount_minor: Set(draft.amount.minor()),
        kind: Set(draft.kind.as_str().to_owned()),
        account: Set(draft.account.as_str().to_owned()),
        category: Set(draft.category.clone()),
        description: Set(draft.description.clone()),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    to_movement(model)
}

/// Adds `delta` to the account balance and returns the new balance.
async fn adjust_balance(
    txn: &DatabaseTransaction,
    account: &AccountName,
    delta: Decimal,
) -> Result<Decimal, StoreError> {
    let row = saldos::Entity::find_by_id(account.as_str().to_owned())
        .one(txn)
        .await?
        .ok_or_else(|| StoreError::CorruptRow(format!("saldo '{account}' missing")))?;

    let new_minor = to_minor(delta)
        .and_then(|delta_minor| row.balance_minor.checked_add(delta_minor))
        .ok_or(LedgerError::AmountOutOfRange)?;

    let mut active: saldos::ActiveModel = row.into();
    active.balance_minor = Set(new_minor);
    let updated = active.update(txn).await?;

    Ok(from_minor(updated.balance_minor))
}

fn to_movement(model: movimientos::Model) -> Result<Movement, StoreError> {
    let id = model.id;
    let corrupt = move |e: LedgerError| StoreError::CorruptRow(format!("movimiento {id}: {e}"));

    Ok(Movement {
        id,
        recorded_at: model.recorded_at,
        kind: model.kind.parse().map_err(corrupt)?,
        amount: Amount::from_minor(model.amount_minor).map_err(corrupt)?,
        account: AccountName::parse(&model.account).map_err(corrupt)?,
        category: model.category,
        description: model.description,
    })
}
