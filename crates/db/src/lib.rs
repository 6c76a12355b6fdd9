//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for `movimientos` and `saldos`
//! - The balance store repository
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{BalanceStore, PostedMovement, StoreError, UpdatedBalance};

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

/// Establishes a connection to the SQLite database.
///
/// The pool holds a single connection: SQLite has one writer and the bot
/// serves one user, so every operation shares the same handle.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options.max_connections(1).min_connections(1);
    Database::connect(options).await
}

/// Applies all pending migrations.
///
/// # Errors
///
/// Returns an error if a migration fails.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    migration::Migrator::up(db, None).await
}
