//! Database migration runner for Cartera.
//!
//! Reads the target from `DATABASE_URL`, e.g.
//! `DATABASE_URL="sqlite:finanzas.db?mode=rwc"`.
//!
//! Usage:
//!   migrator up      - Create the movement log, balances and seed accounts
//!   migrator status  - Show migration status
//!   migrator down    - Drop everything (the movement log included)

use cartera_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The CLI sets up its own tracing.
    cli::run_cli(Migrator).await;
}
