//! Initial database migration.
//!
//! Creates the movement log, the balance table, the append-only guards on
//! the log, and seeds the default accounts.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: TABLES
        // ============================================================
        db.execute_unprepared(MOVIMIENTOS_SQL).await?;
        db.execute_unprepared(MOVIMIENTOS_INDEX_SQL).await?;
        db.execute_unprepared(SALDOS_SQL).await?;

        // ============================================================
        // PART 2: APPEND-ONLY LEDGER
        // ============================================================
        db.execute_unprepared(PREVENT_UPDATE_TRIGGER_SQL).await?;
        db.execute_unprepared(PREVENT_DELETE_TRIGGER_SQL).await?;

        // ============================================================
        // PART 3: SEED DATA
        // ============================================================
        db.execute_unprepared(SEED_ACCOUNTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for statement in DROP_ALL_SQL {
            db.execute_unprepared(statement).await?;
        }
        Ok(())
    }
}

const MOVIMIENTOS_SQL: &str = r"
-- Append-only log of every movement. Amounts are centavos.
CREATE TABLE IF NOT EXISTS movimientos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    fecha TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    monto INTEGER NOT NULL CHECK (monto > 0),
    tipo TEXT NOT NULL CHECK (tipo IN (
        'INCOME', 'REAL_EXPENSE', 'CREDIT_EXPENSE',
        'DEBT_PAYMENT', 'PAYMENT_RECEIVED', 'LOAN_GIVEN'
    )),
    cuenta TEXT NOT NULL,
    categoria TEXT NOT NULL,
    descripcion TEXT NOT NULL DEFAULT ''
)
";

const MOVIMIENTOS_INDEX_SQL: &str = r"
CREATE INDEX IF NOT EXISTS idx_movimientos_cuenta_fecha ON movimientos(cuenta, fecha)
";

const SALDOS_SQL: &str = r"
-- Current signed balance per account. Amounts are centavos.
CREATE TABLE IF NOT EXISTS saldos (
    cuenta TEXT PRIMARY KEY,
    monto INTEGER NOT NULL DEFAULT 0
)
";

const PREVENT_UPDATE_TRIGGER_SQL: &str = r"
CREATE TRIGGER IF NOT EXISTS trg_movimientos_no_update
BEFORE UPDATE ON movimientos
BEGIN
    SELECT RAISE(ABORT, 'movimientos is append-only');
END
";

const PREVENT_DELETE_TRIGGER_SQL: &str = r"
CREATE TRIGGER IF NOT EXISTS trg_movimientos_no_delete
BEFORE DELETE ON movimientos
BEGIN
    SELECT RAISE(ABORT, 'movimientos is append-only');
END
";

const SEED_ACCOUNTS_SQL: &str = r"
INSERT OR IGNORE INTO saldos (cuenta, monto) VALUES
    ('Efectivo', 0),
    ('Revolut', 0),
    ('Nu', 0),
    ('Tc', 0)
";

const DROP_ALL_SQL: [&str; 4] = [
    "DROP TRIGGER IF EXISTS trg_movimientos_no_delete",
    "DROP TRIGGER IF EXISTS trg_movimientos_no_update",
    "DROP TABLE IF EXISTS saldos",
    "DROP TABLE IF EXISTS movimientos",
];
