//! `SeaORM` entity definitions.

pub mod movimientos;
pub mod saldos;
