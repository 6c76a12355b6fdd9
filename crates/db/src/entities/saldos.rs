//! `SeaORM` Entity for current account balances.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "saldos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "cuenta")]
    pub account: String,
    /// Signed balance in centavos.
    #[sea_orm(column_name = "monto")]
    pub balance_minor: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
