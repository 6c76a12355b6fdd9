//! `SeaORM` Entity for the append-only movement log.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "movimientos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "fecha")]
    pub recorded_at: DateTimeUtc,
    /// Amount in centavos, always positive.
    #[sea_orm(column_name = "monto")]
    pub amount_minor: i64,
    #[sea_orm(column_name = "tipo")]
    pub kind: String,
    #[sea_orm(column_name = "cuenta")]
    pub account: String,
    #[sea_orm(column_name = "categoria")]
    pub category: String,
    #[sea_orm(column_name = "descripcion")]
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
