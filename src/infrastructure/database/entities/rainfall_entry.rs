//! Yearly rainfall measurement entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rainfall_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Calendar year; backed by a unique index
    #[sea_orm(unique)]
    pub year: i32,

    /// Rainfall amount for the year
    pub amount: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
