//! `SeaORM` Entity for fee_items table.
//!
//! `revenue_account_code` references `accounts.code` by value; the accounting
//! repository checks it exists before inserting.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fee_items")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub default_amount_cents: i64,
    pub revenue_account_code: String,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::fee_schedule_lines::Entity")]
    FeeScheduleLines,
}

impl Related<super::fee_schedule_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeeScheduleLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
