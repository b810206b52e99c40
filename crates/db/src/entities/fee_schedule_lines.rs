//! `SeaORM` Entity for fee_schedule_lines table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fee_schedule_lines")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub fee_schedule_id: String,
    pub fee_item_id: String,
    pub amount_cents: i64,
    pub is_required: bool,
    pub sort_order: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fee_schedules::Entity",
        from = "Column::FeeScheduleId",
        to = "super::fee_schedules::Column::Id",
        on_delete = "Cascade"
    )]
    FeeSchedules,
    #[sea_orm(
        belongs_to = "super::fee_items::Entity",
        from = "Column::FeeItemId",
        to = "super::fee_items::Column::Id"
    )]
    FeeItems,
}

impl Related<super::fee_schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeeSchedules.def()
    }
}

impl Related<super::fee_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeeItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
