//! `SeaORM` Entity for fee_schedules table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fee_schedules")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub school_year_id: String,
    pub grade_level_id: String,
    pub name: String,
    pub is_default: bool,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::school_years::Entity",
        from = "Column::SchoolYearId",
        to = "super::school_years::Column::Id"
    )]
    SchoolYears,
    #[sea_orm(
        belongs_to = "super::grade_levels::Entity",
        from = "Column::GradeLevelId",
        to = "super::grade_levels::Column::Id"
    )]
    GradeLevels,
    #[sea_orm(has_many = "super::fee_schedule_lines::Entity")]
    FeeScheduleLines,
}

impl Related<super::school_years::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SchoolYears.def()
    }
}

impl Related<super::grade_levels::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradeLevels.def()
    }
}

impl Related<super::fee_schedule_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeeScheduleLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
