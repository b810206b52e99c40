//! `SeaORM` Entity for enrollments table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::EnrollmentStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "enrollments")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub student_id: String,
    pub school_year_id: String,
    pub grade_level_id: String,
    pub section_name: Option<String>,
    pub status: EnrollmentStatus,
    pub enrolled_at: DateTimeUtc,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id",
        on_delete = "Cascade"
    )]
    Students,
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
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
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

impl ActiveModelBehavior for ActiveModel {}
