//! `SeaORM` Entity for subjects table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subjects")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub name: String,
    pub units: Option<i32>,
    pub grade_level_id: String,
    pub curriculum_version_id: String,
    pub school_year_id: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::grade_levels::Entity",
        from = "Column::GradeLevelId",
        to = "super::grade_levels::Column::Id"
    )]
    GradeLevels,
    #[sea_orm(
        belongs_to = "super::curriculum_versions::Entity",
        from = "Column::CurriculumVersionId",
        to = "super::curriculum_versions::Column::Id"
    )]
    CurriculumVersions,
    #[sea_orm(
        belongs_to = "super::school_years::Entity",
        from = "Column::SchoolYearId",
        to = "super::school_years::Column::Id"
    )]
    SchoolYears,
}

impl Related<super::grade_levels::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradeLevels.def()
    }
}

impl Related<super::curriculum_versions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CurriculumVersions.def()
    }
}

impl Related<super::school_years::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SchoolYears.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
