//! Academic repository: school years, grade levels, curricula and subjects.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Serialize;
use sras_core::academic::{
    CurriculumVersionInput, GradeLevelInput, SchoolYearInput, SubjectInput,
};
use sras_shared::AppError;
use sras_shared::types::new_key;
use tracing::info;

use super::on_unique_violation;
use crate::entities::{curriculum_versions, grade_levels, school_years, subjects};

/// Error types for academic operations.
#[derive(Debug, thiserror::Error)]
pub enum AcademicError {
    /// School year not found.
    #[error("School year with ID \"{0}\" does not exist")]
    SchoolYearNotFound(String),

    /// Grade level not found.
    #[error("Grade level with ID \"{0}\" does not exist")]
    GradeLevelNotFound(String),

    /// Curriculum version not found.
    #[error("Curriculum version with ID \"{0}\" does not exist")]
    CurriculumVersionNotFound(String),

    /// Grade level code already exists.
    #[error("Grade level code \"{0}\" already exists")]
    DuplicateGradeLevelCode(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<AcademicError> for AppError {
    fn from(err: AcademicError) -> Self {
        let message = err.to_string();
        match err {
            AcademicError::SchoolYearNotFound(_)
            | AcademicError::GradeLevelNotFound(_)
            | AcademicError::CurriculumVersionNotFound(_) => Self::NotFound(message),
            AcademicError::DuplicateGradeLevelCode(_) => Self::Conflict(message),
            AcademicError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// A subject with the grade level and curriculum version it belongs to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectWithContext {
    /// The subject.
    #[serde(flatten)]
    pub subject: subjects::Model,
    /// Its grade level.
    pub grade_level: grade_levels::Model,
    /// Its curriculum version.
    pub curriculum_version: curriculum_versions::Model,
}

/// Academic repository.
#[derive(Debug, Clone)]
pub struct AcademicRepository {
    db: DatabaseConnection,
}

impl AcademicRepository {
    /// Creates a new academic repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========== School years ==========

    /// Lists school years, newest start date first.
    pub async fn list_school_years(&self) -> Result<Vec<school_years::Model>, AcademicError> {
        Ok(school_years::Entity::find()
            .order_by_desc(school_years::Column::StartDate)
            .all(&self.db)
            .await?)
    }

    /// Returns the active school year with the latest start date, if any.
    pub async fn get_active_school_year(
        &self,
    ) -> Result<Option<school_years::Model>, AcademicError> {
        Ok(school_years::Entity::find()
            .filter(school_years::Column::IsActive.eq(true))
            .order_by_desc(school_years::Column::StartDate)
            .one(&self.db)
            .await?)
    }

    /// Creates a school year.
    pub async fn create_school_year(
        &self,
        input: SchoolYearInput,
    ) -> Result<school_years::Model, AcademicError> {
        let now = Utc::now();
        let year = school_years::ActiveModel {
            id: Set(new_key()),
            name: Set(input.name),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            is_active: Set(input.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        info!(school_year_id = %year.id, name = %year.name, "School year created");
        Ok(year)
    }

    // ========== Grade levels ==========

    /// Lists grade levels by sort order.
    pub async fn list_grade_levels(&self) -> Result<Vec<grade_levels::Model>, AcademicError> {
        Ok(grade_levels::Entity::find()
            .order_by_asc(grade_levels::Column::SortOrder)
            .all(&self.db)
            .await?)
    }

    /// Finds a grade level by its canonical code.
    pub async fn find_grade_level_by_code(
        &self,
        code: &str,
    ) -> Result<Option<grade_levels::Model>, AcademicError> {
        Ok(grade_levels::Entity::find()
            .filter(grade_levels::Column::Code.eq(code))
            .one(&self.db)
            .await?)
    }

    /// Creates a grade level.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateGradeLevelCode` if the code is taken.
    pub async fn create_grade_level(
        &self,
        input: GradeLevelInput,
    ) -> Result<grade_levels::Model, AcademicError> {
        let code = input.code.into_inner();
        if self.find_grade_level_by_code(&code).await?.is_some() {
            return Err(AcademicError::DuplicateGradeLevelCode(code));
        }

        let now = Utc::now();
        let grade = grade_levels::ActiveModel {
            id: Set(new_key()),
            code: Set(code.clone()),
            name: Set(input.name),
            sort_order: Set(input.sort_order),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| on_unique_violation(e, || AcademicError::DuplicateGradeLevelCode(code)))?;

        info!(code = %grade.code, grade_level_id = %grade.id, "Grade level created");
        Ok(grade)
    }

    // ========== Curriculum versions ==========

    /// Lists curriculum versions, newest effective date first.
    pub async fn list_curriculum_versions(
        &self,
    ) -> Result<Vec<curriculum_versions::Model>, AcademicError> {
        Ok(curriculum_versions::Entity::find()
            .order_by_desc(curriculum_versions::Column::EffectiveDate)
            .all(&self.db)
            .await?)
    }

    /// Creates a curriculum version.
    pub async fn create_curriculum_version(
        &self,
        input: CurriculumVersionInput,
    ) -> Result<curriculum_versions::Model, AcademicError> {
        let now = Utc::now();
        let version = curriculum_versions::ActiveModel {
            id: Set(new_key()),
            name: Set(input.name),
            effective_date: Set(input.effective_date),
            is_active: Set(input.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        info!(curriculum_version_id = %version.id, name = %version.name, "Curriculum version created");
        Ok(version)
    }

    // ========== Subjects ==========

    /// Lists subjects for a grade level, optionally narrowed to one
    /// curriculum version, ordered by code.
    pub async fn list_subjects(
        &self,
        grade_level_id: &str,
        curriculum_version_id: Option<&str>,
    ) -> Result<Vec<SubjectWithContext>, AcademicError> {
        let mut query =
            subjects::Entity::find().filter(subjects::Column::GradeLevelId.eq(grade_level_id));
        if let Some(curriculum_version_id) = curriculum_version_id {
            query = query.filter(subjects::Column::CurriculumVersionId.eq(curriculum_version_id));
        }
        let rows = query
            .order_by_asc(subjects::Column::Code)
            .all(&self.db)
            .await?;

        let Some(grade_level) = grade_levels::Entity::find_by_id(grade_level_id)
            .one(&self.db)
            .await?
        else {
            return Ok(Vec::new());
        };

        let version_ids: Vec<String> = rows
            .iter()
            .map(|s| s.curriculum_version_id.clone())
            .collect();
        let versions: HashMap<String, curriculum_versions::Model> =
            curriculum_versions::Entity::find()
                .filter(curriculum_versions::Column::Id.is_in(version_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|v| (v.id.clone(), v))
                .collect();

        Ok(rows
            .into_iter()
            .filter_map(|subject| {
                let curriculum_version = versions.get(&subject.curriculum_version_id)?.clone();
                Some(SubjectWithContext {
                    subject,
                    grade_level: grade_level.clone(),
                    curriculum_version,
                })
            })
            .collect())
    }

    /// Creates a subject.
    ///
    /// # Errors
    ///
    /// Returns `GradeLevelNotFound`, `CurriculumVersionNotFound` or
    /// `SchoolYearNotFound` for a missing reference.
    pub async fn create_subject(
        &self,
        input: SubjectInput,
    ) -> Result<subjects::Model, AcademicError> {
        let grade_level_id = input.grade_level_id.to_key();
        let curriculum_version_id = input.curriculum_version_id.to_key();
        let school_year_id = input.school_year_id.map(|id| id.to_key());

        if grade_levels::Entity::find_by_id(grade_level_id.as_str())
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(AcademicError::GradeLevelNotFound(grade_level_id));
        }
        if curriculum_versions::Entity::find_by_id(curriculum_version_id.as_str())
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(AcademicError::CurriculumVersionNotFound(
                curriculum_version_id,
            ));
        }
        if let Some(school_year_id) = &school_year_id {
            if school_years::Entity::find_by_id(school_year_id.as_str())
                .one(&self.db)
                .await?
                .is_none()
            {
                return Err(AcademicError::SchoolYearNotFound(school_year_id.clone()));
            }
        }

        let now = Utc::now();
        let subject = subjects::ActiveModel {
            id: Set(new_key()),
            code: Set(input.code.into_inner()),
            name: Set(input.name),
            units: Set(input.units.map(|u| i32::try_from(u).unwrap_or(i32::MAX))),
            grade_level_id: Set(grade_level_id),
            curriculum_version_id: Set(curriculum_version_id),
            school_year_id: Set(school_year_id),
            is_active: Set(input.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        info!(code = %subject.code, subject_id = %subject.id, "Subject created");
        Ok(subject)
    }
}
