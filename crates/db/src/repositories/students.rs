//! Student repository: student records and enrollments.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait, Set,
};
use serde::Serialize;
use sras_core::students::{EnrollmentInput, EnrollmentStatus, StudentInput};
use sras_shared::AppError;
use sras_shared::types::{PageRequest, PageResponse, new_key};
use tracing::info;

use super::on_unique_violation;
use crate::entities::{enrollments, grade_levels, school_years, sea_orm_active_enums, students};

/// Maximum rows returned by a student search.
pub const SEARCH_LIMIT: u64 = 50;

const LIKE_ESCAPE: char = '\\';

/// Escapes `LIKE` wildcards so the query matches as a literal substring.
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Error types for student operations.
#[derive(Debug, thiserror::Error)]
pub enum StudentError {
    /// Student number already exists.
    #[error("Student number \"{0}\" already exists")]
    DuplicateStudentNo(String),

    /// Student not found.
    #[error("Student with ID \"{0}\" does not exist")]
    StudentNotFound(String),

    /// School year not found.
    #[error("School year with ID \"{0}\" does not exist")]
    SchoolYearNotFound(String),

    /// Grade level not found.
    #[error("Grade level with ID \"{0}\" does not exist")]
    GradeLevelNotFound(String),

    /// Enrollment not found.
    #[error("Enrollment with ID \"{0}\" does not exist")]
    EnrollmentNotFound(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<StudentError> for AppError {
    fn from(err: StudentError) -> Self {
        let message = err.to_string();
        match err {
            StudentError::DuplicateStudentNo(_) => Self::Conflict(message),
            StudentError::StudentNotFound(_)
            | StudentError::SchoolYearNotFound(_)
            | StudentError::GradeLevelNotFound(_)
            | StudentError::EnrollmentNotFound(_) => Self::NotFound(message),
            StudentError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Filter options for listing enrollments.
#[derive(Debug, Clone, Default)]
pub struct EnrollmentFilter {
    /// Only enrollments of this student.
    pub student_id: Option<String>,
    /// Only enrollments in this school year.
    pub school_year_id: Option<String>,
    /// Only enrollments in this grade level.
    pub grade_level_id: Option<String>,
    /// Only enrollments with this status.
    pub status: Option<EnrollmentStatus>,
    /// Only enrollments whose student is active (or inactive).
    pub student_is_active: Option<bool>,
}

/// An enrollment with its student, school year and grade level.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentWithContext {
    /// The enrollment.
    #[serde(flatten)]
    pub enrollment: enrollments::Model,
    /// The enrolled student.
    pub student: students::Model,
    /// Its school year.
    pub school_year: school_years::Model,
    /// Its grade level.
    pub grade_level: grade_levels::Model,
}

/// An enrollment as seen from its student's record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentWithTerm {
    /// The enrollment.
    #[serde(flatten)]
    pub enrollment: enrollments::Model,
    /// Its school year.
    pub school_year: school_years::Model,
    /// Its grade level.
    pub grade_level: grade_levels::Model,
}

/// A student with their enrollment history, newest first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentWithEnrollments {
    /// The student.
    #[serde(flatten)]
    pub student: students::Model,
    /// Enrollments, newest first.
    pub enrollments: Vec<EnrollmentWithTerm>,
}

/// Student repository.
#[derive(Debug, Clone)]
pub struct StudentRepository {
    db: DatabaseConnection,
}

impl StudentRepository {
    /// Creates a new student repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========== Students ==========

    /// Searches students by student number or any part of their name.
    ///
    /// Matching is a case-insensitive literal substring match; `%` and `_`
    /// match themselves. A blank query returns no rows rather than the whole
    /// table.
    pub async fn search_students(&self, query: &str) -> Result<Vec<students::Model>, StudentError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let pattern = format!("%{}%", escape_like(&query.to_lowercase()));

        let condition = [
            students::Column::StudentNo,
            students::Column::LastName,
            students::Column::FirstName,
            students::Column::MiddleName,
        ]
        .into_iter()
        .fold(Condition::any(), |cond, column| {
            cond.add(
                Expr::expr(Func::lower(Expr::col(column)))
                    .like(LikeExpr::new(pattern.as_str()).escape(LIKE_ESCAPE)),
            )
        });

        Ok(students::Entity::find()
            .filter(condition)
            .order_by_asc(students::Column::LastName)
            .order_by_asc(students::Column::FirstName)
            .limit(SEARCH_LIMIT)
            .all(&self.db)
            .await?)
    }

    /// Finds a student by student number.
    pub async fn find_by_student_no(
        &self,
        student_no: &str,
    ) -> Result<Option<students::Model>, StudentError> {
        Ok(students::Entity::find()
            .filter(students::Column::StudentNo.eq(student_no))
            .one(&self.db)
            .await?)
    }

    /// Gets a student with their enrollments.
    pub async fn get_student_with_enrollments(
        &self,
        student_id: &str,
    ) -> Result<Option<StudentWithEnrollments>, StudentError> {
        let Some(student) = students::Entity::find_by_id(student_id).one(&self.db).await? else {
            return Ok(None);
        };

        let rows = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student.id.as_str()))
            .order_by_desc(enrollments::Column::EnrolledAt)
            .all(&self.db)
            .await?;
        let years = self
            .school_years_by_id(rows.iter().map(|e| e.school_year_id.clone()))
            .await?;
        let grades = self
            .grade_levels_by_id(rows.iter().map(|e| e.grade_level_id.clone()))
            .await?;

        let enrollments = rows
            .into_iter()
            .filter_map(|enrollment| {
                let school_year = years.get(&enrollment.school_year_id)?.clone();
                let grade_level = grades.get(&enrollment.grade_level_id)?.clone();
                Some(EnrollmentWithTerm {
                    enrollment,
                    school_year,
                    grade_level,
                })
            })
            .collect();

        Ok(Some(StudentWithEnrollments {
            student,
            enrollments,
        }))
    }

    /// Creates a student.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateStudentNo` if the student number is taken.
    pub async fn create_student(
        &self,
        input: StudentInput,
    ) -> Result<students::Model, StudentError> {
        let student_no = input.student_no;
        if self.find_by_student_no(&student_no).await?.is_some() {
            return Err(StudentError::DuplicateStudentNo(student_no));
        }

        let now = Utc::now();
        let student = students::ActiveModel {
            id: Set(new_key()),
            student_no: Set(student_no.clone()),
            last_name: Set(input.last_name),
            first_name: Set(input.first_name),
            middle_name: Set(input.middle_name),
            sex: Set(input.sex.map(Into::into)),
            birth_date: Set(input.birth_date),
            address: Set(input.address),
            guardian_name: Set(input.guardian_name),
            guardian_phone: Set(input.guardian_phone),
            is_active: Set(input.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| on_unique_violation(e, || StudentError::DuplicateStudentNo(student_no)))?;

        info!(student_no = %student.student_no, student_id = %student.id, "Student created");
        Ok(student)
    }

    // ========== Enrollments ==========

    /// Gets an enrollment with its context.
    pub async fn get_enrollment(
        &self,
        enrollment_id: &str,
    ) -> Result<Option<EnrollmentWithContext>, StudentError> {
        let Some(enrollment) = enrollments::Entity::find_by_id(enrollment_id)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };
        Ok(self.with_context(vec![enrollment]).await?.into_iter().next())
    }

    /// Lists one page of enrollments, newest first.
    pub async fn list_enrollments(
        &self,
        filter: EnrollmentFilter,
        page: PageRequest,
    ) -> Result<PageResponse<EnrollmentWithContext>, StudentError> {
        let mut query = enrollments::Entity::find();
        if let Some(student_id) = filter.student_id {
            query = query.filter(enrollments::Column::StudentId.eq(student_id));
        }
        if let Some(school_year_id) = filter.school_year_id {
            query = query.filter(enrollments::Column::SchoolYearId.eq(school_year_id));
        }
        if let Some(grade_level_id) = filter.grade_level_id {
            query = query.filter(enrollments::Column::GradeLevelId.eq(grade_level_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(
                enrollments::Column::Status.eq(sea_orm_active_enums::EnrollmentStatus::from(status)),
            );
        }
        if let Some(is_active) = filter.student_is_active {
            let matching_students = students::Entity::find()
                .select_only()
                .column(students::Column::Id)
                .filter(students::Column::IsActive.eq(is_active))
                .into_query();
            query = query.filter(enrollments::Column::StudentId.in_subquery(matching_students));
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(enrollments::Column::EnrolledAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(self.with_context(rows).await?, page, total))
    }

    /// Enrolls a student.
    ///
    /// An omitted status becomes `ENROLLED` and an omitted `enrolled_at`
    /// becomes the current time.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for a missing student, school year or grade
    /// level.
    pub async fn create_enrollment(
        &self,
        input: EnrollmentInput,
    ) -> Result<EnrollmentWithContext, StudentError> {
        let student_id = input.student_id.to_key();
        let school_year_id = input.school_year_id.to_key();
        let grade_level_id = input.grade_level_id.to_key();

        let student = students::Entity::find_by_id(student_id.as_str())
            .one(&self.db)
            .await?
            .ok_or_else(|| StudentError::StudentNotFound(student_id.clone()))?;
        let school_year = school_years::Entity::find_by_id(school_year_id.as_str())
            .one(&self.db)
            .await?
            .ok_or_else(|| StudentError::SchoolYearNotFound(school_year_id.clone()))?;
        let grade_level = grade_levels::Entity::find_by_id(grade_level_id.as_str())
            .one(&self.db)
            .await?
            .ok_or_else(|| StudentError::GradeLevelNotFound(grade_level_id.clone()))?;

        let now = Utc::now();
        let status = input.status.unwrap_or_default();
        let enrollment = enrollments::ActiveModel {
            id: Set(new_key()),
            student_id: Set(student_id),
            school_year_id: Set(school_year_id),
            grade_level_id: Set(grade_level_id),
            section_name: Set(input.section_name),
            status: Set(status.into()),
            enrolled_at: Set(input.enrolled_at.unwrap_or(now)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        info!(
            enrollment_id = %enrollment.id,
            student_no = %student.student_no,
            school_year = %school_year.name,
            grade_level = %grade_level.code,
            status = status.as_str(),
            "Student enrolled"
        );
        Ok(EnrollmentWithContext {
            enrollment,
            student,
            school_year,
            grade_level,
        })
    }

    async fn with_context(
        &self,
        rows: Vec<enrollments::Model>,
    ) -> Result<Vec<EnrollmentWithContext>, StudentError> {
        let student_ids: Vec<String> = rows.iter().map(|e| e.student_id.clone()).collect();
        let students: HashMap<String, students::Model> = students::Entity::find()
            .filter(students::Column::Id.is_in(student_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|s| (s.id.clone(), s))
            .collect();
        let years = self
            .school_years_by_id(rows.iter().map(|e| e.school_year_id.clone()))
            .await?;
        let grades = self
            .grade_levels_by_id(rows.iter().map(|e| e.grade_level_id.clone()))
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|enrollment| {
                Some(EnrollmentWithContext {
                    student: students.get(&enrollment.student_id)?.clone(),
                    school_year: years.get(&enrollment.school_year_id)?.clone(),
                    grade_level: grades.get(&enrollment.grade_level_id)?.clone(),
                    enrollment,
                })
            })
            .collect())
    }

    async fn school_years_by_id(
        &self,
        ids: impl Iterator<Item = String>,
    ) -> Result<HashMap<String, school_years::Model>, StudentError> {
        let ids: Vec<String> = ids.collect();
        Ok(school_years::Entity::find()
            .filter(school_years::Column::Id.is_in(ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| (m.id.clone(), m))
            .collect())
    }

    async fn grade_levels_by_id(
        &self,
        ids: impl Iterator<Item = String>,
    ) -> Result<HashMap<String, grade_levels::Model>, StudentError> {
        let ids: Vec<String> = ids.collect();
        Ok(grade_levels::Entity::find()
            .filter(grade_levels::Column::Id.is_in(ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| (m.id.clone(), m))
            .collect())
    }
}
