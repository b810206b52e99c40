//! Students and enrollments.

use sea_orm_migration::prelude::*;

use super::execute_all;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        execute_all(manager, UP).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        execute_all(manager, DOWN).await
    }
}

const UP: &[&str] = &[
    r"
CREATE TABLE students (
    id TEXT PRIMARY KEY,
    student_no VARCHAR(50) NOT NULL UNIQUE,
    last_name VARCHAR(100) NOT NULL,
    first_name VARCHAR(100) NOT NULL,
    middle_name VARCHAR(100),
    sex VARCHAR(10),
    birth_date TIMESTAMPTZ,
    address TEXT,
    guardian_name VARCHAR(200),
    guardian_phone VARCHAR(20),
    is_active BOOLEAN NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL,
    CONSTRAINT chk_student_sex CHECK (sex IS NULL OR sex IN ('MALE', 'FEMALE'))
)",
    "CREATE INDEX idx_students_name ON students(last_name, first_name)",
    r"
CREATE TABLE enrollments (
    id TEXT PRIMARY KEY,
    student_id TEXT NOT NULL REFERENCES students(id) ON DELETE CASCADE,
    school_year_id TEXT NOT NULL REFERENCES school_years(id),
    grade_level_id TEXT NOT NULL REFERENCES grade_levels(id),
    section_name VARCHAR(100),
    status VARCHAR(20) NOT NULL,
    enrolled_at TIMESTAMPTZ NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL,
    CONSTRAINT chk_enrollment_status CHECK (
        status IN ('ENROLLED', 'RESERVED', 'CANCELLED', 'TRANSFERRED')
    )
)",
    "CREATE INDEX idx_enrollments_student ON enrollments(student_id, enrolled_at)",
    "CREATE INDEX idx_enrollments_year_grade ON enrollments(school_year_id, grade_level_id)",
];

const DOWN: &[&str] = &[
    "DROP TABLE IF EXISTS enrollments",
    "DROP TABLE IF EXISTS students",
];
