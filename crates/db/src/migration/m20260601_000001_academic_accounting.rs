//! Academic structure and chart of accounts.
//!
//! Creates school years, grade levels, curricula, subjects, accounts, fee
//! items, fee schedules and schedule lines.

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
CREATE TABLE school_years (
    id TEXT PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    start_date TIMESTAMPTZ NOT NULL,
    end_date TIMESTAMPTZ NOT NULL,
    is_active BOOLEAN NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL,
    CONSTRAINT chk_school_year_dates CHECK (end_date > start_date)
)",
    "CREATE INDEX idx_school_years_start ON school_years(start_date)",
    r"
CREATE TABLE grade_levels (
    id TEXT PRIMARY KEY,
    code VARCHAR(20) NOT NULL UNIQUE,
    name VARCHAR(100) NOT NULL,
    sort_order INTEGER NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
)",
    r"
CREATE TABLE curriculum_versions (
    id TEXT PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    effective_date TIMESTAMPTZ NOT NULL,
    is_active BOOLEAN NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
)",
    r"
CREATE TABLE subjects (
    id TEXT PRIMARY KEY,
    code VARCHAR(20) NOT NULL,
    name VARCHAR(200) NOT NULL,
    units INTEGER,
    grade_level_id TEXT NOT NULL REFERENCES grade_levels(id),
    curriculum_version_id TEXT NOT NULL REFERENCES curriculum_versions(id),
    school_year_id TEXT REFERENCES school_years(id),
    is_active BOOLEAN NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL,
    CONSTRAINT chk_subject_units CHECK (units IS NULL OR units > 0)
)",
    "CREATE INDEX idx_subjects_grade_curriculum ON subjects(grade_level_id, curriculum_version_id)",
    r"
CREATE TABLE accounts (
    id TEXT PRIMARY KEY,
    code VARCHAR(50) NOT NULL UNIQUE,
    name VARCHAR(200) NOT NULL,
    type VARCHAR(20) NOT NULL,
    is_active BOOLEAN NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL,
    CONSTRAINT chk_account_type CHECK (
        type IN ('ASSET', 'LIABILITY', 'EQUITY', 'REVENUE', 'EXPENSE', 'CONTRA_REVENUE')
    )
)",
    r"
CREATE TABLE fee_items (
    id TEXT PRIMARY KEY,
    code VARCHAR(50) NOT NULL UNIQUE,
    name VARCHAR(200) NOT NULL,
    default_amount_cents BIGINT NOT NULL,
    revenue_account_code VARCHAR(50) NOT NULL,
    is_active BOOLEAN NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
)",
    r"
CREATE TABLE fee_schedules (
    id TEXT PRIMARY KEY,
    school_year_id TEXT NOT NULL REFERENCES school_years(id),
    grade_level_id TEXT NOT NULL REFERENCES grade_levels(id),
    name VARCHAR(200) NOT NULL,
    is_default BOOLEAN NOT NULL,
    is_active BOOLEAN NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
)",
    "CREATE INDEX idx_fee_schedules_year_grade ON fee_schedules(school_year_id, grade_level_id)",
    r"
CREATE TABLE fee_schedule_lines (
    id TEXT PRIMARY KEY,
    fee_schedule_id TEXT NOT NULL REFERENCES fee_schedules(id) ON DELETE CASCADE,
    fee_item_id TEXT NOT NULL REFERENCES fee_items(id),
    amount_cents BIGINT NOT NULL,
    is_required BOOLEAN NOT NULL,
    sort_order INTEGER NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
)",
    "CREATE INDEX idx_fee_schedule_lines_schedule ON fee_schedule_lines(fee_schedule_id, sort_order)",
];

const DOWN: &[&str] = &[
    "DROP TABLE IF EXISTS fee_schedule_lines",
    "DROP TABLE IF EXISTS fee_schedules",
    "DROP TABLE IF EXISTS fee_items",
    "DROP TABLE IF EXISTS accounts",
    "DROP TABLE IF EXISTS subjects",
    "DROP TABLE IF EXISTS curriculum_versions",
    "DROP TABLE IF EXISTS grade_levels",
    "DROP TABLE IF EXISTS school_years",
];
