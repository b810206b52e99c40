//! `SeaORM` entity definitions.

pub mod prelude;

pub mod accounts;
pub mod curriculum_versions;
pub mod enrollments;
pub mod fee_items;
pub mod fee_schedule_lines;
pub mod fee_schedules;
pub mod grade_levels;
pub mod school_years;
pub mod sea_orm_active_enums;
pub mod students;
pub mod subjects;
