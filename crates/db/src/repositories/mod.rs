//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

use sea_orm::{DbErr, SqlErr};

pub mod academic;
pub mod accounting;
pub mod students;

pub use academic::{AcademicError, AcademicRepository, SubjectWithContext};
pub use accounting::{
    AccountingError, AccountingRepository, FeeScheduleDetail, FeeScheduleFilter,
    FeeScheduleLineWithItem, FeeScheduleWithContext,
};
pub use students::{
    EnrollmentFilter, EnrollmentWithContext, EnrollmentWithTerm, StudentError, StudentRepository,
    StudentWithEnrollments,
};

/// Maps a unique constraint violation on insert to `duplicate`, so a request
/// that loses a race with an identical one still reports a conflict.
pub(crate) fn on_unique_violation<E: From<DbErr>>(err: DbErr, duplicate: impl FnOnce() -> E) -> E {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        duplicate()
    } else {
        err.into()
    }
}
