//! Entity re-exports.

pub use super::accounts::Entity as Accounts;
pub use super::curriculum_versions::Entity as CurriculumVersions;
pub use super::enrollments::Entity as Enrollments;
pub use super::fee_items::Entity as FeeItems;
pub use super::fee_schedule_lines::Entity as FeeScheduleLines;
pub use super::fee_schedules::Entity as FeeSchedules;
pub use super::grade_levels::Entity as GradeLevels;
pub use super::school_years::Entity as SchoolYears;
pub use super::students::Entity as Students;
pub use super::subjects::Entity as Subjects;
