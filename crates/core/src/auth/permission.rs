//! Permission tags and the static role table.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Role;

/// The area of the school a permission belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionDomain {
    /// Student records.
    Student,
    /// Enrollment records.
    Enrollment,
    /// Courses and grades.
    Academic,
    /// Fees, payments and reports.
    Financial,
    /// Users, roles and audit logs.
    System,
}

/// A capability a role may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum Permission {
    ViewStudents,
    CreateStudents,
    UpdateStudents,
    DeleteStudents,

    ViewEnrollments,
    CreateEnrollments,
    UpdateEnrollments,
    DeleteEnrollments,

    ViewCourses,
    CreateCourses,
    UpdateCourses,
    DeleteCourses,
    ViewGrades,
    UpdateGrades,

    ViewPayments,
    CreatePayments,
    UpdatePayments,
    DeletePayments,
    ViewFees,
    CreateFees,
    UpdateFees,
    DeleteFees,
    ViewReports,

    ManageUsers,
    ManageRoles,
    ViewAuditLogs,
}

impl Permission {
    /// Every permission, grouped by domain.
    pub const ALL: &'static [Self] = &[
        Self::ViewStudents,
        Self::CreateStudents,
        Self::UpdateStudents,
        Self::DeleteStudents,
        Self::ViewEnrollments,
        Self::CreateEnrollments,
        Self::UpdateEnrollments,
        Self::DeleteEnrollments,
        Self::ViewCourses,
        Self::CreateCourses,
        Self::UpdateCourses,
        Self::DeleteCourses,
        Self::ViewGrades,
        Self::UpdateGrades,
        Self::ViewPayments,
        Self::CreatePayments,
        Self::UpdatePayments,
        Self::DeletePayments,
        Self::ViewFees,
        Self::CreateFees,
        Self::UpdateFees,
        Self::DeleteFees,
        Self::ViewReports,
        Self::ManageUsers,
        Self::ManageRoles,
        Self::ViewAuditLogs,
    ];

    /// Returns the permission name as transmitted.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ViewStudents => "VIEW_STUDENTS",
            Self::CreateStudents => "CREATE_STUDENTS",
            Self::UpdateStudents => "UPDATE_STUDENTS",
            Self::DeleteStudents => "DELETE_STUDENTS",
            Self::ViewEnrollments => "VIEW_ENROLLMENTS",
            Self::CreateEnrollments => "CREATE_ENROLLMENTS",
            Self::UpdateEnrollments => "UPDATE_ENROLLMENTS",
            Self::DeleteEnrollments => "DELETE_ENROLLMENTS",
            Self::ViewCourses => "VIEW_COURSES",
            Self::CreateCourses => "CREATE_COURSES",
            Self::UpdateCourses => "UPDATE_COURSES",
            Self::DeleteCourses => "DELETE_COURSES",
            Self::ViewGrades => "VIEW_GRADES",
            Self::UpdateGrades => "UPDATE_GRADES",
            Self::ViewPayments => "VIEW_PAYMENTS",
            Self::CreatePayments => "CREATE_PAYMENTS",
            Self::UpdatePayments => "UPDATE_PAYMENTS",
            Self::DeletePayments => "DELETE_PAYMENTS",
            Self::ViewFees => "VIEW_FEES",
            Self::CreateFees => "CREATE_FEES",
            Self::UpdateFees => "UPDATE_FEES",
            Self::DeleteFees => "DELETE_FEES",
            Self::ViewReports => "VIEW_REPORTS",
            Self::ManageUsers => "MANAGE_USERS",
            Self::ManageRoles => "MANAGE_ROLES",
            Self::ViewAuditLogs => "VIEW_AUDIT_LOGS",
        }
    }

    /// Parses a permission name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.as_str() == name)
    }

    /// The domain this permission governs.
    #[must_use]
    pub const fn domain(self) -> PermissionDomain {
        match self {
            Self::ViewStudents
            | Self::CreateStudents
            | Self::UpdateStudents
            | Self::DeleteStudents => PermissionDomain::Student,
            Self::ViewEnrollments
            | Self::CreateEnrollments
            | Self::UpdateEnrollments
            | Self::DeleteEnrollments => PermissionDomain::Enrollment,
            Self::ViewCourses
            | Self::CreateCourses
            | Self::UpdateCourses
            | Self::DeleteCourses
            | Self::ViewGrades
            | Self::UpdateGrades => PermissionDomain::Academic,
            Self::ViewPayments
            | Self::CreatePayments
            | Self::UpdatePayments
            | Self::DeletePayments
            | Self::ViewFees
            | Self::CreateFees
            | Self::UpdateFees
            | Self::DeleteFees
            | Self::ViewReports => PermissionDomain::Financial,
            Self::ManageUsers | Self::ManageRoles | Self::ViewAuditLogs => PermissionDomain::System,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const REGISTRAR: &[Permission] = &[
    Permission::ViewStudents,
    Permission::CreateStudents,
    Permission::UpdateStudents,
    Permission::DeleteStudents,
    Permission::ViewEnrollments,
    Permission::CreateEnrollments,
    Permission::UpdateEnrollments,
    Permission::DeleteEnrollments,
    // academic and financial: read-only
    Permission::ViewCourses,
    Permission::ViewGrades,
    Permission::ViewPayments,
    Permission::ViewFees,
];

const ACCOUNTING: &[Permission] = &[
    Permission::ViewStudents,
    Permission::ViewEnrollments,
    Permission::ViewCourses,
    Permission::ViewGrades,
    Permission::ViewPayments,
    Permission::CreatePayments,
    Permission::UpdatePayments,
    Permission::DeletePayments,
    Permission::ViewFees,
    Permission::CreateFees,
    Permission::UpdateFees,
    Permission::DeleteFees,
    Permission::ViewReports,
];

const CASHIER: &[Permission] = &[
    Permission::ViewStudents,
    Permission::ViewEnrollments,
    Permission::ViewCourses,
    Permission::ViewPayments,
    Permission::CreatePayments,
    Permission::ViewFees,
];

const TEACHER: &[Permission] = &[
    Permission::ViewStudents,
    Permission::ViewEnrollments,
    Permission::ViewCourses,
    Permission::ViewGrades,
    Permission::UpdateGrades,
];

/// Every permission held by `role`.
#[must_use]
pub const fn role_permissions(role: Role) -> &'static [Permission] {
    match role {
        Role::Admin => Permission::ALL,
        Role::Registrar => REGISTRAR,
        Role::Accounting => ACCOUNTING,
        Role::Cashier => CASHIER,
        Role::Teacher => TEACHER,
    }
}
