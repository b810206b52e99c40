//! Roles, permissions and authorization guards.
//!
//! The role-to-permission table is static. Callers establish a role through
//! an upstream authentication layer and consult this module before running a
//! privileged operation.

mod guard;
mod permission;

pub use guard::{
    PermissionDenied, can_access_resource, has_all_permissions, has_any_permission,
    has_permission, require_all_permissions, require_any_permission, require_permission,
};
pub use permission::{Permission, PermissionDomain, role_permissions};

use std::fmt;

use serde::{Deserialize, Serialize};

/// User roles, ordered by hierarchy rank (teacher lowest, admin highest).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Views students and manages grades.
    Teacher = 1,
    /// Records payments.
    Cashier = 2,
    /// Full access to fees and payments.
    Accounting = 3,
    /// Full access to students and enrollments.
    Registrar = 4,
    /// Every permission.
    Admin = 5,
}

impl Role {
    /// Every role, highest rank first.
    pub const ALL: [Self; 5] = [
        Self::Admin,
        Self::Registrar,
        Self::Accounting,
        Self::Cashier,
        Self::Teacher,
    ];

    /// Hierarchy rank; higher means more authority.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Returns the role name as stored and transmitted.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Registrar => "REGISTRAR",
            Self::Accounting => "ACCOUNTING",
            Self::Cashier => "CASHIER",
            Self::Teacher => "TEACHER",
        }
    }

    /// Parses a role name. Names are case-sensitive.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == name)
    }

    /// Returns true if this role ranks at or above `other`.
    #[must_use]
    pub fn has_higher_or_equal_hierarchy(self, other: Self) -> bool {
        self >= other
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true if `name` is one of the role names.
#[must_use]
pub fn is_valid_role(name: &str) -> bool {
    Role::parse(name).is_some()
}
