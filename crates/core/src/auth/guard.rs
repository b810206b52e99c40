//! Permission queries and assertions.
//!
//! The `has_*` forms answer a question; the `require_*` forms are meant for
//! the top of a privileged operation and fail with [`PermissionDenied`].

use thiserror::Error;

use super::{Permission, Role, role_permissions};

/// A role lacks the permissions an operation requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionDenied {
    /// A single required permission is missing.
    #[error("Role {role} does not have permission {permission}")]
    Missing {
        /// The caller's role.
        role: Role,
        /// The missing permission.
        permission: Permission,
    },

    /// None of the alternatives is held.
    #[error("Role {role} does not have any of the required permissions: {}", join(.required))]
    NoneOf {
        /// The caller's role.
        role: Role,
        /// The alternatives, all missing.
        required: Vec<Permission>,
    },

    /// Some of the required permissions are missing.
    #[error("Role {role} does not have all required permissions: {}", join(.required))]
    NotAllOf {
        /// The caller's role.
        role: Role,
        /// Every required permission.
        required: Vec<Permission>,
        /// The subset the role does not hold.
        missing: Vec<Permission>,
    },
}

impl PermissionDenied {
    /// The role that was denied.
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::Missing { role, .. } | Self::NoneOf { role, .. } | Self::NotAllOf { role, .. } => {
                *role
            }
        }
    }

    /// The permissions that were missing.
    #[must_use]
    pub fn missing(&self) -> Vec<Permission> {
        match self {
            Self::Missing { permission, .. } => vec![*permission],
            Self::NoneOf { required, .. } => required.clone(),
            Self::NotAllOf { missing, .. } => missing.clone(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        "permission_denied"
    }
}

fn join(permissions: &[Permission]) -> String {
    permissions
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Returns true if `role` holds `permission`.
#[must_use]
pub fn has_permission(role: Role, permission: Permission) -> bool {
    role_permissions(role).contains(&permission)
}

/// Returns true if `role` holds at least one of `permissions`.
#[must_use]
pub fn has_any_permission(role: Role, permissions: &[Permission]) -> bool {
    permissions.iter().any(|p| has_permission(role, *p))
}

/// Returns true if `role` holds every one of `permissions`.
#[must_use]
pub fn has_all_permissions(role: Role, permissions: &[Permission]) -> bool {
    permissions.iter().all(|p| has_permission(role, *p))
}

/// Returns true if `user_role` ranks at or above the owner of a resource.
#[must_use]
pub fn can_access_resource(user_role: Role, resource_owner_role: Role) -> bool {
    user_role.has_higher_or_equal_hierarchy(resource_owner_role)
}

/// Fails unless `role` holds `permission`.
pub fn require_permission(role: Role, permission: Permission) -> Result<(), PermissionDenied> {
    if has_permission(role, permission) {
        Ok(())
    } else {
        Err(PermissionDenied::Missing { role, permission })
    }
}

/// Fails unless `role` holds at least one of `permissions`.
pub fn require_any_permission(
    role: Role,
    permissions: &[Permission],
) -> Result<(), PermissionDenied> {
    if has_any_permission(role, permissions) {
        Ok(())
    } else {
        Err(PermissionDenied::NoneOf {
            role,
            required: permissions.to_vec(),
        })
    }
}

/// Fails unless `role` holds every one of `permissions`.
pub fn require_all_permissions(
    role: Role,
    permissions: &[Permission],
) -> Result<(), PermissionDenied> {
    let missing: Vec<_> = permissions
        .iter()
        .copied()
        .filter(|p| !has_permission(role, *p))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(PermissionDenied::NotAllOf {
            role,
            required: permissions.to_vec(),
            missing,
        })
    }
}
