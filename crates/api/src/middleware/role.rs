//! Caller role extraction and permission checks.
//!
//! Authentication happens upstream. The authenticated caller's role reaches
//! this service in the `x-user-role` header and every handler checks it
//! against the permission its endpoint needs.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use sras_core::auth::{Permission, PermissionDenied, Role, require_permission};
use tracing::warn;

/// Header carrying the caller's role.
pub const ROLE_HEADER: &str = "x-user-role";

/// The role of the caller making the request.
///
/// ```ignore
/// async fn handler(role: CurrentRole) -> Result<Response, PermissionRejection> {
///     role.require(Permission::ViewFees)?;
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentRole(pub Role);

impl CurrentRole {
    /// Returns the caller's role.
    #[must_use]
    pub const fn role(self) -> Role {
        self.0
    }

    /// Checks that the caller holds `permission`.
    ///
    /// # Errors
    ///
    /// Returns a rejection that renders as 403.
    pub fn require(self, permission: Permission) -> Result<(), PermissionRejection> {
        require_permission(self.0, permission).map_err(|denied| {
            warn!(role = %self.0, permission = %permission, "Permission denied");
            PermissionRejection(denied)
        })
    }
}

impl<S> FromRequestParts<S> for CurrentRole
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(ROLE_HEADER) else {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "unauthorized",
                    "message": "Authentication required"
                })),
            ));
        };

        header
            .to_str()
            .ok()
            .and_then(|name| Role::parse(name.trim()))
            .map(CurrentRole)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({
                        "error": "invalid_role",
                        "message": "Unknown user role"
                    })),
                )
            })
    }
}

/// A failed permission check.
#[derive(Debug)]
pub struct PermissionRejection(pub PermissionDenied);

impl IntoResponse for PermissionRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.to_string()
            })),
        )
            .into_response()
    }
}
