//! Request middleware and extractors.

pub mod body;
pub mod role;

pub use body::ActionBody;
pub use role::{CurrentRole, PermissionRejection, ROLE_HEADER};
