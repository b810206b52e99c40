//! API route definitions.
//!
//! Every handler reads the caller's role, checks the permission its endpoint
//! needs, and answers with the action result envelope.

use axum::Router;

use crate::AppState;

pub mod academic;
pub mod accounting;
pub mod enrollments;
pub mod health;
pub mod students;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(accounting::routes())
        .merge(academic::routes())
        .merge(students::routes())
        .merge(enrollments::routes())
}
