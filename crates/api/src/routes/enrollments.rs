//! Enrollment routes.

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;
use sras_core::action::wrap_action;
use sras_core::auth::Permission;
use sras_core::students::{EnrollmentInput, EnrollmentStatus};
use sras_db::StudentRepository;
use sras_db::repositories::{EnrollmentFilter, EnrollmentWithContext};
use sras_shared::AppError;
use sras_shared::types::PageResponse;

use crate::AppState;
use crate::middleware::{ActionBody, CurrentRole, PermissionRejection};
use crate::response::{ActionResponse, page_request, query, query_one, rejected};

/// Creates the enrollment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/enrollments",
            get(list_enrollments).post(create_enrollment),
        )
        .route("/enrollments/{id}", get(get_enrollment))
}

/// Query parameters for listing enrollments.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentQuery {
    /// Only enrollments of this student.
    pub student_id: Option<String>,
    /// Only enrollments in this school year.
    pub school_year_id: Option<String>,
    /// Only enrollments in this grade level.
    pub grade_level_id: Option<String>,
    /// Only enrollments with this status, e.g. `ENROLLED`.
    pub status: Option<String>,
    /// Only enrollments whose student is active (or inactive).
    pub student_is_active: Option<bool>,
    /// Page number, from 1.
    pub page: Option<String>,
    /// Page size, at most 100.
    pub limit: Option<String>,
}

type Reply<T> = Result<ActionResponse<T>, PermissionRejection>;

/// GET `/enrollments`
async fn list_enrollments(
    State(state): State<AppState>,
    role: CurrentRole,
    Query(params): Query<EnrollmentQuery>,
) -> Reply<PageResponse<EnrollmentWithContext>> {
    role.require(Permission::ViewEnrollments)?;

    let page = match page_request(params.page.as_deref(), params.limit.as_deref()) {
        Ok(page) => page,
        Err(response) => return Ok(response),
    };

    let status = match params.status.as_deref() {
        None | Some("") => None,
        Some(name) => match EnrollmentStatus::parse(name) {
            Some(status) => Some(status),
            None => {
                return Ok(rejected(AppError::Validation(format!(
                    "Invalid enrollment status: {name}"
                ))));
            }
        },
    };

    let repo = StudentRepository::new(state.db());
    let filter = EnrollmentFilter {
        student_id: params.student_id,
        school_year_id: params.school_year_id,
        grade_level_id: params.grade_level_id,
        status,
        student_is_active: params.student_is_active,
    };
    Ok(query(repo.list_enrollments(filter, page).await))
}

/// GET `/enrollments/{id}`
async fn get_enrollment(
    State(state): State<AppState>,
    role: CurrentRole,
    Path(id): Path<String>,
) -> Reply<EnrollmentWithContext> {
    role.require(Permission::ViewEnrollments)?;
    let repo = StudentRepository::new(state.db());
    Ok(query_one(repo.get_enrollment(&id).await, "Enrollment not found"))
}

/// POST `/enrollments`
async fn create_enrollment(
    State(state): State<AppState>,
    role: CurrentRole,
    body: ActionBody,
) -> Reply<EnrollmentWithContext> {
    role.require(Permission::CreateEnrollments)?;
    let repo = StudentRepository::new(state.db());
    let repo = &repo;
    let action = wrap_action(move |input: EnrollmentInput| repo.create_enrollment(input));
    Ok(ActionResponse::created(body.run(&action).await))
}
