//! Student record routes.

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;
use sras_core::action::wrap_action;
use sras_core::auth::Permission;
use sras_core::students::StudentInput;
use sras_db::StudentRepository;
use sras_db::entities::students;
use sras_db::repositories::StudentWithEnrollments;

use crate::AppState;
use crate::middleware::{ActionBody, CurrentRole, PermissionRejection};
use crate::response::{ActionResponse, query, query_one};

/// Creates the student routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/students", get(search_students).post(create_student))
        .route("/students/{id}", get(get_student))
}

/// Query parameters for searching students.
#[derive(Debug, Default, Deserialize)]
pub struct StudentSearchQuery {
    /// Student number or part of a name.
    #[serde(default)]
    pub q: String,
}

type Reply<T> = Result<ActionResponse<T>, PermissionRejection>;

/// GET `/students?q=...`
async fn search_students(
    State(state): State<AppState>,
    role: CurrentRole,
    Query(params): Query<StudentSearchQuery>,
) -> Reply<Vec<students::Model>> {
    role.require(Permission::ViewStudents)?;
    let repo = StudentRepository::new(state.db());
    Ok(query(repo.search_students(&params.q).await))
}

/// GET `/students/{id}`
async fn get_student(
    State(state): State<AppState>,
    role: CurrentRole,
    Path(id): Path<String>,
) -> Reply<StudentWithEnrollments> {
    role.require(Permission::ViewStudents)?;
    let repo = StudentRepository::new(state.db());
    Ok(query_one(
        repo.get_student_with_enrollments(&id).await,
        "Student not found",
    ))
}

/// POST `/students`
async fn create_student(
    State(state): State<AppState>,
    role: CurrentRole,
    body: ActionBody,
) -> Reply<students::Model> {
    role.require(Permission::CreateStudents)?;
    let repo = StudentRepository::new(state.db());
    let repo = &repo;
    let action = wrap_action(move |input: StudentInput| repo.create_student(input));
    Ok(ActionResponse::created(body.run(&action).await))
}
