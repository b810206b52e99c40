//! School year, grade level, curriculum and subject routes.

use axum::{
    Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use sras_core::academic::{
    CurriculumVersionInput, GradeLevelInput, SchoolYearInput, SubjectInput,
};
use sras_core::action::wrap_action;
use sras_core::auth::Permission;
use sras_db::AcademicRepository;
use sras_db::entities::{curriculum_versions, grade_levels, school_years, subjects};
use sras_db::repositories::SubjectWithContext;
use sras_shared::AppError;

use crate::AppState;
use crate::middleware::{ActionBody, CurrentRole, PermissionRejection};
use crate::response::{ActionResponse, query, query_one, rejected};

/// Creates the academic routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/school-years",
            get(list_school_years).post(create_school_year),
        )
        .route("/school-years/active", get(get_active_school_year))
        .route(
            "/grade-levels",
            get(list_grade_levels).post(create_grade_level),
        )
        .route(
            "/curriculum-versions",
            get(list_curriculum_versions).post(create_curriculum_version),
        )
        .route("/subjects", get(list_subjects).post(create_subject))
}

/// Query parameters for listing subjects.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectQuery {
    /// Grade level whose subjects are listed; required.
    pub grade_level_id: Option<String>,
    /// Narrows the list to one curriculum version.
    pub curriculum_version_id: Option<String>,
}

type Reply<T> = Result<ActionResponse<T>, PermissionRejection>;

/// GET `/school-years`
async fn list_school_years(
    State(state): State<AppState>,
    role: CurrentRole,
) -> Reply<Vec<school_years::Model>> {
    role.require(Permission::ViewCourses)?;
    let repo = AcademicRepository::new(state.db());
    Ok(query(repo.list_school_years().await))
}

/// GET `/school-years/active`
async fn get_active_school_year(
    State(state): State<AppState>,
    role: CurrentRole,
) -> Reply<school_years::Model> {
    role.require(Permission::ViewCourses)?;
    let repo = AcademicRepository::new(state.db());
    Ok(query_one(
        repo.get_active_school_year().await,
        "No active school year",
    ))
}

/// POST `/school-years`
async fn create_school_year(
    State(state): State<AppState>,
    role: CurrentRole,
    body: ActionBody,
) -> Reply<school_years::Model> {
    role.require(Permission::CreateCourses)?;
    let repo = AcademicRepository::new(state.db());
    let repo = &repo;
    let action = wrap_action(move |input: SchoolYearInput| repo.create_school_year(input));
    Ok(ActionResponse::created(body.run(&action).await))
}

/// GET `/grade-levels`
async fn list_grade_levels(
    State(state): State<AppState>,
    role: CurrentRole,
) -> Reply<Vec<grade_levels::Model>> {
    role.require(Permission::ViewCourses)?;
    let repo = AcademicRepository::new(state.db());
    Ok(query(repo.list_grade_levels().await))
}

/// POST `/grade-levels`
async fn create_grade_level(
    State(state): State<AppState>,
    role: CurrentRole,
    body: ActionBody,
) -> Reply<grade_levels::Model> {
    role.require(Permission::CreateCourses)?;
    let repo = AcademicRepository::new(state.db());
    let repo = &repo;
    let action = wrap_action(move |input: GradeLevelInput| repo.create_grade_level(input));
    Ok(ActionResponse::created(body.run(&action).await))
}

/// GET `/curriculum-versions`
async fn list_curriculum_versions(
    State(state): State<AppState>,
    role: CurrentRole,
) -> Reply<Vec<curriculum_versions::Model>> {
    role.require(Permission::ViewCourses)?;
    let repo = AcademicRepository::new(state.db());
    Ok(query(repo.list_curriculum_versions().await))
}

/// POST `/curriculum-versions`
async fn create_curriculum_version(
    State(state): State<AppState>,
    role: CurrentRole,
    body: ActionBody,
) -> Reply<curriculum_versions::Model> {
    role.require(Permission::CreateCourses)?;
    let repo = AcademicRepository::new(state.db());
    let repo = &repo;
    let action =
        wrap_action(move |input: CurriculumVersionInput| repo.create_curriculum_version(input));
    Ok(ActionResponse::created(body.run(&action).await))
}

/// GET `/subjects?gradeLevelId=...&curriculumVersionId=...`
async fn list_subjects(
    State(state): State<AppState>,
    role: CurrentRole,
    Query(params): Query<SubjectQuery>,
) -> Reply<Vec<SubjectWithContext>> {
    role.require(Permission::ViewCourses)?;
    let Some(grade_level_id) = params.grade_level_id.filter(|id| !id.is_empty()) else {
        return Ok(rejected(AppError::Validation(
            "Grade level ID is required".to_string(),
        )));
    };
    let repo = AcademicRepository::new(state.db());
    Ok(query(
        repo.list_subjects(&grade_level_id, params.curriculum_version_id.as_deref())
            .await,
    ))
}

/// POST `/subjects`
async fn create_subject(
    State(state): State<AppState>,
    role: CurrentRole,
    body: ActionBody,
) -> Reply<subjects::Model> {
    role.require(Permission::CreateCourses)?;
    let repo = AcademicRepository::new(state.db());
    let repo = &repo;
    let action = wrap_action(move |input: SubjectInput| repo.create_subject(input));
    Ok(ActionResponse::created(body.run(&action).await))
}
