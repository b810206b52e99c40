//! Chart of accounts, fee item and fee schedule routes.

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::{delete, get, post},
};
use serde::Deserialize;
use sras_core::accounting::{AccountInput, FeeItemInput, FeeScheduleInput, FeeScheduleLineInput};
use sras_core::action::wrap_action;
use sras_core::auth::Permission;
use sras_db::AccountingRepository;
use sras_db::entities::{accounts, fee_items, fee_schedule_lines, fee_schedules};
use sras_db::repositories::{FeeScheduleDetail, FeeScheduleFilter, FeeScheduleWithContext};
use sras_shared::types::PageResponse;

use crate::AppState;
use crate::middleware::{ActionBody, CurrentRole, PermissionRejection};
use crate::response::{ActionResponse, page_request, query, query_one};

/// Creates the accounting routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/fee-items", get(list_fee_items).post(create_fee_item))
        .route(
            "/fee-schedules",
            get(list_fee_schedules).post(create_fee_schedule),
        )
        .route("/fee-schedules/lines", post(add_fee_schedule_line))
        .route("/fee-schedules/{id}", get(get_fee_schedule))
        .route(
            "/fee-schedules/{id}/lines/{line_id}",
            delete(delete_fee_schedule_line),
        )
}

/// Query parameters selecting one page of a listing.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Page number, from 1.
    pub page: Option<String>,
    /// Page size, at most 100.
    pub limit: Option<String>,
}

/// Query parameters for listing fee schedules.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeScheduleQuery {
    /// Only schedules for this school year.
    pub school_year_id: Option<String>,
    /// Only schedules for this grade level.
    pub grade_level_id: Option<String>,
    /// Only active (or inactive) schedules.
    pub is_active: Option<bool>,
}

type Reply<T> = Result<ActionResponse<T>, PermissionRejection>;

/// GET `/accounts`
async fn list_accounts(
    State(state): State<AppState>,
    role: CurrentRole,
    Query(params): Query<PageQuery>,
) -> Reply<PageResponse<accounts::Model>> {
    role.require(Permission::ViewFees)?;
    let page = match page_request(params.page.as_deref(), params.limit.as_deref()) {
        Ok(page) => page,
        Err(response) => return Ok(response),
    };
    let repo = AccountingRepository::new(state.db());
    Ok(query(repo.list_accounts(page).await))
}

/// POST `/accounts`
async fn create_account(
    State(state): State<AppState>,
    role: CurrentRole,
    body: ActionBody,
) -> Reply<accounts::Model> {
    role.require(Permission::CreateFees)?;
    let repo = AccountingRepository::new(state.db());
    let repo = &repo;
    let action = wrap_action(move |input: AccountInput| repo.create_account(input));
    Ok(ActionResponse::created(body.run(&action).await))
}

/// GET `/fee-items`
async fn list_fee_items(
    State(state): State<AppState>,
    role: CurrentRole,
) -> Reply<Vec<fee_items::Model>> {
    role.require(Permission::ViewFees)?;
    let repo = AccountingRepository::new(state.db());
    Ok(query(repo.list_fee_items().await))
}

/// POST `/fee-items`
async fn create_fee_item(
    State(state): State<AppState>,
    role: CurrentRole,
    body: ActionBody,
) -> Reply<fee_items::Model> {
    role.require(Permission::CreateFees)?;
    let repo = AccountingRepository::new(state.db());
    let repo = &repo;
    let action = wrap_action(move |input: FeeItemInput| repo.create_fee_item(input));
    Ok(ActionResponse::created(body.run(&action).await))
}

/// GET `/fee-schedules`
async fn list_fee_schedules(
    State(state): State<AppState>,
    role: CurrentRole,
    Query(params): Query<FeeScheduleQuery>,
) -> Reply<Vec<FeeScheduleWithContext>> {
    role.require(Permission::ViewFees)?;
    let repo = AccountingRepository::new(state.db());
    let filter = FeeScheduleFilter {
        school_year_id: params.school_year_id,
        grade_level_id: params.grade_level_id,
        is_active: params.is_active,
    };
    Ok(query(repo.list_fee_schedules(filter).await))
}

/// GET `/fee-schedules/{id}`
async fn get_fee_schedule(
    State(state): State<AppState>,
    role: CurrentRole,
    Path(id): Path<String>,
) -> Reply<FeeScheduleDetail> {
    role.require(Permission::ViewFees)?;
    let repo = AccountingRepository::new(state.db());
    Ok(query_one(
        repo.get_fee_schedule_with_lines(&id).await,
        "Fee schedule not found",
    ))
}

/// POST `/fee-schedules`
async fn create_fee_schedule(
    State(state): State<AppState>,
    role: CurrentRole,
    body: ActionBody,
) -> Reply<fee_schedules::Model> {
    role.require(Permission::CreateFees)?;
    let repo = AccountingRepository::new(state.db());
    let repo = &repo;
    let action = wrap_action(move |input: FeeScheduleInput| repo.create_fee_schedule(input));
    Ok(ActionResponse::created(body.run(&action).await))
}

/// POST `/fee-schedules/lines`
async fn add_fee_schedule_line(
    State(state): State<AppState>,
    role: CurrentRole,
    body: ActionBody,
) -> Reply<fee_schedule_lines::Model> {
    role.require(Permission::CreateFees)?;
    let repo = AccountingRepository::new(state.db());
    let repo = &repo;
    let action =
        wrap_action(move |input: FeeScheduleLineInput| repo.add_fee_schedule_line(input));
    Ok(ActionResponse::created(body.run(&action).await))
}

/// DELETE `/fee-schedules/{id}/lines/{line_id}`
async fn delete_fee_schedule_line(
    State(state): State<AppState>,
    role: CurrentRole,
    Path((id, line_id)): Path<(String, String)>,
) -> Reply<()> {
    role.require(Permission::DeleteFees)?;
    let repo = AccountingRepository::new(state.db());
    Ok(query(repo.delete_fee_schedule_line(&id, &line_id).await))
}
