//! Router tests for the accounting endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{app, create, get, post, post_raw, send};
use sea_orm::Database;
use serde_json::json;
use sras_api::{AppState, create_router};

#[tokio::test]
async fn test_health() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api/v1/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_health_reports_unreachable_database() {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let app = create_router(AppState::new(db.clone()));
    db.close().await.unwrap();

    let (status, body) = send(&app, Method::GET, "/api/v1/health", None, None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "unreachable");
}

#[tokio::test]
async fn test_missing_or_unknown_role_is_unauthorized() {
    let app = app().await;
    let (status, _) = send(&app, Method::GET, "/api/v1/accounts", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = get(&app, "/api/v1/accounts", "PRINCIPAL").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_role");
}

#[tokio::test]
async fn test_permission_denied() {
    let app = app().await;
    let (status, body) = post(
        &app,
        "/api/v1/accounts",
        "CASHIER",
        json!({"code": "CASH", "name": "Cash", "type": "ASSET"}),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "permission_denied");
    assert_eq!(
        body["message"],
        "Role CASHIER does not have permission CREATE_FEES"
    );

    let (status, _) = get(&app, "/api/v1/accounts", "CASHIER").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_list_accounts_is_paged() {
    let app = app().await;
    for code in ["CASH", "ACCOUNTS_RECEIVABLE", "TUITION_REVENUE"] {
        create(
            &app,
            "/api/v1/accounts",
            json!({"code": code, "name": code, "type": "ASSET"}),
        )
        .await;
    }

    let (status, body) = get(&app, "/api/v1/accounts?limit=2", "CASHIER").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["data"][0]["code"], "ACCOUNTS_RECEIVABLE");
    assert_eq!(body["data"]["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["totalPages"], 2);

    let (status, body) = get(&app, "/api/v1/accounts?page=0", "CASHIER").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"]["fieldErrors"]["page"], "Page must be a positive integer");
}

#[tokio::test]
async fn test_malformed_body_answers_with_envelope() {
    let app = app().await;

    let (status, body) = post_raw(
        &app,
        "/api/v1/fee-items",
        "ACCOUNTING",
        Some("application/json"),
        r#"{"code": "X","#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Failed to parse the request body as JSON")
    );
    assert_eq!(body["error"]["fieldErrors"], json!({}));

    let (status, body) = post_raw(
        &app,
        "/api/v1/fee-items",
        "ACCOUNTING",
        None,
        r#"{"code": "X"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);

    let (status, body) = post_raw(&app, "/api/v1/fee-items", "CASHIER", None, "{").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "permission_denied");
}

#[tokio::test]
async fn test_create_account_envelope() {
    let app = app().await;
    let (status, body) = post(
        &app,
        "/api/v1/accounts",
        "ACCOUNTING",
        json!({"code": "cash", "name": "Cash on Hand", "type": "ASSET"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["ok"], true);
    assert_eq!(body["data"]["code"], "CASH");
    assert_eq!(body["data"]["type"], "ASSET");

    let (status, body) = post(
        &app,
        "/api/v1/accounts",
        "ACCOUNTING",
        json!({"code": "CASH", "name": "Cash", "type": "ASSET"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"]["message"], "Account code \"CASH\" already exists");
}

#[tokio::test]
async fn test_validation_failure_has_field_errors() {
    let app = app().await;
    let (status, body) = post(&app, "/api/v1/fee-items", "ACCOUNTING", json!({"code": ""})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"]["fieldErrors"]["code"], "Code cannot be empty");
    assert!(body["error"]["fieldErrors"]["name"].is_string());
}

#[tokio::test]
async fn test_fee_item_with_unknown_revenue_account() {
    let app = app().await;
    let (status, body) = post(
        &app,
        "/api/v1/fee-items",
        "ACCOUNTING",
        json!({
            "code": "tuition",
            "name": "Tuition",
            "defaultAmountCents": "15000",
            "revenueAccountCode": "tuition_revenue"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["error"]["message"],
        "Account with code \"TUITION_REVENUE\" does not exist"
    );
    assert!(body["error"].get("fieldErrors").is_none());
}

#[tokio::test]
async fn test_fee_schedule_flow() {
    let app = app().await;
    create(
        &app,
        "/api/v1/accounts",
        json!({"code": "TUITION_REVENUE", "name": "Tuition Revenue", "type": "REVENUE"}),
    )
    .await;
    let item = create(
        &app,
        "/api/v1/fee-items",
        json!({
            "code": "TUITION",
            "name": "Tuition",
            "defaultAmountCents": "15,000.00",
            "revenueAccountCode": "TUITION_REVENUE"
        }),
    )
    .await;
    let year = create(
        &app,
        "/api/v1/school-years",
        json!({"name": "2026-2027", "startDate": "2026-06-01", "endDate": "2027-03-31"}),
    )
    .await;
    let grade = create(
        &app,
        "/api/v1/grade-levels",
        json!({"code": "G7", "name": "Grade 7", "sortOrder": 7}),
    )
    .await;
    let schedule = create(
        &app,
        "/api/v1/fee-schedules",
        json!({"schoolYearId": year["id"], "gradeLevelId": grade["id"], "name": "Grade 7 Fees"}),
    )
    .await;

    let (status, body) = post(
        &app,
        "/api/v1/fee-schedules/lines",
        "ACCOUNTING",
        json!({"feeScheduleId": "missing", "feeItemId": item["id"], "amountCents": "100", "sortOrder": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Fee schedule with ID \"missing\" does not exist");

    let line = create(
        &app,
        "/api/v1/fee-schedules/lines",
        json!({"feeScheduleId": schedule["id"], "feeItemId": item["id"], "amountCents": "15000", "sortOrder": 1}),
    )
    .await;
    assert_eq!(line["amountCents"], 1_500_000);

    let schedule_id = schedule["id"].as_str().unwrap();
    let (status, body) = get(
        &app,
        &format!("/api/v1/fee-schedules/{schedule_id}"),
        "REGISTRAR",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["lines"][0]["feeItem"]["code"], "TUITION");
    assert_eq!(body["data"]["gradeLevel"]["code"], "G7");

    let (status, body) = get(
        &app,
        &format!("/api/v1/fee-schedules?gradeLevelId={}", grade["id"].as_str().unwrap()),
        "CASHIER",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let line_uri = format!(
        "/api/v1/fee-schedules/{schedule_id}/lines/{}",
        line["id"].as_str().unwrap()
    );
    let (status, _) = send(&app, Method::DELETE, &line_uri, Some("REGISTRAR"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, body) = send(&app, Method::DELETE, &line_uri, Some("ACCOUNTING"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    let (status, _) = send(&app, Method::DELETE, &line_uri, Some("ACCOUNTING"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(&app, "/api/v1/fee-schedules/missing", "ACCOUNTING").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Fee schedule not found");
}
