//! Router tests for the academic, student and enrollment endpoints.

mod common;

use axum::http::StatusCode;
use common::{app, create, get, post};
use serde_json::json;

#[tokio::test]
async fn test_academic_writes_need_create_courses() {
    let app = app().await;
    let (status, _) = post(
        &app,
        "/api/v1/grade-levels",
        "REGISTRAR",
        json!({"code": "K", "name": "Kindergarten", "sortOrder": 0}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = get(&app, "/api/v1/grade-levels", "TEACHER").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true, "data": []}));
}

#[tokio::test]
async fn test_active_school_year() {
    let app = app().await;
    let (status, _) = get(&app, "/api/v1/school-years/active", "TEACHER").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    create(
        &app,
        "/api/v1/school-years",
        json!({"name": "2026-2027", "startDate": "2026-06-01", "endDate": "2027-03-31"}),
    )
    .await;
    let (status, body) = get(&app, "/api/v1/school-years/active", "TEACHER").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "2026-2027");
}

#[tokio::test]
async fn test_school_year_dates_validated() {
    let app = app().await;
    let (status, body) = post(
        &app,
        "/api/v1/school-years",
        "ADMIN",
        json!({"name": "Backwards", "startDate": "2027-03-31", "endDate": "2026-06-01"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["fieldErrors"]["endDate"].is_string());
}

#[tokio::test]
async fn test_subjects_require_grade_level_query() {
    let app = app().await;
    let (status, body) = get(&app, "/api/v1/subjects", "TEACHER").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Grade level ID is required");
}

#[tokio::test]
async fn test_student_and_enrollment_flow() {
    let app = app().await;
    let year = create(
        &app,
        "/api/v1/school-years",
        json!({"name": "2026-2027", "startDate": "2026-06-01", "endDate": "2027-03-31"}),
    )
    .await;
    let grade = create(
        &app,
        "/api/v1/grade-levels",
        json!({"code": "g7", "name": "Grade 7", "sortOrder": 7}),
    )
    .await;

    let (status, student) = post(
        &app,
        "/api/v1/students",
        "REGISTRAR",
        json!({"studentNo": "2026-0001", "lastName": "Santos", "firstName": "Maria", "sex": "FEMALE"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let student_id = student["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = post(
        &app,
        "/api/v1/students",
        "REGISTRAR",
        json!({"studentNo": "2026-0001", "lastName": "Reyes", "firstName": "Jose"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["message"], "Student number \"2026-0001\" already exists");

    let (status, body) = post(
        &app,
        "/api/v1/enrollments",
        "CASHIER",
        json!({"studentId": student_id, "schoolYearId": year["id"], "gradeLevelId": grade["id"]}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "permission_denied");

    let (status, enrollment) = post(
        &app,
        "/api/v1/enrollments",
        "REGISTRAR",
        json!({"studentId": student_id, "schoolYearId": year["id"], "gradeLevelId": grade["id"]}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(enrollment["data"]["status"], "ENROLLED");
    assert_eq!(enrollment["data"]["student"]["studentNo"], "2026-0001");
    assert_eq!(enrollment["data"]["gradeLevel"]["code"], "G7");

    let (status, body) = get(&app, "/api/v1/students?q=SANT", "TEACHER").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], student_id.as_str());

    let (_, body) = get(&app, "/api/v1/students", "TEACHER").await;
    assert_eq!(body["data"], json!([]));

    let (status, body) = get(&app, &format!("/api/v1/students/{student_id}"), "TEACHER").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["enrollments"][0]["schoolYear"]["name"], "2026-2027");

    let (status, body) = get(&app, "/api/v1/enrollments?status=ENROLLED", "TEACHER").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["totalPages"], 1);

    let (status, _) = get(&app, "/api/v1/enrollments?status=GRADUATED", "TEACHER").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(&app, "/api/v1/enrollments?page=2&limit=1", "TEACHER").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["data"], json!([]));
    assert_eq!(body["data"]["page"], 2);

    let (status, body) = get(&app, "/api/v1/enrollments?limit=101", "TEACHER").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["fieldErrors"]["limit"], "Limit must be at most 100");

    let enrollment_id = enrollment["data"]["id"].as_str().unwrap();
    let (status, body) = get(&app, &format!("/api/v1/enrollments/{enrollment_id}"), "TEACHER").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["student"]["lastName"], "Santos");

    let (status, _) = get(&app, "/api/v1/students/missing", "TEACHER").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
