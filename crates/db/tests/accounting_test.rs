//! Integration tests for the accounting repository.

mod common;

use common::{create_account, create_grade_level, create_school_year, input, setup};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;
use sras_core::accounting::{AccountInput, FeeItemInput, FeeScheduleInput, FeeScheduleLineInput};
use sras_db::AccountingRepository;
use sras_db::entities::{fee_items, fee_schedule_lines};
use sras_db::repositories::{AccountingError, FeeScheduleFilter};
use sras_shared::AppError;
use sras_shared::types::PageRequest;

fn fee_item(code: &str, amount: &str, revenue_account: &str) -> FeeItemInput {
    input(json!({
        "code": code,
        "name": format!("{code} fee"),
        "defaultAmountCents": amount,
        "revenueAccountCode": revenue_account
    }))
}

#[tokio::test]
async fn test_create_account_rejects_duplicate_code() {
    let db = setup().await;
    let repo = AccountingRepository::new(db.clone());

    create_account(&db, "cash", "ASSET").await;
    let err = repo
        .create_account(input::<AccountInput>(json!({
            "code": "CASH",
            "name": "Cash again",
            "type": "ASSET"
        })))
        .await
        .unwrap_err();

    assert!(matches!(err, AccountingError::DuplicateAccountCode(ref code) if code == "CASH"));
    let app: AppError = err.into();
    assert_eq!(app.status_code(), 409);
    assert_eq!(app.to_string(), "Account code \"CASH\" already exists");
}

#[tokio::test]
async fn test_concurrent_duplicate_accounts_conflict() {
    let db = setup().await;
    let repo = AccountingRepository::new(db.clone());
    let account = || {
        input::<AccountInput>(json!({
            "code": "CASH",
            "name": "Cash on Hand",
            "type": "ASSET"
        }))
    };

    let (a, b, c) = tokio::join!(
        repo.create_account(account()),
        repo.create_account(account()),
        repo.create_account(account())
    );
    let results = [a, b, c];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    for err in results.into_iter().filter_map(Result::err) {
        let app: AppError = err.into();
        assert_eq!(app.status_code(), 409);
        assert_eq!(app.to_string(), "Account code \"CASH\" already exists");
    }
}

#[tokio::test]
async fn test_list_accounts_ordered_by_code() {
    let db = setup().await;
    create_account(&db, "TUITION_REVENUE", "REVENUE").await;
    create_account(&db, "CASH", "ASSET").await;

    let accounts = AccountingRepository::new(db)
        .list_accounts(PageRequest::default())
        .await
        .unwrap();
    let codes: Vec<&str> = accounts.data.iter().map(|a| a.code.as_str()).collect();
    assert_eq!(codes, vec!["CASH", "TUITION_REVENUE"]);
    assert_eq!(accounts.total, 2);
}

#[tokio::test]
async fn test_list_accounts_pages() {
    let db = setup().await;
    for code in ["A1", "A2", "A3", "A4", "A5"] {
        create_account(&db, code, "ASSET").await;
    }
    let repo = AccountingRepository::new(db);

    let second = repo
        .list_accounts(PageRequest { page: 2, limit: 2 })
        .await
        .unwrap();
    let codes: Vec<&str> = second.data.iter().map(|a| a.code.as_str()).collect();
    assert_eq!(codes, vec!["A3", "A4"]);
    assert_eq!(second.total, 5);
    assert_eq!(second.total_pages, 3);

    let past_end = repo
        .list_accounts(PageRequest { page: 4, limit: 2 })
        .await
        .unwrap();
    assert!(past_end.data.is_empty());
    assert_eq!(past_end.total, 5);
}

#[tokio::test]
async fn test_fee_item_requires_existing_revenue_account() {
    let db = setup().await;
    let repo = AccountingRepository::new(db.clone());

    let err = repo
        .create_fee_item(fee_item("tuition", "15000", "tuition_revenue"))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Account with code \"TUITION_REVENUE\" does not exist"
    );
    assert_eq!(AppError::from(err).status_code(), 422);
    assert_eq!(fee_items::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_fee_item_stored_with_canonical_codes_and_cents() {
    let db = setup().await;
    create_account(&db, "TUITION_REVENUE", "REVENUE").await;
    let repo = AccountingRepository::new(db.clone());

    let item = repo
        .create_fee_item(fee_item("tuition_fee", "1,000.50", "tuition_revenue"))
        .await
        .unwrap();

    assert_eq!(item.code, "TUITION_FEE");
    assert_eq!(item.revenue_account_code, "TUITION_REVENUE");
    assert_eq!(item.default_amount_cents, 100_050);
    assert!(item.is_active);

    let duplicate = repo
        .create_fee_item(fee_item("TUITION_FEE", "1", "TUITION_REVENUE"))
        .await
        .unwrap_err();
    assert!(matches!(duplicate, AccountingError::DuplicateFeeItemCode(_)));

    let listed = repo.list_fee_items().await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_fee_schedule_requires_school_year_and_grade_level() {
    let db = setup().await;
    let repo = AccountingRepository::new(db.clone());
    let year = create_school_year(&db, "2026-2027", "2026-06-01", "2027-03-31").await;

    let err = repo
        .create_fee_schedule(input::<FeeScheduleInput>(json!({
            "schoolYearId": year.id,
            "gradeLevelId": "missing-grade",
            "name": "Grade 7 Fees"
        })))
        .await
        .unwrap_err();
    assert!(matches!(err, AccountingError::GradeLevelNotFound(_)));
    assert_eq!(AppError::from(err).status_code(), 404);
}

#[tokio::test]
async fn test_add_line_to_missing_schedule_writes_nothing() {
    let db = setup().await;
    create_account(&db, "TUITION_REVENUE", "REVENUE").await;
    let repo = AccountingRepository::new(db.clone());
    let item = repo
        .create_fee_item(fee_item("TUITION", "15000", "TUITION_REVENUE"))
        .await
        .unwrap();

    let before = fee_schedule_lines::Entity::find().count(&db).await.unwrap();
    let err = repo
        .add_fee_schedule_line(input::<FeeScheduleLineInput>(json!({
            "feeScheduleId": "no-such-schedule",
            "feeItemId": item.id,
            "amountCents": "15000",
            "sortOrder": 1
        })))
        .await
        .unwrap_err();
    let after = fee_schedule_lines::Entity::find().count(&db).await.unwrap();

    assert_eq!(
        err.to_string(),
        "Fee schedule with ID \"no-such-schedule\" does not exist"
    );
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_add_line_with_missing_fee_item_writes_nothing() {
    let db = setup().await;
    let year = create_school_year(&db, "2026-2027", "2026-06-01", "2027-03-31").await;
    let grade = create_grade_level(&db, "G7", 7).await;
    let repo = AccountingRepository::new(db.clone());
    let schedule = repo
        .create_fee_schedule(input::<FeeScheduleInput>(json!({
            "schoolYearId": year.id,
            "gradeLevelId": grade.id,
            "name": "Grade 7 Fees"
        })))
        .await
        .unwrap();

    let err = repo
        .add_fee_schedule_line(input::<FeeScheduleLineInput>(json!({
            "feeScheduleId": schedule.id,
            "feeItemId": "no-such-item",
            "amountCents": "500",
            "sortOrder": 1
        })))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Fee item with ID \"no-such-item\" does not exist");
    assert_eq!(fee_schedule_lines::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_fee_schedule_with_lines() {
    let db = setup().await;
    create_account(&db, "TUITION_REVENUE", "REVENUE").await;
    create_account(&db, "MISC_REVENUE", "REVENUE").await;
    let year = create_school_year(&db, "2026-2027", "2026-06-01", "2027-03-31").await;
    let grade = create_grade_level(&db, "G7", 7).await;
    let repo = AccountingRepository::new(db.clone());

    let tuition = repo
        .create_fee_item(fee_item("TUITION", "15000", "TUITION_REVENUE"))
        .await
        .unwrap();
    let misc = repo
        .create_fee_item(fee_item("MISC", "2500", "MISC_REVENUE"))
        .await
        .unwrap();
    let schedule = repo
        .create_fee_schedule(input::<FeeScheduleInput>(json!({
            "schoolYearId": year.id,
            "gradeLevelId": grade.id,
            "name": "Grade 7 Fees",
            "isDefault": true
        })))
        .await
        .unwrap();

    for (item, amount, sort_order) in [(&misc, "2500", 2), (&tuition, "15,000.00", 1)] {
        repo.add_fee_schedule_line(input::<FeeScheduleLineInput>(json!({
            "feeScheduleId": schedule.id,
            "feeItemId": item.id,
            "amountCents": amount,
            "sortOrder": sort_order
        })))
        .await
        .unwrap();
    }

    let detail = repo
        .get_fee_schedule_with_lines(&schedule.id)
        .await
        .unwrap()
        .expect("schedule exists");
    assert_eq!(detail.school_year.id, year.id);
    assert_eq!(detail.grade_level.code, "G7");
    let lines: Vec<(&str, i64)> = detail
        .lines
        .iter()
        .map(|l| (l.fee_item.code.as_str(), l.line.amount_cents))
        .collect();
    assert_eq!(lines, vec![("TUITION", 1_500_000), ("MISC", 250_000)]);

    let json = serde_json::to_value(&detail).unwrap();
    assert_eq!(json["name"], "Grade 7 Fees");
    assert_eq!(json["lines"][0]["feeItem"]["code"], "TUITION");
    assert_eq!(json["lines"][0]["amountCents"], 1_500_000);

    let first_line = detail.lines[0].line.id.clone();
    let err = repo
        .delete_fee_schedule_line("other-schedule", &first_line)
        .await
        .unwrap_err();
    assert!(matches!(err, AccountingError::FeeScheduleLineNotFound(_)));
    repo.delete_fee_schedule_line(&schedule.id, &first_line)
        .await
        .unwrap();
    let err = repo
        .delete_fee_schedule_line(&schedule.id, &first_line)
        .await
        .unwrap_err();
    assert!(matches!(err, AccountingError::FeeScheduleLineNotFound(_)));
}

#[tokio::test]
async fn test_list_fee_schedules_filters_and_order() {
    let db = setup().await;
    let older = create_school_year(&db, "2025-2026", "2025-06-01", "2026-03-31").await;
    let newer = create_school_year(&db, "2026-2027", "2026-06-01", "2027-03-31").await;
    let g1 = create_grade_level(&db, "G1", 1).await;
    let g2 = create_grade_level(&db, "G2", 2).await;
    let repo = AccountingRepository::new(db.clone());

    for (year, grade, name) in [
        (&older, &g1, "Old G1"),
        (&newer, &g2, "New G2"),
        (&newer, &g1, "New G1"),
    ] {
        repo.create_fee_schedule(input::<FeeScheduleInput>(json!({
            "schoolYearId": year.id,
            "gradeLevelId": grade.id,
            "name": name
        })))
        .await
        .unwrap();
    }

    let all = repo
        .list_fee_schedules(FeeScheduleFilter::default())
        .await
        .unwrap();
    let names: Vec<&str> = all.iter().map(|s| s.schedule.name.as_str()).collect();
    assert_eq!(names, vec!["New G1", "New G2", "Old G1"]);

    let filtered = repo
        .list_fee_schedules(FeeScheduleFilter {
            grade_level_id: Some(g1.id.clone()),
            ..FeeScheduleFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|s| s.grade_level.id == g1.id));
}
