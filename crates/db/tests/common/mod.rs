//! Shared setup for repository integration tests.

#![allow(dead_code)]

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::{Value, json};
use sras_core::academic::{GradeLevelInput, SchoolYearInput};
use sras_core::accounting::AccountInput;
use sras_core::validation::Contract;
use sras_db::entities::{grade_levels, school_years};
use sras_db::migration::{Migrator, MigratorTrait};
use sras_db::{AcademicRepository, AccountingRepository};

/// Opens a fresh in-memory database with every migration applied.
///
/// A single pooled connection keeps the in-memory database alive and shared.
pub async fn setup() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");
    db
}

/// Validates `value` into `T`, panicking on field errors.
pub fn input<T: Contract>(value: Value) -> T {
    T::validate(&value).expect("test input should be valid")
}

pub async fn create_account(db: &DatabaseConnection, code: &str, account_type: &str) {
    AccountingRepository::new(db.clone())
        .create_account(input::<AccountInput>(json!({
            "code": code,
            "name": code,
            "type": account_type
        })))
        .await
        .expect("Failed to create account");
}

pub async fn create_school_year(db: &DatabaseConnection, name: &str, start: &str, end: &str) -> school_years::Model {
    AcademicRepository::new(db.clone())
        .create_school_year(input::<SchoolYearInput>(json!({
            "name": name,
            "startDate": start,
            "endDate": end,
            "isActive": true
        })))
        .await
        .expect("Failed to create school year")
}

pub async fn create_grade_level(db: &DatabaseConnection, code: &str, sort_order: i32) -> grade_levels::Model {
    AcademicRepository::new(db.clone())
        .create_grade_level(input::<GradeLevelInput>(json!({
            "code": code,
            "name": format!("Grade {code}"),
            "sortOrder": sort_order
        })))
        .await
        .expect("Failed to create grade level")
}
