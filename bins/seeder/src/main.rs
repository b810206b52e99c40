//! Database seeder for SRAS development and testing.
//!
//! Seeds the current school year, the Kindergarten to Grade 12 levels and the
//! core chart of accounts. Running it twice leaves the data unchanged.
//!
//! Usage: cargo run --bin seeder

use anyhow::{Context, anyhow};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use sras_core::academic::{GradeLevelInput, SchoolYearInput};
use sras_core::accounting::AccountInput;
use sras_core::validation::Contract;
use sras_db::{AcademicRepository, AccountingRepository};
use sras_shared::AppConfig;
use tracing::info;

const SCHOOL_YEAR: (&str, &str, &str) = ("2026-2027", "2026-06-01", "2027-03-31");

const ACCOUNTS: &[(&str, &str, &str)] = &[
    ("CASH", "Cash on Hand", "ASSET"),
    ("ACCOUNTS_RECEIVABLE", "Accounts Receivable", "ASSET"),
    ("TUITION_REVENUE", "Tuition Revenue", "REVENUE"),
    ("MISC_REVENUE", "Miscellaneous Revenue", "REVENUE"),
    ("DISCOUNT_CONTRA", "Discounts and Scholarships", "CONTRA_REVENUE"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sras=info,seeder=info".into()),
        )
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let db = sras_db::connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    seed_school_year(&db).await?;
    seed_grade_levels(&db).await?;
    seed_accounts(&db).await?;

    info!("Seeding complete");
    db.close().await?;
    Ok(())
}

fn input<T: Contract>(value: &Value) -> anyhow::Result<T> {
    T::validate(value).map_err(|e| anyhow!("Invalid seed data {value}: {e}"))
}

async fn seed_school_year(db: &DatabaseConnection) -> anyhow::Result<()> {
    let repo = AcademicRepository::new(db.clone());
    let (name, start, end) = SCHOOL_YEAR;

    if repo.list_school_years().await?.iter().any(|y| y.name == name) {
        info!(name, "School year already exists, skipping");
        return Ok(());
    }
    repo.create_school_year(input::<SchoolYearInput>(&json!({
        "name": name,
        "startDate": start,
        "endDate": end,
        "isActive": true
    }))?)
    .await?;
    Ok(())
}

async fn seed_grade_levels(db: &DatabaseConnection) -> anyhow::Result<()> {
    let repo = AcademicRepository::new(db.clone());

    let grades = std::iter::once(("K".to_string(), "Kindergarten".to_string(), 0)).chain(
        (1..=12).map(|n| (format!("G{n}"), format!("Grade {n}"), n)),
    );
    for (code, name, sort_order) in grades {
        if repo.find_grade_level_by_code(&code).await?.is_some() {
            continue;
        }
        repo.create_grade_level(input::<GradeLevelInput>(&json!({
            "code": code,
            "name": name,
            "sortOrder": sort_order
        }))?)
        .await?;
    }
    Ok(())
}

async fn seed_accounts(db: &DatabaseConnection) -> anyhow::Result<()> {
    let repo = AccountingRepository::new(db.clone());

    for &(code, name, account_type) in ACCOUNTS {
        if repo.find_account_by_code(code).await?.is_some() {
            continue;
        }
        repo.create_account(input::<AccountInput>(&json!({
            "code": code,
            "name": name,
            "type": account_type
        }))?)
        .await?;
    }
    Ok(())
}
