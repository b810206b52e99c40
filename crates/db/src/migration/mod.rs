//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration. The SQL is written to run
//! unchanged on PostgreSQL and SQLite.

pub use sea_orm_migration::prelude::*;

mod m20260601_000001_academic_accounting;
mod m20260601_000002_students;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260601_000001_academic_accounting::Migration),
            Box::new(m20260601_000002_students::Migration),
        ]
    }
}

/// Runs each statement in order on the migration connection.
async fn execute_all(manager: &SchemaManager<'_>, statements: &[&str]) -> Result<(), DbErr> {
    let db = manager.get_connection();
    for statement in statements {
        db.execute_unprepared(statement).await?;
    }
    Ok(())
}
