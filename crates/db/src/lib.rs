//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repositories for the academic, accounting and student services
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{AcademicRepository, AccountingRepository, StudentRepository};

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sras_shared::DatabaseConfig;

/// Establishes a connection pool using the configured limits.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(config.connect_timeout())
        .idle_timeout(config.idle_timeout())
        .sqlx_logging(config.log_queries);
    Database::connect(options).await
}
