//! Database migration runner for SRAS.
//!
//! Connects with the same layered configuration as the server, so
//! `config/{RUN_MODE}.toml` and `SRAS__DATABASE__URL` pick the database.
//!
//! Usage:
//!   migrator up         - Run all pending migrations
//!   migrator down [n]   - Roll back the last n migrations (default 1)
//!   migrator status     - Show migration status
//!   migrator fresh      - Drop all tables and re-run migrations
//!   migrator refresh    - Roll back all migrations, then re-run them
//!   migrator reset      - Roll back all migrations

use anyhow::{Context, bail};
use sea_orm_migration::MigratorTrait;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sras_db::connect;
use sras_db::migration::Migrator;
use sras_shared::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Up,
    Down(u32),
    Status,
    Fresh,
    Refresh,
    Reset,
}

impl Command {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let command = match args {
            [] => Self::Up,
            [name] => match name.as_str() {
                "up" => Self::Up,
                "down" => Self::Down(1),
                "status" => Self::Status,
                "fresh" => Self::Fresh,
                "refresh" => Self::Refresh,
                "reset" => Self::Reset,
                other => bail!("Unknown command: {other}"),
            },
            [name, steps] if name == "down" => {
                let steps = steps
                    .parse::<u32>()
                    .ok()
                    .filter(|n| *n > 0)
                    .with_context(|| format!("Invalid number of steps: {steps}"))?;
                Self::Down(steps)
            }
            _ => bail!("Usage: migrator [up | down [n] | status | fresh | refresh | reset]"),
        };
        Ok(command)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sras=info,sea_orm_migration=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    let config = AppConfig::load().context("Failed to load configuration")?;
    let db = connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    info!(?command, "Running migrations");
    match command {
        Command::Up => Migrator::up(&db, None).await,
        Command::Down(steps) => Migrator::down(&db, Some(steps)).await,
        Command::Status => Migrator::status(&db).await,
        Command::Fresh => Migrator::fresh(&db).await,
        Command::Refresh => Migrator::refresh(&db).await,
        Command::Reset => Migrator::reset(&db).await,
    }
    .context("Migration failed")?;

    db.close().await?;
    Ok(())
}
