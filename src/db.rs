//! Database connection pool management

use anyhow::{Context, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::str::FromStr;
use std::time::Duration;

use crate::config::Settings;

/// Create a SQLite connection pool, creating the database file when missing
pub async fn create_pool(settings: &Settings) -> Result<SqlitePool> {
    let connect_options = SqliteConnectOptions::from_str(&settings.database_url)
        .context("Invalid DATABASE_URL")?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.database_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(connect_options)
        .await
        .context("Failed to connect to SQLite")?;

    tracing::info!(
        max_connections = settings.database_max_connections,
        "Database connection pool established"
    );

    Ok(pool)
}

/// Create the jobs table on startup. Scalar columns carry what listings and
/// analytics read; the full bid record is stored as a JSON document.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS jobs (
            job_id TEXT PRIMARY KEY,
            trade TEXT NOT NULL,
            location TEXT NOT NULL,
            total_bid REAL NOT NULL,
            profit_margin REAL NOT NULL,
            material_total REAL NOT NULL,
            labor_total REAL NOT NULL,
            created_at TEXT NOT NULL,
            payload TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create jobs table")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_jobs_created_at ON jobs (created_at)")
        .execute(pool)
        .await
        .context("Failed to create jobs index")?;

    Ok(())
}

/// Lightweight health check for database connectivity
pub async fn health_check(pool: &SqlitePool) -> bool {
    sqlx::query("SELECT 1").fetch_one(pool).await.is_ok()
}
