use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::str::FromStr;
use std::time::Duration;

use crate::domain::error::{AppError, Result};

const SCHEMA: &str = include_str!("../../../resources/schema.sql");

/// Open the SQLite pool and apply the embedded schema. The schema is
/// additive (CREATE IF NOT EXISTS only), so calling this on an existing
/// database is a no-op.
pub async fn init_db(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| AppError::DatabaseError(format!("Failed to parse connection string: {}", e)))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to connect: {}", e)))?;

    apply_schema(&pool).await?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Database health check failed: {}", e)))?;

    Ok(pool)
}

async fn apply_schema(pool: &SqlitePool) -> Result<()> {
    // schema.sql carries no triggers, so a plain semicolon split is safe.
    for stmt in SCHEMA.split(';') {
        let sql = stmt.trim();
        let only_comments = sql
            .lines()
            .all(|line| line.trim().is_empty() || line.trim().starts_with("--"));
        if only_comments {
            continue;
        }

        sqlx::query(sql).execute(pool).await.map_err(|e| {
            AppError::DatabaseError(format!("Failed to apply schema statement: {}", e))
        })?;
    }
    Ok(())
}
