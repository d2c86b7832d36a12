//! Shared SQLite pool for the device directory and the telemetry log.

use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;

pub async fn open_pool(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create data directory: {}", parent.display()))?;
    }

    let url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect(&url)
        .await
        .with_context(|| format!("Failed to open service DB: {}", db_path.display()))?;

    ensure_schema(&pool).await?;
    Ok(pool)
}

async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    // user_devices is provisioned out-of-band; created here only so a fresh
    // deployment starts with the right shape.
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS user_devices (
            user_id   TEXT PRIMARY KEY,
            device_id TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create user_devices table")?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS device_samples (
            device_id         TEXT NOT NULL,
            timestamp         INTEGER NOT NULL,
            schema_version    INTEGER NOT NULL,
            temperature_state INTEGER NOT NULL,
            incubator_mode    INTEGER NOT NULL,
            recorded_at       TEXT NOT NULL,
            PRIMARY KEY (device_id, timestamp)
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create device_samples table")?;

    Ok(())
}
