//! User-to-device directory.
//!
//! One device per user in the current fleet. The `user_devices` table is
//! provisioned out-of-band; this service only ever reads it.

use crate::error::DirectoryError;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

#[async_trait]
pub trait DeviceDirectory: Send + Sync {
    /// Resolve the caller's opaque platform identity to a device id.
    async fn resolve(&self, user_id: &str) -> Result<String, DirectoryError>;
}

/// SQLite-backed directory over the shared service pool.
pub struct SqliteDirectory {
    pool: SqlitePool,
}

impl SqliteDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeviceDirectory for SqliteDirectory {
    async fn resolve(&self, user_id: &str) -> Result<String, DirectoryError> {
        let row = sqlx::query("SELECT device_id FROM user_devices WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DirectoryError::Backend(e.to_string()))?;

        match row {
            Some(row) => row
                .try_get::<String, _>("device_id")
                .map_err(|e| DirectoryError::Backend(e.to_string())),
            None => Err(DirectoryError::NotFound {
                user_id: user_id.to_string(),
            }),
        }
    }
}
