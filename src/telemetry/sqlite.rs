use super::{TelemetrySample, TelemetrySink};
use crate::error::TelemetryError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

/// Append-only sink over the shared service pool. Rows are keyed by
/// `(device_id, timestamp)`; a re-sent key surfaces as a backend error
/// rather than a silent overwrite.
pub struct SqliteTelemetry {
    pool: SqlitePool,
}

impl SqliteTelemetry {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TelemetrySink for SqliteTelemetry {
    async fn record(&self, sample: &TelemetrySample) -> Result<(), TelemetryError> {
        sqlx::query(
            "INSERT INTO device_samples (
                device_id, timestamp, schema_version, temperature_state, incubator_mode, recorded_at
             ) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&sample.device_id)
        .bind(sample.timestamp)
        .bind(sample.schema_version)
        .bind(sample.temperature_state)
        .bind(sample.incubator_mode)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| TelemetryError::Append(e.to_string()))?;

        tracing::info!(
            device_id = %sample.device_id,
            timestamp = sample.timestamp,
            "telemetry sample recorded"
        );
        Ok(())
    }
}
