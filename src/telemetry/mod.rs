//! Telemetry ingestion: device-originated samples appended to a durable log.
//! Fully independent of the voice path — nothing here touches the shadow.

mod sqlite;

pub use sqlite::SqliteTelemetry;

use crate::error::TelemetryError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One periodic device sample, as posted by the device pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySample {
    /// Device-side epoch seconds.
    pub timestamp: i64,
    pub device_id: String,
    pub schema_version: i64,
    pub temperature_state: i64,
    pub incubator_mode: i64,
}

#[async_trait]
pub trait TelemetrySink: Send + Sync {
    /// Append one sample. Unconditional: no dedup, no range validation —
    /// the log records what the device said.
    async fn record(&self, sample: &TelemetrySample) -> Result<(), TelemetryError>;
}
