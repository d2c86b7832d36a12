use super::AppState;
use crate::regulator::RegulationError;
use crate::skill::{self, SkillRequest};
use crate::telemetry::TelemetrySample;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;

/// GET /health — always public
pub(super) async fn handle_health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// POST /skill — voice-platform webhook.
///
/// The platform renders speech, not status codes: an unparsable envelope
/// still gets HTTP 200 with the fallback phrase.
pub(super) async fn handle_skill(
    State(state): State<AppState>,
    body: Result<Json<SkillRequest>, axum::extract::rejection::JsonRejection>,
) -> impl IntoResponse {
    let envelope = match body {
        Ok(Json(envelope)) => envelope,
        Err(e) => {
            tracing::warn!(error = %e, "unparsable skill envelope");
            SkillRequest::default()
        }
    };

    let response = skill::handle(&envelope, &state.mediator).await;
    (StatusCode::OK, Json(response))
}

/// POST /telemetry — device-originated sample ingestion
pub(super) async fn handle_telemetry(
    State(state): State<AppState>,
    body: Result<Json<TelemetrySample>, axum::extract::rejection::JsonRejection>,
) -> impl IntoResponse {
    let Json(sample) = match body {
        Ok(body) => body,
        Err(e) => {
            let err = serde_json::json!({ "error": format!("Invalid sample: {e}") });
            return (StatusCode::BAD_REQUEST, Json(err));
        }
    };

    match state.telemetry.record(&sample).await {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))),
        Err(e) => {
            tracing::error!(device_id = %sample.device_id, error = %e, "telemetry append failed");
            let err = serde_json::json!({ "error": "Failed to record sample" });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(err))
        }
    }
}

/// POST /regulate — device temperature event
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RegulateBody {
    pub device_id: String,
    pub temperature_state: i64,
}

pub(super) async fn handle_regulate(
    State(state): State<AppState>,
    body: Result<Json<RegulateBody>, axum::extract::rejection::JsonRejection>,
) -> impl IntoResponse {
    let Json(event) = match body {
        Ok(body) => body,
        Err(e) => {
            let err = serde_json::json!({ "error": format!("Invalid event: {e}") });
            return (StatusCode::BAD_REQUEST, Json(err));
        }
    };

    match state
        .regulator
        .regulate(&event.device_id, event.temperature_state)
        .await
    {
        Ok(targets) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "ok",
                "deviceId": event.device_id,
                "lightState": u8::from(targets.light_on),
                "coolerState": u8::from(targets.cooler_on),
            })),
        ),
        Err(RegulationError::InvalidTemperature(e)) => {
            let err = serde_json::json!({ "error": e.to_string() });
            (StatusCode::BAD_REQUEST, Json(err))
        }
        Err(RegulationError::Shadow(e)) => {
            tracing::error!(device_id = %event.device_id, error = %e, "regulation patch failed");
            let err = serde_json::json!({ "error": "Failed to update the device shadow" });
            (StatusCode::BAD_GATEWAY, Json(err))
        }
    }
}
