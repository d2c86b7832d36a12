//! Axum-based HTTP gateway for the voice platform and the device pipeline.
//!
//! Three inbound surfaces, each independent:
//! - `POST /skill` — voice-platform envelope in, speech envelope out
//! - `POST /telemetry` — device sample into the durable log
//! - `POST /regulate` — device temperature event into a regulation patch
//! plus `GET /health` for liveness.

mod handlers;

use handlers::{handle_health, handle_regulate, handle_skill, handle_telemetry};

use crate::regulator::Regulator;
use crate::shadow::mediator::Mediator;
use crate::telemetry::TelemetrySink;
use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Maximum request body size (64KB) — platform envelopes are small
pub const MAX_BODY_SIZE: usize = 65_536;
/// Request timeout (30s)
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub mediator: Arc<Mediator>,
    pub telemetry: Arc<dyn TelemetrySink>,
    pub regulator: Arc<Regulator>,
}

/// Run the HTTP gateway.
pub async fn run_gateway(host: &str, port: u16, state: AppState) -> Result<()> {
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    run_gateway_with_listener(listener, state).await
}

/// Run the HTTP gateway from a pre-bound listener.
pub async fn run_gateway_with_listener(
    listener: tokio::net::TcpListener,
    state: AppState,
) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "gateway listening");

    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/skill", post(handle_skill))
        .route("/telemetry", post(handle_telemetry))
        .route("/regulate", post(handle_regulate))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)));

    axum::serve(listener, app).await?;

    Ok(())
}
