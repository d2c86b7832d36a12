use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `nido`.
///
/// Each collaborator defines its own error variant. Library callers can match
/// on these to decide recovery strategy; binary/startup code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum NidoError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Device directory ────────────────────────────────────────────────
    #[error("directory: {0}")]
    Directory(#[from] DirectoryError),

    // ── Shadow store ────────────────────────────────────────────────────
    #[error("shadow: {0}")]
    Shadow(#[from] ShadowError),

    // ── Telemetry sink ──────────────────────────────────────────────────
    #[error("telemetry: {0}")]
    Telemetry(#[from] TelemetryError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Device directory errors ────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("no device registered for user {user_id}")]
    NotFound { user_id: String },

    #[error("directory backend failed: {0}")]
    Backend(String),
}

// ─── Shadow store errors ────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ShadowError {
    #[error("no shadow document for device {device_id}")]
    NotFound { device_id: String },

    #[error("shadow store unavailable: {0}")]
    Unavailable(String),

    #[error("shadow store rejected the patch: {0}")]
    Rejected(String),
}

// ─── Telemetry errors ───────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("telemetry append failed: {0}")]
    Append(String),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, NidoError>;
