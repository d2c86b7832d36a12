use super::document::{Actuator, DesiredPatch, MODE_AUTOMATIC};
use super::store::ShadowStore;
use crate::directory::DeviceDirectory;
use crate::error::{DirectoryError, ShadowError};
use std::sync::Arc;

// ── Results ─────────────────────────────────────────────────────────────────

/// Which discrete state a read targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum StateKind {
    TemperatureState,
    IncubatorMode,
    CoolerState,
    LightState,
}

/// A write the store has confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmedWrite {
    Actuator { which: Actuator, on: bool },
    AutoMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum FailureReason {
    NotFound,
    Unavailable,
    Rejected,
}

/// Outcome of one mediation call. Always convertible to speech — the
/// formatter has a row for every variant, including out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediatorResult {
    /// `value` is the raw shadow code; `None` when the field is absent.
    StateValue { kind: StateKind, value: Option<u8> },
    WriteConfirmed(ConfirmedWrite),
    Failure(FailureReason),
}

// ── Mediator ────────────────────────────────────────────────────────────────

/// Decides what read or write an intent performs against the shadow.
///
/// Stateless by construction: all state lives in the remote shadow document.
/// Every operation resolves the device and fetches fresh — results are never
/// cached across calls. Collaborator errors stop here, converted to
/// `Failure(_)`; raw transport errors never reach the speech formatter.
pub struct Mediator {
    directory: Arc<dyn DeviceDirectory>,
    store: Arc<dyn ShadowStore>,
}

impl Mediator {
    pub fn new(directory: Arc<dyn DeviceDirectory>, store: Arc<dyn ShadowStore>) -> Self {
        Self { directory, store }
    }

    /// Read one discrete state.
    ///
    /// Temperature and mode come from `reported`; cooler and light come from
    /// `desired`, which carry no sensor feedback in this fleet. The asymmetry
    /// is intentional.
    pub async fn read_state(&self, user_id: &str, kind: StateKind) -> MediatorResult {
        let device_id = match self.resolve(user_id, "read_state").await {
            Ok(device_id) => device_id,
            Err(failure) => return failure,
        };

        let doc = match self.store.fetch(&device_id).await {
            Ok(doc) => doc,
            Err(e) => {
                tracing::error!(
                    operation = "read_state",
                    state = %kind,
                    %device_id,
                    error = %e,
                    "shadow fetch failed"
                );
                return MediatorResult::Failure(shadow_failure(&e));
            }
        };

        let value = match kind {
            StateKind::TemperatureState => doc.state.reported.temperature_state,
            StateKind::IncubatorMode => doc.state.reported.incubator_mode,
            StateKind::CoolerState => doc.state.desired.cooler_state,
            StateKind::LightState => doc.state.desired.light_state,
        };
        MediatorResult::StateValue { kind, value }
    }

    /// Drive one actuator by voice. The patch forces manual mode in the
    /// same merge.
    pub async fn write_manual(&self, user_id: &str, actuator: Actuator, on: bool) -> MediatorResult {
        let device_id = match self.resolve(user_id, "write_manual").await {
            Ok(device_id) => device_id,
            Err(failure) => return failure,
        };

        match self
            .store
            .update(&device_id, DesiredPatch::manual(actuator, on))
            .await
        {
            Ok(()) => {
                tracing::info!(operation = "write_manual", actuator = %actuator, on, %device_id, "desired state patched");
                MediatorResult::WriteConfirmed(ConfirmedWrite::Actuator { which: actuator, on })
            }
            Err(e) => {
                tracing::error!(
                    operation = "write_manual",
                    actuator = %actuator,
                    %device_id,
                    error = %e,
                    "shadow update failed"
                );
                MediatorResult::Failure(shadow_failure(&e))
            }
        }
    }

    /// Hand control back to the automatic loop. Mode only — the regulator
    /// decides actuator positions on its own schedule.
    pub async fn set_auto_mode(&self, user_id: &str) -> MediatorResult {
        let device_id = match self.resolve(user_id, "set_auto_mode").await {
            Ok(device_id) => device_id,
            Err(failure) => return failure,
        };

        match self.store.update(&device_id, DesiredPatch::auto_mode()).await {
            Ok(()) => {
                tracing::info!(
                    operation = "set_auto_mode",
                    %device_id,
                    mode = MODE_AUTOMATIC,
                    "desired state patched"
                );
                MediatorResult::WriteConfirmed(ConfirmedWrite::AutoMode)
            }
            Err(e) => {
                tracing::error!(operation = "set_auto_mode", %device_id, error = %e, "shadow update failed");
                MediatorResult::Failure(shadow_failure(&e))
            }
        }
    }

    /// Directory lookup shared by every operation. A miss fails the whole
    /// operation before any store traffic.
    async fn resolve(&self, user_id: &str, operation: &str) -> Result<String, MediatorResult> {
        match self.directory.resolve(user_id).await {
            Ok(device_id) => Ok(device_id),
            Err(e @ DirectoryError::NotFound { .. }) => {
                tracing::warn!(operation, error = %e, "device lookup miss");
                Err(MediatorResult::Failure(FailureReason::NotFound))
            }
            Err(e) => {
                tracing::error!(operation, error = %e, "device directory failed");
                Err(MediatorResult::Failure(FailureReason::Unavailable))
            }
        }
    }
}

fn shadow_failure(error: &ShadowError) -> FailureReason {
    match error {
        ShadowError::NotFound { .. } => FailureReason::NotFound,
        ShadowError::Unavailable(_) => FailureReason::Unavailable,
        ShadowError::Rejected(_) => FailureReason::Rejected,
    }
}
