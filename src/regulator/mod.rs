//! Automatic-mode actuator logic: a reported temperature level maps to target
//! light/cooler positions, pushed to the shadow as one patch. The patch never
//! carries `incubatorMode` — flipping the mode bit is the voice path's job.

use crate::error::ShadowError;
use crate::shadow::document::DesiredPatch;
use crate::shadow::store::ShadowStore;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("temperatureState {0} outside the known range 0..=2")]
pub struct InvalidTemperature(pub i64);

/// Target actuator positions for a temperature level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorTargets {
    pub light_on: bool,
    pub cooler_on: bool,
}

/// Cold heats (light on), hot cools (cooler on), ideal rests.
pub fn target_states(temperature_level: i64) -> Result<ActuatorTargets, InvalidTemperature> {
    match temperature_level {
        0 => Ok(ActuatorTargets {
            light_on: true,
            cooler_on: false,
        }),
        1 => Ok(ActuatorTargets {
            light_on: false,
            cooler_on: false,
        }),
        2 => Ok(ActuatorTargets {
            light_on: false,
            cooler_on: true,
        }),
        other => Err(InvalidTemperature(other)),
    }
}

/// Applies regulation patches for device-originated temperature events.
pub struct Regulator {
    store: Arc<dyn ShadowStore>,
}

impl Regulator {
    pub fn new(store: Arc<dyn ShadowStore>) -> Self {
        Self { store }
    }

    /// Compute targets for `temperature_level` and patch the device's desired
    /// state. Whether the device honors the patch while in manual mode is
    /// firmware's concern.
    pub async fn regulate(
        &self,
        device_id: &str,
        temperature_level: i64,
    ) -> Result<ActuatorTargets, RegulationError> {
        let targets = target_states(temperature_level)?;

        self.store
            .update(
                device_id,
                DesiredPatch::regulation(targets.light_on, targets.cooler_on),
            )
            .await?;

        tracing::info!(
            device_id,
            temperature_level,
            light_on = targets.light_on,
            cooler_on = targets.cooler_on,
            "regulation patch applied"
        );
        Ok(targets)
    }
}

#[derive(Debug, Error)]
pub enum RegulationError {
    #[error(transparent)]
    InvalidTemperature(#[from] InvalidTemperature),

    #[error(transparent)]
    Shadow(#[from] ShadowError),
}
