use serde::{Deserialize, Serialize};

// ── Twin document (wire shape: {"state": {"desired": ..., "reported": ...}}) ─

/// A device's shadow document as returned by the store.
///
/// State fields stay raw `u8` codes end to end: the shadow is mutated by
/// firmware we do not control, so an out-of-range value must flow through to
/// the speech formatter's fallback row instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShadowDocument {
    #[serde(default)]
    pub state: ShadowState,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShadowState {
    #[serde(default)]
    pub desired: StateBlock,
    #[serde(default)]
    pub reported: StateBlock,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateBlock {
    pub temperature_state: Option<u8>,
    pub incubator_mode: Option<u8>,
    pub cooler_state: Option<u8>,
    pub light_state: Option<u8>,
}

// ── Desired-state patches ───────────────────────────────────────────────────

/// The two actuators a voice command can drive manually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Actuator {
    Cooler,
    Light,
}

/// A partial desired-state document, merged by the store into the shadow.
///
/// Only the constructors below can build one, so every patch that leaves this
/// process satisfies the mode-override rule: a manual actuation always forces
/// `incubatorMode: 0`, and an auto-mode switch carries no actuator fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesiredPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    incubator_mode: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cooler_state: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    light_state: Option<u8>,
}

pub const MODE_MANUAL: u8 = 0;
pub const MODE_AUTOMATIC: u8 = 1;

impl DesiredPatch {
    /// Manual actuation: sets one actuator and forces manual mode in the
    /// same patch. Never touches the sibling actuator.
    pub fn manual(actuator: Actuator, on: bool) -> Self {
        let value = Some(u8::from(on));
        let (cooler_state, light_state) = match actuator {
            Actuator::Cooler => (value, None),
            Actuator::Light => (None, value),
        };
        Self {
            incubator_mode: Some(MODE_MANUAL),
            cooler_state,
            light_state,
        }
    }

    /// Hand control back to the automatic loop. Actuator fields are left to
    /// the regulator downstream.
    pub fn auto_mode() -> Self {
        Self {
            incubator_mode: Some(MODE_AUTOMATIC),
            cooler_state: None,
            light_state: None,
        }
    }

    /// Regulation output: both actuators at once, mode untouched.
    pub fn regulation(light_on: bool, cooler_on: bool) -> Self {
        Self {
            incubator_mode: None,
            cooler_state: Some(u8::from(cooler_on)),
            light_state: Some(u8::from(light_on)),
        }
    }

    /// Wire envelope for the store: `{"state": {"desired": <self>}}`.
    pub fn into_payload(self) -> serde_json::Value {
        serde_json::json!({ "state": { "desired": self } })
    }
}
