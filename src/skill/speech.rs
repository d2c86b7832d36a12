//! Speech formatter: total mapping from mediation outcomes to user-facing
//! text. Table-driven per intent category and discrete state value. The
//! product speaks Spanish; phrases live here and nowhere else.

use super::envelope::Speech;
use super::intent::Intent;
use crate::shadow::document::Actuator;
use crate::shadow::mediator::{ConfirmedWrite, MediatorResult, StateKind};

// ── Session phrases ─────────────────────────────────────────────────────────

const LAUNCH: &str = "Bienvenido al sistema de incubación inteligente. Puedes consultar la \
                      temperatura, el ventilador o el foco, o cambiar el modo de la incubadora. \
                      ¿Qué deseas hacer?";
const HELP: &str = "Puedes consultar o cambiar el estado de la temperatura, el ventilador y el \
                    foco de la incubadora. ¿Qué deseas hacer?";
const GOODBYE: &str = "¡Hasta luego!";
const FALLBACK: &str = "Hubo un problema. Intenta de nuevo.";

// ── State phrases, one row per (kind, value) ────────────────────────────────

const TEMP_COLD: &str = "La temperatura está fría, debajo de los 35 grados.";
const TEMP_IDEAL: &str = "La temperatura está en estado ideal, entre 35 y 40.9 grados.";
const TEMP_HOT: &str = "La temperatura está caliente, de los 41 grados para arriba.";
const TEMP_UNKNOWN: &str = "No se pudo determinar el estado de la temperatura.";
const TEMP_UNAVAILABLE: &str = "No se pudo obtener el estado de la temperatura.";

const MODE_MANUAL: &str = "La incubadora está en modo manual.";
const MODE_AUTOMATIC: &str = "La incubadora está en modo automático.";
const MODE_UNKNOWN: &str = "No se pudo determinar el estado de la incubadora.";
const MODE_UNAVAILABLE: &str = "No se pudo obtener el estado de la incubadora.";

const COOLER_OFF: &str = "El ventilador está apagado.";
const COOLER_ON: &str = "El ventilador está prendido.";
const COOLER_UNKNOWN: &str = "No se pudo determinar el estado del ventilador.";
const COOLER_UNAVAILABLE: &str = "No se pudo obtener el estado del ventilador.";

const LIGHT_OFF: &str = "El foco incandescente está apagado.";
const LIGHT_ON: &str = "El foco incandescente está prendido.";
const LIGHT_UNKNOWN: &str = "No se pudo determinar el estado del foco.";
const LIGHT_UNAVAILABLE: &str = "No se pudo obtener el estado del foco.";

// ── Write confirmations and apologies ───────────────────────────────────────

const LIGHT_TURNED_ON: &str = "Se encendió el foco.";
const LIGHT_TURNED_OFF: &str = "Se apagó el foco.";
const COOLER_TURNED_ON: &str = "Se encendió el ventilador.";
const COOLER_TURNED_OFF: &str = "Se apagó el ventilador.";
const AUTO_MODE_ACTIVATED: &str = "El modo automático se ha activado.";

const LIGHT_WRITE_FAILED: &str =
    "Hubo un error al cambiar el estado del foco. Por favor, inténtalo de nuevo.";
const COOLER_WRITE_FAILED: &str =
    "Hubo un error al cambiar el estado del ventilador. Por favor, inténtalo de nuevo.";
const AUTO_MODE_FAILED: &str = "Hubo un error al activar el modo automático.";

// ── Formatter ───────────────────────────────────────────────────────────────

/// Render one mediation outcome as speech for the intent that produced it.
/// Total: every `MediatorResult` variant — including values outside the
/// enumerated sets — yields non-empty text.
pub fn respond(intent: Intent, result: &MediatorResult) -> Speech {
    let text = match result {
        MediatorResult::StateValue { kind, value } => state_phrase(*kind, *value),
        MediatorResult::WriteConfirmed(write) => confirmation_phrase(*write),
        MediatorResult::Failure(_) => failure_phrase(intent),
    };
    prompt(text)
}

pub fn launch() -> Speech {
    prompt(LAUNCH)
}

pub fn help() -> Speech {
    prompt(HELP)
}

pub fn goodbye() -> Speech {
    Speech {
        text: GOODBYE.into(),
        reprompt: None,
        end_session: true,
    }
}

pub fn fallback() -> Speech {
    Speech {
        text: FALLBACK.into(),
        reprompt: None,
        end_session: false,
    }
}

/// Speech that keeps the session open, re-prompting with the same text.
fn prompt(text: impl Into<String>) -> Speech {
    let text = text.into();
    Speech {
        reprompt: Some(text.clone()),
        text,
        end_session: false,
    }
}

fn state_phrase(kind: StateKind, value: Option<u8>) -> &'static str {
    match (kind, value) {
        (StateKind::TemperatureState, Some(0)) => TEMP_COLD,
        (StateKind::TemperatureState, Some(1)) => TEMP_IDEAL,
        (StateKind::TemperatureState, Some(2)) => TEMP_HOT,
        (StateKind::TemperatureState, _) => TEMP_UNKNOWN,
        (StateKind::IncubatorMode, Some(0)) => MODE_MANUAL,
        (StateKind::IncubatorMode, Some(1)) => MODE_AUTOMATIC,
        (StateKind::IncubatorMode, _) => MODE_UNKNOWN,
        (StateKind::CoolerState, Some(0)) => COOLER_OFF,
        (StateKind::CoolerState, Some(1)) => COOLER_ON,
        (StateKind::CoolerState, _) => COOLER_UNKNOWN,
        (StateKind::LightState, Some(0)) => LIGHT_OFF,
        (StateKind::LightState, Some(1)) => LIGHT_ON,
        (StateKind::LightState, _) => LIGHT_UNKNOWN,
    }
}

fn confirmation_phrase(write: ConfirmedWrite) -> &'static str {
    match write {
        ConfirmedWrite::Actuator {
            which: Actuator::Light,
            on: true,
        } => LIGHT_TURNED_ON,
        ConfirmedWrite::Actuator {
            which: Actuator::Light,
            on: false,
        } => LIGHT_TURNED_OFF,
        ConfirmedWrite::Actuator {
            which: Actuator::Cooler,
            on: true,
        } => COOLER_TURNED_ON,
        ConfirmedWrite::Actuator {
            which: Actuator::Cooler,
            on: false,
        } => COOLER_TURNED_OFF,
        ConfirmedWrite::AutoMode => AUTO_MODE_ACTIVATED,
    }
}

/// Per-category apology for a failed operation.
fn failure_phrase(intent: Intent) -> &'static str {
    match intent {
        Intent::CheckTemperatureState => TEMP_UNAVAILABLE,
        Intent::CheckIncubatorModeState => MODE_UNAVAILABLE,
        Intent::CheckCoolerState => COOLER_UNAVAILABLE,
        Intent::CheckLightState => LIGHT_UNAVAILABLE,
        Intent::ChangeCoolerStateManual { .. } => COOLER_WRITE_FAILED,
        Intent::ChangeLightStateManual { .. } => LIGHT_WRITE_FAILED,
        Intent::ChangeAutoMode => AUTO_MODE_FAILED,
        Intent::Launch | Intent::Help | Intent::CancelOrStop | Intent::Fallback => FALLBACK,
    }
}
