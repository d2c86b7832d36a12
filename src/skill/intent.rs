use super::envelope::SkillRequest;

/// The closed set of voice intents. Anything the platform sends outside this
/// set becomes `Fallback`; classification never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Intent {
    Launch,
    CheckTemperatureState,
    CheckIncubatorModeState,
    CheckCoolerState,
    CheckLightState,
    ChangeCoolerStateManual { on: bool },
    ChangeLightStateManual { on: bool },
    ChangeAutoMode,
    Help,
    CancelOrStop,
    Fallback,
}

/// The one slot utterance that means "turn on". Every other value — `apaga`,
/// empty, missing, or noise the speech model produced — reads as "turn off".
/// Lenient default, not validation.
const SLOT_ON: &str = "enciende";

fn slot_is_on(value: Option<&str>) -> bool {
    value == Some(SLOT_ON)
}

/// Classify an inbound envelope.
pub fn classify(envelope: &SkillRequest) -> Intent {
    match envelope.request_type() {
        Some("LaunchRequest") => Intent::Launch,
        Some("SessionEndedRequest") => Intent::CancelOrStop,
        Some("IntentRequest") => match envelope.intent_name() {
            Some("CheckTemperatureStateIntent") => Intent::CheckTemperatureState,
            Some("CheckIncubatorModeStateIntent") => Intent::CheckIncubatorModeState,
            Some("CheckCoolerStateIntent") => Intent::CheckCoolerState,
            Some("CheckLightStateIntent") => Intent::CheckLightState,
            Some("ChangeCoolerStateManualIntent") => Intent::ChangeCoolerStateManual {
                on: slot_is_on(envelope.slot_value("coolerState")),
            },
            Some("ChangeLightStateManualIntent") => Intent::ChangeLightStateManual {
                on: slot_is_on(envelope.slot_value("lightState")),
            },
            Some("ChangeAutoModeIntent") => Intent::ChangeAutoMode,
            Some("AMAZON.HelpIntent") => Intent::Help,
            Some("AMAZON.CancelIntent" | "AMAZON.StopIntent") => Intent::CancelOrStop,
            _ => Intent::Fallback,
        },
        _ => Intent::Fallback,
    }
}
