//! Voice-skill surface: envelope parsing, intent classification, mediation,
//! and speech formatting.

pub mod envelope;
pub mod intent;
pub mod speech;

pub use envelope::{SkillRequest, SkillResponse, Speech};
pub use intent::{Intent, classify};

use crate::shadow::document::Actuator;
use crate::shadow::mediator::{Mediator, MediatorResult, StateKind};

/// Handle one inbound skill invocation end to end.
///
/// One dispatch point over the closed intent set. Session intents answer
/// directly; device intents go through the mediator and the result is
/// rendered by the speech table. Always produces a response.
pub async fn handle(envelope: &SkillRequest, mediator: &Mediator) -> SkillResponse {
    let intent = classify(envelope);
    tracing::info!(intent = %intent, "skill request");

    let speech = match intent {
        Intent::Launch => speech::launch(),
        Intent::Help => speech::help(),
        Intent::CancelOrStop => speech::goodbye(),
        Intent::Fallback => speech::fallback(),
        device_intent => {
            let Some(user_id) = envelope.user_id() else {
                tracing::warn!(intent = %device_intent, "envelope carries no caller identity");
                return speech::fallback().into();
            };
            let result = mediate(device_intent, user_id, mediator).await;
            speech::respond(device_intent, &result)
        }
    };
    speech.into()
}

async fn mediate(intent: Intent, user_id: &str, mediator: &Mediator) -> MediatorResult {
    match intent {
        Intent::CheckTemperatureState => {
            mediator.read_state(user_id, StateKind::TemperatureState).await
        }
        Intent::CheckIncubatorModeState => {
            mediator.read_state(user_id, StateKind::IncubatorMode).await
        }
        Intent::CheckCoolerState => mediator.read_state(user_id, StateKind::CoolerState).await,
        Intent::CheckLightState => mediator.read_state(user_id, StateKind::LightState).await,
        Intent::ChangeCoolerStateManual { on } => {
            mediator.write_manual(user_id, Actuator::Cooler, on).await
        }
        Intent::ChangeLightStateManual { on } => {
            mediator.write_manual(user_id, Actuator::Light, on).await
        }
        Intent::ChangeAutoMode => mediator.set_auto_mode(user_id).await,
        // Session intents never reach this function.
        Intent::Launch | Intent::Help | Intent::CancelOrStop | Intent::Fallback => {
            MediatorResult::Failure(crate::shadow::mediator::FailureReason::NotFound)
        }
    }
}
