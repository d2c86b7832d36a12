use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ── Inbound envelope ────────────────────────────────────────────────────────
//
// Platform-defined shape; every field the platform may omit is optional and
// parsing stays lenient. Classification turns anything surprising into the
// fallback intent rather than an error.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillRequest {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub context: Option<RequestContext>,
    #[serde(default)]
    pub request: Option<RequestBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestContext {
    #[serde(rename = "System", default)]
    pub system: Option<SystemContext>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemContext {
    #[serde(default)]
    pub user: Option<PlatformUser>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformUser {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBody {
    #[serde(rename = "type", default)]
    pub request_type: Option<String>,
    #[serde(default)]
    pub intent: Option<IntentBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntentBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub value: Option<String>,
}

impl SkillRequest {
    /// Opaque caller identity from the platform context.
    pub fn user_id(&self) -> Option<&str> {
        self.context
            .as_ref()?
            .system
            .as_ref()?
            .user
            .as_ref()?
            .user_id
            .as_deref()
    }

    pub fn request_type(&self) -> Option<&str> {
        self.request.as_ref()?.request_type.as_deref()
    }

    pub fn intent_name(&self) -> Option<&str> {
        self.request.as_ref()?.intent.as_ref()?.name.as_deref()
    }

    /// Raw slot value as spoken; free-form text from the platform.
    pub fn slot_value(&self, slot: &str) -> Option<&str> {
        self.request
            .as_ref()?
            .intent
            .as_ref()?
            .slots
            .get(slot)?
            .value
            .as_deref()
    }
}

// ── Outbound envelope ───────────────────────────────────────────────────────

/// Speech produced by the formatter, before platform framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Speech {
    pub text: String,
    pub reprompt: Option<String>,
    pub end_session: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillResponse {
    pub version: &'static str,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseBody {
    #[serde(rename = "outputSpeech")]
    pub output_speech: OutputSpeech,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(rename = "shouldEndSession")]
    pub should_end_session: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub speech_type: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Reprompt {
    #[serde(rename = "outputSpeech")]
    pub output_speech: OutputSpeech,
}

impl From<Speech> for SkillResponse {
    fn from(speech: Speech) -> Self {
        Self {
            version: "1.0",
            response: ResponseBody {
                output_speech: OutputSpeech {
                    speech_type: "PlainText",
                    text: speech.text,
                },
                reprompt: speech.reprompt.map(|text| Reprompt {
                    output_speech: OutputSpeech {
                        speech_type: "PlainText",
                        text,
                    },
                }),
                should_end_session: speech.end_session,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_intent_envelope() {
        let raw = r#"{
            "version": "1.0",
            "context": {"System": {"user": {"userId": "amzn1.ask.account.AAA"}}},
            "request": {
                "type": "IntentRequest",
                "intent": {
                    "name": "ChangeLightStateManualIntent",
                    "slots": {"lightState": {"name": "lightState", "value": "enciende"}}
                }
            }
        }"#;
        let envelope: SkillRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.user_id(), Some("amzn1.ask.account.AAA"));
        assert_eq!(envelope.request_type(), Some("IntentRequest"));
        assert_eq!(envelope.intent_name(), Some("ChangeLightStateManualIntent"));
        assert_eq!(envelope.slot_value("lightState"), Some("enciende"));
    }

    #[test]
    fn parses_empty_envelope() {
        let envelope: SkillRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(envelope.user_id(), None);
        assert_eq!(envelope.request_type(), None);
        assert_eq!(envelope.slot_value("lightState"), None);
    }

    #[test]
    fn response_serializes_platform_shape() {
        let response = SkillResponse::from(Speech {
            text: "Hola".into(),
            reprompt: Some("¿Sigues ahí?".into()),
            end_session: false,
        });
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["version"], "1.0");
        assert_eq!(json["response"]["outputSpeech"]["type"], "PlainText");
        assert_eq!(json["response"]["outputSpeech"]["text"], "Hola");
        assert_eq!(
            json["response"]["reprompt"]["outputSpeech"]["text"],
            "¿Sigues ahí?"
        );
        assert_eq!(json["response"]["shouldEndSession"], false);
    }

    #[test]
    fn response_omits_absent_reprompt() {
        let response = SkillResponse::from(Speech {
            text: "¡Hasta luego!".into(),
            reprompt: None,
            end_session: true,
        });
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["response"].get("reprompt").is_none());
        assert_eq!(json["response"]["shouldEndSession"], true);
    }
}
