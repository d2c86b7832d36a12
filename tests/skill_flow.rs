//! End-to-end voice path: platform envelope in, speech envelope out, with the
//! shadow store mocked at the HTTP boundary.

mod support;

use support::{DEVICE, TestService, USER, intent_envelope, request_envelope, slotted_envelope, speech_text};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

const SHADOW_PATH: &str = "/things/incubator-01/shadow";

async fn post_skill(service: &TestService, envelope: &serde_json::Value) -> serde_json::Value {
    let response = reqwest::Client::new()
        .post(service.url("/skill"))
        .json(envelope)
        .send()
        .await
        .expect("skill request should succeed");
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    response.json().await.expect("skill response should be JSON")
}

#[tokio::test]
async fn check_temperature_speaks_the_ideal_phrase() {
    let service = TestService::start().await;
    service.seed_device(USER, DEVICE).await;

    Mock::given(method("GET"))
        .and(path(SHADOW_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "state": {"reported": {"temperatureState": 1, "incubatorMode": 1}}
        })))
        .expect(1)
        .mount(&service.shadow)
        .await;

    let body = post_skill(&service, &intent_envelope("CheckTemperatureStateIntent", USER)).await;
    assert_eq!(
        speech_text(&body),
        "La temperatura está en estado ideal, entre 35 y 40.9 grados."
    );
    assert_eq!(body["response"]["shouldEndSession"], false);
}

#[tokio::test]
async fn check_cooler_reads_desired_not_reported() {
    let service = TestService::start().await;
    service.seed_device(USER, DEVICE).await;

    Mock::given(method("GET"))
        .and(path(SHADOW_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "state": {
                "desired":  {"coolerState": 1},
                "reported": {"coolerState": 0}
            }
        })))
        .mount(&service.shadow)
        .await;

    let body = post_skill(&service, &intent_envelope("CheckCoolerStateIntent", USER)).await;
    assert_eq!(speech_text(&body), "El ventilador está prendido.");
}

#[tokio::test]
async fn change_auto_mode_patches_mode_only() {
    let service = TestService::start().await;
    service.seed_device(USER, DEVICE).await;

    Mock::given(method("POST"))
        .and(path(SHADOW_PATH))
        .and(body_json(serde_json::json!({
            "state": {"desired": {"incubatorMode": 1}}
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&service.shadow)
        .await;

    let body = post_skill(&service, &intent_envelope("ChangeAutoModeIntent", USER)).await;
    assert_eq!(speech_text(&body), "El modo automático se ha activado.");
}

#[tokio::test]
async fn enciende_turns_the_light_on_and_forces_manual_mode() {
    let service = TestService::start().await;
    service.seed_device(USER, DEVICE).await;

    Mock::given(method("POST"))
        .and(path(SHADOW_PATH))
        .and(body_json(serde_json::json!({
            "state": {"desired": {"lightState": 1, "incubatorMode": 0}}
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&service.shadow)
        .await;

    let envelope = slotted_envelope("ChangeLightStateManualIntent", USER, "lightState", "enciende");
    let body = post_skill(&service, &envelope).await;
    assert_eq!(speech_text(&body), "Se encendió el foco.");
}

#[tokio::test]
async fn garbled_slot_turns_the_cooler_off() {
    let service = TestService::start().await;
    service.seed_device(USER, DEVICE).await;

    Mock::given(method("POST"))
        .and(path(SHADOW_PATH))
        .and(body_json(serde_json::json!({
            "state": {"desired": {"coolerState": 0, "incubatorMode": 0}}
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&service.shadow)
        .await;

    let envelope = slotted_envelope("ChangeCoolerStateManualIntent", USER, "coolerState", "xyz");
    let body = post_skill(&service, &envelope).await;
    assert_eq!(speech_text(&body), "Se apagó el ventilador.");
}

#[tokio::test]
async fn unknown_user_gets_the_apology_without_store_traffic() {
    let service = TestService::start().await;

    let body = post_skill(&service, &intent_envelope("CheckTemperatureStateIntent", "stranger")).await;
    assert_eq!(
        speech_text(&body),
        "No se pudo obtener el estado de la temperatura."
    );
    assert!(service.shadow.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn store_outage_yields_the_apology_not_a_fault() {
    let service = TestService::start().await;
    service.seed_device(USER, DEVICE).await;

    Mock::given(method("GET"))
        .and(path(SHADOW_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&service.shadow)
        .await;

    let body = post_skill(&service, &intent_envelope("CheckLightStateIntent", USER)).await;
    assert_eq!(speech_text(&body), "No se pudo obtener el estado del foco.");
}

#[tokio::test]
async fn launch_welcomes_and_keeps_the_session_open() {
    let service = TestService::start().await;

    let body = post_skill(&service, &request_envelope("LaunchRequest", USER)).await;
    assert!(speech_text(&body).starts_with("Bienvenido"));
    assert_eq!(body["response"]["shouldEndSession"], false);
    assert!(body["response"]["reprompt"]["outputSpeech"]["text"].is_string());
}

#[tokio::test]
async fn stop_says_goodbye_and_ends_the_session() {
    let service = TestService::start().await;

    let body = post_skill(&service, &intent_envelope("AMAZON.StopIntent", USER)).await;
    assert_eq!(speech_text(&body), "¡Hasta luego!");
    assert_eq!(body["response"]["shouldEndSession"], true);
}

#[tokio::test]
async fn session_end_never_touches_the_store() {
    let service = TestService::start().await;
    service.seed_device(USER, DEVICE).await;

    let body = post_skill(&service, &request_envelope("SessionEndedRequest", USER)).await;
    assert_eq!(body["response"]["shouldEndSession"], true);
    assert!(service.shadow.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn unrecognized_intent_falls_back() {
    let service = TestService::start().await;

    let body = post_skill(&service, &intent_envelope("OpenGarageDoorIntent", USER)).await;
    assert_eq!(speech_text(&body), "Hubo un problema. Intenta de nuevo.");
}

#[tokio::test]
async fn unparsable_envelope_still_speaks() {
    let service = TestService::start().await;

    let response = reqwest::Client::new()
        .post(service.url("/skill"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("request should complete");
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(speech_text(&body), "Hubo un problema. Intenta de nuevo.");
}
