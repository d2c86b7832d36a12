//! Regulation path: device temperature events drive the actuator patch.

mod support;

use support::TestService;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn event(temperature_state: i64) -> serde_json::Value {
    serde_json::json!({"deviceId": "incubator-01", "temperatureState": temperature_state})
}

#[tokio::test]
async fn cold_event_patches_light_on_cooler_off_without_mode() {
    let service = TestService::start().await;

    Mock::given(method("POST"))
        .and(path("/things/incubator-01/shadow"))
        .and(body_json(serde_json::json!({
            "state": {"desired": {"coolerState": 0, "lightState": 1}}
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&service.shadow)
        .await;

    let response = reqwest::Client::new()
        .post(service.url("/regulate"))
        .json(&event(0))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["lightState"], 1);
    assert_eq!(body["coolerState"], 0);
}

#[tokio::test]
async fn hot_event_patches_cooler_on() {
    let service = TestService::start().await;

    Mock::given(method("POST"))
        .and(path("/things/incubator-01/shadow"))
        .and(body_json(serde_json::json!({
            "state": {"desired": {"coolerState": 1, "lightState": 0}}
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&service.shadow)
        .await;

    let response = reqwest::Client::new()
        .post(service.url("/regulate"))
        .json(&event(2))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
}

#[tokio::test]
async fn out_of_range_level_is_a_client_error() {
    let service = TestService::start().await;

    let response = reqwest::Client::new()
        .post(service.url("/regulate"))
        .json(&event(3))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    assert!(service.shadow.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn store_outage_is_a_bad_gateway() {
    let service = TestService::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&service.shadow)
        .await;

    let response = reqwest::Client::new()
        .post(service.url("/regulate"))
        .json(&event(1))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_GATEWAY);
}
