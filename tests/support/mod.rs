//! Shared test harness: ephemeral gateway wired to a wiremock shadow store
//! and a scratch SQLite service DB.

use nido::db;
use nido::directory::SqliteDirectory;
use nido::gateway::{AppState, run_gateway_with_listener};
use nido::regulator::Regulator;
use nido::shadow::mediator::Mediator;
use nido::shadow::store::{HttpShadowStore, ShadowStore};
use nido::telemetry::SqliteTelemetry;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::MockServer;

pub const USER: &str = "amzn1.ask.account.TEST";
pub const DEVICE: &str = "incubator-01";

pub struct TestService {
    pub port: u16,
    pub pool: SqlitePool,
    pub shadow: MockServer,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
    _workspace: TempDir,
}

impl TestService {
    pub async fn start() -> Self {
        let shadow = MockServer::start().await;
        let workspace = TempDir::new().expect("temp workspace should be created");
        let pool = db::open_pool(&workspace.path().join("nido.db"))
            .await
            .expect("service DB should open");

        let store: Arc<dyn ShadowStore> = Arc::new(HttpShadowStore::new(
            &shadow.uri(),
            Duration::from_secs(5),
        ));
        let state = AppState {
            mediator: Arc::new(Mediator::new(
                Arc::new(SqliteDirectory::new(pool.clone())),
                store.clone(),
            )),
            telemetry: Arc::new(SqliteTelemetry::new(pool.clone())),
            regulator: Arc::new(Regulator::new(store)),
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("ephemeral gateway listener should bind");
        let port = listener
            .local_addr()
            .expect("listener should expose local address")
            .port();

        let handle = tokio::spawn(async move { run_gateway_with_listener(listener, state).await });

        let service = Self {
            port,
            pool,
            shadow,
            handle,
            _workspace: workspace,
        };
        service.wait_until_ready().await;
        service
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{path}", self.port)
    }

    /// Provision a user→device mapping, as the fleet tooling would.
    pub async fn seed_device(&self, user_id: &str, device_id: &str) {
        sqlx::query("INSERT INTO user_devices (user_id, device_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(device_id)
            .execute(&self.pool)
            .await
            .expect("directory row should insert");
    }

    async fn wait_until_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .expect("reqwest client should be built");

        for _ in 0..80 {
            if let Ok(response) = client.get(self.url("/health")).send().await {
                if response.status().is_success() {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        panic!("gateway never became ready");
    }
}

impl Drop for TestService {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ── Envelope builders ───────────────────────────────────────────────────────

pub fn intent_envelope(intent_name: &str, user_id: &str) -> serde_json::Value {
    serde_json::json!({
        "version": "1.0",
        "context": {"System": {"user": {"userId": user_id}}},
        "request": {"type": "IntentRequest", "intent": {"name": intent_name, "slots": {}}}
    })
}

pub fn slotted_envelope(
    intent_name: &str,
    user_id: &str,
    slot: &str,
    value: &str,
) -> serde_json::Value {
    serde_json::json!({
        "version": "1.0",
        "context": {"System": {"user": {"userId": user_id}}},
        "request": {
            "type": "IntentRequest",
            "intent": {"name": intent_name, "slots": {slot: {"name": slot, "value": value}}}
        }
    })
}

pub fn request_envelope(request_type: &str, user_id: &str) -> serde_json::Value {
    serde_json::json!({
        "version": "1.0",
        "context": {"System": {"user": {"userId": user_id}}},
        "request": {"type": request_type}
    })
}

/// Speech text out of a skill response body.
pub fn speech_text(body: &serde_json::Value) -> &str {
    body["response"]["outputSpeech"]["text"]
        .as_str()
        .expect("response should carry speech text")
}
