use super::document::{DesiredPatch, ShadowDocument};
use crate::error::ShadowError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Get/update access to a device's twin document.
///
/// One blocking round-trip per call; the store itself resolves concurrent
/// writers (last writer wins), so there is no client-side locking here and
/// callers must not assume read-after-write consistency across calls.
#[async_trait]
pub trait ShadowStore: Send + Sync {
    async fn fetch(&self, device_id: &str) -> Result<ShadowDocument, ShadowError>;

    async fn update(&self, device_id: &str, patch: DesiredPatch) -> Result<(), ShadowError>;
}

/// HTTP implementation against the shadow data plane:
/// `GET/POST {endpoint}/things/{device_id}/shadow`.
pub struct HttpShadowStore {
    endpoint: String,
    client: Client,
}

impl HttpShadowStore {
    pub fn new(endpoint: &str, request_timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client: Client::builder()
                .timeout(request_timeout)
                .connect_timeout(Duration::from_secs(5))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    fn shadow_url(&self, device_id: &str) -> String {
        format!("{}/things/{device_id}/shadow", self.endpoint)
    }
}

#[async_trait]
impl ShadowStore for HttpShadowStore {
    async fn fetch(&self, device_id: &str) -> Result<ShadowDocument, ShadowError> {
        let response = self
            .client
            .get(self.shadow_url(device_id))
            .send()
            .await
            .map_err(|e| ShadowError::Unavailable(e.to_string()))?;

        match response.status() {
            status if status.is_success() => response
                .json::<ShadowDocument>()
                .await
                .map_err(|e| ShadowError::Unavailable(format!("malformed shadow body: {e}"))),
            reqwest::StatusCode::NOT_FOUND => Err(ShadowError::NotFound {
                device_id: device_id.to_string(),
            }),
            status => Err(ShadowError::Unavailable(format!(
                "shadow fetch returned {status}"
            ))),
        }
    }

    async fn update(&self, device_id: &str, patch: DesiredPatch) -> Result<(), ShadowError> {
        let response = self
            .client
            .post(self.shadow_url(device_id))
            .json(&patch.into_payload())
            .send()
            .await
            .map_err(|e| ShadowError::Unavailable(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(()),
            reqwest::StatusCode::NOT_FOUND => Err(ShadowError::NotFound {
                device_id: device_id.to_string(),
            }),
            status if status.is_client_error() => {
                let body = response.text().await.unwrap_or_default();
                Err(ShadowError::Rejected(format!("{status}: {body}")))
            }
            status => Err(ShadowError::Unavailable(format!(
                "shadow update returned {status}"
            ))),
        }
    }
}
