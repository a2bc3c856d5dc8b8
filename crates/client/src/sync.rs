//! Save/test requests against the remote append service.

use serde_json::Value;

use dukascan_core::{Product, RemoteReply};

use crate::types::{self, SaveOutcome, SyncResult};

/// Client for the append endpoint.
///
/// One attempt per call: no retry, no backoff, no timeout beyond the
/// transport's own.
#[derive(Debug, Clone, Default)]
pub struct SyncClient {
    http: reqwest::Client,
}

impl SyncClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_http(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Save one product to `url`. Never fails: every problem is a message.
    pub async fn save_product(&self, url: &str, product: &Product) -> SyncResult {
        self.save_outcome(url, product).await.into()
    }

    /// Same as [`Self::save_product`] but keeps the typed outcome.
    pub async fn save_outcome(&self, url: &str, product: &Product) -> SaveOutcome {
        if url.trim().is_empty() {
            return SaveOutcome::NotConfigured;
        }

        match self.post_product(url, product).await {
            Ok(reply) => interpret_reply(reply),
            Err(SyncError::Network(e)) => {
                tracing::error!("network error saving {}: {e}", product.barcode);
                SaveOutcome::Network
            }
            Err(e) => {
                tracing::error!("error saving {}: {e}", product.barcode);
                SaveOutcome::Failed(e.to_string())
            }
        }
    }

    /// Probe `url` with a GET.
    pub async fn test_connection(&self, url: &str) -> SyncResult {
        if url.trim().is_empty() {
            return SyncResult::failed(types::TEST_NO_URL);
        }

        match self.http.get(url).send().await {
            Ok(resp) if resp.status().is_success() => SyncResult::ok(types::TEST_OK),
            Ok(resp) => SyncResult::failed(format!(
                "Connection failed with status: {}",
                resp.status().as_u16()
            )),
            Err(e) => {
                tracing::error!("error testing connection: {e}");
                SyncResult::failed(types::TEST_FAILED)
            }
        }
    }

    async fn post_product(&self, url: &str, product: &Product) -> Result<Value, SyncError> {
        let resp = self
            .http
            .post(url)
            .json(product)
            .send()
            .await
            .map_err(SyncError::from_transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SyncError::Api(
                status.as_u16(),
                resp.text().await.unwrap_or_default(),
            ));
        }

        let body = resp.text().await.map_err(SyncError::from_transport)?;
        serde_json::from_str(&body).map_err(|e| SyncError::Parse(e.to_string()))
    }
}

/// Map a 2xx JSON body onto an outcome.
///
/// Only `duplicate` and `error` are failures; any other or missing status
/// counts as saved. The rest of the body is read leniently.
fn interpret_reply(body: Value) -> SaveOutcome {
    match body.get("status").and_then(Value::as_str) {
        Some("duplicate") => SaveOutcome::Duplicate,
        Some("error") => {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            tracing::warn!("remote rejected product: {message}");
            SaveOutcome::Rejected(message)
        }
        _ => SaveOutcome::Saved {
            row: saved_row(body),
        },
    }
}

fn saved_row(body: Value) -> Option<u64> {
    match serde_json::from_value::<RemoteReply>(body) {
        Ok(RemoteReply::Success { data, .. }) => data.map(|d| d.row),
        _ => None,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request error: {0}")]
    Request(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
}

impl SyncError {
    fn from_transport(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            Self::Network(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}
