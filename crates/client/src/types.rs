//! Result types shared by the sync client and its callers.

use serde::{Deserialize, Serialize};

pub const NOT_CONFIGURED: &str =
    "Google Script URL is not configured. Please go to Settings and add your script URL.";
pub const SAVED: &str = "Product saved successfully!";
pub const DUPLICATE: &str = "This barcode already exists in your inventory.";
pub const NETWORK_ERROR: &str = "Network error. Please check your internet connection and try again.";
pub const SAVE_FAILED: &str =
    "Failed to save product. Please check your Script URL in Settings and try again.";

pub const TEST_NO_URL: &str = "Please enter a Script URL first.";
pub const TEST_OK: &str = "Connection successful!";
pub const TEST_FAILED: &str = "Connection failed. Please check the URL and try again.";

/// Uniform `{success, message}` result of every client network operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResult {
    pub success: bool,
    pub message: String,
}

impl SyncResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// What happened to a save, before it is flattened into a [`SyncResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No endpoint configured; nothing was sent.
    NotConfigured,
    /// Remote appended the row (row number when the reply carried one).
    Saved { row: Option<u64> },
    /// Remote already has this barcode.
    Duplicate,
    /// Remote answered 2xx with `status: "error"`.
    Rejected(String),
    /// Could not reach the remote.
    Network,
    /// Anything else; the detail is for logs only.
    Failed(String),
}

impl From<SaveOutcome> for SyncResult {
    fn from(outcome: SaveOutcome) -> Self {
        match outcome {
            SaveOutcome::NotConfigured => Self::failed(NOT_CONFIGURED),
            SaveOutcome::Saved { .. } => Self::ok(SAVED),
            SaveOutcome::Duplicate => Self::failed(DUPLICATE),
            SaveOutcome::Rejected(message) if !message.trim().is_empty() => Self::failed(message),
            SaveOutcome::Rejected(_) | SaveOutcome::Failed(_) => Self::failed(SAVE_FAILED),
            SaveOutcome::Network => Self::failed(NETWORK_ERROR),
        }
    }
}
