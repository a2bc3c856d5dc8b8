//! JSON replies exchanged between the client and the remote append service.
//!
//! Every semantic outcome travels as HTTP 200 with a `status` tag; only
//! transport problems use non-2xx codes.

use serde::{Deserialize, Serialize};

pub const LIVENESS_MESSAGE: &str = "DukaScan backend is running!";
pub const SAVED_MESSAGE: &str = "Product saved successfully!";
pub const DUPLICATE_MESSAGE: &str = "This barcode already exists in the inventory";

/// Prefix for every failure reported by the append service after parsing began.
pub fn failed_to_save(detail: impl std::fmt::Display) -> String {
    format!("Failed to save product: {detail}")
}

/// Identity of a freshly appended row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedRow {
    pub barcode: String,
    pub name: String,
    /// 1-based sheet row; the header occupies row 1.
    pub row: u64,
}

/// Reply body of the append service, tagged by `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RemoteReply {
    Success {
        #[serde(default)]
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<SavedRow>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
    },
    Duplicate {
        #[serde(default)]
        message: String,
    },
    Error {
        #[serde(default)]
        message: String,
    },
}

impl RemoteReply {
    /// Liveness probe reply.
    pub fn alive(timestamp: impl Into<String>) -> Self {
        Self::Success {
            message: LIVENESS_MESSAGE.to_string(),
            data: None,
            timestamp: Some(timestamp.into()),
        }
    }

    pub fn saved(row: SavedRow) -> Self {
        Self::Success {
            message: SAVED_MESSAGE.to_string(),
            data: Some(row),
            timestamp: None,
        }
    }

    pub fn duplicate() -> Self {
        Self::Duplicate {
            message: DUPLICATE_MESSAGE.to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Duplicate { .. } => "duplicate",
            Self::Error { .. } => "error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success { message, .. }
            | Self::Duplicate { message }
            | Self::Error { message } => message,
        }
    }
}
