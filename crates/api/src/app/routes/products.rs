use std::sync::Arc;

use axum::{body::Bytes, extract::Extension};

use dukascan_core::wire::failed_to_save;
use dukascan_core::RemoteReply;

use crate::app::errors;
use crate::app::services::AppendService;

/// Append one product. The body is read raw so that JSON errors become a
/// `status: "error"` reply instead of an extractor rejection.
///
/// Table I/O is synchronous, so the append runs on the blocking pool.
pub async fn append_product(
    Extension(services): Extension<Arc<AppendService>>,
    body: Bytes,
) -> axum::response::Response {
    let reply = tokio::task::spawn_blocking(move || services.append(&body))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("append task failed: {e}");
            RemoteReply::error(failed_to_save(e))
        });

    errors::json_reply(reply)
}
