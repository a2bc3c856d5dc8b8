use std::sync::Arc;

use axum::response::IntoResponse;
use axum::{extract::Extension, http::StatusCode, Json};
use serde_json::json;

use crate::app::errors;
use crate::app::services::AppendService;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Liveness probe; never touches the table.
pub async fn liveness(Extension(services): Extension<Arc<AppendService>>) -> axum::response::Response {
    errors::json_reply(services.liveness())
}

/// Unknown paths: 404 with a small JSON body.
pub async fn not_found(uri: axum::http::Uri) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "not_found", "path": uri.path() })),
    )
        .into_response()
}
