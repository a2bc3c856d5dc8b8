use axum::http::StatusCode;
use axum::response::IntoResponse;

use dukascan_core::RemoteReply;

/// Append-service replies are always HTTP 200; the outcome is in `status`.
pub fn json_reply(reply: RemoteReply) -> axum::response::Response {
    (StatusCode::OK, axum::Json(reply)).into_response()
}
