//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the append algorithm over an injected `ProductTable`
//! - `routes/`: HTTP handlers
//! - `errors.rs`: JSON reply helpers

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use dukascan_infra::ProductTable;

use crate::middleware;

pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(table: Arc<dyn ProductTable>) -> Router {
    let services = Arc::new(services::AppendService::new(table));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .fallback(routes::system::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(Extension(services))
                .layer(axum::middleware::from_fn(middleware::log_requests)),
        )
}
