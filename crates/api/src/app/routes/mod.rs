use axum::{routing::get, Router};

pub mod products;
pub mod system;

/// Router for the append endpoint: `GET /` probes, `POST /` appends.
pub fn router() -> Router {
    Router::new().route("/", get(system::liveness).post(products::append_product))
}
