//! HTTP API: the remote append service.
//!
//! `GET /` is a liveness probe, `POST /` appends one product row with a
//! barcode duplicate check. Semantic outcomes are always HTTP 200 with a
//! `status` field in the body.

pub mod app;
pub mod config;
pub mod middleware;
