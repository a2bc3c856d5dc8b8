//! `dukascan-core`: product record, validation and wire types.
//!
//! This crate is pure: no HTTP, no storage, no async. Both the client and the
//! remote append service depend on it so the two sides agree on field names,
//! coercion rules and reply shapes.

pub mod error;
pub mod numeric;
pub mod product;
pub mod validation;
pub mod wire;

pub use error::{DomainError, DomainResult};
pub use product::{Product, ProductSubmission};
pub use validation::{validate_numeric, validate_product_form, validate_url, FormValidation};
pub use wire::{RemoteReply, SavedRow};
