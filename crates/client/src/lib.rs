//! `dukascan-client`
//!
//! **Responsibility:** the device side of DukaScan.
//!
//! This crate provides:
//! - The persisted endpoint configuration
//! - The sync client that posts products to the remote append service
//! - The user-facing flows (submit, settings) and their notices
//! - Single-flight, cancellable request tasks
//!
//! Validation and wire shapes live in `dukascan-core`.

pub mod flows;
pub mod settings;
pub mod sync;
pub mod task;
pub mod types;

pub use flows::Notice;
pub use settings::{FileSettingsStore, InMemorySettingsStore, SettingsError, SettingsStore};
pub use sync::SyncClient;
pub use task::{ActionGate, PendingRequest};
pub use types::{SaveOutcome, SyncResult};
