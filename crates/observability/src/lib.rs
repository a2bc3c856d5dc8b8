//! Tracing/logging setup shared by the server and the CLI.

/// Initialize process-wide JSON logging (server processes).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::Format::Json);
}

/// Initialize human-readable logging (interactive tools).
pub fn init_cli() {
    tracing::init(tracing::Format::Compact);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
