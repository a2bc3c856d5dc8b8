//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Output format of the process-wide subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// One JSON object per event, with timestamps.
    Json,
    /// Single-line text, for terminals.
    Compact,
}

/// Build the filter from `RUST_LOG`, falling back to `default`.
pub fn filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(format: Format) {
    match format {
        Format::Json => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter_or("info"))
                .json()
                .with_timer(tracing_subscriber::fmt::time::SystemTime)
                .with_target(false)
                .try_init();
        }
        Format::Compact => {
            // The CLI prints its own results; keep library chatter down by default.
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter_or("warn"))
                .compact()
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init(Format::Json);
        init(Format::Json);
        init(Format::Compact);
    }
}
