//! Tracing bootstrap for Warden processes.

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// The `WARDEN_LOG` environment variable takes precedence over the
/// configured `fallback_filter`. Safe to call more than once; subsequent
/// calls are no-ops.
pub fn init(fallback_filter: &str) {
    let filter = EnvFilter::try_from_env("WARDEN_LOG")
        .unwrap_or_else(|_| EnvFilter::new(fallback_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init("info");
        init("debug");
        tracing::info!("telemetry initialized");
    }
}
