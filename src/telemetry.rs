//! Opt-in `tracing` setup for hosts embedding `easyplot`.
//!
//! The managers emit `debug!`/`trace!` events for classification results,
//! layer edits, grid rebuilds and style switches under the `easyplot` target.
//! Hosts that already own a subscriber can ignore this module entirely.

/// Default directive used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "easyplot=info";

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback directive,
/// e.g. `"easyplot=trace"` while debugging layer ordering.
#[must_use]
pub fn init_tracing_with_fallback(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}

#[cfg(all(test, not(feature = "telemetry")))]
mod tests {
    #[test]
    fn tracing_init_is_noop_without_feature() {
        assert!(!super::init_default_tracing());
        assert!(!super::init_tracing_with_fallback("easyplot=trace"));
    }
}
