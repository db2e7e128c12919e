//! Telemetry helpers for hosts embedding `chart-geometry`.
//!
//! Geometry projections emit `tracing` events under the `chart_geometry`
//! target: range resolution, degenerate input fallbacks and hit-test
//! outcomes. Nothing is printed unless the host installs a subscriber.

/// Filter used when `RUST_LOG` is unset: projection diagnostics from this
/// crate at `debug`, everything else at `warn`.
pub const DEFAULT_FILTER: &str = "warn,chart_geometry=debug";

/// Installs a compact subscriber filtered by `RUST_LOG`, or by
/// [`DEFAULT_FILTER`] when the variable is unset or unparsable.
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));
        return install(filter);
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

/// Installs a compact subscriber with an explicit filter directive such as
/// `"chart_geometry::charts=trace"`, ignoring `RUST_LOG`.
///
/// Returns `false` for an invalid directive, a disabled `telemetry`
/// feature, or an already installed global subscriber.
#[must_use]
pub fn init_tracing_with_filter(directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        return match tracing_subscriber::EnvFilter::try_new(directives) {
            Ok(filter) => install(filter),
            Err(_) => false,
        };
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directives;
        false
    }
}

#[cfg(feature = "telemetry")]
fn install(filter: tracing_subscriber::EnvFilter) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok()
}
