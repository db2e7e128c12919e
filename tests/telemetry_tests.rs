use chart_geometry::core::nice_range;
use chart_geometry::telemetry::{init_default_tracing, init_tracing_with_filter};

#[test]
fn repeated_initialization_reports_false() {
    let _ = init_default_tracing();
    assert!(!init_default_tracing());
    assert!(!init_tracing_with_filter("chart_geometry=trace"));
    // Projections keep working with or without an installed subscriber.
    assert_eq!(nice_range(&[0.0, 0.0]), (0.0, 0.0));
}

#[test]
fn malformed_filter_is_rejected() {
    assert!(!init_tracing_with_filter("chart_geometry=loudest"));
}
