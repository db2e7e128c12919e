use chart_geometry::ChartError;
use chart_geometry::core::{ChartContext, NegativeValuesDrawMode, Rect};

fn plot() -> Rect {
    Rect::new(40.0, 20.0, 440.0, 220.0)
}

#[test]
fn range_endpoints_map_to_plot_edges_exactly() {
    let ctx = ChartContext::new(plot(), -20.0, 80.0).expect("valid context");
    assert_eq!(ctx.convert_value_to_y(80.0), 20.0);
    assert_eq!(ctx.convert_value_to_y(-20.0), 220.0);
    assert_eq!(ctx.convert_value_to_x(80.0), 440.0);
    assert_eq!(ctx.convert_value_to_x(-20.0), 40.0);
}

#[test]
fn interior_values_map_linearly() {
    let ctx = ChartContext::new(plot(), 0.0, 100.0).expect("valid context");
    assert!((ctx.convert_value_to_y(25.0) - 170.0).abs() <= 1e-9);
    assert!((ctx.convert_value_to_x(25.0) - 140.0).abs() <= 1e-9);
    assert!((ctx.normalize(75.0) - 0.75).abs() <= 1e-12);
}

#[test]
fn degenerate_range_collapses_to_baseline() {
    let ctx = ChartContext::new(plot(), 5.0, 5.0).expect("degenerate range is allowed");
    assert_eq!(ctx.value_range(), 0.0);
    assert_eq!(ctx.convert_value_to_y(5.0), 220.0);
    assert_eq!(ctx.convert_value_to_x(123.0), 40.0);
    assert_eq!(ctx.normalize(5.0), 0.0);
}

#[test]
fn inverted_or_non_finite_range_is_rejected() {
    assert!(matches!(
        ChartContext::new(plot(), 10.0, 0.0),
        Err(ChartError::InvalidData(_))
    ));
    assert!(matches!(
        ChartContext::new(plot(), f64::NAN, 10.0),
        Err(ChartError::InvalidData(_))
    ));
}

#[test]
fn inverted_plot_is_rejected() {
    let result = ChartContext::new(Rect::new(100.0, 0.0, 50.0, 100.0), 0.0, 1.0);
    assert!(matches!(result, Err(ChartError::InvalidViewport { .. })));
}

#[test]
fn bars_are_centered_in_equal_slots() {
    let ctx = ChartContext::new(plot(), 0.0, 100.0).expect("valid context");
    // 4 slots of 100 px, bars 60 px wide.
    assert!((ctx.bar_width(4, 0.6) - 60.0).abs() <= 1e-9);
    assert!((ctx.bar_left(0, 4, 0.6) - 60.0).abs() <= 1e-9);
    assert!((ctx.bar_left(3, 4, 0.6) - 360.0).abs() <= 1e-9);
    assert!((ctx.centered_x(1, 4) - 190.0).abs() <= 1e-9);
    assert_eq!(ctx.bar_width(0, 0.6), 0.0);
}

#[test]
fn rows_are_centered_in_equal_bands() {
    let ctx = ChartContext::new(plot(), 0.0, 100.0).expect("valid context");
    assert!((ctx.row_thickness(2, 0.5) - 50.0).abs() <= 1e-9);
    assert!((ctx.row_top(1, 2, 0.5) - 145.0).abs() <= 1e-9);
    assert!((ctx.centered_y(0, 2) - 70.0).abs() <= 1e-9);
}

#[test]
fn baseline_follows_negative_draw_mode() {
    let ctx = ChartContext::new(plot(), -50.0, 50.0).expect("valid context");
    assert!((ctx.baseline_y(NegativeValuesDrawMode::BelowAxis) - 120.0).abs() <= 1e-9);
    assert_eq!(ctx.baseline_y(NegativeValuesDrawMode::FromMinValue), 220.0);
    assert!((ctx.baseline_x(NegativeValuesDrawMode::BelowAxis) - 240.0).abs() <= 1e-9);

    let positive = ctx.with_range(0.0, 50.0).expect("valid range");
    assert_eq!(positive.baseline_y(NegativeValuesDrawMode::BelowAxis), 220.0);
}
