use chart_geometry::charts::bar::{BarChartConfig, project_bars, resolve_axis};
use chart_geometry::charts::grouped_bar::{
    GroupedBarChartConfig, project_grouped_bars, resolve_axis as grouped_axis,
};
use chart_geometry::charts::horizontal_bar::project_horizontal_bars;
use chart_geometry::charts::reference_line::ReferenceLineConfig;
use chart_geometry::charts::span::{SpanChartConfig, project_spans, resolve_axis as span_axis};
use chart_geometry::charts::stacked_bar::{
    StackedBarChartConfig, project_stacked_bars, resolve_axis as stacked_axis,
};
use chart_geometry::core::{
    BarGroup, ChartContext, CornerRadii, DataPoint, NegativeValuesDrawMode, Point, Rect, Span,
    Viewport,
};
use chart_geometry::interaction::{TooltipManager, TooltipPosition, find_hit_index};
use chart_geometry::render::{Color, DrawCommand, Paint, RenderFrame};
use chart_geometry::Drawable;

fn points(values: &[f64]) -> Vec<DataPoint> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| DataPoint::new(format!("p{i}"), *v).expect("valid point"))
        .collect()
}

fn context(min: f64, max: f64) -> ChartContext {
    ChartContext::new(Rect::new(0.0, 0.0, 300.0, 100.0), min, max).expect("valid context")
}

#[test]
fn bar_axis_rounds_to_steps_of_ten() {
    let axis = resolve_axis(&points(&[12.0, 47.0, -3.0]), &BarChartConfig::default())
        .expect("axis");
    assert_eq!((axis.min_value, axis.max_value), (-10.0, 50.0));
    assert!(axis.draw_axis_at_zero);
}

#[test]
fn bars_are_centered_and_scaled_to_value() {
    let geometry = project_bars(
        &points(&[50.0, 100.0, 25.0]),
        &BarChartConfig::default(),
        context(0.0, 100.0),
        &Paint::default(),
        1.0,
    )
    .expect("bars");

    assert_eq!(geometry.len(), 3);
    let first = geometry.bars[0].rect;
    assert!((first.left - 20.0).abs() <= 1e-9);
    assert!((first.right - 80.0).abs() <= 1e-9);
    assert!((first.top - 50.0).abs() <= 1e-9);
    assert_eq!(first.bottom, 100.0);
    assert_eq!(geometry.bars[1].rect.top, 0.0);
    assert!((geometry.bars[2].rect.left - 220.0).abs() <= 1e-9);
    assert_eq!(geometry.bars[0].corner_radii, CornerRadii::top(8.0));
}

#[test]
fn bars_grow_from_baseline_with_progress() {
    let geometry = project_bars(
        &points(&[50.0]),
        &BarChartConfig::default(),
        context(0.0, 100.0),
        &Paint::default(),
        0.5,
    )
    .expect("bars");
    let rect = geometry.bars[0].rect;
    assert_eq!(rect.bottom, 100.0);
    assert!((rect.top - 75.0).abs() <= 1e-9);
}

#[test]
fn negative_bars_hang_below_zero_line() {
    let geometry = project_bars(
        &points(&[-25.0, 25.0]),
        &BarChartConfig::default(),
        context(-50.0, 50.0),
        &Paint::default(),
        1.0,
    )
    .expect("bars");
    let negative = &geometry.bars[0];
    assert!((negative.rect.top - 50.0).abs() <= 1e-9);
    assert!((negative.rect.bottom - 75.0).abs() <= 1e-9);
    assert_eq!(negative.corner_radii, CornerRadii::bottom(8.0));

    let positive = &geometry.bars[1];
    assert!((positive.rect.bottom - 50.0).abs() <= 1e-9);
}

#[test]
fn from_min_value_mode_rises_from_plot_bottom() {
    let config = BarChartConfig::default()
        .with_negative_values_draw_mode(NegativeValuesDrawMode::FromMinValue);
    let geometry = project_bars(
        &points(&[-25.0]),
        &config,
        context(-50.0, 50.0),
        &Paint::default(),
        1.0,
    )
    .expect("bars");
    assert_eq!(geometry.bars[0].rect.bottom, 100.0);
    assert!((geometry.bars[0].rect.top - 75.0).abs() <= 1e-9);
}

#[test]
fn item_color_overrides_chart_paint() {
    let red = Paint::solid(Color::from_hex_rgb(0xFF0000));
    let data = vec![
        DataPoint::new("a", 10.0)
            .expect("valid point")
            .with_color(red.clone())
            .expect("valid color"),
        DataPoint::new("b", 10.0).expect("valid point"),
    ];
    let config = BarChartConfig::default();
    let geometry =
        project_bars(&data, &config, context(0.0, 10.0), &Paint::default(), 1.0).expect("bars");
    assert_eq!(geometry.bars[0].paint, red);
    assert_eq!(geometry.bars[1].paint, Paint::default());
}

#[test]
fn bar_hit_targets_follow_rectangles() {
    let geometry = project_bars(
        &points(&[50.0, 100.0, 25.0]),
        &BarChartConfig::default(),
        context(0.0, 100.0),
        &Paint::default(),
        1.0,
    )
    .expect("bars");
    assert_eq!(find_hit_index(Point::new(150.0, 10.0), &geometry.hit_targets), Some(1));
    assert_eq!(find_hit_index(Point::new(95.0, 90.0), &geometry.hit_targets), None);
}

#[test]
fn invalid_width_fraction_is_rejected() {
    assert!(BarChartConfig::default().with_bar_width_fraction(1.5).is_err());
}

#[test]
fn grouped_bars_share_group_slots() {
    let groups = vec![
        BarGroup::new("g0", vec![10.0, 20.0]).expect("valid group"),
        BarGroup::new("g1", vec![30.0, 40.0]).expect("valid group"),
    ];
    let config = GroupedBarChartConfig::default();
    let axis = grouped_axis(&groups, &config).expect("axis");
    assert_eq!((axis.min_value, axis.max_value), (0.0, 40.0));

    let ctx = ChartContext::new(Rect::new(0.0, 0.0, 200.0, 100.0), 0.0, 40.0).expect("context");
    let (geometry, items) =
        project_grouped_bars(&groups, &config, ctx, &Paint::default(), 1.0).expect("grouped bars");

    assert_eq!(items, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    // Group slot 100 px, 80% used, two 40 px bars starting after a 10 px margin.
    let first = geometry.bars[0].rect;
    assert!((first.left - 10.0).abs() <= 1e-9);
    assert!((first.width() - 40.0).abs() <= 1e-9);
    assert!((geometry.bars[3].rect.left - 150.0).abs() <= 1e-9);
    assert_eq!(geometry.bars[3].rect.top, 0.0);
}

#[test]
fn stacked_segments_sit_on_running_totals() {
    let groups = vec![
        BarGroup::new("g0", vec![10.0, 20.0]).expect("valid group"),
        BarGroup::new("g1", vec![30.0, 0.0]).expect("valid group"),
    ];
    let axis = stacked_axis(&groups).expect("axis");
    assert_eq!((axis.min_value, axis.max_value), (0.0, 30.0));

    let ctx = ChartContext::new(Rect::new(0.0, 0.0, 200.0, 60.0), 0.0, 30.0).expect("context");
    let config = StackedBarChartConfig::default();
    let geometry =
        project_stacked_bars(&groups, &config, ctx, &Paint::default(), 1.0).expect("stacked bars");

    let lower = geometry.segments.bars[0].rect;
    let upper = geometry.segments.bars[1].rect;
    assert!((lower.bottom - 60.0).abs() <= 1e-9);
    assert!((lower.top - 40.0).abs() <= 1e-9);
    assert!((upper.bottom - lower.top).abs() <= 1e-9);
    assert_eq!(upper.top, 0.0);

    // The zero-height segment is drawn but not hittable.
    assert_eq!(geometry.segments.bars.len(), 4);
    assert_eq!(geometry.items.len(), 3);
    assert_eq!(geometry.segments.hit_targets.len(), 3);
}

#[test]
fn horizontal_bars_grow_rightward_from_zero() {
    let ctx =
        ChartContext::new(Rect::new(0.0, 0.0, 200.0, 100.0), -100.0, 100.0).expect("context");
    let geometry = project_horizontal_bars(
        &points(&[50.0, -50.0]),
        &BarChartConfig::default(),
        ctx,
        &Paint::default(),
        1.0,
    )
    .expect("horizontal bars");

    let positive = geometry.bars[0].rect;
    assert!((positive.left - 100.0).abs() <= 1e-9);
    assert!((positive.right - 150.0).abs() <= 1e-9);
    assert!((positive.top - 10.0).abs() <= 1e-9);
    assert!((positive.height() - 30.0).abs() <= 1e-9);

    let negative = geometry.bars[1].rect;
    assert!((negative.left - 50.0).abs() <= 1e-9);
    assert!((negative.right - 100.0).abs() <= 1e-9);
}

#[test]
fn spans_cover_start_to_end() {
    let spans = vec![
        Span::new("a", 10.0, 30.0).expect("valid span"),
        Span::new("b", 20.0, 20.0).expect("valid span"),
    ];
    let axis = span_axis(&spans).expect("axis");
    assert_eq!((axis.min_value, axis.max_value), (10.0, 30.0));

    let ctx = ChartContext::new(Rect::new(0.0, 0.0, 200.0, 100.0), 10.0, 30.0).expect("context");
    let geometry = project_spans(&spans, &SpanChartConfig::default(), ctx, &Paint::default(), 1.0)
        .expect("spans");
    assert_eq!(geometry.bars[0].rect.left, 0.0);
    assert_eq!(geometry.bars[0].rect.right, 200.0);
    assert_eq!(geometry.hit_targets.len(), 1);
}

#[test]
fn span_end_before_start_is_rejected() {
    assert!(Span::new("bad", 5.0, 1.0).is_err());
}

#[test]
fn all_zero_bars_still_get_a_usable_axis() {
    let axis = resolve_axis(&points(&[0.0, 0.0]), &BarChartConfig::default()).expect("axis");
    assert_eq!((axis.min_value, axis.max_value), (0.0, 10.0));
    assert_eq!(axis.tick_values().len(), 7);
}

#[test]
fn configured_reference_line_is_drawn_over_bars() {
    let config = BarChartConfig::default()
        .with_reference_line(ReferenceLineConfig::new(40.0).expect("valid value"))
        .expect("valid config");
    let geometry = project_bars(
        &points(&[50.0, 100.0]),
        &config,
        context(0.0, 100.0),
        &Paint::default(),
        1.0,
    )
    .expect("bars");

    let reference = geometry.reference_line.as_ref().expect("line in range");
    assert_eq!(reference.line.start, Point::new(0.0, 60.0));
    assert_eq!(reference.line.end, Point::new(300.0, 60.0));

    let mut frame = RenderFrame::new(Viewport::new(300.0, 100.0));
    geometry.append_to(&mut frame);
    assert_eq!(frame.len(), 4);
    assert!(matches!(frame.commands[1], DrawCommand::Rect(_)));
    assert!(matches!(frame.commands[2], DrawCommand::Line(_)));
    assert!(matches!(frame.commands[3], DrawCommand::Text(_)));
}

#[test]
fn horizontal_bars_get_a_vertical_reference_line() {
    let config = BarChartConfig::default()
        .with_reference_line(ReferenceLineConfig::new(50.0).expect("valid value"))
        .expect("valid config");
    let ctx = ChartContext::new(Rect::new(0.0, 0.0, 200.0, 100.0), 0.0, 100.0).expect("context");
    let geometry = project_horizontal_bars(&points(&[80.0]), &config, ctx, &Paint::default(), 1.0)
        .expect("horizontal bars");
    let reference = geometry.reference_line.as_ref().expect("line in range");
    assert_eq!(reference.line.start, Point::new(100.0, 0.0));
    assert_eq!(reference.line.end, Point::new(100.0, 100.0));
}

#[test]
fn empty_bar_chart_skips_reference_line() {
    let config = BarChartConfig::default()
        .with_reference_line(ReferenceLineConfig::new(40.0).expect("valid value"))
        .expect("valid config");
    let geometry =
        project_bars(&[], &config, context(0.0, 100.0), &Paint::default(), 1.0).expect("bars");
    assert!(geometry.is_empty());
    assert!(geometry.reference_line.is_none());
}

#[test]
fn tooltip_manager_takes_side_from_stacked_config() {
    let groups = vec![BarGroup::new("g0", vec![10.0, 20.0]).expect("valid group")];
    let ctx = ChartContext::new(Rect::new(0.0, 0.0, 100.0, 60.0), 0.0, 30.0).expect("context");
    let config = StackedBarChartConfig {
        tooltip_position: TooltipPosition::Below,
        ..StackedBarChartConfig::default()
    };
    let geometry =
        project_stacked_bars(&groups, &config, ctx, &Paint::default(), 1.0).expect("stacked bars");

    let mut manager = TooltipManager::new();
    manager.sync(&geometry);
    assert_eq!(manager.position(), TooltipPosition::Below);
    assert_eq!(manager.targets().len(), 2);

    let item = manager.handle_tap(Point::new(50.0, 50.0), |index| {
        geometry.items[*index].value.to_string()
    });
    assert_eq!(item, Some(&0));
    let tooltip = manager.tooltip().expect("tooltip visible");
    assert_eq!(tooltip.position, TooltipPosition::Below);
    assert_eq!(tooltip.content, "10");
}
