use std::time::Duration;

use approx::assert_relative_eq;
use chart_geometry::charts::circular_ring::{
    CircularRingConfig, CircularRingData, RingDirection, find_clicked_ring, project_rings,
    ring_stroke_width,
};
use chart_geometry::charts::pie::{
    PieChartConfig, PieData, PieLabelConfig, PieSelection, find_clicked_slice, pie_frame,
    project_pie,
};
use chart_geometry::charts::radar::{
    RadarAxisData, RadarChartConfig, RadarDataSet, RadarGridStyle, project_radar, radar_frame,
};
use chart_geometry::core::{Point, Rect, Viewport};
use chart_geometry::interaction::find_hit_index;
use chart_geometry::render::{Color, NullRenderer, Paint, RenderFrame, Renderer};
use chart_geometry::{ChartError, Drawable, compose_frame};

fn pie_slices(values: &[f64]) -> Vec<PieData> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| PieData::new(format!("s{i}"), *v).expect("valid slice"))
        .collect()
}

fn square() -> Rect {
    Rect::new(0.0, 0.0, 200.0, 200.0)
}

#[test]
fn pie_frame_uses_eighty_percent_of_half_side() {
    let (center, radius) = pie_frame(Rect::new(0.0, 0.0, 300.0, 200.0));
    assert_eq!(center, Point::new(150.0, 100.0));
    assert_relative_eq!(radius, 80.0, epsilon = 1e-9);
}

#[test]
fn pie_sweeps_cover_full_circle() {
    let geometry = project_pie(
        &pie_slices(&[1.0, 1.0, 2.0]),
        &PieChartConfig::default(),
        square(),
        &Paint::default(),
        1.0,
        None,
    )
    .expect("pie");

    let total: f64 = geometry.slices.iter().map(|slice| slice.sweep_angle).sum();
    assert_relative_eq!(total, 360.0, epsilon = 1e-9);
    assert_relative_eq!(geometry.drawn_sweep_total(), 360.0, epsilon = 1e-9);
    assert_eq!(geometry.slices[0].start_angle, -90.0);
    assert_relative_eq!(geometry.slices[2].percentage, 50.0, epsilon = 1e-9);
    assert!(geometry.slices.iter().all(|slice| slice.arc.use_center));
}

#[test]
fn slice_spacing_is_removed_from_drawn_sweeps() {
    let config = PieChartConfig::default()
        .with_slice_spacing(4.0)
        .expect("valid spacing");
    let geometry = project_pie(
        &pie_slices(&[1.0, 1.0, 2.0]),
        &config,
        square(),
        &Paint::default(),
        1.0,
        None,
    )
    .expect("pie");

    assert_relative_eq!(geometry.drawn_sweep_total(), 348.0, epsilon = 1e-9);
    let first = &geometry.slices[0].arc;
    assert_relative_eq!(first.start_angle, -88.0, epsilon = 1e-9);
    assert_relative_eq!(first.sweep_angle, 86.0, epsilon = 1e-9);
}

#[test]
fn pie_progress_scales_sweeps_and_hides_labels() {
    let geometry = project_pie(
        &pie_slices(&[1.0, 3.0]),
        &PieChartConfig::default(),
        square(),
        &Paint::default(),
        0.5,
        None,
    )
    .expect("pie");
    assert_relative_eq!(geometry.drawn_sweep_total(), 180.0, epsilon = 1e-9);
    assert!(geometry.slices.iter().all(|slice| slice.label.is_none()));
}

#[test]
fn pie_labels_show_truncated_percentage_above_threshold() {
    let geometry = project_pie(
        &pie_slices(&[1.0, 99.0]),
        &PieChartConfig::default(),
        square(),
        &Paint::default(),
        1.0,
        None,
    )
    .expect("pie");
    assert!(geometry.slices[0].label.is_none());
    let label = geometry.slices[1].label.as_ref().expect("label");
    assert_eq!(label.text, "99.0%");

    let with_value = PieChartConfig::default()
        .with_labels(PieLabelConfig {
            show_value: true,
            ..PieLabelConfig::default()
        })
        .expect("valid labels");
    let geometry = project_pie(
        &pie_slices(&[1.0, 2.0]),
        &with_value,
        square(),
        &Paint::default(),
        1.0,
        None,
    )
    .expect("pie");
    assert_eq!(
        geometry.slices[1].label.as_ref().map(|label| label.text.as_str()),
        Some("66.6%\n2")
    );
}

#[test]
fn donut_draws_stroked_band_and_center_total() {
    let config = PieChartConfig::donut().with_center_text(true);
    let geometry = project_pie(
        &pie_slices(&[10.0, 30.0]),
        &config,
        square(),
        &Paint::default(),
        1.0,
        None,
    )
    .expect("donut");

    assert_relative_eq!(geometry.inner_radius, 40.0, epsilon = 1e-9);
    let arc = &geometry.slices[0].arc;
    assert!(!arc.use_center);
    assert_relative_eq!(arc.radius, 60.0, epsilon = 1e-9);
    assert_eq!(
        geometry.center_text.as_ref().map(|text| text.text.as_str()),
        Some("40")
    );
}

#[test]
fn selection_enlarges_one_slice_and_dims_the_rest() {
    let geometry = project_pie(
        &pie_slices(&[1.0, 1.0]),
        &PieChartConfig::default(),
        square(),
        &Paint::default(),
        1.0,
        Some(PieSelection::settled(0)),
    )
    .expect("pie");

    let selected = &geometry.slices[0].arc;
    assert_relative_eq!(selected.radius, 88.0, epsilon = 1e-9);
    assert_relative_eq!(selected.center.distance_to(geometry.center), 8.0, epsilon = 1e-9);
    assert_eq!(selected.alpha, 1.0);
    assert_relative_eq!(geometry.slices[1].arc.alpha, 0.6, epsilon = 1e-9);
}

#[test]
fn clicked_slice_follows_start_angle() {
    let slices = pie_slices(&[1.0, 1.0, 2.0]);
    let config = PieChartConfig::default();
    let bounds = square();
    assert_eq!(find_clicked_slice(Point::new(110.0, 40.0), bounds, &slices, &config), Some(0));
    assert_eq!(find_clicked_slice(Point::new(150.0, 110.0), bounds, &slices, &config), Some(1));
    assert_eq!(find_clicked_slice(Point::new(90.0, 150.0), bounds, &slices, &config), Some(2));
    assert_eq!(find_clicked_slice(Point::new(0.0, 0.0), bounds, &slices, &config), None);

    let donut = PieChartConfig::donut();
    assert_eq!(find_clicked_slice(Point::new(100.0, 100.0), bounds, &slices, &donut), None);
}

#[test]
fn pie_rejects_non_positive_slices() {
    assert!(PieData::new("zero", 0.0).is_err());
    assert!(PieData::new("  ", 5.0).is_err());
    assert!(PieChartConfig::default().with_donut_hole_ratio(0.95).is_err());
    assert!(PieChartConfig::default().with_slice_spacing(11.0).is_err());
}

#[test]
fn empty_pie_draws_nothing() {
    let config = PieChartConfig::donut().with_center_text(true);
    let geometry =
        project_pie(&[], &config, square(), &Paint::default(), 1.0, None).expect("empty pie");
    assert!(geometry.slices.is_empty());
    assert!(geometry.center_text.is_none());
    assert_eq!(geometry.total, 0.0);
    assert_eq!(find_clicked_slice(Point::new(100.0, 40.0), square(), &[], &config), None);

    let frame = compose_frame(Viewport::new(200.0, 200.0), &[&geometry]);
    assert!(frame.is_empty());
}

fn radar_set(values: &[f64]) -> RadarDataSet {
    let axes = values
        .iter()
        .enumerate()
        .map(|(i, v)| RadarAxisData::new(format!("a{i}"), *v).expect("valid axis"))
        .collect();
    RadarDataSet::new("set", axes, Paint::solid(Color::from_hex_rgb(0x2196F3))).expect("valid set")
}

#[test]
fn radar_vertices_sit_at_normalized_radius() {
    let config = RadarChartConfig::default();
    let geometry = project_radar(&[radar_set(&[100.0, 50.0, 0.0])], &config, square(), 1.0)
        .expect("radar");

    let (center, max_radius) = radar_frame(square(), config.padding_fraction);
    assert_relative_eq!(max_radius, 85.0, epsilon = 1e-9);
    let vertices = &geometry.polygons[0].vertices;
    assert_relative_eq!(vertices[0].x, 100.0, epsilon = 1e-9);
    assert_relative_eq!(vertices[0].y, 15.0, epsilon = 1e-9);
    assert_relative_eq!(vertices[1].distance_to(center), 42.5, epsilon = 1e-9);
    assert_relative_eq!(vertices[2].distance_to(center), 0.0, epsilon = 1e-9);

    assert_eq!(geometry.grid.len(), 5);
    assert_eq!(geometry.spokes.len(), 3);
    assert_eq!(geometry.hit_targets.len(), 3);
    assert_eq!(find_hit_index(Point::new(100.0, 18.0), &geometry.hit_targets), Some(0));
}

#[test]
fn radar_progress_scales_radius_and_fill() {
    let set = radar_set(&[100.0, 100.0, 100.0]);
    let geometry =
        project_radar(&[set], &RadarChartConfig::default(), square(), 0.5).expect("radar");
    let vertex = geometry.polygons[0].vertices[0];
    assert_relative_eq!(vertex.distance_to(geometry.center), 42.5, epsilon = 1e-9);
    assert_relative_eq!(geometry.polygons[0].fill.alpha, 0.15, epsilon = 1e-9);
}

#[test]
fn radar_values_are_clamped_to_axis_max() {
    let axis = RadarAxisData::with_max_value("speed", 150.0, 100.0).expect("valid axis");
    assert_eq!(axis.normalized_value(), 1.0);
    assert!(RadarAxisData::new("neg", -1.0).is_err());
    assert!(RadarAxisData::with_max_value("zero", 1.0, 0.0).is_err());
}

#[test]
fn radar_needs_three_axes() {
    let axes = vec![
        RadarAxisData::new("a", 1.0).expect("valid axis"),
        RadarAxisData::new("b", 2.0).expect("valid axis"),
    ];
    let error = RadarDataSet::new("set", axes, Paint::default()).expect_err("two axes");
    assert_eq!(
        error.to_string(),
        "invalid data: radar dataset requires at least 3 axes, got 2"
    );
}

#[test]
fn radar_rejects_mixed_axis_counts() {
    let result = project_radar(
        &[radar_set(&[1.0, 2.0, 3.0]), radar_set(&[1.0, 2.0, 3.0, 4.0])],
        &RadarChartConfig::default(),
        square(),
        1.0,
    );
    assert!(matches!(result, Err(ChartError::InvalidData(_))));
}

#[test]
fn empty_radar_has_no_grid_or_targets() {
    let geometry =
        project_radar(&[], &RadarChartConfig::default(), square(), 1.0).expect("empty radar");
    assert!(geometry.grid.is_empty());
    assert!(geometry.spokes.is_empty());
    assert!(geometry.polygons.is_empty());
    assert!(geometry.hit_targets.is_empty());
    assert_relative_eq!(geometry.max_radius, 85.0, epsilon = 1e-9);
}

#[test]
fn circular_grid_draws_one_circle_per_level() {
    let config = RadarChartConfig::default().with_grid_style(RadarGridStyle::Circular);
    let geometry =
        project_radar(&[radar_set(&[1.0, 2.0, 3.0])], &config, square(), 1.0).expect("radar");
    let mut frame = RenderFrame::new(Viewport::new(200.0, 200.0));
    geometry.append_to(&mut frame);
    assert_eq!(frame.circles().count(), 5 + 3);
}

fn ring(progress: f64) -> CircularRingData {
    CircularRingData::new("ring", progress, Paint::solid(Color::from_hex_rgb(0x4CAF50)))
        .expect("valid ring")
}

fn ring_bounds() -> Rect {
    // 16 px padding leaves a 200 px square with radius 100.
    Rect::new(0.0, 0.0, 232.0, 232.0)
}

#[test]
fn ring_stroke_splits_radius_after_gaps() {
    let config = CircularRingConfig::default();
    assert_relative_eq!(ring_stroke_width(100.0, &config, 3), 28.0, epsilon = 1e-9);
    assert_eq!(ring_stroke_width(100.0, &config, 0), 0.0);
    assert_eq!(ring_stroke_width(10.0, &config, 5), 1.0);
}

#[test]
fn rings_nest_from_the_outside_in() {
    let rings = vec![ring(75.0), ring(50.0), ring(150.0)];
    let config = CircularRingConfig::default().with_center_text(true);
    let geometry = project_rings(&rings, &config, ring_bounds(), 1.0, 0.0).expect("rings");

    assert_relative_eq!(geometry.stroke_width, 28.0, epsilon = 1e-9);
    let radii: Vec<f64> = geometry.rings.iter().map(|ring| ring.radius).collect();
    assert_relative_eq!(radii[0], 86.0, epsilon = 1e-9);
    assert_relative_eq!(radii[1], 50.0, epsilon = 1e-9);
    assert_relative_eq!(radii[2], 14.0, epsilon = 1e-9);

    let first = geometry.rings[0].progress.as_ref().expect("progress arc");
    assert_relative_eq!(first.sweep_angle, 270.0, epsilon = 1e-9);
    assert_eq!(first.start_angle, -90.0);
    let over = geometry.rings[2].progress.as_ref().expect("progress arc");
    assert_relative_eq!(over.sweep_angle, 360.0, epsilon = 1e-9);
    assert_eq!(geometry.rings[0].background.sweep_angle, 360.0);

    assert_eq!(
        geometry.center_text.as_ref().map(|text| text.text.as_str()),
        Some("75%")
    );
}

#[test]
fn ring_direction_rotation_and_progress() {
    let config = CircularRingConfig::default().with_direction(RingDirection::CounterClockwise);
    let geometry =
        project_rings(&[ring(50.0)], &config, ring_bounds(), 0.5, 30.0).expect("rings");
    let arc = geometry.rings[0].progress.as_ref().expect("progress arc");
    assert_relative_eq!(arc.sweep_angle, -90.0, epsilon = 1e-9);
    assert_relative_eq!(arc.start_angle, -60.0, epsilon = 1e-9);

    let empty = project_rings(&[ring(0.0)], &config, ring_bounds(), 1.0, 0.0).expect("rings");
    assert!(empty.rings[0].progress.is_none());
}

#[test]
fn ring_shadows_need_opt_in() {
    let shadowed = ring(40.0)
        .with_shadow(Color::BLACK, 8.0)
        .expect("valid shadow");
    let plain = project_rings(
        std::slice::from_ref(&shadowed),
        &CircularRingConfig::default(),
        ring_bounds(),
        1.0,
        0.0,
    )
    .expect("rings");
    assert!(plain.rings[0].shadow.is_empty());

    let config = CircularRingConfig::default().with_shadows(true);
    let geometry = project_rings(&[shadowed], &config, ring_bounds(), 1.0, 0.0).expect("rings");
    assert_eq!(geometry.rings[0].shadow.len(), 4);
}

#[test]
fn ring_data_helpers() {
    let data = ring(150.0);
    assert!(data.is_complete());
    assert_eq!(data.percentage(), 100.0);
    assert_eq!(data.background_color(), Color::from_hex_rgb(0x4CAF50).with_alpha(0.2));
    assert_eq!(data.with_clamped_progress(-5.0).progress(), 0.0);

    let tagged: CircularRingData<&str> = CircularRingData::new("tagged", 10.0, Paint::default())
        .expect("valid ring")
        .with_metadata("id-7");
    assert_eq!(tagged.metadata(), Some(&"id-7"));
    assert!(CircularRingData::<()>::new("bad", -1.0, Paint::default()).is_err());
}

#[test]
fn clicked_ring_matches_stroke_band() {
    let config = CircularRingConfig::default();
    let bounds = ring_bounds();
    let tap = |x: f64, y: f64, count: usize| {
        find_clicked_ring(Point::new(x, y), bounds, count, &config)
    };
    assert_eq!(tap(116.0 + 86.0, 116.0, 3), Some(0));
    assert_eq!(tap(116.0, 116.0 - 50.0, 3), Some(1));
    assert_eq!(tap(116.0 + 100.5, 116.0, 3), None);
    assert_eq!(tap(116.0, 116.0, 0), None);
}

#[test]
fn rings_without_room_are_dropped() {
    let rings = vec![ring(25.0), ring(50.0), ring(75.0), ring(100.0)];
    let config = CircularRingConfig::default()
        .with_gap_between_rings(50.0)
        .expect("valid gap");
    // 16 px padding leaves radius 40: stroke floors at 1 px and only the
    // outermost centerline (39.5) stays positive.
    let bounds = Rect::new(0.0, 0.0, 112.0, 112.0);
    let geometry = project_rings(&rings, &config, bounds, 1.0, 0.0).expect("rings");
    assert_eq!(geometry.rings.len(), 1);
    assert_relative_eq!(geometry.rings[0].radius, 39.5, epsilon = 1e-9);

    let frame = compose_frame(Viewport::new(112.0, 112.0), &[&geometry]);
    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("every arc is drawable");
    assert_eq!(renderer.last_command_count, 2);

    assert_eq!(find_clicked_ring(Point::new(56.0, 56.0 - 39.5), bounds, 4, &config), Some(0));
    assert_eq!(find_clicked_ring(Point::new(56.0, 56.0), bounds, 4, &config), None);
}

#[test]
fn rotation_angle_wraps_each_period() {
    let mut config = CircularRingConfig::default();
    assert_eq!(config.rotation_angle(Duration::from_millis(750)), 0.0);
    config.rotation_enabled = true;
    assert_relative_eq!(config.rotation_angle(Duration::from_millis(750)), 90.0, epsilon = 1e-9);
    assert_relative_eq!(config.rotation_angle(Duration::from_millis(3_750)), 90.0, epsilon = 1e-9);
}
