//! Radar (spider) charts: one closed polygon per dataset over shared spokes.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::charts::reference_line::{EstimatedTextMeasurer, TextMeasurer};
use crate::charts::{Drawable, clamp_progress};
use crate::core::{Animation, Point, Rect};
use crate::error::{
    ChartError, ChartResult, ensure_config_non_negative, ensure_config_positive,
    ensure_config_range, ensure_finite, ensure_label,
};
use crate::interaction::{HitRegion, HitTarget};
use crate::render::{
    CirclePrimitive, Color, DrawCommand, LinePrimitive, Paint, PathPrimitive, RenderFrame,
    ShapeStyle, StrokeCap, TextHAlign, TextPrimitive,
};

pub const MIN_RADAR_AXES: usize = 3;
const DEFAULT_AXIS_MAX_VALUE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarAxisData {
    label: String,
    value: f64,
    max_value: f64,
}

impl RadarAxisData {
    /// Axis value on the default 0..=100 scale.
    pub fn new(label: impl Into<String>, value: f64) -> ChartResult<Self> {
        Self::with_max_value(label, value, DEFAULT_AXIS_MAX_VALUE)
    }

    pub fn with_max_value(
        label: impl Into<String>,
        value: f64,
        max_value: f64,
    ) -> ChartResult<Self> {
        let label = label.into();
        ensure_label(&label, "radar axis label")?;
        ensure_finite(value, "radar axis value")?;
        ensure_finite(max_value, "radar axis max value")?;
        if value < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "radar axis value must be >= 0, got {value}"
            )));
        }
        if max_value <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "radar axis max value must be > 0, got {max_value}"
            )));
        }
        Ok(Self {
            label,
            value,
            max_value,
        })
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// `value / max_value` clamped into `[0, 1]`.
    #[must_use]
    pub fn normalized_value(&self) -> f64 {
        (self.value / self.max_value).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarDataSet {
    label: String,
    axes: Vec<RadarAxisData>,
    color: Paint,
    fill_alpha: f64,
}

impl RadarDataSet {
    pub fn new(
        label: impl Into<String>,
        axes: Vec<RadarAxisData>,
        color: Paint,
    ) -> ChartResult<Self> {
        let label = label.into();
        ensure_label(&label, "radar dataset label")?;
        if axes.len() < MIN_RADAR_AXES {
            return Err(ChartError::InvalidData(format!(
                "radar dataset requires at least {MIN_RADAR_AXES} axes, got {}",
                axes.len()
            )));
        }
        color.validate()?;
        Ok(Self {
            label,
            axes,
            color,
            fill_alpha: 0.3,
        })
    }

    pub fn with_fill_alpha(mut self, fill_alpha: f64) -> ChartResult<Self> {
        if !fill_alpha.is_finite() || !(0.0..=1.0).contains(&fill_alpha) {
            return Err(ChartError::InvalidData(
                "radar fill alpha must be in [0, 1]".to_owned(),
            ));
        }
        self.fill_alpha = fill_alpha;
        Ok(self)
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn axes(&self) -> &[RadarAxisData] {
        &self.axes
    }

    #[must_use]
    pub fn color(&self) -> &Paint {
        &self.color
    }

    #[must_use]
    pub fn fill_alpha(&self) -> f64 {
        self.fill_alpha
    }

    /// Gradients collapse to their first stop for polygon fill and outline.
    fn solid_color(&self) -> Color {
        self.color
            .colors()
            .first()
            .copied()
            .unwrap_or(Color::TRANSPARENT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RadarGridStyle {
    Circular,
    #[default]
    Polygon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarGridConfig {
    pub style: RadarGridStyle,
    pub levels: u32,
    pub show_grid_lines: bool,
    pub show_axis_lines: bool,
    pub grid_line_width: f64,
    pub axis_line_width: f64,
    pub grid_line_color: Color,
    pub axis_line_color: Color,
}

impl Default for RadarGridConfig {
    fn default() -> Self {
        Self {
            style: RadarGridStyle::Polygon,
            levels: 5,
            show_grid_lines: true,
            show_axis_lines: true,
            grid_line_width: 1.0,
            axis_line_width: 1.0,
            grid_line_color: Color::from_hex_rgb(0xBDBDBD).with_alpha(0.5),
            axis_line_color: Color::from_hex_rgb(0x9E9E9E).with_alpha(0.6),
        }
    }
}

impl RadarGridConfig {
    pub fn validate(&self) -> ChartResult<()> {
        if self.levels == 0 {
            return Err(ChartError::InvalidConfig(
                "radar grid levels must be > 0".to_owned(),
            ));
        }
        ensure_config_positive(self.grid_line_width, "radar grid line width")?;
        ensure_config_positive(self.axis_line_width, "radar axis line width")?;
        self.grid_line_color.validate()?;
        self.axis_line_color.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarLabelConfig {
    pub show_labels: bool,
    /// Label distance from the center as a multiple of the outer radius.
    pub label_distance_multiplier: f64,
    pub font_size_px: f64,
    pub color: Color,
}

impl Default for RadarLabelConfig {
    fn default() -> Self {
        Self {
            show_labels: false,
            label_distance_multiplier: 1.15,
            font_size_px: 12.0,
            color: Color::BLACK,
        }
    }
}

impl RadarLabelConfig {
    pub fn validate(&self) -> ChartResult<()> {
        ensure_config_positive(self.label_distance_multiplier, "label distance multiplier")?;
        ensure_config_positive(self.font_size_px, "radar label font size")?;
        self.color.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarChartConfig {
    pub data_line_width: f64,
    pub show_data_points: bool,
    pub data_point_radius: f64,
    pub stroke_cap: StrokeCap,
    pub start_angle_degrees: f64,
    /// Share of the half-extent kept free around the outer ring.
    pub padding_fraction: f64,
    pub labels: RadarLabelConfig,
    pub grid: RadarGridConfig,
    pub animation: Animation,
}

impl Default for RadarChartConfig {
    fn default() -> Self {
        Self {
            data_line_width: 2.0,
            show_data_points: true,
            data_point_radius: 4.0,
            stroke_cap: StrokeCap::Round,
            start_angle_degrees: -90.0,
            padding_fraction: 0.15,
            labels: RadarLabelConfig::default(),
            grid: RadarGridConfig::default(),
            animation: Animation::default(),
        }
    }
}

impl RadarChartConfig {
    #[must_use]
    pub fn with_grid_style(mut self, style: RadarGridStyle) -> Self {
        self.grid.style = style;
        self
    }

    pub fn with_padding_fraction(mut self, padding_fraction: f64) -> ChartResult<Self> {
        self.padding_fraction = padding_fraction;
        self.validate()?;
        Ok(self)
    }

    pub fn with_labels(mut self, labels: RadarLabelConfig) -> ChartResult<Self> {
        self.labels = labels;
        self.validate()?;
        Ok(self)
    }

    pub fn with_grid(mut self, grid: RadarGridConfig) -> ChartResult<Self> {
        self.grid = grid;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> ChartResult<()> {
        ensure_config_positive(self.data_line_width, "radar data line width")?;
        ensure_config_non_negative(self.data_point_radius, "radar data point radius")?;
        ensure_config_range(self.padding_fraction, 0.0, 0.5, "radar padding fraction")?;
        if !self.start_angle_degrees.is_finite() {
            return Err(ChartError::InvalidConfig(
                "radar start angle must be finite".to_owned(),
            ));
        }
        self.labels.validate()?;
        self.grid.validate()?;
        self.animation.validate()
    }
}

impl_json_config!(RadarChartConfig, "radar chart config");

/// Angular position of spoke `index` out of `count`.
#[must_use]
pub fn axis_angle(index: usize, count: usize, start_angle_degrees: f64) -> f64 {
    if count == 0 {
        return start_angle_degrees;
    }
    start_angle_degrees + 360.0 * index as f64 / count as f64
}

/// Center and outer radius for a radar laid out inside `bounds`.
#[must_use]
pub fn radar_frame(bounds: Rect, padding_fraction: f64) -> (Point, f64) {
    let center = bounds.center();
    let half = (bounds.width() / 2.0).min(bounds.height() / 2.0).max(0.0);
    (center, half * (1.0 - padding_fraction))
}

/// Polygon vertices for one ring of the polygonal grid.
fn ring_vertices(center: Point, radius: f64, count: usize, start: f64) -> Vec<Point> {
    (0..count)
        .map(|index| center.polar_offset(radius, axis_angle(index, count, start)))
        .collect()
}

/// Shared axis count; mixed datasets are rejected.
fn shared_axis_count(data_sets: &[RadarDataSet]) -> ChartResult<usize> {
    let count = data_sets.first().map_or(0, |first| first.axes.len());
    if data_sets.iter().any(|set| set.axes.len() != count) {
        return Err(ChartError::InvalidData(
            "all radar datasets must have the same number of axes".to_owned(),
        ));
    }
    Ok(count)
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarPolygon {
    pub vertices: Vec<Point>,
    pub fill: PathPrimitive,
    pub outline: PathPrimitive,
    pub points: Vec<CirclePrimitive>,
}

/// Hit item: `(dataset index, axis index)`.
pub type RadarItem = (usize, usize);

#[derive(Debug, Clone, PartialEq)]
pub struct RadarGeometry {
    pub center: Point,
    pub max_radius: f64,
    pub grid: Vec<DrawCommand>,
    pub spokes: Vec<LinePrimitive>,
    pub polygons: Vec<RadarPolygon>,
    pub labels: Vec<TextPrimitive>,
    pub hit_targets: Vec<HitTarget<RadarItem>>,
}

impl Drawable for RadarGeometry {
    fn append_to(&self, frame: &mut RenderFrame) {
        frame.extend(self.grid.iter().cloned());
        frame.extend(self.spokes.iter().cloned());
        for polygon in &self.polygons {
            frame.push(polygon.fill.clone());
            frame.push(polygon.outline.clone());
            frame.extend(polygon.points.iter().cloned());
        }
        frame.extend(self.labels.iter().cloned());
    }
}

/// Projects datasets onto spokes inside `bounds`; radii, fill alpha and
/// point size all scale with `progress`. Without datasets there are no spokes
/// to draw, so the geometry is empty.
pub fn project_radar(
    data_sets: &[RadarDataSet],
    config: &RadarChartConfig,
    bounds: Rect,
    progress: f64,
) -> ChartResult<RadarGeometry> {
    config.validate()?;
    let axis_count = shared_axis_count(data_sets)?;
    let (center, max_radius) = radar_frame(bounds, config.padding_fraction);
    if axis_count == 0 {
        debug!("radar chart has no datasets");
        return Ok(RadarGeometry {
            center,
            max_radius,
            grid: Vec::new(),
            spokes: Vec::new(),
            polygons: Vec::new(),
            labels: Vec::new(),
            hit_targets: Vec::new(),
        });
    }
    let progress = clamp_progress(progress);
    let start = config.start_angle_degrees;
    let grid_config = &config.grid;

    let mut grid = Vec::new();
    if grid_config.show_grid_lines {
        let stroke = ShapeStyle::Stroke {
            width: grid_config.grid_line_width,
            cap: StrokeCap::Butt,
        };
        let paint = Paint::solid(grid_config.grid_line_color);
        for level in 1..=grid_config.levels {
            let radius = max_radius * f64::from(level) / f64::from(grid_config.levels);
            grid.push(match grid_config.style {
                RadarGridStyle::Circular => DrawCommand::from(CirclePrimitive::stroked(
                    center,
                    radius,
                    grid_config.grid_line_width,
                    paint.clone(),
                )),
                RadarGridStyle::Polygon => DrawCommand::from(PathPrimitive::polyline(
                    &ring_vertices(center, radius, axis_count, start),
                    true,
                    stroke,
                    paint.clone(),
                )),
            });
        }
    }

    let spokes = if grid_config.show_axis_lines {
        ring_vertices(center, max_radius, axis_count, start)
            .into_iter()
            .map(|end| {
                LinePrimitive::new(
                    center,
                    end,
                    grid_config.axis_line_width,
                    Paint::solid(grid_config.axis_line_color),
                )
            })
            .collect()
    } else {
        Vec::new()
    };

    let mut polygons = Vec::with_capacity(data_sets.len());
    let mut hit_targets = Vec::with_capacity(data_sets.len() * axis_count);
    for (set_index, data_set) in data_sets.iter().enumerate() {
        let vertices: Vec<Point> = data_set
            .axes
            .iter()
            .enumerate()
            .map(|(index, axis)| {
                let radius = max_radius * axis.normalized_value() * progress;
                center.polar_offset(radius, axis_angle(index, axis_count, start))
            })
            .collect();
        let color = data_set.solid_color();
        let fill = PathPrimitive::polyline(&vertices, true, ShapeStyle::Fill, Paint::solid(color))
            .with_alpha(data_set.fill_alpha * progress);
        let outline = PathPrimitive::polyline(
            &vertices,
            true,
            ShapeStyle::Stroke {
                width: config.data_line_width,
                cap: config.stroke_cap,
            },
            Paint::solid(color),
        );
        let points = if config.show_data_points {
            vertices
                .iter()
                .map(|vertex| {
                    CirclePrimitive::filled(
                        *vertex,
                        config.data_point_radius * progress,
                        Paint::solid(color),
                    )
                })
                .collect()
        } else {
            Vec::new()
        };
        hit_targets.extend(vertices.iter().enumerate().map(|(axis_index, vertex)| {
            HitTarget::new(
                HitRegion::marker(*vertex, config.data_point_radius),
                (set_index, axis_index),
            )
        }));
        polygons.push(RadarPolygon {
            vertices,
            fill,
            outline,
            points,
        });
    }

    let mut labels = Vec::new();
    if config.labels.show_labels {
        let measurer = EstimatedTextMeasurer;
        let distance = max_radius * config.labels.label_distance_multiplier;
        for (index, axis) in data_sets[0].axes.iter().enumerate() {
            let anchor = center.polar_offset(distance, axis_angle(index, axis_count, start));
            let size = measurer.measure(axis.label(), config.labels.font_size_px);
            labels.push(TextPrimitive::new(
                axis.label(),
                anchor.x,
                anchor.y - size.height / 2.0,
                config.labels.font_size_px,
                config.labels.color,
                TextHAlign::Center,
            ));
        }
    }

    debug!(
        data_sets = data_sets.len(),
        axes = axis_count,
        max_radius,
        progress,
        "projected radar chart"
    );
    Ok(RadarGeometry {
        center,
        max_radius,
        grid,
        spokes,
        polygons,
        labels,
        hit_targets,
    })
}

#[cfg(test)]
mod tests {
    use super::axis_angle;

    #[test]
    fn spokes_divide_the_circle_evenly() {
        assert_eq!(axis_angle(0, 4, -90.0), -90.0);
        assert_eq!(axis_angle(1, 4, -90.0), 0.0);
        assert_eq!(axis_angle(3, 4, -90.0), 180.0);
    }
}
