//! Line chart plus the path helpers shared by area and multi-series charts.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::charts::reference_line::{self, ReferenceLineConfig, ReferenceLineGeometry};
use crate::charts::{Drawable, clamp_progress};
use crate::core::constants::{DEFAULT_AXIS_STEPS, DEFAULT_STEP_SIZE, HIGHLIGHT_RADIUS_OFFSET};
use crate::core::data::{self, ChartPoint, DataPoint};
use crate::core::{
    Animation, AxisConfig, ChartContext, ChartOrientation, NegativeValuesDrawMode, Point,
    calculate_max_value, calculate_min_value,
};
use crate::error::{ChartResult, ensure_config_positive, ensure_config_range};
use crate::interaction::{HitRegion, HitTarget, TooltipPosition, TooltipSource};
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, Paint, PathCommand, PathPrimitive, RenderFrame,
    ShapeStyle, StrokeCap,
};

const GUIDE_LINE_ALPHA: f64 = 0.1;
const GUIDE_LINE_WIDTH: f64 = 1.5;
const HALO_RADIUS_OFFSET: f64 = 3.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChartConfig {
    pub line_width: f64,
    pub show_points: bool,
    pub point_radius: f64,
    pub point_alpha: f64,
    pub stroke_cap: StrokeCap,
    /// Cubic segments instead of straight ones.
    pub smooth_curve: bool,
    pub negative_values_draw_mode: NegativeValuesDrawMode,
    pub animation: Animation,
    pub tooltip_position: TooltipPosition,
    pub reference_line: Option<ReferenceLineConfig>,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            line_width: 3.0,
            show_points: true,
            point_radius: 6.0,
            point_alpha: 1.0,
            stroke_cap: StrokeCap::Round,
            smooth_curve: false,
            negative_values_draw_mode: NegativeValuesDrawMode::BelowAxis,
            animation: Animation::default(),
            tooltip_position: TooltipPosition::Auto,
            reference_line: None,
        }
    }
}

impl LineChartConfig {
    pub fn with_line_width(mut self, line_width: f64) -> ChartResult<Self> {
        self.line_width = line_width;
        self.validate()?;
        Ok(self)
    }

    pub fn with_point_radius(mut self, point_radius: f64) -> ChartResult<Self> {
        self.point_radius = point_radius;
        self.validate()?;
        Ok(self)
    }

    pub fn with_point_alpha(mut self, point_alpha: f64) -> ChartResult<Self> {
        self.point_alpha = point_alpha;
        self.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn with_show_points(mut self, show_points: bool) -> Self {
        self.show_points = show_points;
        self
    }

    #[must_use]
    pub fn with_smooth_curve(mut self, smooth_curve: bool) -> Self {
        self.smooth_curve = smooth_curve;
        self
    }

    #[must_use]
    pub fn with_negative_values_draw_mode(mut self, mode: NegativeValuesDrawMode) -> Self {
        self.negative_values_draw_mode = mode;
        self
    }

    pub fn with_animation(mut self, animation: Animation) -> ChartResult<Self> {
        self.animation = animation;
        self.validate()?;
        Ok(self)
    }

    pub fn with_reference_line(mut self, reference_line: ReferenceLineConfig) -> ChartResult<Self> {
        self.reference_line = Some(reference_line);
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> ChartResult<()> {
        ensure_config_positive(self.line_width, "line width")?;
        ensure_config_positive(self.point_radius, "point radius")?;
        ensure_config_range(self.point_alpha, 0.0, 1.0, "point alpha")?;
        self.animation.validate()?;
        if let Some(reference_line) = &self.reference_line {
            reference_line.validate()?;
        }
        Ok(())
    }

    pub(crate) fn stroke(&self) -> ShapeStyle {
        ShapeStyle::Stroke {
            width: self.line_width,
            cap: self.stroke_cap,
        }
    }
}

impl_json_config!(LineChartConfig, "line chart config");

/// Commands through `points`, starting with a move-to the first one.
///
/// Smooth segments use control points `(x0 + dx/3, y0)` and `(x0 + 2dx/3, y1)`.
pub(crate) fn curve_commands(points: &[Point], smooth: bool) -> Vec<PathCommand> {
    let Some(first) = points.first() else {
        return Vec::new();
    };
    let mut commands = Vec::with_capacity(points.len());
    commands.push(PathCommand::MoveTo(*first));
    extend_curve(&mut commands, points, smooth);
    commands
}

/// Appends segments from `points[0]` through the rest of `points`.
pub(crate) fn extend_curve(commands: &mut Vec<PathCommand>, points: &[Point], smooth: bool) {
    for pair in points.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        if smooth {
            let dx = next.x - current.x;
            commands.push(PathCommand::CubicTo {
                control1: Point::new(current.x + dx / 3.0, current.y),
                control2: Point::new(current.x + 2.0 * dx / 3.0, next.y),
                end: next,
            });
        } else {
            commands.push(PathCommand::LineTo(next));
        }
    }
}

/// Closed region between the curve through `points` and `baseline_y`.
pub(crate) fn area_commands(points: &[Point], baseline_y: f64, smooth: bool) -> Vec<PathCommand> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Vec::new();
    };
    let mut commands = Vec::with_capacity(points.len() + 3);
    commands.push(PathCommand::MoveTo(Point::new(first.x, baseline_y)));
    commands.push(PathCommand::LineTo(*first));
    extend_curve(&mut commands, points, smooth);
    commands.push(PathCommand::LineTo(Point::new(last.x, baseline_y)));
    commands.push(PathCommand::Close);
    commands
}

/// Prefix of the polyline revealed at `progress`.
///
/// `floor((n - 1) * progress)` whole segments plus a partial one ending at
/// the lerped position.
pub(crate) fn revealed_polyline(points: &[Point], progress: f64) -> Vec<Point> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let segments = (points.len() - 1) as f64 * progress;
    let whole = segments.floor() as usize;
    let fraction = segments - whole as f64;

    let mut revealed = points[..=whole].to_vec();
    if whole < points.len() - 1 && fraction > 0.0 {
        revealed.push(points[whole].lerp(points[whole + 1], fraction));
    }
    revealed
}

/// Fraction of the animation at which point `index` of `count` appears.
pub(crate) fn reveal_threshold(index: usize, count: usize) -> f64 {
    if count <= 1 {
        0.0
    } else {
        index as f64 / (count - 1) as f64
    }
}

pub fn resolve_axis(points: &[DataPoint], config: &LineChartConfig) -> ChartResult<AxisConfig> {
    let values = data::values(points);
    let axis = AxisConfig::from_data_range(
        calculate_min_value(&values, DEFAULT_STEP_SIZE),
        calculate_max_value(&values, DEFAULT_STEP_SIZE),
        DEFAULT_AXIS_STEPS,
    )?;
    Ok(axis.with_draw_axis_at_zero(config.negative_values_draw_mode.is_below_axis()))
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineGeometry {
    /// Slot-center position of every data point.
    pub positions: Vec<Point>,
    pub line: Option<PathPrimitive>,
    pub markers: Vec<CirclePrimitive>,
    pub hit_targets: Vec<HitTarget<usize>>,
    pub reference_line: Option<ReferenceLineGeometry>,
    pub tooltip_position: TooltipPosition,
}

impl Drawable for LineGeometry {
    fn append_to(&self, frame: &mut RenderFrame) {
        if let Some(line) = &self.line {
            frame.push(line.clone());
        }
        frame.extend(self.markers.iter().cloned());
        if let Some(reference) = &self.reference_line {
            reference.append_to(frame);
        }
    }
}

impl TooltipSource for LineGeometry {
    type Item = usize;

    fn hit_targets(&self) -> &[HitTarget<usize>] {
        &self.hit_targets
    }

    fn tooltip_position(&self) -> TooltipPosition {
        self.tooltip_position
    }
}

/// Line through slot centers.
///
/// Straight lines are revealed segment by segment; smooth lines are drawn
/// whole and faded in with `progress` as alpha. Markers appear once the
/// reveal passes them.
pub fn project_line(
    points: &[DataPoint],
    config: &LineChartConfig,
    ctx: ChartContext,
    paint: &Paint,
    progress: f64,
) -> ChartResult<LineGeometry> {
    config.validate()?;
    let progress = clamp_progress(progress);
    let count = points.len();
    let positions: Vec<Point> = points
        .iter()
        .enumerate()
        .map(|(index, point)| ctx.point_at(index, count, point.value()))
        .collect();

    let line = if positions.len() < 2 {
        None
    } else if config.smooth_curve {
        Some(
            PathPrimitive::new(curve_commands(&positions, true), config.stroke(), paint.clone())
                .with_alpha(progress),
        )
    } else {
        let revealed = revealed_polyline(&positions, progress);
        (revealed.len() >= 2)
            .then(|| PathPrimitive::polyline(&revealed, false, config.stroke(), paint.clone()))
    };

    let markers = if config.show_points {
        positions
            .iter()
            .enumerate()
            .filter(|(index, _)| reveal_threshold(*index, count) <= progress)
            .map(|(_, center)| {
                CirclePrimitive::filled(*center, config.point_radius, paint.clone())
                    .with_alpha(config.point_alpha)
            })
            .collect()
    } else {
        Vec::new()
    };

    let hit_targets = positions
        .iter()
        .enumerate()
        .map(|(index, center)| {
            HitTarget::new(HitRegion::marker(*center, config.point_radius), index)
        })
        .collect();
    let reference_line = reference_line::project_configured(
        config.reference_line.as_ref(),
        count,
        ctx,
        ChartOrientation::Vertical,
    )?;

    debug!(
        points = count,
        smooth = config.smooth_curve,
        progress,
        "projected line chart"
    );
    Ok(LineGeometry {
        positions,
        line,
        markers,
        hit_targets,
        reference_line,
        tooltip_position: config.tooltip_position,
    })
}

/// Selection decoration for one marker: a faint guide to the plot bottom, a
/// white halo and the enlarged marker.
#[derive(Debug, Clone, PartialEq)]
pub struct PointHighlight {
    pub guide: LinePrimitive,
    pub halo: CirclePrimitive,
    pub marker: CirclePrimitive,
}

impl Drawable for PointHighlight {
    fn append_to(&self, frame: &mut RenderFrame) {
        frame.push(self.guide.clone());
        frame.push(self.halo.clone());
        frame.push(self.marker.clone());
    }
}

#[must_use]
pub fn highlight_point(
    ctx: ChartContext,
    center: Point,
    point_radius: f64,
    paint: &Paint,
) -> PointHighlight {
    let guide_color = paint
        .colors()
        .first()
        .copied()
        .unwrap_or(Color::GRAY)
        .with_alpha(GUIDE_LINE_ALPHA);
    PointHighlight {
        guide: LinePrimitive::new(
            center,
            Point::new(center.x, ctx.bottom()),
            GUIDE_LINE_WIDTH,
            Paint::solid(guide_color),
        ),
        halo: CirclePrimitive::filled(
            center,
            point_radius + HALO_RADIUS_OFFSET,
            Paint::solid(Color::WHITE),
        ),
        marker: CirclePrimitive::filled(
            center,
            point_radius + HIGHLIGHT_RADIUS_OFFSET,
            paint.clone(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::{area_commands, reveal_threshold, revealed_polyline};
    use crate::core::Point;
    use crate::render::PathCommand;

    fn points() -> Vec<Point> {
        vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0), Point::new(20.0, 0.0)]
    }

    #[test]
    fn partial_segment_is_lerped() {
        let revealed = revealed_polyline(&points(), 0.75);
        assert_eq!(revealed.len(), 3);
        assert!((revealed[2].x - 15.0).abs() <= 1e-9);
        assert!((revealed[2].y - 5.0).abs() <= 1e-9);
    }

    #[test]
    fn full_progress_reveals_every_point() {
        assert_eq!(revealed_polyline(&points(), 1.0), points());
        assert_eq!(revealed_polyline(&points(), 0.0), vec![Point::new(0.0, 0.0)]);
    }

    #[test]
    fn single_point_threshold_is_zero() {
        assert_eq!(reveal_threshold(0, 1), 0.0);
        assert_eq!(reveal_threshold(2, 3), 1.0);
    }

    #[test]
    fn area_closes_on_baseline() {
        let commands = area_commands(&points(), 50.0, false);
        assert_eq!(commands.first(), Some(&PathCommand::MoveTo(Point::new(0.0, 50.0))));
        assert_eq!(commands[commands.len() - 2], PathCommand::LineTo(Point::new(20.0, 50.0)));
        assert_eq!(commands.last(), Some(&PathCommand::Close));
    }
}
