//! Areas stacked on the running total of the series below them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::charts::line::{LineChartConfig, curve_commands, extend_curve};
use crate::charts::multiline::series_count;
use crate::charts::reference_line::{self, ReferenceLineGeometry};
use crate::charts::{Drawable, clamp_progress};
use crate::core::constants::{DEFAULT_AXIS_STEPS, DEFAULT_STEP_SIZE};
use crate::core::{
    AxisConfig, ChartContext, ChartOrientation, LineGroup, Point, Rect, calculate_max_value,
};
use crate::error::{ChartResult, ensure_config_range};
use crate::interaction::{HitTarget, TooltipPosition, TooltipSource};
use crate::render::{Paint, PathCommand, PathPrimitive, RenderFrame, ShapeStyle};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedAreaChartConfig {
    pub line: LineChartConfig,
    pub fill_alpha: f64,
}

impl Default for StackedAreaChartConfig {
    fn default() -> Self {
        Self {
            line: LineChartConfig::default(),
            fill_alpha: 0.7,
        }
    }
}

impl StackedAreaChartConfig {
    pub fn with_fill_alpha(mut self, fill_alpha: f64) -> ChartResult<Self> {
        self.fill_alpha = fill_alpha;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> ChartResult<()> {
        ensure_config_range(self.fill_alpha, 0.0, 1.0, "fill alpha")?;
        self.line.validate()
    }
}

impl_json_config!(StackedAreaChartConfig, "stacked area chart config");

/// Hit target payload for one band segment between two X positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackedAreaPoint {
    pub group_index: usize,
    pub series_index: usize,
    pub value: f64,
    pub cumulative_value: f64,
}

/// `(0, rounded max of the per-group stacked totals)`.
pub fn resolve_axis(groups: &[LineGroup]) -> ChartResult<AxisConfig> {
    let series = series_count(groups);
    let totals: Vec<f64> = groups
        .iter()
        .map(|group| group.cumulative_value(series.saturating_sub(1)))
        .collect();
    AxisConfig::from_data_range(
        0.0,
        calculate_max_value(&totals, DEFAULT_STEP_SIZE),
        DEFAULT_AXIS_STEPS,
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct StackedBand {
    pub upper: Vec<Point>,
    pub lower: Vec<Point>,
    pub fill: PathPrimitive,
    pub outline: PathPrimitive,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StackedAreaGeometry {
    pub bands: Vec<StackedBand>,
    pub hit_targets: Vec<HitTarget<StackedAreaPoint>>,
    pub reference_line: Option<ReferenceLineGeometry>,
    pub tooltip_position: TooltipPosition,
}

impl Drawable for StackedAreaGeometry {
    fn append_to(&self, frame: &mut RenderFrame) {
        for band in &self.bands {
            frame.push(band.fill.clone());
            frame.push(band.outline.clone());
        }
        if let Some(reference) = &self.reference_line {
            reference.append_to(frame);
        }
    }
}

impl TooltipSource for StackedAreaGeometry {
    type Item = StackedAreaPoint;

    fn hit_targets(&self) -> &[HitTarget<StackedAreaPoint>] {
        &self.hit_targets
    }

    fn tooltip_position(&self) -> TooltipPosition {
        self.tooltip_position
    }
}

/// Band `s` runs between the cumulative sums over series `0..s` and `0..=s`;
/// series 0 sits on the baseline. Bands fade in with `progress`.
pub fn project_stacked_area(
    groups: &[LineGroup],
    config: &StackedAreaChartConfig,
    ctx: ChartContext,
    palette: &Paint,
    progress: f64,
) -> ChartResult<StackedAreaGeometry> {
    config.validate()?;
    let progress = clamp_progress(progress);
    let count = groups.len();
    let baseline = ctx.baseline_y(config.line.negative_values_draw_mode);
    let smooth = config.line.smooth_curve;

    let mut geometry = StackedAreaGeometry {
        tooltip_position: config.line.tooltip_position,
        ..StackedAreaGeometry::default()
    };
    if count == 0 {
        return Ok(geometry);
    }

    geometry.reference_line = reference_line::project_configured(
        config.line.reference_line.as_ref(),
        count,
        ctx,
        ChartOrientation::Vertical,
    )?;
    for series_index in 0..series_count(groups) {
        let paint = palette.palette_entry(series_index);
        let upper: Vec<Point> = groups
            .iter()
            .enumerate()
            .map(|(i, group)| ctx.point_at(i, count, group.cumulative_value(series_index)))
            .collect();
        let lower: Vec<Point> = groups
            .iter()
            .enumerate()
            .map(|(i, group)| {
                if series_index == 0 {
                    Point::new(ctx.centered_x(i, count), baseline)
                } else {
                    ctx.point_at(i, count, group.cumulative_value(series_index - 1))
                }
            })
            .collect();

        let mut commands = curve_commands(&upper, smooth);
        let reversed: Vec<Point> = lower.iter().rev().copied().collect();
        commands.push(PathCommand::LineTo(reversed[0]));
        extend_curve(&mut commands, &reversed, smooth);
        commands.push(PathCommand::Close);

        let fill = PathPrimitive::new(commands, ShapeStyle::Fill, paint.clone())
            .with_alpha(config.fill_alpha * progress);
        let outline =
            PathPrimitive::new(curve_commands(&upper, smooth), config.line.stroke(), paint)
                .with_alpha(progress);

        for (group_index, pair) in upper.windows(2).enumerate() {
            let corners = [pair[0], pair[1], lower[group_index], lower[group_index + 1]];
            let Some(bounds) = Rect::bounding(&corners) else {
                continue;
            };
            let group = &groups[group_index];
            geometry.hit_targets.push(HitTarget::rect(
                bounds,
                StackedAreaPoint {
                    group_index,
                    series_index,
                    value: group.values().get(series_index).copied().unwrap_or(0.0),
                    cumulative_value: group.cumulative_value(series_index),
                },
            ));
        }

        geometry.bands.push(StackedBand {
            upper,
            lower,
            fill,
            outline,
        });
    }

    debug!(
        groups = count,
        bands = geometry.bands.len(),
        progress,
        "projected stacked area chart"
    );
    Ok(geometry)
}
