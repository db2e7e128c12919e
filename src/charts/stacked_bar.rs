//! Bars built from cumulative segments.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::charts::bar::BarGeometry;
use crate::charts::reference_line::{self, ReferenceLineConfig};
use crate::charts::{Drawable, clamp_progress};
use crate::core::constants::{DEFAULT_AXIS_STEPS, DEFAULT_STEP_SIZE};
use crate::core::{
    Animation, AxisConfig, BarGroup, ChartContext, ChartOrientation, CornerRadii, CornerRadius,
    Rect, calculate_max_value,
};
use crate::error::{ChartResult, ensure_config_range};
use crate::interaction::{HitTarget, TooltipPosition, TooltipSource};
use crate::render::{Paint, RectPrimitive, RenderFrame};

/// One stacked segment, identified for hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackedBarSegment {
    pub group_index: usize,
    pub segment_index: usize,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedBarChartConfig {
    pub bar_width_fraction: f64,
    /// Applied to the top segment only.
    pub top_corner_radius: CornerRadius,
    pub animation: Animation,
    pub tooltip_position: TooltipPosition,
    pub reference_line: Option<ReferenceLineConfig>,
}

impl Default for StackedBarChartConfig {
    fn default() -> Self {
        Self {
            bar_width_fraction: 0.6,
            top_corner_radius: CornerRadius::Medium,
            animation: Animation::default(),
            tooltip_position: TooltipPosition::Auto,
            reference_line: None,
        }
    }
}

impl StackedBarChartConfig {
    pub fn with_bar_width_fraction(mut self, fraction: f64) -> ChartResult<Self> {
        self.bar_width_fraction = fraction;
        self.validate()?;
        Ok(self)
    }

    pub fn with_top_corner_radius(mut self, radius: CornerRadius) -> ChartResult<Self> {
        self.top_corner_radius = radius;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> ChartResult<()> {
        ensure_config_range(self.bar_width_fraction, 0.0, 1.0, "bar width fraction")?;
        self.top_corner_radius.validate()?;
        self.animation.validate()?;
        if let Some(reference_line) = &self.reference_line {
            reference_line.validate()?;
        }
        Ok(())
    }
}

impl_json_config!(StackedBarChartConfig, "stacked bar chart config");

/// `(0, rounded max of the group totals)`.
pub fn resolve_axis(groups: &[BarGroup]) -> ChartResult<AxisConfig> {
    let totals: Vec<f64> = groups.iter().map(BarGroup::total).collect();
    AxisConfig::from_data_range(
        0.0,
        calculate_max_value(&totals, DEFAULT_STEP_SIZE),
        DEFAULT_AXIS_STEPS,
    )
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StackedBarGeometry {
    pub segments: BarGeometry,
    /// Indexed by the hit target payload.
    pub items: Vec<StackedBarSegment>,
}

impl Drawable for StackedBarGeometry {
    fn append_to(&self, frame: &mut RenderFrame) {
        self.segments.append_to(frame);
    }
}

impl TooltipSource for StackedBarGeometry {
    type Item = usize;

    fn hit_targets(&self) -> &[HitTarget<usize>] {
        &self.segments.hit_targets
    }

    fn tooltip_position(&self) -> TooltipPosition {
        self.segments.tooltip_position
    }
}

/// Each segment spans its cumulative bottom to cumulative top and grows
/// upward from its own bottom edge. Zero-height segments get no hit target.
pub fn project_stacked_bars(
    groups: &[BarGroup],
    config: &StackedBarChartConfig,
    ctx: ChartContext,
    palette: &Paint,
    progress: f64,
) -> ChartResult<StackedBarGeometry> {
    config.validate()?;
    let progress = clamp_progress(progress);
    let count = groups.len();
    let bar_width = ctx.bar_width(count, config.bar_width_fraction);
    let radius = config.top_corner_radius.value();

    let mut geometry = StackedBarGeometry::default();
    geometry.segments.tooltip_position = config.tooltip_position;
    geometry.segments.reference_line = reference_line::project_configured(
        config.reference_line.as_ref(),
        count,
        ctx,
        ChartOrientation::Vertical,
    )?;
    for (group_index, group) in groups.iter().enumerate() {
        let left = ctx.bar_left(group_index, count, config.bar_width_fraction);
        let last = group.values().len().saturating_sub(1);
        let mut cumulative = 0.0;
        for (segment_index, value) in group.values().iter().enumerate() {
            let bottom_y = ctx.convert_value_to_y(cumulative);
            cumulative += value;
            let top_y = ctx.convert_value_to_y(cumulative);
            let height = (bottom_y - top_y) * progress;
            let animated_top = bottom_y - height;
            let rect = Rect::new(
                left,
                animated_top.min(bottom_y),
                left + bar_width,
                animated_top.max(bottom_y),
            );

            let corners = if segment_index == last {
                CornerRadii::top(radius)
            } else {
                CornerRadii::ZERO
            };
            geometry.segments.bars.push(
                RectPrimitive::new(rect, group.paint_for(segment_index, palette))
                    .with_corner_radii(corners),
            );
            if height.abs() > 0.0 {
                geometry
                    .segments
                    .hit_targets
                    .push(HitTarget::rect(rect, geometry.items.len()));
                geometry.items.push(StackedBarSegment {
                    group_index,
                    segment_index,
                    value: *value,
                });
            }
        }
    }

    debug!(
        groups = count,
        segments = geometry.segments.len(),
        max = ctx.max_value(),
        progress,
        "projected stacked bar chart"
    );
    Ok(geometry)
}
