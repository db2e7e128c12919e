//! Side-by-side bars, one cluster per group.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::charts::bar::{BarGeometry, grow_from_baseline};
use crate::charts::clamp_progress;
use crate::core::constants::{DEFAULT_AXIS_STEPS, DEFAULT_STEP_SIZE};
use crate::core::{
    Animation, AxisConfig, BarGroup, ChartContext, CornerRadii, CornerRadius,
    NegativeValuesDrawMode, Rect, calculate_max_value, calculate_min_value,
};
use crate::error::{ChartResult, ensure_config_range};
use crate::render::{Paint, RectPrimitive};

/// Hit target payload: `(group index, bar index within the group)`.
pub type GroupedBarItem = (usize, usize);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedBarChartConfig {
    /// Share of each group slot covered by its bars; the rest is split evenly
    /// on both sides.
    pub group_width_fraction: f64,
    pub corner_radius: CornerRadius,
    pub negative_values_draw_mode: NegativeValuesDrawMode,
    pub animation: Animation,
}

impl Default for GroupedBarChartConfig {
    fn default() -> Self {
        Self {
            group_width_fraction: 0.8,
            corner_radius: CornerRadius::None,
            negative_values_draw_mode: NegativeValuesDrawMode::BelowAxis,
            animation: Animation::default(),
        }
    }
}

impl GroupedBarChartConfig {
    pub fn with_group_width_fraction(mut self, fraction: f64) -> ChartResult<Self> {
        self.group_width_fraction = fraction;
        self.validate()?;
        Ok(self)
    }

    pub fn with_corner_radius(mut self, corner_radius: CornerRadius) -> ChartResult<Self> {
        self.corner_radius = corner_radius;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> ChartResult<()> {
        ensure_config_range(self.group_width_fraction, 0.0, 1.0, "group width fraction")?;
        self.corner_radius.validate()?;
        self.animation.validate()
    }
}

impl_json_config!(GroupedBarChartConfig, "grouped bar chart config");

/// Axis from the smaller of zero and the rounded minimum up to the rounded maximum.
pub fn resolve_axis(
    groups: &[BarGroup],
    config: &GroupedBarChartConfig,
) -> ChartResult<AxisConfig> {
    let values: Vec<f64> = groups.iter().flat_map(|g| g.values().iter().copied()).collect();
    let min = calculate_min_value(&values, DEFAULT_STEP_SIZE).min(0.0);
    let axis = AxisConfig::from_data_range(
        min,
        calculate_max_value(&values, DEFAULT_STEP_SIZE),
        DEFAULT_AXIS_STEPS,
    )?;
    Ok(axis.with_draw_axis_at_zero(config.negative_values_draw_mode.is_below_axis()))
}

/// Bars laid out as `left + group_w*g + bar_w*b + group_w*margin`.
pub fn project_grouped_bars(
    groups: &[BarGroup],
    config: &GroupedBarChartConfig,
    ctx: ChartContext,
    palette: &Paint,
    progress: f64,
) -> ChartResult<(BarGeometry, Vec<GroupedBarItem>)> {
    config.validate()?;
    let progress = clamp_progress(progress);
    let mode = config.negative_values_draw_mode;
    let baseline = ctx.baseline_y(mode);
    let radius = config.corner_radius.value();
    let margin = (1.0 - config.group_width_fraction) / 2.0;

    let total: usize = groups.iter().map(|g| g.values().len()).sum();
    let mut geometry = BarGeometry::with_capacity(total);
    let mut items = Vec::with_capacity(total);
    if groups.is_empty() {
        return Ok((geometry, items));
    }

    let group_width = ctx.width() / groups.len() as f64;
    for (group_index, group) in groups.iter().enumerate() {
        let bar_count = group.values().len();
        if bar_count == 0 {
            continue;
        }
        let bar_width = group_width / bar_count as f64 * config.group_width_fraction;
        for (bar_index, value) in group.values().iter().enumerate() {
            let left = ctx.left()
                + group_width * group_index as f64
                + bar_width * bar_index as f64
                + group_width * margin;
            let (top, bottom, hangs_below) = grow_from_baseline(ctx, baseline, *value, progress);
            let corners = if hangs_below && mode.is_below_axis() {
                CornerRadii::bottom(radius)
            } else {
                CornerRadii::top(radius)
            };
            geometry.push(
                RectPrimitive::new(
                    Rect::new(left, top, left + bar_width, bottom),
                    group.paint_for(bar_index, palette),
                )
                .with_corner_radii(corners),
                items.len(),
            );
            items.push((group_index, bar_index));
        }
    }

    debug!(groups = groups.len(), bars = geometry.len(), progress, "projected grouped bar chart");
    Ok((geometry, items))
}
