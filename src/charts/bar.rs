//! Vertical bar chart.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::charts::reference_line::{self, ReferenceLineConfig, ReferenceLineGeometry};
use crate::charts::{Drawable, clamp_progress};
use crate::core::constants::{DEFAULT_AXIS_STEPS, DEFAULT_STEP_SIZE};
use crate::core::data::{self, ChartPoint, DataPoint};
use crate::core::{
    Animation, AxisConfig, ChartContext, ChartOrientation, CornerRadii, CornerRadius,
    NegativeValuesDrawMode, Rect, calculate_max_value, calculate_min_value,
};
use crate::error::{ChartResult, ensure_config_range};
use crate::interaction::{HitTarget, TooltipPosition, TooltipSource};
use crate::render::{Paint, RectPrimitive, RenderFrame};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartConfig {
    /// Share of each slot occupied by its bar.
    pub bar_width_fraction: f64,
    pub corner_radius: CornerRadius,
    pub negative_values_draw_mode: NegativeValuesDrawMode,
    pub animation: Animation,
    pub tooltip_position: TooltipPosition,
    pub reference_line: Option<ReferenceLineConfig>,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            bar_width_fraction: 0.6,
            corner_radius: CornerRadius::Medium,
            negative_values_draw_mode: NegativeValuesDrawMode::BelowAxis,
            animation: Animation::default(),
            tooltip_position: TooltipPosition::Auto,
            reference_line: None,
        }
    }
}

impl BarChartConfig {
    pub fn with_bar_width_fraction(mut self, fraction: f64) -> ChartResult<Self> {
        self.bar_width_fraction = fraction;
        self.validate()?;
        Ok(self)
    }

    pub fn with_corner_radius(mut self, corner_radius: CornerRadius) -> ChartResult<Self> {
        self.corner_radius = corner_radius;
        self.validate()?;
        Ok(self)
    }

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
        ensure_config_range(self.bar_width_fraction, 0.0, 1.0, "bar width fraction")?;
        self.corner_radius.validate()?;
        self.animation.validate()?;
        if let Some(reference_line) = &self.reference_line {
            reference_line.validate()?;
        }
        Ok(())
    }
}

impl_json_config!(BarChartConfig, "bar chart config");

/// Rectangles plus their hit regions, shared by every rectangle-based chart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarGeometry {
    pub bars: Vec<RectPrimitive>,
    pub hit_targets: Vec<HitTarget<usize>>,
    /// Drawn over the bars.
    pub reference_line: Option<ReferenceLineGeometry>,
    pub tooltip_position: TooltipPosition,
}

impl BarGeometry {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            bars: Vec::with_capacity(capacity),
            hit_targets: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    pub(crate) fn push(&mut self, bar: RectPrimitive, item: usize) {
        self.hit_targets.push(HitTarget::rect(bar.rect, item));
        self.bars.push(bar);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

impl Drawable for BarGeometry {
    fn append_to(&self, frame: &mut RenderFrame) {
        frame.extend(self.bars.iter().cloned());
        if let Some(line) = &self.reference_line {
            line.append_to(frame);
        }
    }
}

impl TooltipSource for BarGeometry {
    type Item = usize;

    fn hit_targets(&self) -> &[HitTarget<usize>] {
        &self.hit_targets
    }

    fn tooltip_position(&self) -> TooltipPosition {
        self.tooltip_position
    }
}

/// Vertical extent `(top, bottom, hangs_below)` of a bar anchored at `baseline`.
pub(crate) fn grow_from_baseline(
    ctx: ChartContext,
    baseline: f64,
    value: f64,
    progress: f64,
) -> (f64, f64, bool) {
    let value_y = ctx.convert_value_to_y(value);
    if value_y > baseline {
        (baseline, baseline + (value_y - baseline) * progress, true)
    } else {
        (baseline - (baseline - value_y) * progress, baseline, false)
    }
}

/// Nice-rounded value axis for `points`.
pub fn resolve_axis(points: &[DataPoint], config: &BarChartConfig) -> ChartResult<AxisConfig> {
    let values = data::values(points);
    let axis = AxisConfig::from_data_range(
        calculate_min_value(&values, DEFAULT_STEP_SIZE),
        calculate_max_value(&values, DEFAULT_STEP_SIZE),
        DEFAULT_AXIS_STEPS,
    )?;
    Ok(axis.with_draw_axis_at_zero(config.negative_values_draw_mode.is_below_axis()))
}

/// One rectangle per point, grown from the baseline by `progress`.
///
/// In below-axis mode negative bars hang from the zero line and get their
/// bottom corners rounded; everything else rises from the baseline with top
/// corners rounded.
pub fn project_bars(
    points: &[DataPoint],
    config: &BarChartConfig,
    ctx: ChartContext,
    default_paint: &Paint,
    progress: f64,
) -> ChartResult<BarGeometry> {
    config.validate()?;
    let progress = clamp_progress(progress);
    let count = points.len();
    let mode = config.negative_values_draw_mode;
    let baseline = ctx.baseline_y(mode);
    let bar_width = ctx.bar_width(count, config.bar_width_fraction);
    let radius = config.corner_radius.value();

    let mut geometry = BarGeometry::with_capacity(count);
    geometry.tooltip_position = config.tooltip_position;
    geometry.reference_line = reference_line::project_configured(
        config.reference_line.as_ref(),
        count,
        ctx,
        ChartOrientation::Vertical,
    )?;
    for (index, point) in points.iter().enumerate() {
        let left = ctx.bar_left(index, count, config.bar_width_fraction);
        let (top, bottom, hangs_below) = grow_from_baseline(ctx, baseline, point.value(), progress);
        let corners = if hangs_below && mode.is_below_axis() {
            CornerRadii::bottom(radius)
        } else {
            CornerRadii::top(radius)
        };

        let paint = point.color().cloned().unwrap_or_else(|| default_paint.clone());
        geometry.push(
            RectPrimitive::new(Rect::new(left, top, left + bar_width, bottom), paint)
                .with_corner_radii(corners),
            index,
        );
    }

    debug!(
        bars = geometry.len(),
        min = ctx.min_value(),
        max = ctx.max_value(),
        progress,
        "projected bar chart"
    );
    Ok(geometry)
}
