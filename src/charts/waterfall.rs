//! Running-total bars: each bar spans the previous total to the new one.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::charts::bar::BarGeometry;
use crate::charts::{Drawable, clamp_progress};
use crate::core::constants::DEFAULT_AXIS_STEPS;
use crate::core::data::{ChartPoint, DataPoint};
use crate::core::{Animation, AxisConfig, ChartContext, CornerRadii, CornerRadius, Rect};
use crate::error::{ChartResult, ensure_config_range};
use crate::interaction::{HitTarget, TooltipPosition, TooltipSource};
use crate::render::{Color, Paint, RectPrimitive, RenderFrame};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterfallChartConfig {
    pub bar_width_fraction: f64,
    pub corner_radius: CornerRadius,
    pub positive_paint: Paint,
    pub negative_paint: Paint,
    pub animation: Animation,
    pub tooltip_position: TooltipPosition,
}

impl Default for WaterfallChartConfig {
    fn default() -> Self {
        Self {
            bar_width_fraction: 0.6,
            corner_radius: CornerRadius::Medium,
            positive_paint: Paint::solid(Color::from_hex_rgb(0xFFFF00)),
            negative_paint: Paint::solid(Color::from_hex_rgb(0xD64C66)),
            animation: Animation::default(),
            tooltip_position: TooltipPosition::Auto,
        }
    }
}

impl WaterfallChartConfig {
    pub fn with_bar_width_fraction(mut self, fraction: f64) -> ChartResult<Self> {
        self.bar_width_fraction = fraction;
        self.validate()?;
        Ok(self)
    }

    pub fn with_paints(mut self, positive: Paint, negative: Paint) -> ChartResult<Self> {
        self.positive_paint = positive;
        self.negative_paint = negative;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> ChartResult<()> {
        ensure_config_range(self.bar_width_fraction, 0.0, 1.0, "bar width fraction")?;
        self.corner_radius.validate()?;
        self.positive_paint.validate()?;
        self.negative_paint.validate()?;
        self.animation.validate()
    }
}

impl_json_config!(WaterfallChartConfig, "waterfall chart config");

/// Running totals: `cumulative[i] = cumulative[i - 1] + value[i]`.
#[must_use]
pub fn cumulative_values(points: &[DataPoint]) -> Vec<f64> {
    points
        .iter()
        .scan(0.0, |running, point| {
            *running += point.value();
            Some(*running)
        })
        .collect()
}

/// `(min(0, min cumulative), max(0, max cumulative))`.
#[must_use]
pub fn waterfall_range(cumulative: &[f64]) -> (f64, f64) {
    let min = cumulative.iter().copied().fold(0.0_f64, f64::min);
    let max = cumulative.iter().copied().fold(0.0_f64, f64::max);
    (min, max)
}

pub fn resolve_axis(points: &[DataPoint]) -> ChartResult<AxisConfig> {
    let (min, max) = waterfall_range(&cumulative_values(points));
    AxisConfig::from_data_range(min, max, DEFAULT_AXIS_STEPS)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WaterfallGeometry {
    pub bars: BarGeometry,
    pub cumulative: Vec<f64>,
    /// `(previous total, new total)` per bar in value space.
    pub value_spans: Vec<(f64, f64)>,
}

impl Drawable for WaterfallGeometry {
    fn append_to(&self, frame: &mut RenderFrame) {
        self.bars.append_to(frame);
    }
}

impl TooltipSource for WaterfallGeometry {
    type Item = usize;

    fn hit_targets(&self) -> &[HitTarget<usize>] {
        &self.bars.hit_targets
    }

    fn tooltip_position(&self) -> TooltipPosition {
        self.bars.tooltip_position
    }
}

/// Bars anchored at the previous total. Increases grow upward, decreases
/// downward; the color follows the sign of the bar's own value.
pub fn project_waterfall(
    points: &[DataPoint],
    config: &WaterfallChartConfig,
    ctx: ChartContext,
    progress: f64,
) -> ChartResult<WaterfallGeometry> {
    config.validate()?;
    let progress = clamp_progress(progress);
    let count = points.len();
    let bar_width = ctx.bar_width(count, config.bar_width_fraction);
    let corners = CornerRadii::top(config.corner_radius.value());
    let cumulative = cumulative_values(points);

    let mut geometry = WaterfallGeometry {
        bars: BarGeometry::with_capacity(count),
        cumulative: Vec::with_capacity(count),
        value_spans: Vec::with_capacity(count),
    };
    geometry.bars.tooltip_position = config.tooltip_position;
    let mut previous = 0.0;
    for (index, (point, total)) in points.iter().zip(cumulative.iter().copied()).enumerate() {
        let left = ctx.bar_left(index, count, config.bar_width_fraction);
        let start_y = ctx.convert_value_to_y(previous);
        let end_y = ctx.convert_value_to_y(total);
        let increase = point.value() >= 0.0;
        let height = (end_y - start_y).abs() * progress;
        let top = if increase { start_y - height } else { start_y };

        let base = if increase {
            &config.positive_paint
        } else {
            &config.negative_paint
        };
        let paint = point.color().cloned().unwrap_or_else(|| base.clone());
        geometry.bars.push(
            RectPrimitive::new(Rect::new(left, top, left + bar_width, top + height), paint)
                .with_corner_radii(corners),
            index,
        );
        geometry.value_spans.push((previous, total));
        previous = total;
    }
    geometry.cumulative = cumulative;

    debug!(
        bars = count,
        total = previous,
        min = ctx.min_value(),
        max = ctx.max_value(),
        progress,
        "projected waterfall chart"
    );
    Ok(geometry)
}
