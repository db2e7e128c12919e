//! Bars growing along X, one row per data point.

use tracing::debug;

use crate::charts::bar::{BarChartConfig, BarGeometry};
use crate::charts::{clamp_progress, reference_line};
use crate::core::constants::{DEFAULT_AXIS_STEPS, DEFAULT_STEP_SIZE};
use crate::core::data::{self, ChartPoint, DataPoint};
use crate::core::{
    AxisConfig, ChartContext, ChartOrientation, CornerRadii, Rect, calculate_max_value,
    calculate_min_value,
};
use crate::error::ChartResult;
use crate::render::{Paint, RectPrimitive};

/// Value axis along X. The category axis moves to zero only when the range
/// straddles it in below-axis mode.
pub fn resolve_axis(points: &[DataPoint], config: &BarChartConfig) -> ChartResult<AxisConfig> {
    let values = data::values(points);
    let min = calculate_min_value(&values, DEFAULT_STEP_SIZE);
    let max = calculate_max_value(&values, DEFAULT_STEP_SIZE);
    let axis = AxisConfig::from_data_range(min, max, DEFAULT_AXIS_STEPS)?;
    let at_zero = axis.straddles_zero() && config.negative_values_draw_mode.is_below_axis();
    Ok(axis.with_draw_axis_at_zero(at_zero))
}

/// Rows partition the plot height; each bar is `bar_width_fraction` of its row,
/// centered, and grows from the baseline X by `progress`. A configured
/// reference line runs vertically at its value.
pub fn project_horizontal_bars(
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
    let baseline = ctx.baseline_x(mode);
    let thickness = ctx.row_thickness(count, config.bar_width_fraction);
    let radius = config.corner_radius.value();

    let mut geometry = BarGeometry::with_capacity(count);
    geometry.tooltip_position = config.tooltip_position;
    geometry.reference_line = reference_line::project_configured(
        config.reference_line.as_ref(),
        count,
        ctx,
        ChartOrientation::Horizontal,
    )?;
    for (index, point) in points.iter().enumerate() {
        let top = ctx.row_top(index, count, config.bar_width_fraction);
        let value_x = ctx.convert_value_to_x(point.value());
        let (left, right, corners) = if value_x < baseline {
            (baseline - (baseline - value_x) * progress, baseline, CornerRadii::left(radius))
        } else {
            (baseline, baseline + (value_x - baseline) * progress, CornerRadii::right(radius))
        };

        let paint = point.color().cloned().unwrap_or_else(|| default_paint.clone());
        geometry.push(
            RectPrimitive::new(Rect::new(left, top, right, top + thickness), paint)
                .with_corner_radii(corners),
            index,
        );
    }

    debug!(
        bars = geometry.len(),
        baseline,
        progress,
        "projected horizontal bar chart"
    );
    Ok(geometry)
}
