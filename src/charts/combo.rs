//! Bars with a line overlay sharing one category axis.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::charts::bar::{self, BarChartConfig, BarGeometry};
use crate::charts::line::{self, LineChartConfig, LineGeometry};
use crate::charts::reference_line::{self, ReferenceLineConfig, ReferenceLineGeometry};
use crate::charts::{Drawable, clamp_progress};
use crate::core::constants::DEFAULT_AXIS_STEPS;
use crate::core::{
    Animation, AxisConfig, ChartContext, ChartOrientation, CornerRadius, DataPoint,
    NegativeValuesDrawMode, Rect,
};
use crate::error::{ChartResult, ensure_config_positive, ensure_config_range, ensure_finite};
use crate::interaction::{HitTarget, TooltipPosition, TooltipSource};
use crate::render::{Color, Paint, RenderFrame, StrokeCap};

pub const DEFAULT_COMBO_LINE_COLOR: u32 = 0xF44336;
const POINT_HIT_RADIUS_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboChartData {
    label: String,
    bar_value: f64,
    line_value: f64,
}

impl ComboChartData {
    pub fn new(label: impl Into<String>, bar_value: f64, line_value: f64) -> ChartResult<Self> {
        ensure_finite(bar_value, "combo bar value")?;
        ensure_finite(line_value, "combo line value")?;
        Ok(Self {
            label: label.into(),
            bar_value,
            line_value,
        })
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn bar_value(&self) -> f64 {
        self.bar_value
    }

    #[must_use]
    pub fn line_value(&self) -> f64 {
        self.line_value
    }
}

/// How the two series map onto the value axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ComboScale {
    /// One range over bar and line values together.
    #[default]
    Shared,
    /// Each series scaled to its own range; the axis shows the bar range.
    Independent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboChartConfig {
    pub bar_width_fraction: f64,
    pub bar_corner_radius: CornerRadius,
    pub line_width: f64,
    pub show_points: bool,
    pub point_radius: f64,
    pub point_alpha: f64,
    pub stroke_cap: StrokeCap,
    pub smooth_curve: bool,
    pub negative_values_draw_mode: NegativeValuesDrawMode,
    pub scale: ComboScale,
    pub animation: Animation,
    pub tooltip_position: TooltipPosition,
    pub reference_line: Option<ReferenceLineConfig>,
}

impl Default for ComboChartConfig {
    fn default() -> Self {
        Self {
            bar_width_fraction: 0.6,
            bar_corner_radius: CornerRadius::Medium,
            line_width: 3.0,
            show_points: true,
            point_radius: 6.0,
            point_alpha: 1.0,
            stroke_cap: StrokeCap::Round,
            smooth_curve: false,
            negative_values_draw_mode: NegativeValuesDrawMode::BelowAxis,
            scale: ComboScale::Shared,
            animation: Animation::default(),
            tooltip_position: TooltipPosition::Auto,
            reference_line: None,
        }
    }
}

impl ComboChartConfig {
    pub fn with_bar_width_fraction(mut self, fraction: f64) -> ChartResult<Self> {
        self.bar_width_fraction = fraction;
        self.validate()?;
        Ok(self)
    }

    pub fn with_point_radius(mut self, point_radius: f64) -> ChartResult<Self> {
        self.point_radius = point_radius;
        self.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn with_scale(mut self, scale: ComboScale) -> Self {
        self.scale = scale;
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

    pub fn with_reference_line(mut self, reference_line: ReferenceLineConfig) -> ChartResult<Self> {
        self.reference_line = Some(reference_line);
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> ChartResult<()> {
        ensure_config_range(self.bar_width_fraction, 0.0, 1.0, "bar width fraction")?;
        self.bar_corner_radius.validate()?;
        ensure_config_positive(self.line_width, "line width")?;
        ensure_config_positive(self.point_radius, "point radius")?;
        ensure_config_range(self.point_alpha, 0.0, 1.0, "point alpha")?;
        self.animation.validate()?;
        if let Some(reference_line) = &self.reference_line {
            reference_line.validate()?;
        }
        Ok(())
    }

    fn bar_config(&self) -> BarChartConfig {
        BarChartConfig {
            bar_width_fraction: self.bar_width_fraction,
            corner_radius: self.bar_corner_radius,
            negative_values_draw_mode: self.negative_values_draw_mode,
            animation: self.animation,
            tooltip_position: self.tooltip_position,
            reference_line: None,
        }
    }

    fn line_config(&self) -> LineChartConfig {
        LineChartConfig {
            line_width: self.line_width,
            show_points: self.show_points,
            point_radius: self.point_radius,
            point_alpha: self.point_alpha,
            stroke_cap: self.stroke_cap,
            smooth_curve: self.smooth_curve,
            negative_values_draw_mode: self.negative_values_draw_mode,
            animation: self.animation,
            tooltip_position: self.tooltip_position,
            reference_line: None,
        }
    }
}

impl_json_config!(ComboChartConfig, "combo chart config");

/// Raw-extreme range. Below-axis mode pulls the minimum down to zero; a
/// negative minimum pulls the maximum up to zero.
#[must_use]
pub fn combo_range(values: &[f64], mode: NegativeValuesDrawMode) -> (f64, f64) {
    let raw_min = values.iter().copied().reduce(f64::min).unwrap_or(0.0);
    let raw_max = values.iter().copied().reduce(f64::max).unwrap_or(0.0);
    let min = if mode.is_below_axis() {
        raw_min.min(0.0)
    } else {
        raw_min
    };
    let max = raw_max.max(if min < 0.0 { 0.0 } else { raw_min });
    (min, max)
}

/// Value axes for the bar and line series; identical under [`ComboScale::Shared`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComboAxes {
    pub bar: AxisConfig,
    pub line: AxisConfig,
}

pub fn resolve_axes(data: &[ComboChartData], config: &ComboChartConfig) -> ChartResult<ComboAxes> {
    let mode = config.negative_values_draw_mode;
    let bar_values: Vec<f64> = data.iter().map(ComboChartData::bar_value).collect();
    let line_values: Vec<f64> = data.iter().map(ComboChartData::line_value).collect();
    let axis = |(min, max): (f64, f64)| -> ChartResult<AxisConfig> {
        Ok(AxisConfig::from_data_range(min, max, DEFAULT_AXIS_STEPS)?
            .with_draw_axis_at_zero(mode.is_below_axis()))
    };

    match config.scale {
        ComboScale::Shared => {
            let all: Vec<f64> = bar_values.iter().chain(&line_values).copied().collect();
            let shared = axis(combo_range(&all, mode))?;
            Ok(ComboAxes {
                bar: shared.clone(),
                line: shared,
            })
        }
        ComboScale::Independent => Ok(ComboAxes {
            bar: axis(combo_range(&bar_values, mode))?,
            line: axis(combo_range(&line_values, mode))?,
        }),
    }
}

/// Hit item of a combo chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComboItem {
    Bar(usize),
    Line(usize),
}

impl ComboItem {
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Bar(index) | Self::Line(index) => index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComboGeometry {
    pub bars: BarGeometry,
    pub line: LineGeometry,
    /// Bars first, then revealed line points.
    pub hit_targets: Vec<HitTarget<ComboItem>>,
    /// Placed against the bar axis, over both series.
    pub reference_line: Option<ReferenceLineGeometry>,
    pub tooltip_position: TooltipPosition,
}

impl Drawable for ComboGeometry {
    fn append_to(&self, frame: &mut RenderFrame) {
        self.bars.append_to(frame);
        self.line.append_to(frame);
        if let Some(reference) = &self.reference_line {
            reference.append_to(frame);
        }
    }
}

impl TooltipSource for ComboGeometry {
    type Item = ComboItem;

    fn hit_targets(&self) -> &[HitTarget<ComboItem>] {
        &self.hit_targets
    }

    fn tooltip_position(&self) -> TooltipPosition {
        self.tooltip_position
    }
}

/// Default line paint used when the host supplies none.
#[must_use]
pub fn default_line_paint() -> Paint {
    Paint::solid(Color::from_hex_rgb(DEFAULT_COMBO_LINE_COLOR))
}

/// Bars against `ctx`, then the line against the line axis on the same plot.
///
/// `ctx` must carry the bar range from [`resolve_axes`]. Empty data projects
/// to an empty geometry.
pub fn project_combo(
    data: &[ComboChartData],
    config: &ComboChartConfig,
    ctx: ChartContext,
    bar_paint: &Paint,
    line_paint: &Paint,
    progress: f64,
) -> ChartResult<ComboGeometry> {
    config.validate()?;
    if data.is_empty() {
        debug!("combo chart has no items");
        return Ok(ComboGeometry {
            tooltip_position: config.tooltip_position,
            ..ComboGeometry::default()
        });
    }
    let progress = clamp_progress(progress);
    let axes = resolve_axes(data, config)?;
    let line_ctx = match config.scale {
        ComboScale::Shared => ctx,
        ComboScale::Independent => ctx.with_range(axes.line.min_value, axes.line.max_value)?,
    };

    let series = |value: fn(&ComboChartData) -> f64| -> ChartResult<Vec<DataPoint>> {
        data.iter()
            .map(|item| DataPoint::new(item.label(), value(item)))
            .collect()
    };
    let bar_points = series(ComboChartData::bar_value)?;
    let line_points = series(ComboChartData::line_value)?;

    let bars = bar::project_bars(&bar_points, &config.bar_config(), ctx, bar_paint, progress)?;
    let line = line::project_line(
        &line_points,
        &config.line_config(),
        line_ctx,
        line_paint,
        progress,
    )?;

    let mut hit_targets: Vec<HitTarget<ComboItem>> = bars
        .bars
        .iter()
        .zip(&bars.hit_targets)
        .filter(|(bar, _)| bar.rect.height() > 0.0)
        .map(|(bar, target)| HitTarget::rect(bar.rect, ComboItem::Bar(target.item)))
        .collect();
    if config.show_points {
        let half = config.point_radius * POINT_HIT_RADIUS_MULTIPLIER;
        let count = line.positions.len();
        hit_targets.extend(
            line.positions
                .iter()
                .enumerate()
                .filter(|(index, _)| line::reveal_threshold(*index, count) <= progress)
                .map(|(index, center)| {
                    HitTarget::rect(Rect::around(*center, half), ComboItem::Line(index))
                }),
        );
    }

    let reference_line = reference_line::project_configured(
        config.reference_line.as_ref(),
        data.len(),
        ctx,
        ChartOrientation::Vertical,
    )?;

    debug!(
        items = data.len(),
        bar_min = ctx.min_value(),
        bar_max = ctx.max_value(),
        line_min = line_ctx.min_value(),
        line_max = line_ctx.max_value(),
        progress,
        "projected combo chart"
    );
    Ok(ComboGeometry {
        bars,
        line,
        hit_targets,
        reference_line,
        tooltip_position: config.tooltip_position,
    })
}

/// Labels for the shared category axis.
#[must_use]
pub fn combo_labels(data: &[ComboChartData]) -> Vec<String> {
    data.iter().map(|item| item.label().to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::combo_range;
    use crate::core::NegativeValuesDrawMode;

    #[test]
    fn below_axis_range_includes_zero() {
        let mode = NegativeValuesDrawMode::BelowAxis;
        assert_eq!(combo_range(&[100.0, 80.0, 150.0], mode), (0.0, 150.0));
        assert_eq!(combo_range(&[-20.0, 40.0], mode), (-20.0, 40.0));
        assert_eq!(combo_range(&[-20.0, -5.0], mode), (-20.0, 0.0));
        assert_eq!(combo_range(&[], mode), (0.0, 0.0));
    }

    #[test]
    fn from_min_range_keeps_raw_minimum() {
        let mode = NegativeValuesDrawMode::FromMinValue;
        assert_eq!(combo_range(&[100.0, 80.0, 150.0], mode), (80.0, 150.0));
    }
}
