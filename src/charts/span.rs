//! Horizontal range bars from a start value to an end value.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::charts::bar::BarGeometry;
use crate::charts::clamp_progress;
use crate::core::constants::DEFAULT_AXIS_STEPS;
use crate::core::{Animation, AxisConfig, ChartContext, CornerRadii, CornerRadius, Rect, Span};
use crate::error::{ChartResult, ensure_config_range};
use crate::interaction::HitTarget;
use crate::render::{Paint, RectPrimitive};

const EMPTY_RANGE_MAX: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanChartConfig {
    /// Share of each row covered by its span.
    pub bar_width_fraction: f64,
    pub corner_radius: CornerRadius,
    pub animation: Animation,
}

impl Default for SpanChartConfig {
    fn default() -> Self {
        Self {
            bar_width_fraction: 0.6,
            corner_radius: CornerRadius::Medium,
            animation: Animation::default(),
        }
    }
}

impl SpanChartConfig {
    pub fn with_bar_width_fraction(mut self, fraction: f64) -> ChartResult<Self> {
        self.bar_width_fraction = fraction;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> ChartResult<()> {
        ensure_config_range(self.bar_width_fraction, 0.0, 1.0, "bar width fraction")?;
        self.corner_radius.validate()?;
        self.animation.validate()
    }
}

impl_json_config!(SpanChartConfig, "span chart config");

/// Raw extent of every start and end; `(0, 100)` for no spans.
pub fn resolve_axis(spans: &[Span]) -> ChartResult<AxisConfig> {
    let (min, max) = spans
        .iter()
        .flat_map(|span| [span.start_value(), span.end_value()])
        .fold(None, |acc: Option<(f64, f64)>, value| match acc {
            Some((min, max)) => Some((min.min(value), max.max(value))),
            None => Some((value, value)),
        })
        .unwrap_or_else(|| {
            trace!("no spans, using default axis range");
            (0.0, EMPTY_RANGE_MAX)
        });
    Ok(AxisConfig::from_data_range(min, max, DEFAULT_AXIS_STEPS)?
        .with_draw_axis_at_zero(false))
}

/// Spans grow rightward from their start value; zero-width spans get no hit target.
pub fn project_spans(
    spans: &[Span],
    config: &SpanChartConfig,
    ctx: ChartContext,
    default_paint: &Paint,
    progress: f64,
) -> ChartResult<BarGeometry> {
    config.validate()?;
    let progress = clamp_progress(progress);
    let count = spans.len();
    let thickness = ctx.row_thickness(count, config.bar_width_fraction);
    let corners = CornerRadii::all(config.corner_radius.value());

    let mut geometry = BarGeometry::with_capacity(count);
    for (index, span) in spans.iter().enumerate() {
        let top = ctx.row_top(index, count, config.bar_width_fraction);
        let start_x = ctx.convert_value_to_x(span.start_value());
        let end_x = ctx.convert_value_to_x(span.end_value());
        let width = (end_x - start_x) * progress;
        let rect = Rect::new(start_x, top, start_x + width, top + thickness);

        let paint = span.color().cloned().unwrap_or_else(|| default_paint.clone());
        geometry
            .bars
            .push(RectPrimitive::new(rect, paint).with_corner_radii(corners));
        if width > 0.0 {
            geometry.hit_targets.push(HitTarget::rect(rect, index));
        }
    }

    debug!(spans = count, progress, "projected span chart");
    Ok(geometry)
}
