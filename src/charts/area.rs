//! Filled area under a line.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::charts::line::{
    self, LineChartConfig, LineGeometry, area_commands, project_line,
};
use crate::charts::{Drawable, clamp_progress};
use crate::core::data::DataPoint;
use crate::core::{AxisConfig, ChartContext};
use crate::error::{ChartResult, ensure_config_range};
use crate::interaction::{HitTarget, TooltipPosition, TooltipSource};
use crate::render::{Paint, PathPrimitive, RenderFrame, ShapeStyle};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaChartConfig {
    pub line: LineChartConfig,
    pub fill_alpha: f64,
}

impl Default for AreaChartConfig {
    fn default() -> Self {
        Self {
            line: LineChartConfig::default(),
            fill_alpha: 0.3,
        }
    }
}

impl AreaChartConfig {
    pub fn with_fill_alpha(mut self, fill_alpha: f64) -> ChartResult<Self> {
        self.fill_alpha = fill_alpha;
        self.validate()?;
        Ok(self)
    }

    pub fn with_line(mut self, line: LineChartConfig) -> ChartResult<Self> {
        self.line = line;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> ChartResult<()> {
        ensure_config_range(self.fill_alpha, 0.0, 1.0, "fill alpha")?;
        self.line.validate()
    }
}

impl_json_config!(AreaChartConfig, "area chart config");

pub fn resolve_axis(points: &[DataPoint], config: &AreaChartConfig) -> ChartResult<AxisConfig> {
    line::resolve_axis(points, &config.line)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AreaGeometry {
    pub fill: Option<PathPrimitive>,
    pub baseline_y: f64,
    pub line: LineGeometry,
}

impl TooltipSource for AreaGeometry {
    type Item = usize;

    fn hit_targets(&self) -> &[HitTarget<usize>] {
        &self.line.hit_targets
    }

    fn tooltip_position(&self) -> TooltipPosition {
        self.line.tooltip_position
    }
}

impl Drawable for AreaGeometry {
    fn append_to(&self, frame: &mut RenderFrame) {
        if let Some(fill) = &self.fill {
            frame.push(fill.clone());
        }
        self.line.append_to(frame);
    }
}

/// Fill between the line and the baseline: the zero line when the range dips
/// below zero in below-axis mode, else the plot bottom. The fill fades in
/// with `fill_alpha * progress`.
pub fn project_area(
    points: &[DataPoint],
    config: &AreaChartConfig,
    ctx: ChartContext,
    paint: &Paint,
    progress: f64,
) -> ChartResult<AreaGeometry> {
    config.validate()?;
    let progress = clamp_progress(progress);
    let line = project_line(points, &config.line, ctx, paint, progress)?;
    let baseline_y = ctx.baseline_y(config.line.negative_values_draw_mode);

    let commands = area_commands(&line.positions, baseline_y, config.line.smooth_curve);
    let fill = (!commands.is_empty()).then(|| {
        PathPrimitive::new(commands, ShapeStyle::Fill, paint.clone())
            .with_alpha(config.fill_alpha * progress)
    });

    debug!(points = points.len(), baseline_y, progress, "projected area chart");
    Ok(AreaGeometry {
        fill,
        baseline_y,
        line,
    })
}
