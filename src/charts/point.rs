//! Scatter-style markers at slot centers with staggered growth.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::charts::reference_line::{self, ReferenceLineConfig, ReferenceLineGeometry};
use crate::charts::{Drawable, clamp_progress};
use crate::core::constants::DEFAULT_AXIS_STEPS;
use crate::core::data::{self, ChartPoint, DataPoint};
use crate::core::{Animation, AxisConfig, ChartContext, ChartOrientation, Point, nice_range};
use crate::error::{ChartResult, ensure_config_positive, ensure_config_range};
use crate::interaction::{HitRegion, HitTarget, TooltipPosition, TooltipSource};
use crate::render::{CirclePrimitive, Paint, RenderFrame};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointChartConfig {
    pub point_radius: f64,
    pub point_alpha: f64,
    pub animation: Animation,
    pub tooltip_position: TooltipPosition,
    pub reference_line: Option<ReferenceLineConfig>,
}

impl Default for PointChartConfig {
    fn default() -> Self {
        Self {
            point_radius: 8.0,
            point_alpha: 1.0,
            animation: Animation::default(),
            tooltip_position: TooltipPosition::Auto,
            reference_line: None,
        }
    }
}

impl PointChartConfig {
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

    pub fn validate(&self) -> ChartResult<()> {
        ensure_config_positive(self.point_radius, "point radius")?;
        ensure_config_range(self.point_alpha, 0.0, 1.0, "point alpha")?;
        self.animation.validate()?;
        if let Some(reference_line) = &self.reference_line {
            reference_line.validate()?;
        }
        Ok(())
    }
}

impl_json_config!(PointChartConfig, "point chart config");

pub fn resolve_axis(points: &[DataPoint]) -> ChartResult<AxisConfig> {
    let (min, max) = nice_range(&data::values(points));
    AxisConfig::from_data_range(min, max, DEFAULT_AXIS_STEPS)
}

/// Progress of marker `index` when markers start one after another:
/// `clamp((progress - index / count) * count, 0, 1)`.
#[must_use]
pub fn staggered_progress(index: usize, count: usize, progress: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let count = count as f64;
    ((progress - index as f64 / count) * count).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointGeometry {
    pub positions: Vec<Point>,
    pub markers: Vec<CirclePrimitive>,
    pub hit_targets: Vec<HitTarget<usize>>,
    pub reference_line: Option<ReferenceLineGeometry>,
    pub tooltip_position: TooltipPosition,
}

impl Drawable for PointGeometry {
    fn append_to(&self, frame: &mut RenderFrame) {
        frame.extend(self.markers.iter().cloned());
        if let Some(reference) = &self.reference_line {
            reference.append_to(frame);
        }
    }
}

impl TooltipSource for PointGeometry {
    type Item = usize;

    fn hit_targets(&self) -> &[HitTarget<usize>] {
        &self.hit_targets
    }

    fn tooltip_position(&self) -> TooltipPosition {
        self.tooltip_position
    }
}

/// One marker per point; radius and alpha both scale with the marker's
/// staggered progress.
pub fn project_points(
    points: &[DataPoint],
    config: &PointChartConfig,
    ctx: ChartContext,
    default_paint: &Paint,
    progress: f64,
) -> ChartResult<PointGeometry> {
    config.validate()?;
    let progress = clamp_progress(progress);
    let count = points.len();

    let mut geometry = PointGeometry {
        positions: Vec::with_capacity(count),
        markers: Vec::with_capacity(count),
        hit_targets: Vec::with_capacity(count),
        reference_line: reference_line::project_configured(
            config.reference_line.as_ref(),
            count,
            ctx,
            ChartOrientation::Vertical,
        )?,
        tooltip_position: config.tooltip_position,
    };
    for (index, point) in points.iter().enumerate() {
        let center = ctx.point_at(index, count, point.value());
        let local = staggered_progress(index, count, progress);
        let paint = point.color().cloned().unwrap_or_else(|| default_paint.clone());

        geometry.positions.push(center);
        geometry.markers.push(
            CirclePrimitive::filled(center, config.point_radius * local, paint)
                .with_alpha(config.point_alpha * local),
        );
        geometry
            .hit_targets
            .push(HitTarget::new(HitRegion::marker(center, config.point_radius), index));
    }

    debug!(points = count, progress, "projected point chart");
    Ok(geometry)
}

#[cfg(test)]
mod tests {
    use super::staggered_progress;

    #[test]
    fn markers_start_in_sequence() {
        assert_eq!(staggered_progress(0, 4, 0.25), 1.0);
        assert_eq!(staggered_progress(1, 4, 0.25), 0.0);
        assert!((staggered_progress(2, 4, 0.625) - 0.5).abs() <= 1e-9);
        assert_eq!(staggered_progress(3, 4, 1.0), 1.0);
        assert_eq!(staggered_progress(0, 0, 1.0), 0.0);
    }
}
