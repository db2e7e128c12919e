//! Several line series sharing one category axis.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::charts::line::{LineChartConfig, curve_commands, reveal_threshold, revealed_polyline};
use crate::charts::reference_line::{self, ReferenceLineGeometry};
use crate::charts::{Drawable, clamp_progress};
use crate::core::constants::DEFAULT_AXIS_STEPS;
use crate::core::{AxisConfig, ChartContext, ChartOrientation, LineGroup, Point, nice_range};
use crate::error::ChartResult;
use crate::interaction::{HitRegion, HitTarget, TooltipPosition, TooltipSource};
use crate::render::{CirclePrimitive, Paint, PathPrimitive, RenderFrame};

/// Hit target payload for one marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultilinePoint {
    pub group_index: usize,
    pub series_index: usize,
}

/// Widest group decides how many series are drawn.
#[must_use]
pub fn series_count(groups: &[LineGroup]) -> usize {
    groups.iter().map(|group| group.values().len()).max().unwrap_or(0)
}

pub fn resolve_axis(groups: &[LineGroup]) -> ChartResult<AxisConfig> {
    let values: Vec<f64> = groups.iter().flat_map(|g| g.values().iter().copied()).collect();
    let (min, max) = nice_range(&values);
    AxisConfig::from_data_range(min, max, DEFAULT_AXIS_STEPS)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesGeometry {
    pub positions: Vec<Point>,
    pub line: Option<PathPrimitive>,
    pub markers: Vec<CirclePrimitive>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultilineGeometry {
    pub series: Vec<SeriesGeometry>,
    pub hit_targets: Vec<HitTarget<MultilinePoint>>,
    pub reference_line: Option<ReferenceLineGeometry>,
    pub tooltip_position: TooltipPosition,
}

impl Drawable for MultilineGeometry {
    fn append_to(&self, frame: &mut RenderFrame) {
        for series in &self.series {
            if let Some(line) = &series.line {
                frame.push(line.clone());
            }
            frame.extend(series.markers.iter().cloned());
        }
        if let Some(reference) = &self.reference_line {
            reference.append_to(frame);
        }
    }
}

impl TooltipSource for MultilineGeometry {
    type Item = MultilinePoint;

    fn hit_targets(&self) -> &[HitTarget<MultilinePoint>] {
        &self.hit_targets
    }

    fn tooltip_position(&self) -> TooltipPosition {
        self.tooltip_position
    }
}

/// Positions of series `series_index`; groups lacking that series are skipped.
pub(crate) fn series_positions(
    groups: &[LineGroup],
    series_index: usize,
    ctx: ChartContext,
) -> Vec<(usize, Point)> {
    let count = groups.len();
    groups
        .iter()
        .enumerate()
        .filter_map(|(index, group)| {
            group
                .values()
                .get(series_index)
                .map(|value| (index, ctx.point_at(index, count, *value)))
        })
        .collect()
}

/// One line per series, colored by cycling `palette`.
pub fn project_multiline(
    groups: &[LineGroup],
    config: &LineChartConfig,
    ctx: ChartContext,
    palette: &Paint,
    progress: f64,
) -> ChartResult<MultilineGeometry> {
    config.validate()?;
    let progress = clamp_progress(progress);
    let series_total = series_count(groups);

    let mut geometry = MultilineGeometry {
        reference_line: reference_line::project_configured(
            config.reference_line.as_ref(),
            groups.len(),
            ctx,
            ChartOrientation::Vertical,
        )?,
        tooltip_position: config.tooltip_position,
        ..MultilineGeometry::default()
    };
    for series_index in 0..series_total {
        let paint = palette.palette_entry(series_index);
        let indexed = series_positions(groups, series_index, ctx);
        let positions: Vec<Point> = indexed.iter().map(|(_, point)| *point).collect();

        let line = if positions.len() < 2 {
            None
        } else if config.smooth_curve {
            Some(
                PathPrimitive::new(curve_commands(&positions, true), config.stroke(), paint.clone())
                    .with_alpha(progress),
            )
        } else {
            let revealed = revealed_polyline(&positions, progress);
            (revealed.len() >= 2)
                .then(|| PathPrimitive::polyline(&revealed, false, config.stroke(), paint.clone()))
        };

        let mut markers = Vec::new();
        for (position_index, (group_index, center)) in indexed.iter().enumerate() {
            if config.show_points && reveal_threshold(position_index, indexed.len()) <= progress {
                markers.push(
                    CirclePrimitive::filled(*center, config.point_radius, paint.clone())
                        .with_alpha(config.point_alpha),
                );
            }
            geometry.hit_targets.push(HitTarget::new(
                HitRegion::marker(*center, config.point_radius),
                MultilinePoint {
                    group_index: *group_index,
                    series_index,
                },
            ));
        }

        geometry.series.push(SeriesGeometry {
            positions,
            line,
            markers,
        });
    }

    debug!(
        groups = groups.len(),
        series = series_total,
        progress,
        "projected multiline chart"
    );
    Ok(geometry)
}
