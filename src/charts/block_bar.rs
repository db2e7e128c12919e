//! Single proportional bar split into colored blocks.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::charts::Drawable;
use crate::core::{CornerRadii, CornerRadius, Rect};
use crate::error::{ChartResult, ensure_config_non_negative, ensure_config_positive, ensure_finite};
use crate::interaction::HitTarget;
use crate::render::{Paint, RectPrimitive, RenderFrame};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockData {
    value: f64,
    paint: Paint,
}

impl BlockData {
    pub fn new(value: f64, paint: Paint) -> ChartResult<Self> {
        ensure_finite(value, "block value")?;
        paint.validate()?;
        Ok(Self { value, paint })
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn paint(&self) -> &Paint {
        &self.paint
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockBarChartConfig {
    pub corner_radius: CornerRadius,
    pub gap_between_blocks: f64,
    /// Preferred bar height for hosts sizing the canvas.
    pub bar_height: f64,
}

impl Default for BlockBarChartConfig {
    fn default() -> Self {
        Self {
            corner_radius: CornerRadius::Small,
            gap_between_blocks: 4.0,
            bar_height: 16.0,
        }
    }
}

impl BlockBarChartConfig {
    pub fn with_gap_between_blocks(mut self, gap: f64) -> ChartResult<Self> {
        self.gap_between_blocks = gap;
        self.validate()?;
        Ok(self)
    }

    pub fn with_corner_radius(mut self, corner_radius: CornerRadius) -> ChartResult<Self> {
        self.corner_radius = corner_radius;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.corner_radius.validate()?;
        ensure_config_non_negative(self.gap_between_blocks, "gap between blocks")?;
        ensure_config_positive(self.bar_height, "block bar height")
    }
}

impl_json_config!(BlockBarChartConfig, "block bar chart config");

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockBarGeometry {
    pub segments: Vec<RectPrimitive>,
    /// Payload indexes into the caller's block list, skipped blocks included.
    pub hit_targets: Vec<HitTarget<usize>>,
}

impl Drawable for BlockBarGeometry {
    fn append_to(&self, frame: &mut RenderFrame) {
        frame.extend(self.segments.iter().cloned());
    }
}

/// Lays positive blocks left to right across `bounds`.
///
/// Widths are `(bounds width - total gap) * value / total`. Only the outer
/// edge of the first and last block is rounded.
pub fn project_block_bar(
    blocks: &[BlockData],
    config: &BlockBarChartConfig,
    bounds: Rect,
) -> ChartResult<BlockBarGeometry> {
    config.validate()?;
    let visible: Vec<(usize, &BlockData)> = blocks
        .iter()
        .enumerate()
        .filter(|(_, block)| block.value > 0.0)
        .collect();
    let total: f64 = visible.iter().map(|(_, block)| block.value).sum();

    let mut geometry = BlockBarGeometry::default();
    if visible.is_empty() || total <= 0.0 {
        trace!(blocks = blocks.len(), "block bar has no positive total");
        return Ok(geometry);
    }

    let gap = config.gap_between_blocks;
    let total_gaps = gap * (visible.len() - 1) as f64;
    let usable = (bounds.width() - total_gaps).max(0.0);
    let radius = config.corner_radius.value();
    let last = visible.len() - 1;

    let mut cursor = bounds.left;
    for (position, (index, block)) in visible.into_iter().enumerate() {
        let width = usable * (block.value / total);
        let mut corners = CornerRadii::ZERO;
        if position == 0 {
            corners = corners.merge(CornerRadii::left(radius));
        }
        if position == last {
            corners = corners.merge(CornerRadii::right(radius));
        }

        let rect = Rect::new(cursor, bounds.top, cursor + width, bounds.bottom);
        geometry
            .segments
            .push(RectPrimitive::new(rect, block.paint.clone()).with_corner_radii(corners));
        geometry.hit_targets.push(HitTarget::rect(rect, index));
        cursor += width + gap;
    }

    debug!(segments = geometry.segments.len(), total, "projected block bar");
    Ok(geometry)
}
