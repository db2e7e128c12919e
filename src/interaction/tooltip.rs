use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::constants::MIN_EDGE_MARGIN;
use crate::core::{Point, Rect, Viewport};
use crate::error::{ChartResult, ensure_config_non_negative};
use crate::interaction::hit_test::{HitRegion, HitTarget, find_hit_index};
use crate::render::Color;

/// Requested tooltip placement relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TooltipPosition {
    Above,
    Below,
    #[default]
    Auto,
}

/// Tooltip descriptor: content plus the anchor the renderer positions it at.
///
/// `x`/`bar_width` describe the horizontal extent of the anchor and `y` its
/// top edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    pub content: String,
    pub x: f64,
    pub y: f64,
    pub bar_width: f64,
    pub position: TooltipPosition,
}

impl TooltipState {
    /// Anchored to the top edge of a rectangle (bars, blocks, candles).
    #[must_use]
    pub fn rectangular(content: impl Into<String>, rect: Rect, position: TooltipPosition) -> Self {
        Self {
            content: content.into(),
            x: rect.left,
            y: rect.top,
            bar_width: rect.width(),
            position,
        }
    }

    /// Anchored to a point marker of `radius`; the anchor spans `radius * width_multiplier`.
    #[must_use]
    pub fn point(
        content: impl Into<String>,
        center: Point,
        radius: f64,
        position: TooltipPosition,
        width_multiplier: f64,
    ) -> Self {
        Self {
            content: content.into(),
            x: center.x - radius,
            y: center.y,
            bar_width: radius * width_multiplier,
            position,
        }
    }

    /// Horizontal midpoint of the anchor.
    #[must_use]
    pub fn anchor_center_x(&self) -> f64 {
        self.x + self.bar_width / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipPadding {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Default for TooltipPadding {
    fn default() -> Self {
        Self {
            horizontal: 12.0,
            vertical: 8.0,
        }
    }
}

/// Visual and placement tuning handed to the tooltip renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipConfig {
    pub background_color: Color,
    pub text_color: Color,
    pub font_size_px: f64,
    pub corner_radius: f64,
    pub padding: TooltipPadding,
    pub offset_y: f64,
    pub min_distance_from_edge: f64,
    pub show_arrow: bool,
    pub arrow_size: f64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            background_color: Color::from_hex_rgb(0x2D2D2D),
            text_color: Color::WHITE,
            font_size_px: 14.0,
            corner_radius: 8.0,
            padding: TooltipPadding::default(),
            offset_y: 8.0,
            min_distance_from_edge: 16.0,
            show_arrow: true,
            arrow_size: 8.0,
        }
    }
}

impl TooltipConfig {
    pub fn validate(&self) -> ChartResult<()> {
        ensure_config_non_negative(self.offset_y, "tooltip offset y")?;
        ensure_config_non_negative(self.min_distance_from_edge, "tooltip min distance from edge")?;
        ensure_config_non_negative(self.arrow_size, "tooltip arrow size")?;
        ensure_config_non_negative(self.padding.horizontal, "tooltip horizontal padding")?;
        ensure_config_non_negative(self.padding.vertical, "tooltip vertical padding")?;
        self.background_color.validate()?;
        self.text_color.validate()
    }

    fn vertical_gap(&self) -> f64 {
        self.offset_y + if self.show_arrow { self.arrow_size } else { 0.0 }
    }
}

/// Resolved tooltip box position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipPlacement {
    pub top_left: Point,
    /// Always `Above` or `Below`.
    pub position: TooltipPosition,
    /// Left end of the arrow base, `2 * arrow_size` wide; `None` without an arrow.
    pub arrow_base_left: Option<f64>,
}

/// Places a `width x height` tooltip for `state` inside the plot.
///
/// Horizontally the box is centered on the anchor and clamped to keep
/// `min_distance_from_edge` from the canvas sides. Vertically the requested
/// side is used when it fits, else the opposite side; `Auto` prefers above and
/// falls back to whichever side has more room.
#[must_use]
pub fn resolve_tooltip_placement(
    state: &TooltipState,
    width: f64,
    height: f64,
    canvas: Viewport,
    plot: Rect,
    config: &TooltipConfig,
) -> TooltipPlacement {
    let edge = config.min_distance_from_edge;
    let mut x = state.anchor_center_x() - width / 2.0;
    if x < edge {
        x = edge;
    } else if x + width > canvas.width - edge {
        x = canvas.width - width - edge;
    }

    let gap = config.vertical_gap();
    let above_y = state.y - height - gap;
    let below_y = state.y + gap;
    let fits_above = above_y >= plot.top + edge;
    let fits_below = below_y + height <= plot.bottom - edge;

    let position = match state.position {
        TooltipPosition::Above if fits_above => TooltipPosition::Above,
        TooltipPosition::Above => TooltipPosition::Below,
        TooltipPosition::Below if fits_below => TooltipPosition::Below,
        TooltipPosition::Below => TooltipPosition::Above,
        TooltipPosition::Auto if fits_above => TooltipPosition::Above,
        TooltipPosition::Auto if fits_below => TooltipPosition::Below,
        TooltipPosition::Auto => {
            if state.y - plot.top > plot.bottom - state.y {
                TooltipPosition::Above
            } else {
                TooltipPosition::Below
            }
        }
    };

    let y = if position == TooltipPosition::Above {
        above_y
    } else {
        below_y
    };

    // Arrow follows the anchor but stays off the rounded box corners.
    let arrow_base_left = config.show_arrow.then(|| {
        let arrow = config.arrow_size;
        let margin = arrow.max(MIN_EDGE_MARGIN);
        (state.anchor_center_x() - arrow)
            .min(x + width - margin - arrow * 2.0)
            .max(x + margin)
    });

    TooltipPlacement {
        top_left: Point::new(x, y),
        position,
        arrow_base_left,
    }
}

/// Projected chart geometry that feeds a [`TooltipManager`].
pub trait TooltipSource {
    type Item;

    fn hit_targets(&self) -> &[HitTarget<Self::Item>];

    /// Side requested by the chart config for tooltips on its items.
    fn tooltip_position(&self) -> TooltipPosition;
}

/// Owns the hit targets of the last projection pass and the visible tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipManager<T> {
    targets: Vec<HitTarget<T>>,
    position: TooltipPosition,
    tooltip: Option<TooltipState>,
}

impl<T> Default for TooltipManager<T> {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            position: TooltipPosition::Auto,
            tooltip: None,
        }
    }
}

impl<T> TooltipManager<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the targets with those of a fresh projection pass.
    pub fn set_targets(&mut self, targets: Vec<HitTarget<T>>) {
        self.targets = targets;
    }

    /// Takes targets and the requested tooltip side from a fresh projection.
    pub fn sync<S>(&mut self, source: &S)
    where
        S: TooltipSource<Item = T>,
        T: Clone,
    {
        self.targets = source.hit_targets().to_vec();
        self.position = source.tooltip_position();
        trace!(
            targets = self.targets.len(),
            position = ?self.position,
            "tooltip targets synced"
        );
    }

    #[must_use]
    pub fn targets(&self) -> &[HitTarget<T>] {
        &self.targets
    }

    pub fn set_position(&mut self, position: TooltipPosition) {
        self.position = position;
    }

    #[must_use]
    pub fn position(&self) -> TooltipPosition {
        self.position
    }

    pub fn clear_bounds(&mut self) {
        self.targets.clear();
    }

    pub fn update_tooltip(&mut self, state: Option<TooltipState>) {
        self.tooltip = state;
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&TooltipState> {
        self.tooltip.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.tooltip = None;
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.tooltip.is_some()
    }

    /// Resolves a tap: a hit shows a tooltip for the item on the configured
    /// side, a miss clears it.
    ///
    /// Returns the selected item for click callbacks.
    pub fn handle_tap<F>(&mut self, pointer: Point, format: F) -> Option<&T>
    where
        F: Fn(&T) -> String,
    {
        let position = self.position;
        let Some(index) = find_hit_index(pointer, &self.targets) else {
            if self.tooltip.take().is_some() {
                debug!("tooltip dismissed on miss");
            }
            return None;
        };

        let target = &self.targets[index];
        let content = format(&target.item);
        self.tooltip = Some(match target.region {
            HitRegion::Rect(rect) => TooltipState::rectangular(content, rect, position),
            HitRegion::Circle { center, radius } => {
                TooltipState::point(content, center, radius, position, 2.0)
            }
        });
        Some(&target.item)
    }
}

#[cfg(test)]
mod tests {
    use super::{TooltipConfig, TooltipPosition, TooltipState, resolve_tooltip_placement};
    use crate::core::{Point, Rect, Viewport};

    #[test]
    fn above_request_flips_below_near_top() {
        let anchor = Rect::new(100.0, 30.0, 120.0, 200.0);
        let state = TooltipState::rectangular("x", anchor, TooltipPosition::Above);
        let placement = resolve_tooltip_placement(
            &state,
            60.0,
            30.0,
            Viewport::new(400.0, 300.0),
            Rect::new(20.0, 20.0, 380.0, 280.0),
            &TooltipConfig::default(),
        );
        assert_eq!(placement.position, TooltipPosition::Below);
        assert!((placement.top_left.y - 46.0).abs() <= 1e-9);
        assert!((placement.top_left.x - 80.0).abs() <= 1e-9);
    }

    #[test]
    fn horizontal_position_is_clamped_to_edges() {
        let state =
            TooltipState::point("p", Point::new(5.0, 200.0), 4.0, TooltipPosition::Auto, 2.0);
        let placement = resolve_tooltip_placement(
            &state,
            80.0,
            20.0,
            Viewport::new(400.0, 300.0),
            Rect::new(20.0, 20.0, 380.0, 280.0),
            &TooltipConfig::default(),
        );
        assert_eq!(placement.top_left.x, 16.0);
        assert_eq!(placement.position, TooltipPosition::Above);
    }
}
