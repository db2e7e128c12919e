use serde::{Deserialize, Serialize};

use crate::core::axis::NegativeValuesDrawMode;
use crate::core::{Point, Rect};
use crate::error::{ChartError, ChartResult};

/// Maps logical `(slot index, value)` pairs onto the plot rectangle.
///
/// Values map linearly from `[min_value, max_value]` onto `[bottom, top]`
/// (pixel Y grows downward). The plot width is partitioned into `n` equal
/// slots for categorical X placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartContext {
    plot: Rect,
    min_value: f64,
    max_value: f64,
}

impl ChartContext {
    /// `min_value == max_value` is accepted; every value then maps to the bottom edge.
    pub fn new(plot: Rect, min_value: f64, max_value: f64) -> ChartResult<Self> {
        if !plot.is_finite() || plot.width() < 0.0 || plot.height() < 0.0 {
            return Err(ChartError::InvalidViewport {
                width: plot.width(),
                height: plot.height(),
            });
        }
        if !min_value.is_finite() || !max_value.is_finite() {
            return Err(ChartError::InvalidData(
                "chart value range must be finite".to_owned(),
            ));
        }
        if min_value > max_value {
            return Err(ChartError::InvalidData(
                "chart min value must be <= max value".to_owned(),
            ));
        }
        Ok(Self {
            plot,
            min_value,
            max_value,
        })
    }

    /// Same plot rectangle, different value range.
    pub fn with_range(self, min_value: f64, max_value: f64) -> ChartResult<Self> {
        Self::new(self.plot, min_value, max_value)
    }

    #[must_use]
    pub fn plot(self) -> Rect {
        self.plot
    }

    #[must_use]
    pub fn left(self) -> f64 {
        self.plot.left
    }

    #[must_use]
    pub fn top(self) -> f64 {
        self.plot.top
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.plot.right
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.plot.bottom
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.plot.width()
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.plot.height()
    }

    #[must_use]
    pub fn min_value(self) -> f64 {
        self.min_value
    }

    #[must_use]
    pub fn max_value(self) -> f64 {
        self.max_value
    }

    #[must_use]
    pub fn value_range(self) -> f64 {
        self.max_value - self.min_value
    }

    /// Position of `value` along the range as a fraction; 0 for a degenerate range.
    #[must_use]
    pub fn normalize(self, value: f64) -> f64 {
        let range = self.value_range();
        if range == 0.0 {
            0.0
        } else {
            (value - self.min_value) / range
        }
    }

    #[must_use]
    pub fn contains_value(self, value: f64) -> bool {
        (self.min_value..=self.max_value).contains(&value)
    }

    /// Pixel Y of `value`; exact at both range endpoints.
    #[must_use]
    pub fn convert_value_to_y(self, value: f64) -> f64 {
        let range = self.value_range();
        if range == 0.0 {
            return self.plot.bottom;
        }
        if value == self.max_value {
            return self.plot.top;
        }
        self.plot.bottom - ((value - self.min_value) / range) * self.height()
    }

    /// Pixel X of `value` for horizontally oriented charts.
    #[must_use]
    pub fn convert_value_to_x(self, value: f64) -> f64 {
        let range = self.value_range();
        if range == 0.0 {
            return self.plot.left;
        }
        if value == self.max_value {
            return self.plot.right;
        }
        self.plot.left + ((value - self.min_value) / range) * self.width()
    }

    fn slot_extent(total: f64, count: usize) -> f64 {
        if count == 0 {
            0.0
        } else {
            total / count as f64
        }
    }

    /// Width of one bar occupying `width_fraction` of its slot.
    #[must_use]
    pub fn bar_width(self, count: usize, width_fraction: f64) -> f64 {
        Self::slot_extent(self.width(), count) * width_fraction
    }

    /// Left edge of bar `index`, centered inside its slot.
    #[must_use]
    pub fn bar_left(self, index: usize, count: usize, width_fraction: f64) -> f64 {
        let slot = Self::slot_extent(self.width(), count);
        let bar_width = slot * width_fraction;
        self.plot.left + slot * index as f64 + (slot - bar_width) / 2.0
    }

    /// Midpoint X of slot `index`.
    #[must_use]
    pub fn centered_x(self, index: usize, count: usize) -> f64 {
        if count == 0 {
            return self.plot.left;
        }
        self.plot.left + self.width() * (index as f64 + 0.5) / count as f64
    }

    /// Thickness of one horizontal bar occupying `thickness_fraction` of its row.
    #[must_use]
    pub fn row_thickness(self, count: usize, thickness_fraction: f64) -> f64 {
        Self::slot_extent(self.height(), count) * thickness_fraction
    }

    /// Top edge of horizontal bar `index`, centered inside its row.
    #[must_use]
    pub fn row_top(self, index: usize, count: usize, thickness_fraction: f64) -> f64 {
        let row = Self::slot_extent(self.height(), count);
        let thickness = row * thickness_fraction;
        self.plot.top + row * index as f64 + (row - thickness) / 2.0
    }

    /// Midpoint Y of row `index`.
    #[must_use]
    pub fn centered_y(self, index: usize, count: usize) -> f64 {
        if count == 0 {
            return self.plot.top;
        }
        self.plot.top + self.height() * (index as f64 + 0.5) / count as f64
    }

    /// Slot-center point for `value` at `index`.
    #[must_use]
    pub fn point_at(self, index: usize, count: usize, value: f64) -> Point {
        Point::new(self.centered_x(index, count), self.convert_value_to_y(value))
    }

    /// Y where bars and areas are anchored.
    ///
    /// The zero line when the range dips below zero in below-axis mode,
    /// otherwise the plot bottom.
    #[must_use]
    pub fn baseline_y(self, mode: NegativeValuesDrawMode) -> f64 {
        if self.min_value < 0.0 && mode == NegativeValuesDrawMode::BelowAxis {
            self.convert_value_to_y(0.0)
        } else {
            self.plot.bottom
        }
    }

    /// X counterpart of [`ChartContext::baseline_y`] for horizontal charts.
    #[must_use]
    pub fn baseline_x(self, mode: NegativeValuesDrawMode) -> f64 {
        if self.min_value < 0.0 && mode == NegativeValuesDrawMode::BelowAxis {
            self.convert_value_to_x(0.0)
        } else {
            self.plot.left
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ChartContext;
    use crate::core::Rect;

    fn context() -> ChartContext {
        ChartContext::new(Rect::new(10.0, 20.0, 410.0, 220.0), 0.0, 100.0).expect("context")
    }

    #[test]
    fn degenerate_range_maps_to_bottom() {
        let ctx = ChartContext::new(Rect::new(0.0, 0.0, 100.0, 50.0), 5.0, 5.0).expect("ctx");
        assert_eq!(ctx.convert_value_to_y(5.0), 50.0);
        assert_eq!(ctx.convert_value_to_y(123.0), 50.0);
    }

    #[test]
    fn zero_count_does_not_divide_by_zero() {
        let ctx = context();
        assert_eq!(ctx.bar_width(0, 0.6), 0.0);
        assert_eq!(ctx.centered_x(0, 0), 10.0);
        assert!(ctx.bar_left(0, 0, 0.6).is_finite());
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(ChartContext::new(Rect::new(0.0, 0.0, 1.0, 1.0), 2.0, 1.0).is_err());
    }

    #[test]
    fn bar_is_centered_in_slot() {
        let ctx = context();
        let left = ctx.bar_left(1, 4, 0.5);
        let width = ctx.bar_width(4, 0.5);
        assert!((left - 135.0).abs() <= 1e-9);
        assert!((left + width / 2.0 - ctx.centered_x(1, 4)).abs() <= 1e-9);
    }
}
