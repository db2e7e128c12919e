use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use tracing::trace;

use crate::core::constants::{DEFAULT_STEP_SIZE, MAX_UNSAMPLED_X_LABELS};
use crate::error::{ChartError, ChartResult};

/// Which screen axis carries the value scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartOrientation {
    /// Categories along X, values along Y.
    #[default]
    Vertical,
    /// Categories along Y, values along X.
    Horizontal,
}

/// Policy for values below the chart baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NegativeValuesDrawMode {
    /// Negative values extend below a zero line drawn inside the plot.
    #[default]
    BelowAxis,
    /// Every value grows from the range minimum at the plot edge.
    FromMinValue,
}

impl NegativeValuesDrawMode {
    #[must_use]
    pub fn is_below_axis(self) -> bool {
        self == Self::BelowAxis
    }
}

/// Rotation applied to category/value labels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum LabelRotation {
    #[default]
    Straight,
    Angle45,
    Angle45Negative,
    Vertical,
    VerticalNegative,
    Custom(f64),
}

impl LabelRotation {
    #[must_use]
    pub fn degrees(self) -> f64 {
        match self {
            Self::Straight => 0.0,
            Self::Angle45 => 45.0,
            Self::Angle45Negative => -45.0,
            Self::Vertical => 90.0,
            Self::VerticalNegative => -90.0,
            Self::Custom(angle) => angle,
        }
    }
}

/// Value-axis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub min_value: f64,
    pub max_value: f64,
    pub steps: u32,
    pub label: String,
    /// Draw the category axis at value `0` when the range straddles zero.
    pub draw_axis_at_zero: bool,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            min_value: 0.0,
            max_value: 100.0,
            steps: 5,
            label: String::new(),
            draw_axis_at_zero: true,
        }
    }
}

impl AxisConfig {
    pub fn new(min_value: f64, max_value: f64, steps: u32) -> ChartResult<Self> {
        let config = Self {
            min_value,
            max_value,
            steps,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Axis over a range resolved from data.
    ///
    /// An empty range (all-zero or single-valued data) is widened by one
    /// default step, downward when it sits below zero, so the axis always has
    /// distinct ticks.
    pub fn from_data_range(min_value: f64, max_value: f64, steps: u32) -> ChartResult<Self> {
        if min_value != max_value {
            return Self::new(min_value, max_value, steps);
        }
        let step = f64::from(DEFAULT_STEP_SIZE);
        let (min, max) = if max_value < 0.0 {
            (min_value - step, max_value)
        } else {
            (min_value, max_value + step)
        };
        trace!(value = min_value, min, max, "widened empty axis range");
        Self::new(min, max, steps)
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_draw_axis_at_zero(mut self, draw_axis_at_zero: bool) -> Self {
        self.draw_axis_at_zero = draw_axis_at_zero;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.min_value.is_finite() || !self.max_value.is_finite() {
            return Err(ChartError::InvalidConfig(
                "axis range must be finite".to_owned(),
            ));
        }
        if self.min_value > self.max_value {
            return Err(ChartError::InvalidConfig(
                "axis min value must be <= max value".to_owned(),
            ));
        }
        Ok(())
    }

    /// Step count used for gridlines; never below two.
    #[must_use]
    pub fn effective_steps(&self) -> u32 {
        self.steps.max(2)
    }

    /// `effective_steps + 1` evenly spaced values from min to max.
    #[must_use]
    pub fn tick_values(&self) -> Vec<f64> {
        let steps = self.effective_steps();
        let span = self.max_value - self.min_value;
        (0..=steps)
            .map(|i| {
                if i == steps {
                    self.max_value
                } else {
                    self.min_value + span * (f64::from(i) / f64::from(steps))
                }
            })
            .collect()
    }

    #[must_use]
    pub fn straddles_zero(&self) -> bool {
        self.min_value < 0.0 && self.max_value > 0.0
    }
}

/// Category labels plus pre-formatted value labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartAxisConfig {
    x_axis_labels: Vec<String>,
    y_axis_labels: Vec<String>,
}

impl ChartAxisConfig {
    /// At least two value labels are required.
    pub fn new(x_axis_labels: Vec<String>, y_axis_labels: Vec<String>) -> ChartResult<Self> {
        if y_axis_labels.len() < 2 {
            return Err(ChartError::InvalidConfig(
                "y axis labels must contain at least two entries".to_owned(),
            ));
        }
        Ok(Self {
            x_axis_labels,
            y_axis_labels,
        })
    }

    /// Value labels `0, step, 2*step, ...` up to `max_value` rounded up to a step.
    pub fn from_numeric_range(
        x_axis_labels: Vec<String>,
        max_value: f64,
        step_size: u32,
    ) -> ChartResult<Self> {
        if !max_value.is_finite() {
            return Err(ChartError::InvalidConfig(
                "axis max value must be finite".to_owned(),
            ));
        }
        let step = f64::from(step_size.max(1));
        let top = (max_value / step).ceil().max(1.0) as u32;
        let y_axis_labels = (0..=top)
            .map(|i| format_axis_label(f64::from(i) * step))
            .collect();
        Self::new(x_axis_labels, y_axis_labels)
    }

    #[must_use]
    pub fn x_axis_labels(&self) -> &[String] {
        &self.x_axis_labels
    }

    #[must_use]
    pub fn y_axis_labels(&self) -> &[String] {
        &self.y_axis_labels
    }

    #[must_use]
    pub fn y_steps(&self) -> usize {
        self.y_axis_labels.len() - 1
    }
}

/// Formats a value-axis label.
///
/// Integers render without a decimal point; other values are rounded to two
/// decimals with trailing zeros and a trailing point trimmed.
#[must_use]
pub fn format_axis_label(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_owned();
    }
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_owned();
    }
    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

/// Indices of x labels kept when a long label list is thinned.
///
/// Up to ten labels are all kept; longer lists keep five evenly spread
/// indices including the first and the last.
#[must_use]
pub fn sampled_label_indices(label_count: usize) -> SmallVec<[usize; 10]> {
    if label_count <= MAX_UNSAMPLED_X_LABELS {
        return (0..label_count).collect();
    }
    let mut indices: SmallVec<[usize; 10]> =
        (0..5).map(|i| (i * (label_count - 1)) / 4).collect();
    indices.dedup();
    indices
}

/// Thins `labels` in place of position: dropped labels become empty strings
/// so the remaining ones keep their slots.
#[must_use]
pub fn sample_x_labels(labels: &[String]) -> Vec<String> {
    let keep = sampled_label_indices(labels.len());
    labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            if keep.contains(&index) {
                label.clone()
            } else {
                String::new()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{AxisConfig, format_axis_label, sampled_label_indices};

    #[test]
    fn labels_trim_trailing_zeros() {
        assert_eq!(format_axis_label(20.0), "20");
        assert_eq!(format_axis_label(-15.0), "-15");
        assert_eq!(format_axis_label(2.5), "2.5");
        assert_eq!(format_axis_label(3.14159), "3.14");
        assert_eq!(format_axis_label(0.999), "1");
        assert_eq!(format_axis_label(-0.001), "0");
    }

    #[test]
    fn tick_values_hit_both_ends() {
        let axis = AxisConfig::new(-10.0, 50.0, 6).expect("axis");
        let ticks = axis.tick_values();
        assert_eq!(ticks.len(), 7);
        assert_eq!(ticks[0], -10.0);
        assert_eq!(ticks[6], 50.0);
    }

    #[test]
    fn steps_are_coerced_to_two() {
        let axis = AxisConfig::new(0.0, 1.0, 0).expect("axis");
        assert_eq!(axis.tick_values().len(), 3);
    }

    #[test]
    fn long_label_lists_keep_five_indices() {
        assert_eq!(sampled_label_indices(21).as_slice(), &[0, 5, 10, 15, 20]);
        assert_eq!(sampled_label_indices(4).len(), 4);
    }
}
