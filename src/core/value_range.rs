//! Axis-friendly value bounds.
//!
//! "Nice" variants round outward to a multiple of a step so gridlines land on
//! round numbers; the padding variant widens raw extremes by a percentage.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::constants::DEFAULT_STEP_SIZE;

fn finite_extremes(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|value| value.is_finite())
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

/// Rounds the maximum value up to the next multiple of `step`.
///
/// Empty input rounds `0`. A zero `step` disables rounding.
#[must_use]
pub fn calculate_max_value(values: &[f64], step: u32) -> f64 {
    let max = finite_extremes(values).map_or(0.0, |(_, max)| max);
    if step == 0 {
        return max;
    }
    let step = f64::from(step);
    (max / step).ceil() * step
}

/// Rounds the minimum value down to the previous multiple of `step`.
///
/// Empty input rounds `0`. A zero `step` disables rounding.
#[must_use]
pub fn calculate_min_value(values: &[f64], step: u32) -> f64 {
    let min = finite_extremes(values).map_or(0.0, |(min, _)| min);
    if step == 0 {
        return min;
    }
    let step = f64::from(step);
    (min / step).floor() * step
}

/// Nice-rounded `(min, max)` pair.
#[must_use]
pub fn calculate_min_max_value(values: &[f64], step: u32) -> (f64, f64) {
    (
        calculate_min_value(values, step),
        calculate_max_value(values, step),
    )
}

/// Default-step shorthand for [`calculate_min_max_value`].
#[must_use]
pub fn nice_range(values: &[f64]) -> (f64, f64) {
    calculate_min_max_value(values, DEFAULT_STEP_SIZE)
}

/// Raw extremes scaled by `(1 - padding, 1 + padding)`.
///
/// Used where step rounding would distort the data, e.g. price ranges.
/// Empty input yields `(0, 0)`.
#[must_use]
pub fn calculate_min_max_with_padding(values: &[f64], padding: f64) -> (f64, f64) {
    match finite_extremes(values) {
        Some((min, max)) => (min * (1.0 - padding), max * (1.0 + padding)),
        None => (0.0, 0.0),
    }
}

/// Knobs for [`calculate_value_range`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRangeOptions {
    /// Replaces the minimum when every value is `>= 0`.
    pub default_min_if_all_positive: Option<f64>,
    /// Replaces the maximum when every value is `<= 0`.
    pub default_max_if_all_negative: Option<f64>,
    /// When every value is zero, widen the range to `[0, all_zero_fallback_max]`.
    pub handle_all_zero: bool,
    pub all_zero_fallback_max: f64,
}

impl Default for ValueRangeOptions {
    fn default() -> Self {
        Self {
            default_min_if_all_positive: Some(0.0),
            default_max_if_all_negative: Some(0.0),
            handle_all_zero: false,
            all_zero_fallback_max: f64::from(DEFAULT_STEP_SIZE),
        }
    }
}

/// Raw (un-rounded) range with sign-aware defaults.
///
/// Empty input yields `(0, 0)`; inverted bounds are swapped.
#[must_use]
pub fn calculate_value_range(values: &[f64], options: ValueRangeOptions) -> (f64, f64) {
    let Some((actual_min, actual_max)) = finite_extremes(values) else {
        return (0.0, 0.0);
    };

    let all_zero = actual_min == 0.0 && actual_max == 0.0;
    if all_zero && options.handle_all_zero {
        trace!(
            fallback_max = options.all_zero_fallback_max,
            "all values zero, using fallback range"
        );
        return (0.0, options.all_zero_fallback_max);
    }

    let min = match options.default_min_if_all_positive {
        Some(default_min) if actual_min >= 0.0 => default_min,
        _ => actual_min,
    };
    let max = match options.default_max_if_all_negative {
        Some(default_max) if actual_max <= 0.0 => default_max,
        _ => actual_max,
    };

    if min > max { (max, min) } else { (min, max) }
}

#[cfg(test)]
mod tests {
    use super::{ValueRangeOptions, calculate_value_range, finite_extremes};

    #[test]
    fn non_finite_values_are_ignored() {
        assert_eq!(
            finite_extremes(&[f64::NAN, 3.0, f64::INFINITY, -2.0]),
            Some((-2.0, 3.0))
        );
        assert_eq!(finite_extremes(&[f64::NAN]), None);
    }

    #[test]
    fn all_zero_falls_back_to_one_step() {
        let options = ValueRangeOptions {
            handle_all_zero: true,
            ..ValueRangeOptions::default()
        };
        assert_eq!(calculate_value_range(&[0.0, 0.0], options), (0.0, 10.0));
    }
}
