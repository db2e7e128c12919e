use serde::{Deserialize, Serialize};

use crate::core::value_range::{
    calculate_max_value, calculate_min_max_value, calculate_min_value,
};
use crate::error::{ChartError, ChartResult, ensure_finite};
use crate::render::Paint;

/// Capability shared by every labelled, single-valued chart record.
pub trait ChartPoint {
    fn label(&self) -> &str;
    fn value(&self) -> f64;
}

/// Values in dataset order.
pub fn values<T: ChartPoint>(points: &[T]) -> Vec<f64> {
    points.iter().map(ChartPoint::value).collect()
}

/// Labels in dataset order.
pub fn labels<T: ChartPoint>(points: &[T]) -> Vec<String> {
    points.iter().map(|point| point.label().to_owned()).collect()
}

#[must_use]
pub fn min_value<T: ChartPoint>(points: &[T], step: u32) -> f64 {
    calculate_min_value(&values(points), step)
}

#[must_use]
pub fn max_value<T: ChartPoint>(points: &[T], step: u32) -> f64 {
    calculate_max_value(&values(points), step)
}

#[must_use]
pub fn min_max_value<T: ChartPoint>(points: &[T], step: u32) -> (f64, f64) {
    calculate_min_max_value(&values(points), step)
}

/// Base record for bar, line, point and area charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    label: String,
    value: f64,
    color: Option<Paint>,
}

impl DataPoint {
    /// Any finite value is accepted, negatives included.
    pub fn new(label: impl Into<String>, value: f64) -> ChartResult<Self> {
        ensure_finite(value, "data point value")?;
        Ok(Self {
            label: label.into(),
            value,
            color: None,
        })
    }

    /// Per-item paint overriding the chart-level color.
    pub fn with_color(mut self, color: Paint) -> ChartResult<Self> {
        color.validate()?;
        self.color = Some(color);
        Ok(self)
    }

    #[must_use]
    pub fn color(&self) -> Option<&Paint> {
        self.color.as_ref()
    }
}

impl ChartPoint for DataPoint {
    fn label(&self) -> &str {
        &self.label
    }

    fn value(&self) -> f64 {
        self.value
    }
}

/// One category of a grouped or stacked bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarGroup {
    label: String,
    values: Vec<f64>,
    colors: Option<Vec<Paint>>,
}

impl BarGroup {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> ChartResult<Self> {
        for value in &values {
            ensure_finite(*value, "bar group value")?;
        }
        Ok(Self {
            label: label.into(),
            values,
            colors: None,
        })
    }

    /// Per-value paints; the list must match `values` one to one.
    pub fn with_colors(mut self, colors: Vec<Paint>) -> ChartResult<Self> {
        if colors.len() != self.values.len() {
            return Err(ChartError::InvalidData(format!(
                "bar group colors length ({}) must equal values length ({})",
                colors.len(),
                self.values.len()
            )));
        }
        for color in &colors {
            color.validate()?;
        }
        self.colors = Some(colors);
        Ok(self)
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn colors(&self) -> Option<&[Paint]> {
        self.colors.as_deref()
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Paint for value `index`: own color when present, else `palette` cycled.
    #[must_use]
    pub fn paint_for(&self, index: usize, palette: &Paint) -> Paint {
        self.colors
            .as_ref()
            .and_then(|colors| colors.get(index).cloned())
            .unwrap_or_else(|| palette.palette_entry(index))
    }
}

/// Horizontal range bar from `start_value` to `end_value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    label: String,
    start_value: f64,
    end_value: f64,
    color: Option<Paint>,
}

impl Span {
    pub fn new(label: impl Into<String>, start_value: f64, end_value: f64) -> ChartResult<Self> {
        ensure_finite(start_value, "span start value")?;
        ensure_finite(end_value, "span end value")?;
        if end_value < start_value {
            return Err(ChartError::InvalidData(
                "span end value must be >= start value".to_owned(),
            ));
        }
        Ok(Self {
            label: label.into(),
            start_value,
            end_value,
            color: None,
        })
    }

    pub fn with_color(mut self, color: Paint) -> ChartResult<Self> {
        color.validate()?;
        self.color = Some(color);
        Ok(self)
    }

    #[must_use]
    pub fn start_value(&self) -> f64 {
        self.start_value
    }

    #[must_use]
    pub fn end_value(&self) -> f64 {
        self.end_value
    }

    #[must_use]
    pub fn color(&self) -> Option<&Paint> {
        self.color.as_ref()
    }
}

impl ChartPoint for Span {
    fn label(&self) -> &str {
        &self.label
    }

    /// Length of the span.
    fn value(&self) -> f64 {
        self.end_value - self.start_value
    }
}

/// One X position of a multi-series chart; `values[s]` belongs to series `s`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineGroup {
    label: String,
    values: Vec<f64>,
}

impl LineGroup {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> ChartResult<Self> {
        for value in &values {
            ensure_finite(*value, "line group value")?;
        }
        Ok(Self {
            label: label.into(),
            values,
        })
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Sum of series `0..=series_index`; missing series count as zero.
    #[must_use]
    pub fn cumulative_value(&self, series_index: usize) -> f64 {
        self.values.iter().take(series_index + 1).sum()
    }
}
