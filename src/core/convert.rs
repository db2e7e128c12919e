//! Conversions from strongly-typed inputs (decimals, timestamps) into the
//! `f64` values and labels used by geometry.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

/// Converts a decimal to `f64`, naming `field` on failure.
pub fn decimal_to_f64(value: Decimal, field: &str) -> ChartResult<f64> {
    value
        .to_f64()
        .filter(|converted| converted.is_finite())
        .ok_or_else(|| ChartError::InvalidData(format!("{field} cannot be represented as f64")))
}

/// Category label for a timestamp, formatted with a `chrono` pattern.
#[must_use]
pub fn timestamp_label(time: DateTime<Utc>, pattern: &str) -> String {
    time.format(pattern).to_string()
}
