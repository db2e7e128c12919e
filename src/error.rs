use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Rejects non-finite input for a named field.
pub(crate) fn ensure_finite(value: f64, field: &str) -> ChartResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!("{field} must be finite")))
    }
}

/// Validates that a config fraction/ratio lies inside an inclusive range.
pub(crate) fn ensure_config_range(
    value: f64,
    min: f64,
    max: f64,
    field: &str,
) -> ChartResult<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ChartError::InvalidConfig(format!(
            "{field} must be in [{min}, {max}]"
        )))
    }
}

/// Validates a share in `(0, 1]`.
pub(crate) fn ensure_config_fraction(value: f64, field: &str) -> ChartResult<()> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ChartError::InvalidConfig(format!(
            "{field} must be in (0, 1]"
        )))
    }
}

pub(crate) fn ensure_config_positive(value: f64, field: &str) -> ChartResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ChartError::InvalidConfig(format!(
            "{field} must be finite and > 0"
        )))
    }
}

pub(crate) fn ensure_config_non_negative(value: f64, field: &str) -> ChartResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ChartError::InvalidConfig(format!(
            "{field} must be finite and >= 0"
        )))
    }
}

pub(crate) fn ensure_label(label: &str, field: &str) -> ChartResult<()> {
    if label.trim().is_empty() {
        Err(ChartError::InvalidData(format!("{field} must not be blank")))
    } else {
        Ok(())
    }
}
