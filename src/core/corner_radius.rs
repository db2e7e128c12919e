use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Corner rounding presets shared by bar-like charts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum CornerRadius {
    #[default]
    None,
    Small,
    Medium,
    Large,
    ExtraLarge,
    Custom(f64),
}

impl CornerRadius {
    /// Custom radius; must be finite and >= 0.
    pub fn custom(radius: f64) -> ChartResult<Self> {
        let value = Self::Custom(radius);
        value.validate()?;
        Ok(value)
    }

    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Small => 4.0,
            Self::Medium => 8.0,
            Self::Large => 12.0,
            Self::ExtraLarge => 16.0,
            Self::Custom(radius) => radius,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        let radius = self.value();
        if radius.is_finite() && radius >= 0.0 {
            Ok(())
        } else {
            Err(ChartError::InvalidConfig(
                "corner radius must be finite and >= 0".to_owned(),
            ))
        }
    }
}

/// Per-corner radii of a rectangle primitive.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CornerRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

impl CornerRadii {
    pub const ZERO: CornerRadii = CornerRadii {
        top_left: 0.0,
        top_right: 0.0,
        bottom_right: 0.0,
        bottom_left: 0.0,
    };

    #[must_use]
    pub const fn all(radius: f64) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    #[must_use]
    pub const fn top(radius: f64) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: 0.0,
            bottom_left: 0.0,
        }
    }

    #[must_use]
    pub const fn bottom(radius: f64) -> Self {
        Self {
            top_left: 0.0,
            top_right: 0.0,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    #[must_use]
    pub const fn left(radius: f64) -> Self {
        Self {
            top_left: radius,
            top_right: 0.0,
            bottom_right: 0.0,
            bottom_left: radius,
        }
    }

    #[must_use]
    pub const fn right(radius: f64) -> Self {
        Self {
            top_left: 0.0,
            top_right: radius,
            bottom_right: radius,
            bottom_left: 0.0,
        }
    }

    #[must_use]
    pub fn merge(self, other: CornerRadii) -> Self {
        Self {
            top_left: self.top_left.max(other.top_left),
            top_right: self.top_right.max(other.top_right),
            bottom_right: self.bottom_right.max(other.bottom_right),
            bottom_left: self.bottom_left.max(other.bottom_left),
        }
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}
