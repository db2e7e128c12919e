//! Per-chart geometry.
//!
//! Every chart family exposes a validated data record, a validated config and
//! a pure `project_*` function:
//! `(dataset, config, context, progress) -> geometry + hit targets`.
//! Geometry implements [`Drawable`] to emit render primitives in paint order.

use crate::core::Viewport;
use crate::render::RenderFrame;

/// Adds `to_json_pretty` / `from_json_str` to a config type with a
/// `validate(&self) -> ChartResult<()>` method.
macro_rules! impl_json_config {
    ($config:ty, $name:literal) => {
        impl $config {
            /// Serializes the config to pretty JSON.
            pub fn to_json_pretty(&self) -> $crate::error::ChartResult<String> {
                serde_json::to_string_pretty(self).map_err(|e| {
                    $crate::error::ChartError::InvalidConfig(format!(
                        concat!("failed to serialize ", $name, ": {}"),
                        e
                    ))
                })
            }

            /// Parses and validates a config from JSON.
            pub fn from_json_str(input: &str) -> $crate::error::ChartResult<Self> {
                let config: Self = serde_json::from_str(input).map_err(|e| {
                    $crate::error::ChartError::InvalidConfig(format!(
                        concat!("failed to parse ", $name, ": {}"),
                        e
                    ))
                })?;
                config.validate()?;
                Ok(config)
            }
        }
    };
}

pub mod area;
pub mod bar;
pub mod block_bar;
pub mod candlestick;
pub mod circular_ring;
pub mod combo;
pub mod grouped_bar;
pub mod horizontal_bar;
pub mod line;
pub mod multiline;
pub mod pie;
pub mod point;
pub mod radar;
pub mod reference_line;
pub mod scaffold;
pub mod span;
pub mod stacked_area;
pub mod stacked_bar;
pub mod waterfall;

/// Geometry that can append itself to a frame.
pub trait Drawable {
    fn append_to(&self, frame: &mut RenderFrame);
}

impl<T: Drawable> Drawable for Option<T> {
    fn append_to(&self, frame: &mut RenderFrame) {
        if let Some(inner) = self {
            inner.append_to(frame);
        }
    }
}

/// Builds one frame from layers, painted in slice order.
#[must_use]
pub fn compose_frame(viewport: Viewport, layers: &[&dyn Drawable]) -> RenderFrame {
    let mut frame = RenderFrame::new(viewport);
    for layer in layers {
        layer.append_to(&mut frame);
    }
    frame
}

/// Clamps an externally supplied progress value into `[0, 1]`; NaN becomes 0.
pub(crate) fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}
