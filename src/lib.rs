//! chart-geometry: backend-agnostic chart geometry and scaling engine.
//!
//! Datasets are mapped onto pixel-space primitives by pure projection
//! functions, one family per chart type. A host resolves an axis range,
//! builds the plot scaffold, projects one or more chart layers with the
//! current animation progress and hands the composed [`render::RenderFrame`]
//! to its own [`render::Renderer`]. Hit targets produced by the same pass
//! drive tooltips and selection.

pub mod charts;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use charts::{Drawable, compose_frame};
pub use error::{ChartError, ChartResult};
