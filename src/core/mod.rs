pub mod animation;
pub mod axis;
pub mod constants;
pub mod context;
pub mod convert;
pub mod corner_radius;
pub mod data;
pub mod types;
pub mod value_range;

pub use animation::{Animation, AnimationController, Easing};
pub use axis::{
    AxisConfig, ChartAxisConfig, ChartOrientation, LabelRotation, NegativeValuesDrawMode,
    format_axis_label, sample_x_labels, sampled_label_indices,
};
pub use context::ChartContext;
pub use corner_radius::{CornerRadii, CornerRadius};
pub use data::{BarGroup, ChartPoint, DataPoint, LineGroup, Span};
pub use types::{Point, Rect, Viewport};
pub use value_range::{
    ValueRangeOptions, calculate_max_value, calculate_min_max_value,
    calculate_min_max_with_padding, calculate_min_value, calculate_value_range, nice_range,
};
