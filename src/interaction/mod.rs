//! Pointer hit testing and tooltip state.

mod tooltip;

pub use hit_test::{
    HitRegion, HitTarget, find_hit, find_hit_index, find_nearest_point, is_inside_rect,
    tap_radius,
};
pub use tooltip::{
    TooltipConfig, TooltipManager, TooltipPadding, TooltipPlacement, TooltipPosition,
    TooltipSource, TooltipState, resolve_tooltip_placement,
};
