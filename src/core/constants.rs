/// Touch target inflation applied to point markers during hit testing.
pub const TAP_RADIUS_MULTIPLIER: f64 = 2.5;
/// Extra radius drawn around a highlighted point marker.
pub const HIGHLIGHT_RADIUS_OFFSET: f64 = 2.0;
pub const DEFAULT_AXIS_STEPS: u32 = 6;
pub const DEFAULT_STEP_SIZE: u32 = 10;
/// Minimum distance kept between a tooltip and the canvas edge.
pub const MIN_EDGE_MARGIN: f64 = 8.0;
/// Label lists longer than this are sampled on candlestick x axes.
pub const MAX_UNSAMPLED_X_LABELS: usize = 10;
/// Default padding used for candlestick price ranges.
pub const DEFAULT_PRICE_PADDING: f64 = 0.05;
