//! Concentric progress rings, outermost first.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::charts::reference_line::{EstimatedTextMeasurer, TextMeasurer};
use crate::charts::{Drawable, clamp_progress};
use crate::core::{Animation, Point, Rect};
use crate::error::{
    ChartError, ChartResult, ensure_config_non_negative, ensure_config_positive,
    ensure_config_range, ensure_finite, ensure_label,
};
use crate::render::{
    ArcPrimitive, Color, Paint, RenderFrame, ShapeStyle, StrokeCap, TextHAlign, TextPrimitive,
};

const FULL_CIRCLE: f64 = 360.0;
const SHADOW_LAYERS: u32 = 4;
const SHADOW_BASE_ALPHA: f64 = 0.15;
const BACKGROUND_ALPHA: f64 = 0.2;
const MIN_STROKE_WIDTH: f64 = 1.0;

/// One ring. `M` is caller-owned payload handed back on taps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircularRingData<M = ()> {
    label: String,
    progress: f64,
    max_value: f64,
    color: Paint,
    background_color: Option<Paint>,
    shadow_color: Option<Color>,
    shadow_radius: f64,
    metadata: Option<M>,
}

impl<M> CircularRingData<M> {
    /// Ring with `max_value = 100`.
    pub fn new(label: impl Into<String>, progress: f64, color: Paint) -> ChartResult<Self> {
        Self::with_max_value(label, progress, 100.0, color)
    }

    pub fn with_max_value(
        label: impl Into<String>,
        progress: f64,
        max_value: f64,
        color: Paint,
    ) -> ChartResult<Self> {
        let label = label.into();
        ensure_label(&label, "ring label")?;
        ensure_finite(progress, "ring progress")?;
        ensure_finite(max_value, "ring max value")?;
        if progress < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "ring progress must be >= 0, got {progress}"
            )));
        }
        if max_value <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "ring max value must be > 0, got {max_value}"
            )));
        }
        color.validate()?;
        Ok(Self {
            label,
            progress,
            max_value,
            color,
            background_color: None,
            shadow_color: None,
            shadow_radius: 0.0,
            metadata: None,
        })
    }

    pub fn with_background_color(mut self, background_color: Paint) -> ChartResult<Self> {
        background_color.validate()?;
        self.background_color = Some(background_color);
        Ok(self)
    }

    pub fn with_shadow(mut self, color: Color, radius: f64) -> ChartResult<Self> {
        color.validate()?;
        ensure_finite(radius, "ring shadow radius")?;
        if radius < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "ring shadow radius must be >= 0, got {radius}"
            )));
        }
        self.shadow_color = Some(color);
        self.shadow_radius = radius;
        Ok(self)
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: M) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Same ring with progress clamped into `[0, max_value]`.
    #[must_use]
    pub fn with_clamped_progress(mut self, progress: f64) -> Self {
        self.progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, self.max_value)
        };
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    #[must_use]
    pub fn metadata(&self) -> Option<&M> {
        self.metadata.as_ref()
    }

    #[must_use]
    pub fn shadow_radius(&self) -> f64 {
        self.shadow_radius
    }

    #[must_use]
    pub fn percentage(&self) -> f64 {
        (self.progress / self.max_value * 100.0).clamp(0.0, 100.0)
    }

    #[must_use]
    pub fn sweep_angle(&self) -> f64 {
        (self.progress / self.max_value * FULL_CIRCLE).clamp(0.0, FULL_CIRCLE)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress >= self.max_value
    }

    #[must_use]
    pub fn primary_color(&self) -> Color {
        self.color
            .colors()
            .first()
            .copied()
            .unwrap_or(Color::TRANSPARENT)
    }

    /// Explicit background, else the primary color at 20% alpha.
    #[must_use]
    pub fn background_color(&self) -> Color {
        self.background_color
            .as_ref()
            .and_then(|paint| paint.colors().first().copied())
            .unwrap_or_else(|| self.primary_color().with_alpha(BACKGROUND_ALPHA))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RingDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircularRingConfig {
    pub gap_between_rings: f64,
    pub start_angle_degrees: f64,
    pub direction: RingDirection,
    pub stroke_cap: StrokeCap,
    pub animation: Animation,
    pub enable_shadows: bool,
    pub center_hole_ratio: f64,
    pub rotation_enabled: bool,
    pub rotation_duration_ms: u32,
    pub interaction_enabled: bool,
    pub show_center_text: bool,
    pub padding_px: f64,
    pub center_text_font_size: f64,
    pub center_text_color: Color,
}

impl Default for CircularRingConfig {
    fn default() -> Self {
        Self {
            gap_between_rings: 8.0,
            start_angle_degrees: -90.0,
            direction: RingDirection::Clockwise,
            stroke_cap: StrokeCap::Round,
            animation: Animation::default(),
            enable_shadows: false,
            center_hole_ratio: 0.0,
            rotation_enabled: false,
            rotation_duration_ms: 3000,
            interaction_enabled: true,
            show_center_text: false,
            padding_px: 16.0,
            center_text_font_size: 24.0,
            center_text_color: Color::BLACK,
        }
    }
}

impl CircularRingConfig {
    pub fn with_gap_between_rings(mut self, gap: f64) -> ChartResult<Self> {
        self.gap_between_rings = gap;
        self.validate()?;
        Ok(self)
    }

    pub fn with_center_hole_ratio(mut self, ratio: f64) -> ChartResult<Self> {
        self.center_hole_ratio = ratio;
        self.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn with_direction(mut self, direction: RingDirection) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn with_shadows(mut self, enable_shadows: bool) -> Self {
        self.enable_shadows = enable_shadows;
        self
    }

    #[must_use]
    pub fn with_center_text(mut self, show_center_text: bool) -> Self {
        self.show_center_text = show_center_text;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        ensure_config_non_negative(self.gap_between_rings, "gap between rings")?;
        ensure_config_range(self.center_hole_ratio, 0.0, 0.5, "center hole ratio")?;
        if self.rotation_duration_ms == 0 {
            return Err(ChartError::InvalidConfig(
                "rotation duration must be > 0".to_owned(),
            ));
        }
        ensure_config_non_negative(self.padding_px, "ring padding")?;
        if !self.start_angle_degrees.is_finite() {
            return Err(ChartError::InvalidConfig(
                "ring start angle must be finite".to_owned(),
            ));
        }
        ensure_config_positive(self.center_text_font_size, "center text font size")?;
        self.center_text_color.validate()?;
        self.animation.validate()
    }

    /// Continuous spin offset after `elapsed`; 0 when rotation is off.
    #[must_use]
    pub fn rotation_angle(&self, elapsed: Duration) -> f64 {
        if !self.rotation_enabled || self.rotation_duration_ms == 0 {
            return 0.0;
        }
        let period = f64::from(self.rotation_duration_ms);
        let phase = (elapsed.as_secs_f64() * 1000.0).rem_euclid(period) / period;
        phase * FULL_CIRCLE
    }

    fn signed_sweep(&self, sweep: f64) -> f64 {
        match self.direction {
            RingDirection::Clockwise => sweep,
            RingDirection::CounterClockwise => -sweep,
        }
    }
}

impl_json_config!(CircularRingConfig, "circular ring config");

/// Equal stroke share of the radius left after the hole and the gaps, at least 1 px.
#[must_use]
pub fn ring_stroke_width(radius: f64, config: &CircularRingConfig, ring_count: usize) -> f64 {
    if ring_count == 0 {
        return 0.0;
    }
    let available = radius - radius * config.center_hole_ratio;
    let gaps = config.gap_between_rings * (ring_count - 1) as f64;
    ((available - gaps) / ring_count as f64).max(MIN_STROKE_WIDTH)
}

/// Centerline radius of ring `index`, counted from the outside.
///
/// Goes to zero or below once the gaps and the 1 px stroke floor use up the
/// radius; such rings are neither drawn nor hittable.
#[must_use]
pub fn ring_radius(index: usize, radius: f64, gap: f64, stroke_width: f64) -> f64 {
    radius - index as f64 * (stroke_width + gap) - stroke_width / 2.0
}

/// Rings that still have room inside the frame.
#[must_use]
pub fn visible_ring_count(radius: f64, config: &CircularRingConfig, ring_count: usize) -> usize {
    let stroke_width = ring_stroke_width(radius, config, ring_count);
    (0..ring_count)
        .take_while(|&index| {
            ring_radius(index, radius, config.gap_between_rings, stroke_width) > 0.0
        })
        .count()
}

/// Center and outer radius after padding.
#[must_use]
pub fn ring_frame(bounds: Rect, config: &CircularRingConfig) -> (Point, f64) {
    let inner = bounds.inset(config.padding_px);
    (inner.center(), inner.width().min(inner.height()) / 2.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct RingGeometry {
    pub index: usize,
    pub radius: f64,
    pub background: ArcPrimitive,
    pub shadow: Vec<ArcPrimitive>,
    pub progress: Option<ArcPrimitive>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CircularRingGeometry {
    pub center: Point,
    pub stroke_width: f64,
    pub rings: Vec<RingGeometry>,
    pub center_text: Option<TextPrimitive>,
}

impl Drawable for CircularRingGeometry {
    fn append_to(&self, frame: &mut RenderFrame) {
        for ring in &self.rings {
            frame.push(ring.background.clone());
            frame.extend(ring.shadow.iter().cloned());
            if let Some(arc) = &ring.progress {
                frame.push(arc.clone());
            }
        }
        if let Some(text) = &self.center_text {
            frame.push(text.clone());
        }
    }
}

/// Projects rings inside `bounds`.
///
/// Each ring's drawn progress is its clamped value times `progress`;
/// `rotation_degrees` offsets every start angle (see
/// [`CircularRingConfig::rotation_angle`]).
pub fn project_rings<M>(
    rings: &[CircularRingData<M>],
    config: &CircularRingConfig,
    bounds: Rect,
    progress: f64,
    rotation_degrees: f64,
) -> ChartResult<CircularRingGeometry> {
    config.validate()?;
    ensure_finite(rotation_degrees, "ring rotation")?;
    let progress = clamp_progress(progress);
    let (center, radius) = ring_frame(bounds, config);
    let stroke_width = ring_stroke_width(radius, config, rings.len());
    let start_angle = config.start_angle_degrees + rotation_degrees;
    let stroke = ShapeStyle::Stroke {
        width: stroke_width,
        cap: config.stroke_cap,
    };

    let mut geometry = CircularRingGeometry {
        center,
        stroke_width,
        rings: Vec::with_capacity(rings.len()),
        center_text: None,
    };
    if rings.is_empty() {
        trace!("no rings to project");
        return Ok(geometry);
    }

    let visible = visible_ring_count(radius, config, rings.len());
    if visible < rings.len() {
        trace!(
            rings = rings.len(),
            visible,
            radius,
            gap = config.gap_between_rings,
            "inner rings do not fit"
        );
    }

    for (index, ring) in rings.iter().enumerate().take(visible) {
        let ring_r = ring_radius(index, radius, config.gap_between_rings, stroke_width);
        let background = ArcPrimitive::new(
            center,
            ring_r,
            start_angle,
            FULL_CIRCLE,
            stroke,
            Paint::solid(ring.background_color()),
        );

        let value = ring.progress.clamp(0.0, ring.max_value) * progress;
        let sweep = (value / ring.max_value * FULL_CIRCLE).clamp(0.0, FULL_CIRCLE);
        let signed = config.signed_sweep(sweep);

        let mut shadow = Vec::new();
        let mut arc = None;
        if sweep > 0.0 {
            if let Some(shadow_color) = ring.shadow_color.filter(|_| {
                config.enable_shadows && ring.shadow_radius > 0.0
            }) {
                for layer in (1..=SHADOW_LAYERS).rev() {
                    let expand = ring.shadow_radius * f64::from(layer) / f64::from(SHADOW_LAYERS);
                    shadow.push(ArcPrimitive::new(
                        center,
                        ring_r + expand / 2.0,
                        start_angle,
                        signed,
                        ShapeStyle::Stroke {
                            width: stroke_width + expand,
                            cap: config.stroke_cap,
                        },
                        Paint::solid(
                            shadow_color.with_alpha(SHADOW_BASE_ALPHA / f64::from(layer)),
                        ),
                    ));
                }
            }
            arc = Some(ArcPrimitive::new(
                center,
                ring_r,
                start_angle,
                signed,
                stroke,
                Paint::solid(ring.primary_color()),
            ));
        }

        geometry.rings.push(RingGeometry {
            index,
            radius: ring_r,
            background,
            shadow,
            progress: arc,
        });
    }

    if config.show_center_text {
        let first = &rings[0];
        let value = first.progress.clamp(0.0, first.max_value) * progress;
        let text = format!("{}%", (value / first.max_value * 100.0).trunc());
        let size = EstimatedTextMeasurer.measure(&text, config.center_text_font_size);
        geometry.center_text = Some(TextPrimitive::new(
            text,
            center.x,
            center.y - size.height / 2.0,
            config.center_text_font_size,
            config.center_text_color,
            TextHAlign::Center,
        ));
    }

    debug!(
        rings = rings.len(),
        radius,
        stroke_width,
        progress,
        "projected circular rings"
    );
    Ok(geometry)
}

/// Index of the ring whose stroke band contains `pointer`.
#[must_use]
pub fn find_clicked_ring(
    pointer: Point,
    bounds: Rect,
    ring_count: usize,
    config: &CircularRingConfig,
) -> Option<usize> {
    if !config.interaction_enabled || ring_count == 0 {
        return None;
    }
    let (center, radius) = ring_frame(bounds, config);
    let stroke_width = ring_stroke_width(radius, config, ring_count);
    let distance = pointer.distance_to(center);
    (0..visible_ring_count(radius, config, ring_count)).find(|&index| {
        let ring_r = ring_radius(index, radius, config.gap_between_rings, stroke_width);
        (distance - ring_r).abs() <= stroke_width / 2.0
    })
}
