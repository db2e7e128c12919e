//! Pie and donut slices laid out as accumulated sweeps from a start angle.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::charts::reference_line::{EstimatedTextMeasurer, TextMeasurer};
use crate::charts::{Drawable, clamp_progress};
use crate::core::{Animation, ChartPoint, Point, Rect};
use crate::error::{
    ChartError, ChartResult, ensure_config_non_negative, ensure_config_positive,
    ensure_config_range, ensure_finite, ensure_label,
};
use crate::render::{
    ArcPrimitive, Color, Paint, RenderFrame, ShapeStyle, StrokeCap, TextHAlign, TextPrimitive,
};

/// Outer radius as a fraction of half the shorter bounds side.
pub const PIE_RADIUS_FRACTION: f64 = 0.8;
pub const MAX_DONUT_HOLE_RATIO: f64 = 0.9;
pub const MAX_SLICE_SPACING_DEGREES: f64 = 10.0;

const PIE_LABEL_RADIUS_FRACTION: f64 = 0.65;
const LABEL_PROGRESS_THRESHOLD: f64 = 0.5;
const FULL_CIRCLE: f64 = 360.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieData {
    label: String,
    value: f64,
    color: Option<Paint>,
}

impl PieData {
    /// Slices must carry a strictly positive value and a non-blank label.
    pub fn new(label: impl Into<String>, value: f64) -> ChartResult<Self> {
        let label = label.into();
        ensure_label(&label, "pie slice label")?;
        ensure_finite(value, "pie slice value")?;
        if value <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "pie slice value must be > 0, got {value}"
            )));
        }
        Ok(Self {
            label,
            value,
            color: None,
        })
    }

    pub fn with_color(mut self, color: Paint) -> ChartResult<Self> {
        color.validate()?;
        self.color = Some(color);
        Ok(self)
    }

    #[must_use]
    pub fn color(&self) -> Option<&Paint> {
        self.color.as_ref()
    }

    #[must_use]
    pub fn percentage(&self, total: f64) -> f64 {
        if total > 0.0 {
            self.value / total * 100.0
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn sweep_angle(&self, total: f64) -> f64 {
        if total > 0.0 {
            self.value / total * FULL_CIRCLE
        } else {
            0.0
        }
    }
}

impl ChartPoint for PieData {
    fn label(&self) -> &str {
        &self.label
    }

    fn value(&self) -> f64 {
        self.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PieChartStyle {
    #[default]
    Pie,
    Donut,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieLabelConfig {
    pub show_labels: bool,
    pub show_percentage: bool,
    pub show_value: bool,
    /// Slices below this share (in percent) get no label.
    pub min_percentage_to_show_label: f64,
    pub font_size_px: f64,
    pub color: Color,
}

impl Default for PieLabelConfig {
    fn default() -> Self {
        Self {
            show_labels: true,
            show_percentage: true,
            show_value: false,
            min_percentage_to_show_label: 3.0,
            font_size_px: 12.0,
            color: Color::WHITE,
        }
    }
}

impl PieLabelConfig {
    pub fn validate(&self) -> ChartResult<()> {
        ensure_config_range(
            self.min_percentage_to_show_label,
            0.0,
            100.0,
            "minimum label percentage",
        )?;
        ensure_config_positive(self.font_size_px, "pie label font size")?;
        self.color.validate()
    }

    /// Percentage truncated to one decimal, then the integral value, one per line.
    fn text_for(&self, slice: &PieData, percentage: f64) -> Option<String> {
        let mut lines = Vec::with_capacity(2);
        if self.show_percentage {
            lines.push(format!("{:.1}%", (percentage * 10.0).trunc() / 10.0));
        }
        if self.show_value {
            lines.push(format!("{}", slice.value.trunc()));
        }
        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }
}

/// Tap selection behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieInteractionConfig {
    pub enabled: bool,
    pub selected_scale_multiplier: f64,
    pub selected_pull_out_distance: f64,
    pub selection_animation_duration_ms: u32,
    pub unselected_slice_opacity: f64,
}

impl Default for PieInteractionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            selected_scale_multiplier: 1.1,
            selected_pull_out_distance: 8.0,
            selection_animation_duration_ms: 200,
            unselected_slice_opacity: 0.6,
        }
    }
}

impl PieInteractionConfig {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.selected_scale_multiplier.is_finite() || self.selected_scale_multiplier < 1.0 {
            return Err(ChartError::InvalidConfig(
                "selected scale multiplier must be finite and >= 1".to_owned(),
            ));
        }
        ensure_config_non_negative(self.selected_pull_out_distance, "selected pull-out distance")?;
        if self.selection_animation_duration_ms == 0 {
            return Err(ChartError::InvalidConfig(
                "selection animation duration must be > 0".to_owned(),
            ));
        }
        ensure_config_range(
            self.unselected_slice_opacity,
            0.0,
            1.0,
            "unselected slice opacity",
        )
    }

    /// Animation driving the selected slice's scale from 1 to the multiplier.
    #[must_use]
    pub fn selection_animation(&self) -> Animation {
        Animation::Enabled {
            duration_ms: self.selection_animation_duration_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChartConfig {
    pub style: PieChartStyle,
    pub donut_hole_ratio: f64,
    pub start_angle_degrees: f64,
    pub slice_spacing_degrees: f64,
    pub labels: PieLabelConfig,
    pub interaction: PieInteractionConfig,
    pub animation: Animation,
    /// Donut only: the integral total is drawn in the hole.
    pub show_center_text: bool,
    pub center_text_font_size: f64,
    pub center_text_color: Color,
}

impl Default for PieChartConfig {
    fn default() -> Self {
        Self {
            style: PieChartStyle::Pie,
            donut_hole_ratio: 0.5,
            start_angle_degrees: -90.0,
            slice_spacing_degrees: 0.0,
            labels: PieLabelConfig::default(),
            interaction: PieInteractionConfig::default(),
            animation: Animation::default(),
            show_center_text: false,
            center_text_font_size: 16.0,
            center_text_color: Color::BLACK,
        }
    }
}

impl PieChartConfig {
    #[must_use]
    pub fn donut() -> Self {
        Self {
            style: PieChartStyle::Donut,
            ..Self::default()
        }
    }

    pub fn with_donut_hole_ratio(mut self, ratio: f64) -> ChartResult<Self> {
        self.donut_hole_ratio = ratio;
        self.validate()?;
        Ok(self)
    }

    pub fn with_start_angle(mut self, degrees: f64) -> ChartResult<Self> {
        self.start_angle_degrees = degrees;
        self.validate()?;
        Ok(self)
    }

    pub fn with_slice_spacing(mut self, degrees: f64) -> ChartResult<Self> {
        self.slice_spacing_degrees = degrees;
        self.validate()?;
        Ok(self)
    }

    pub fn with_labels(mut self, labels: PieLabelConfig) -> ChartResult<Self> {
        self.labels = labels;
        self.validate()?;
        Ok(self)
    }

    pub fn with_interaction(mut self, interaction: PieInteractionConfig) -> ChartResult<Self> {
        self.interaction = interaction;
        self.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn with_center_text(mut self, show_center_text: bool) -> Self {
        self.show_center_text = show_center_text;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        ensure_config_range(
            self.donut_hole_ratio,
            0.0,
            MAX_DONUT_HOLE_RATIO,
            "donut hole ratio",
        )?;
        ensure_config_range(
            self.slice_spacing_degrees,
            0.0,
            MAX_SLICE_SPACING_DEGREES,
            "slice spacing degrees",
        )?;
        if !self.start_angle_degrees.is_finite() {
            return Err(ChartError::InvalidConfig(
                "start angle must be finite".to_owned(),
            ));
        }
        ensure_config_positive(self.center_text_font_size, "center text font size")?;
        self.center_text_color.validate()?;
        self.labels.validate()?;
        self.interaction.validate()?;
        self.animation.validate()
    }

    fn inner_radius(&self, outer_radius: f64) -> f64 {
        match self.style {
            PieChartStyle::Pie => 0.0,
            PieChartStyle::Donut => outer_radius * self.donut_hole_ratio,
        }
    }

    fn label_radius(&self, outer_radius: f64) -> f64 {
        match self.style {
            PieChartStyle::Pie => outer_radius * PIE_LABEL_RADIUS_FRACTION,
            PieChartStyle::Donut => outer_radius * (1.0 - self.donut_hole_ratio / 2.0),
        }
    }
}

impl_json_config!(PieChartConfig, "pie chart config");

/// Currently selected slice and how far its selection animation has run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieSelection {
    pub index: usize,
    pub progress: f64,
}

impl PieSelection {
    #[must_use]
    pub fn settled(index: usize) -> Self {
        Self {
            index,
            progress: 1.0,
        }
    }
}

/// Outer radius and center for slices laid out inside `bounds`.
#[must_use]
pub fn pie_frame(bounds: Rect) -> (Point, f64) {
    let radius = bounds.width().min(bounds.height()) / 2.0 * PIE_RADIUS_FRACTION;
    (bounds.center(), radius.max(0.0))
}

/// Per-slice colors when every slice carries one, else the palette cycled.
#[must_use]
pub fn slice_paints(slices: &[PieData], palette: &Paint) -> Vec<Paint> {
    let custom: Vec<Paint> = slices.iter().filter_map(|s| s.color().cloned()).collect();
    if custom.len() == slices.len() {
        return custom;
    }
    (0..slices.len())
        .map(|index| palette.palette_entry(index))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSliceGeometry {
    pub index: usize,
    /// Unpadded extent; the drawn arc is inset by half the slice spacing on each side.
    pub start_angle: f64,
    pub sweep_angle: f64,
    pub percentage: f64,
    pub arc: ArcPrimitive,
    pub label: Option<TextPrimitive>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieGeometry {
    pub center: Point,
    pub radius: f64,
    pub inner_radius: f64,
    pub total: f64,
    pub slices: Vec<PieSliceGeometry>,
    pub center_text: Option<TextPrimitive>,
}

impl PieGeometry {
    /// Sum of drawn sweeps, i.e. after slice spacing is removed.
    #[must_use]
    pub fn drawn_sweep_total(&self) -> f64 {
        self.slices.iter().map(|slice| slice.arc.sweep_angle).sum()
    }
}

impl Drawable for PieGeometry {
    fn append_to(&self, frame: &mut RenderFrame) {
        frame.extend(self.slices.iter().map(|slice| slice.arc.clone()));
        frame.extend(self.slices.iter().filter_map(|slice| slice.label.clone()));
        if let Some(text) = &self.center_text {
            frame.push(text.clone());
        }
    }
}

fn total_value(slices: &[PieData]) -> ChartResult<f64> {
    let total: f64 = slices.iter().map(|slice| slice.value).sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(ChartError::InvalidData(
            "pie chart total must be finite and > 0".to_owned(),
        ));
    }
    Ok(total)
}

/// Projects slices into `bounds`.
///
/// Sweeps scale with `progress`; labels only appear past half progress. A
/// selection scales and pulls out its slice along the bisector and dims the
/// others when interaction is enabled. No slices yield an empty geometry.
pub fn project_pie(
    slices: &[PieData],
    config: &PieChartConfig,
    bounds: Rect,
    palette: &Paint,
    progress: f64,
    selection: Option<PieSelection>,
) -> ChartResult<PieGeometry> {
    config.validate()?;
    let (center, radius) = pie_frame(bounds);
    if slices.is_empty() {
        debug!("pie chart has no slices");
        return Ok(PieGeometry {
            center,
            radius,
            inner_radius: config.inner_radius(radius),
            total: 0.0,
            slices: Vec::new(),
            center_text: None,
        });
    }
    let total = total_value(slices)?;
    let progress = clamp_progress(progress);
    let paints = slice_paints(slices, palette);
    let measurer = EstimatedTextMeasurer;
    let interaction = &config.interaction;
    let selection = selection.filter(|_| interaction.enabled);
    let spacing = config.slice_spacing_degrees;

    let mut geometry = PieGeometry {
        center,
        radius,
        inner_radius: config.inner_radius(radius),
        total,
        slices: Vec::with_capacity(slices.len()),
        center_text: None,
    };

    let mut current_angle = config.start_angle_degrees;
    for (index, slice) in slices.iter().enumerate() {
        let sweep = slice.sweep_angle(total) * progress;
        if sweep <= 0.0 {
            continue;
        }
        let percentage = slice.percentage(total);
        let bisector = current_angle + sweep / 2.0;

        let selected = selection.filter(|s| s.index == index);
        let scale = selected.map_or(1.0, |s| {
            1.0 + (interaction.selected_scale_multiplier - 1.0) * clamp_progress(s.progress)
        });
        let alpha = match (selection, selected) {
            (Some(_), None) => interaction.unselected_slice_opacity,
            _ => 1.0,
        };
        let draw_center = match selected {
            Some(_) => center.polar_offset(interaction.selected_pull_out_distance, bisector),
            None => center,
        };
        let slice_radius = radius * scale;

        let start = current_angle + spacing / 2.0;
        let drawn_sweep = (sweep - spacing).max(0.0);
        let paint = paints[index].clone();
        let arc = match config.style {
            PieChartStyle::Pie => ArcPrimitive::new(
                draw_center,
                slice_radius,
                start,
                drawn_sweep,
                ShapeStyle::Fill,
                paint,
            )
            .with_center_wedge(),
            PieChartStyle::Donut => {
                let stroke_width = slice_radius * (1.0 - config.donut_hole_ratio);
                ArcPrimitive::new(
                    draw_center,
                    slice_radius - stroke_width / 2.0,
                    start,
                    drawn_sweep,
                    ShapeStyle::Stroke {
                        width: stroke_width,
                        cap: StrokeCap::Butt,
                    },
                    paint,
                )
            }
        }
        .with_alpha(alpha);

        let label = if config.labels.show_labels
            && percentage >= config.labels.min_percentage_to_show_label
            && progress > LABEL_PROGRESS_THRESHOLD
        {
            config.labels.text_for(slice, percentage).map(|text| {
                let line_count = text.lines().count() as f64;
                let size = measurer.measure(&text, config.labels.font_size_px);
                let anchor = draw_center.polar_offset(config.label_radius(slice_radius), bisector);
                TextPrimitive::new(
                    text,
                    anchor.x,
                    anchor.y - size.height * line_count / 2.0,
                    config.labels.font_size_px,
                    config.labels.color,
                    TextHAlign::Center,
                )
            })
        } else {
            None
        };

        geometry.slices.push(PieSliceGeometry {
            index,
            start_angle: current_angle,
            sweep_angle: sweep,
            percentage,
            arc,
            label,
        });
        current_angle += sweep;
    }

    if config.style == PieChartStyle::Donut && config.show_center_text {
        let text = format!("{}", total.trunc());
        let size = measurer.measure(&text, config.center_text_font_size);
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
        slices = geometry.slices.len(),
        total,
        radius,
        progress,
        "projected pie chart"
    );
    Ok(geometry)
}

/// Index of the slice under `pointer`, using the settled (unanimated,
/// unselected) layout.
#[must_use]
pub fn find_clicked_slice(
    pointer: Point,
    bounds: Rect,
    slices: &[PieData],
    config: &PieChartConfig,
) -> Option<usize> {
    let total = total_value(slices).ok()?;
    let (center, radius) = pie_frame(bounds);
    let distance = pointer.distance_to(center);
    if distance < config.inner_radius(radius) || distance > radius {
        trace!(distance, radius, "pie tap outside ring");
        return None;
    }

    let touch_angle = (pointer.y - center.y)
        .atan2(pointer.x - center.x)
        .to_degrees()
        .rem_euclid(FULL_CIRCLE);
    let normalized = (touch_angle - config.start_angle_degrees).rem_euclid(FULL_CIRCLE);

    let mut current = 0.0;
    for (index, slice) in slices.iter().enumerate() {
        let sweep = slice.sweep_angle(total);
        if normalized >= current && normalized < current + sweep {
            return Some(index);
        }
        current += sweep;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{PieChartConfig, PieData, PieLabelConfig};

    #[test]
    fn label_text_truncates_percentage_and_stacks_value() {
        let slice = PieData::new("a", 42.9).expect("valid slice");
        let labels = PieLabelConfig {
            show_value: true,
            ..PieLabelConfig::default()
        };
        assert_eq!(labels.text_for(&slice, 33.339).as_deref(), Some("33.3%\n42"));

        let hidden = PieLabelConfig {
            show_percentage: false,
            ..PieLabelConfig::default()
        };
        assert_eq!(hidden.text_for(&slice, 10.0), None);
    }

    #[test]
    fn donut_label_radius_sits_mid_ring() {
        let config = PieChartConfig::donut();
        assert!((config.label_radius(100.0) - 75.0).abs() <= 1e-9);
        assert!((config.inner_radius(100.0) - 50.0).abs() <= 1e-9);
    }
}
