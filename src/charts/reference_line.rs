//! Target/average lines drawn across the plot at a fixed value.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::charts::Drawable;
use crate::core::{ChartContext, ChartOrientation, Point, format_axis_label};
use crate::error::{
    ChartError, ChartResult, ensure_config_non_negative, ensure_config_positive, ensure_finite,
};
use crate::render::{
    Color, LinePrimitive, LineStrokeStyle, Paint, RenderFrame, StrokeCap, TextHAlign,
    TextPrimitive,
};

const DEFAULT_DASH_INTERVAL: f64 = 10.0;
const LINE_HEIGHT_RATIO: f64 = 1.2;

/// Measured extent of a laid out label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

/// Text measurement seam for label placement.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> TextSize;
}

/// Deterministic glyph-class estimate, independent of any font backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EstimatedTextMeasurer;

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> TextSize {
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.62,
                '.' | ',' => 0.34,
                '-' | '+' | '%' => 0.42,
                ' ' => 0.33,
                _ => 0.58,
            }
        });
        TextSize {
            width: units * font_size_px,
            height: font_size_px * LINE_HEIGHT_RATIO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReferenceLineStrokeStyle {
    Solid,
    #[default]
    Dashed,
}

/// Label placement relative to the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReferenceLineLabelPosition {
    Start,
    Center,
    End,
    #[default]
    Above,
    Below,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLineConfig {
    pub enabled: bool,
    pub value: f64,
    pub color: Color,
    pub stroke_width: f64,
    pub stroke_style: ReferenceLineStrokeStyle,
    /// Custom dash pattern; `None` falls back to `[10, 10]`.
    pub dash_intervals: Option<Vec<f64>>,
    pub label: Option<String>,
    pub show_value_in_label_when_no_text: bool,
    pub label_color: Color,
    pub label_font_size: f64,
    pub label_position: ReferenceLineLabelPosition,
    pub label_offset: f64,
}

impl ReferenceLineConfig {
    /// Enabled dashed red line at `value`.
    pub fn new(value: f64) -> ChartResult<Self> {
        ensure_finite(value, "reference line value")?;
        Ok(Self {
            enabled: true,
            value,
            color: Color::rgb(1.0, 0.0, 0.0),
            stroke_width: 2.0,
            stroke_style: ReferenceLineStrokeStyle::Dashed,
            dash_intervals: None,
            label: None,
            show_value_in_label_when_no_text: true,
            label_color: Color::BLACK,
            label_font_size: 12.0,
            label_position: ReferenceLineLabelPosition::Above,
            label_offset: 4.0,
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_stroke_width(mut self, stroke_width: f64) -> ChartResult<Self> {
        self.stroke_width = stroke_width;
        self.validate()?;
        Ok(self)
    }

    pub fn with_stroke_style(mut self, stroke_style: ReferenceLineStrokeStyle) -> Self {
        self.stroke_style = stroke_style;
        self
    }

    pub fn with_dash_intervals(mut self, intervals: Vec<f64>) -> ChartResult<Self> {
        self.dash_intervals = Some(intervals);
        self.validate()?;
        Ok(self)
    }

    pub fn with_label_position(mut self, position: ReferenceLineLabelPosition) -> Self {
        self.label_position = position;
        self
    }

    pub fn with_label_offset(mut self, label_offset: f64) -> ChartResult<Self> {
        self.label_offset = label_offset;
        self.validate()?;
        Ok(self)
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        ensure_finite(self.value, "reference line value")?;
        ensure_config_positive(self.stroke_width, "reference line stroke width")?;
        ensure_config_non_negative(self.label_offset, "reference line label offset")?;
        ensure_config_positive(self.label_font_size, "reference line label font size")?;
        if let Some(intervals) = &self.dash_intervals {
            if intervals.is_empty() {
                return Err(ChartError::InvalidConfig(
                    "reference line dash intervals must not be empty".to_owned(),
                ));
            }
            for interval in intervals {
                ensure_config_positive(*interval, "reference line dash interval")?;
            }
        }
        self.color.validate()?;
        self.label_color.validate()
    }

    /// Explicit label, else the formatted value when allowed. A blank label
    /// counts as no label.
    #[must_use]
    pub fn label_text(&self) -> Option<String> {
        match self.label.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => Some(label.to_owned()),
            _ if self.show_value_in_label_when_no_text => Some(format_axis_label(self.value)),
            _ => None,
        }
    }

    fn line_style(&self) -> LineStrokeStyle {
        match self.stroke_style {
            ReferenceLineStrokeStyle::Solid => LineStrokeStyle::Solid,
            ReferenceLineStrokeStyle::Dashed => LineStrokeStyle::Dashed(
                self.dash_intervals
                    .clone()
                    .unwrap_or_else(|| vec![DEFAULT_DASH_INTERVAL, DEFAULT_DASH_INTERVAL]),
            ),
        }
    }
}

impl_json_config!(ReferenceLineConfig, "reference line config");

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLineGeometry {
    pub line: LinePrimitive,
    pub label: Option<TextPrimitive>,
}

impl Drawable for ReferenceLineGeometry {
    fn append_to(&self, frame: &mut RenderFrame) {
        frame.push(self.line.clone());
        if let Some(label) = &self.label {
            frame.push(label.clone());
        }
    }
}

/// Line across the plot at `config.value`.
///
/// Returns `None` when disabled, when the range is degenerate, or when the
/// value falls outside it. Vertical charts get a horizontal line; horizontal
/// charts get a vertical one.
pub fn project_reference_line(
    config: &ReferenceLineConfig,
    ctx: ChartContext,
    orientation: ChartOrientation,
    measurer: &dyn TextMeasurer,
) -> ChartResult<Option<ReferenceLineGeometry>> {
    config.validate()?;
    if !config.enabled {
        return Ok(None);
    }
    if ctx.value_range() == 0.0 || !ctx.contains_value(config.value) {
        trace!(
            value = config.value,
            min = ctx.min_value(),
            max = ctx.max_value(),
            "reference line outside range"
        );
        return Ok(None);
    }

    let (start, end) = match orientation {
        ChartOrientation::Vertical => {
            let y = ctx.convert_value_to_y(config.value);
            (Point::new(ctx.left(), y), Point::new(ctx.right(), y))
        }
        ChartOrientation::Horizontal => {
            let x = ctx.convert_value_to_x(config.value);
            (Point::new(x, ctx.top()), Point::new(x, ctx.bottom()))
        }
    };
    let line = LinePrimitive::new(start, end, config.stroke_width, Paint::solid(config.color))
        .with_cap(StrokeCap::Butt)
        .with_style(config.line_style());

    let label = config.label_text().map(|text| {
        let size = measurer.measure(&text, config.label_font_size);
        let top_left = match orientation {
            ChartOrientation::Vertical => horizontal_line_label(config, ctx, start.y, size),
            ChartOrientation::Horizontal => vertical_line_label(config, ctx, start.x, size),
        };
        TextPrimitive::new(
            text,
            top_left.x,
            top_left.y,
            config.label_font_size,
            config.label_color,
            TextHAlign::Left,
        )
    });

    Ok(Some(ReferenceLineGeometry { line, label }))
}

/// Chart-level reference line, measured with [`EstimatedTextMeasurer`].
/// A chart without items draws nothing, so it gets no line either.
pub(crate) fn project_configured(
    config: Option<&ReferenceLineConfig>,
    item_count: usize,
    ctx: ChartContext,
    orientation: ChartOrientation,
) -> ChartResult<Option<ReferenceLineGeometry>> {
    match config {
        Some(config) if item_count > 0 => {
            project_reference_line(config, ctx, orientation, &EstimatedTextMeasurer)
        }
        _ => Ok(None),
    }
}

fn horizontal_line_label(
    config: &ReferenceLineConfig,
    ctx: ChartContext,
    y: f64,
    size: TextSize,
) -> Point {
    use ReferenceLineLabelPosition::{Above, Below, Center, End, Start};

    let x = match config.label_position {
        Start => ctx.left(),
        Center | Above | Below => ctx.left() + (ctx.width() - size.width) / 2.0,
        End => ctx.right() - size.width,
    };
    let y = match config.label_position {
        Above | Start | End => y - config.label_offset - size.height,
        Below => y + config.label_offset,
        Center => y - size.height / 2.0,
    };
    Point::new(x, y)
}

fn vertical_line_label(
    config: &ReferenceLineConfig,
    ctx: ChartContext,
    x: f64,
    size: TextSize,
) -> Point {
    use ReferenceLineLabelPosition::{Above, Below, Center, End, Start};

    let y = match config.label_position {
        Start => ctx.bottom() - size.height,
        Center | Above | Below => ctx.top() + (ctx.height() - size.height) / 2.0,
        End => ctx.top(),
    };
    let x = match config.label_position {
        Above | Start | End => x - size.width - config.label_offset,
        Below => x + config.label_offset,
        Center => x - size.width / 2.0,
    };
    Point::new(x, y)
}
