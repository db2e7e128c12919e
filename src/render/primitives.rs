use serde::{Deserialize, Serialize};

use crate::core::{CornerRadii, Point, Rect};
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const GRAY: Color = Color::rgb(0.533, 0.533, 0.533);
    pub const LIGHT_GRAY: Color = Color::rgb(0.8, 0.8, 0.8);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from a packed `0xRRGGBB` value.
    #[must_use]
    pub fn from_hex_rgb(rgb: u32) -> Self {
        let channel = |shift: u32| f64::from((rgb >> shift) & 0xFF) / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self::rgba(self.red, self.green, self.blue, alpha)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Opaque fill/stroke descriptor handed through to the renderer.
///
/// Geometry never interprets the colors; gradients are an ordered stop list
/// whose direction is chosen by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Solid(Color),
    Gradient(Vec<Color>),
}

impl Paint {
    #[must_use]
    pub const fn solid(color: Color) -> Self {
        Self::Solid(color)
    }

    /// Builds a gradient paint; at least two stops are required.
    pub fn gradient(stops: Vec<Color>) -> ChartResult<Self> {
        let paint = Self::Gradient(stops);
        paint.validate()?;
        Ok(paint)
    }

    /// Color stops; a solid paint yields its single color.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        match self {
            Self::Solid(color) => std::slice::from_ref(color),
            Self::Gradient(stops) => stops,
        }
    }

    /// Picks a solid paint for the `index`-th series/segment.
    ///
    /// Solid paints repeat, gradient stops are cycled.
    #[must_use]
    pub fn palette_entry(&self, index: usize) -> Paint {
        match self {
            Self::Solid(color) => Self::Solid(*color),
            Self::Gradient(stops) if stops.is_empty() => Self::Solid(Color::TRANSPARENT),
            Self::Gradient(stops) => Self::Solid(stops[index % stops.len()]),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if let Self::Gradient(stops) = self {
            if stops.len() < 2 {
                return Err(ChartError::InvalidData(
                    "gradient paint requires at least two color stops".to_owned(),
                ));
            }
        }
        for color in self.colors() {
            color.validate()?;
        }
        Ok(())
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Self::Solid(color)
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self::Solid(Color::from_hex_rgb(0x2196F3))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrokeCap {
    Butt,
    #[default]
    Round,
    Square,
}

/// Stroke pattern for line primitives.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum LineStrokeStyle {
    #[default]
    Solid,
    /// Alternating on/off lengths in pixels.
    Dashed(Vec<f64>),
}

impl LineStrokeStyle {
    pub fn validate(&self) -> ChartResult<()> {
        if let Self::Dashed(intervals) = self {
            if intervals.is_empty()
                || intervals
                    .iter()
                    .any(|interval| !interval.is_finite() || *interval <= 0.0)
            {
                return Err(ChartError::InvalidData(
                    "dash intervals must be non-empty, finite and > 0".to_owned(),
                ));
            }
        }
        Ok(())
    }
}

/// Whether a closed shape is filled or outlined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShapeStyle {
    Fill,
    Stroke { width: f64, cap: StrokeCap },
}

impl ShapeStyle {
    fn validate(self) -> ChartResult<()> {
        if let Self::Stroke { width, .. } = self {
            if !width.is_finite() || width <= 0.0 {
                return Err(ChartError::InvalidData(
                    "stroke width must be finite and > 0".to_owned(),
                ));
            }
        }
        Ok(())
    }
}

fn validate_alpha(alpha: f64) -> ChartResult<()> {
    if alpha.is_finite() && (0.0..=1.0).contains(&alpha) {
        Ok(())
    } else {
        Err(ChartError::InvalidData(
            "primitive alpha must be finite and in [0, 1]".to_owned(),
        ))
    }
}

fn validate_point(point: Point, what: &str) -> ChartResult<()> {
    if point.x.is_finite() && point.y.is_finite() {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!(
            "{what} coordinates must be finite"
        )))
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub start: Point,
    pub end: Point,
    pub stroke_width: f64,
    pub paint: Paint,
    pub alpha: f64,
    pub cap: StrokeCap,
    pub style: LineStrokeStyle,
}

impl LinePrimitive {
    #[must_use]
    pub fn new(start: Point, end: Point, stroke_width: f64, paint: Paint) -> Self {
        Self {
            start,
            end,
            stroke_width,
            paint,
            alpha: 1.0,
            cap: StrokeCap::Butt,
            style: LineStrokeStyle::Solid,
        }
    }

    #[must_use]
    pub fn with_cap(mut self, cap: StrokeCap) -> Self {
        self.cap = cap;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: LineStrokeStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_point(self.start, "line")?;
        validate_point(self.end, "line")?;
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        validate_alpha(self.alpha)?;
        self.style.validate()?;
        self.paint.validate()
    }
}

/// Filled rectangle with optional per-corner rounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub rect: Rect,
    pub corner_radii: CornerRadii,
    pub paint: Paint,
    pub alpha: f64,
}

impl RectPrimitive {
    #[must_use]
    pub fn new(rect: Rect, paint: Paint) -> Self {
        Self {
            rect,
            corner_radii: CornerRadii::ZERO,
            paint,
            alpha: 1.0,
        }
    }

    #[must_use]
    pub fn with_corner_radii(mut self, corner_radii: CornerRadii) -> Self {
        self.corner_radii = corner_radii;
        self
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.rect.is_finite() {
            return Err(ChartError::InvalidData(
                "rect coordinates must be finite".to_owned(),
            ));
        }
        if self.rect.width() < 0.0 || self.rect.height() < 0.0 {
            return Err(ChartError::InvalidData(
                "rect must have non-negative width and height".to_owned(),
            ));
        }
        validate_alpha(self.alpha)?;
        self.paint.validate()
    }
}

/// One path command in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    Close,
}

impl PathCommand {
    fn points(self) -> impl Iterator<Item = Point> {
        let (a, b, c) = match self {
            Self::MoveTo(p) | Self::LineTo(p) => (Some(p), None, None),
            Self::CubicTo {
                control1,
                control2,
                end,
            } => (Some(control1), Some(control2), Some(end)),
            Self::Close => (None, None, None),
        };
        a.into_iter().chain(b).chain(c)
    }
}

/// Polyline, polygon or curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathPrimitive {
    pub commands: Vec<PathCommand>,
    pub style: ShapeStyle,
    pub paint: Paint,
    pub alpha: f64,
}

impl PathPrimitive {
    #[must_use]
    pub fn new(commands: Vec<PathCommand>, style: ShapeStyle, paint: Paint) -> Self {
        Self {
            commands,
            style,
            paint,
            alpha: 1.0,
        }
    }

    /// Straight polyline through `points`, optionally closed.
    #[must_use]
    pub fn polyline(points: &[Point], closed: bool, style: ShapeStyle, paint: Paint) -> Self {
        let mut commands = Vec::with_capacity(points.len() + 1);
        for (index, point) in points.iter().enumerate() {
            commands.push(if index == 0 {
                PathCommand::MoveTo(*point)
            } else {
                PathCommand::LineTo(*point)
            });
        }
        if closed && !points.is_empty() {
            commands.push(PathCommand::Close);
        }
        Self::new(commands, style, paint)
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !matches!(self.commands.first(), Some(PathCommand::MoveTo(_))) {
            return Err(ChartError::InvalidData(
                "path must start with a move-to command".to_owned(),
            ));
        }
        for command in &self.commands {
            for point in command.points() {
                validate_point(point, "path")?;
            }
        }
        self.style.validate()?;
        validate_alpha(self.alpha)?;
        self.paint.validate()
    }
}

/// Circular arc. Angles are in degrees, 0° = +X, positive sweep is clockwise on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcPrimitive {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub sweep_angle: f64,
    /// Fill as a wedge connected to the center (pie slices).
    pub use_center: bool,
    pub style: ShapeStyle,
    pub paint: Paint,
    pub alpha: f64,
}

impl ArcPrimitive {
    #[must_use]
    pub fn new(
        center: Point,
        radius: f64,
        start_angle: f64,
        sweep_angle: f64,
        style: ShapeStyle,
        paint: Paint,
    ) -> Self {
        Self {
            center,
            radius,
            start_angle,
            sweep_angle,
            use_center: false,
            style,
            paint,
            alpha: 1.0,
        }
    }

    #[must_use]
    pub fn with_center_wedge(mut self) -> Self {
        self.use_center = true;
        self
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_point(self.center, "arc")?;
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(ChartError::InvalidData(
                "arc radius must be finite and >= 0".to_owned(),
            ));
        }
        if !self.start_angle.is_finite() || !self.sweep_angle.is_finite() {
            return Err(ChartError::InvalidData(
                "arc angles must be finite".to_owned(),
            ));
        }
        self.style.validate()?;
        validate_alpha(self.alpha)?;
        self.paint.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CirclePrimitive {
    pub center: Point,
    pub radius: f64,
    pub style: ShapeStyle,
    pub paint: Paint,
    pub alpha: f64,
}

impl CirclePrimitive {
    #[must_use]
    pub fn filled(center: Point, radius: f64, paint: Paint) -> Self {
        Self {
            center,
            radius,
            style: ShapeStyle::Fill,
            paint,
            alpha: 1.0,
        }
    }

    #[must_use]
    pub fn stroked(center: Point, radius: f64, width: f64, paint: Paint) -> Self {
        Self {
            center,
            radius,
            style: ShapeStyle::Stroke {
                width,
                cap: StrokeCap::Butt,
            },
            paint,
            alpha: 1.0,
        }
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_point(self.center, "circle")?;
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(ChartError::InvalidData(
                "circle radius must be finite and >= 0".to_owned(),
            ));
        }
        self.style.validate()?;
        validate_alpha(self.alpha)?;
        self.paint.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label. `(x, y)` is the top edge of the text box at the
/// alignment anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    /// Rotation around `(x, y)` in degrees.
    pub rotation_degrees: f64,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            rotation_degrees: 0.0,
        }
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation_degrees: f64) -> Self {
        self.rotation_degrees = rotation_degrees;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() || !self.rotation_degrees.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
