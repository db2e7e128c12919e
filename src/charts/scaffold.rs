//! Axis, grid and label layout shared by every cartesian chart.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::charts::Drawable;
use crate::core::{
    AxisConfig, ChartContext, ChartOrientation, LabelRotation, Point, Rect, Viewport,
    format_axis_label,
};
use crate::error::{ChartError, ChartResult, ensure_config_positive};
use crate::render::{Color, LinePrimitive, Paint, RenderFrame, TextHAlign, TextPrimitive};

const OUTER_PADDING: f64 = 20.0;
const VALUE_LABEL_PADDING: f64 = 60.0;
const CATEGORY_LABEL_PADDING: f64 = 100.0;
const BOTTOM_LABEL_PADDING: f64 = 50.0;
const LABEL_GAP: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartScaffoldConfig {
    pub show_axis: bool,
    pub show_grid: bool,
    pub show_labels: bool,
    pub axis_color: Color,
    pub grid_color: Color,
    pub label_color: Color,
    pub axis_thickness: f64,
    pub grid_thickness: f64,
    pub label_font_size: f64,
    pub left_label_rotation: LabelRotation,
}

impl Default for ChartScaffoldConfig {
    fn default() -> Self {
        Self {
            show_axis: true,
            show_grid: true,
            show_labels: true,
            axis_color: Color::GRAY,
            grid_color: Color::LIGHT_GRAY.with_alpha(0.5),
            label_color: Color::GRAY,
            axis_thickness: 2.0,
            grid_thickness: 1.0,
            label_font_size: 12.0,
            left_label_rotation: LabelRotation::Straight,
        }
    }
}

impl ChartScaffoldConfig {
    pub fn validate(&self) -> ChartResult<()> {
        ensure_config_positive(self.axis_thickness, "axis thickness")?;
        ensure_config_positive(self.grid_thickness, "grid thickness")?;
        ensure_config_positive(self.label_font_size, "label font size")?;
        if !self.left_label_rotation.degrees().is_finite() {
            return Err(ChartError::InvalidConfig(
                "label rotation must be finite".to_owned(),
            ));
        }
        self.axis_color.validate()?;
        self.grid_color.validate()?;
        self.label_color.validate()
    }

    #[must_use]
    pub fn with_show_axis(mut self, show_axis: bool) -> Self {
        self.show_axis = show_axis;
        self
    }

    #[must_use]
    pub fn with_show_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    #[must_use]
    pub fn with_show_labels(mut self, show_labels: bool) -> Self {
        self.show_labels = show_labels;
        self
    }

    #[must_use]
    pub fn with_left_label_rotation(mut self, rotation: LabelRotation) -> Self {
        self.left_label_rotation = rotation;
        self
    }
}

impl_json_config!(ChartScaffoldConfig, "scaffold config");

/// Plot rectangle left after reserving room for axes and labels.
pub fn plot_rect(
    viewport: Viewport,
    config: &ChartScaffoldConfig,
    orientation: ChartOrientation,
    has_x_labels: bool,
) -> ChartResult<Rect> {
    viewport.validate()?;
    let (left, bottom) = match orientation {
        ChartOrientation::Vertical => (
            if config.show_labels {
                VALUE_LABEL_PADDING
            } else {
                OUTER_PADDING
            },
            if config.show_labels && has_x_labels {
                BOTTOM_LABEL_PADDING
            } else {
                OUTER_PADDING
            },
        ),
        ChartOrientation::Horizontal => (
            if config.show_labels {
                CATEGORY_LABEL_PADDING
            } else {
                OUTER_PADDING
            },
            if config.show_labels {
                BOTTOM_LABEL_PADDING
            } else {
                OUTER_PADDING
            },
        ),
    };

    let right = viewport.width - OUTER_PADDING;
    let bottom = viewport.height - bottom;
    if right <= left || bottom <= OUTER_PADDING {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(Rect::new(left, OUTER_PADDING, right, bottom))
}

/// Axis lines, interior gridlines and labels for one chart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisGeometry {
    pub grid_lines: Vec<LinePrimitive>,
    pub axis_lines: Vec<LinePrimitive>,
    pub labels: Vec<TextPrimitive>,
}

impl Drawable for AxisGeometry {
    fn append_to(&self, frame: &mut RenderFrame) {
        frame.extend(self.grid_lines.iter().cloned());
        frame.extend(self.axis_lines.iter().cloned());
        frame.extend(self.labels.iter().cloned());
    }
}

/// Lays out axes and labels around `plot`.
///
/// Vertical charts get value gridlines/labels along Y and category labels
/// centered under each slot. Horizontal charts swap the roles. With
/// `draw_axis_at_zero` and a range straddling zero, the category axis is drawn
/// at the value-0 line instead of the plot edge.
pub fn project_axes(
    x_labels: &[String],
    axis: &AxisConfig,
    config: &ChartScaffoldConfig,
    orientation: ChartOrientation,
    plot: Rect,
) -> ChartResult<AxisGeometry> {
    axis.validate()?;
    config.validate()?;
    let context = ChartContext::new(plot, axis.min_value, axis.max_value)?;

    let geometry = match orientation {
        ChartOrientation::Vertical => vertical_axes(x_labels, axis, config, context),
        ChartOrientation::Horizontal => horizontal_axes(x_labels, axis, config, context),
    };
    debug!(
        ?orientation,
        grid_lines = geometry.grid_lines.len(),
        labels = geometry.labels.len(),
        "projected axes"
    );
    Ok(geometry)
}

fn axis_line(config: &ChartScaffoldConfig, start: Point, end: Point) -> LinePrimitive {
    LinePrimitive::new(start, end, config.axis_thickness, Paint::solid(config.axis_color))
}

fn grid_line(config: &ChartScaffoldConfig, start: Point, end: Point) -> LinePrimitive {
    LinePrimitive::new(start, end, config.grid_thickness, Paint::solid(config.grid_color))
}

fn label(
    config: &ChartScaffoldConfig,
    text: String,
    x: f64,
    y: f64,
    h_align: TextHAlign,
) -> TextPrimitive {
    TextPrimitive::new(text, x, y, config.label_font_size, config.label_color, h_align)
}

fn vertical_axes(
    x_labels: &[String],
    axis: &AxisConfig,
    config: &ChartScaffoldConfig,
    ctx: ChartContext,
) -> AxisGeometry {
    let mut geometry = AxisGeometry::default();
    let plot = ctx.plot();

    if config.show_axis {
        geometry.axis_lines.push(axis_line(
            config,
            Point::new(plot.left, plot.top),
            Point::new(plot.left, plot.bottom),
        ));
        let x_axis_y = if axis.straddles_zero() && axis.draw_axis_at_zero {
            ctx.convert_value_to_y(0.0)
        } else {
            plot.bottom
        };
        geometry.axis_lines.push(axis_line(
            config,
            Point::new(plot.left, x_axis_y),
            Point::new(plot.right, x_axis_y),
        ));
    }

    let ticks = axis.tick_values();
    let last = ticks.len() - 1;
    for (i, value) in ticks.into_iter().enumerate() {
        let y = ctx.convert_value_to_y(value);
        if config.show_grid && i > 0 && i < last {
            geometry.grid_lines.push(grid_line(
                config,
                Point::new(plot.left, y),
                Point::new(plot.right, y),
            ));
        }
        if config.show_labels {
            geometry.labels.push(
                label(
                    config,
                    format_axis_label(value),
                    plot.left - LABEL_GAP,
                    y - config.label_font_size / 2.0,
                    TextHAlign::Right,
                )
                .with_rotation(config.left_label_rotation.degrees()),
            );
        }
    }

    if config.show_labels {
        for (index, text) in x_labels.iter().enumerate() {
            if text.is_empty() {
                continue;
            }
            geometry.labels.push(label(
                config,
                text.clone(),
                ctx.centered_x(index, x_labels.len()),
                plot.bottom + LABEL_GAP,
                TextHAlign::Center,
            ));
        }
    }

    geometry
}

fn horizontal_axes(
    category_labels: &[String],
    axis: &AxisConfig,
    config: &ChartScaffoldConfig,
    ctx: ChartContext,
) -> AxisGeometry {
    let mut geometry = AxisGeometry::default();
    let plot = ctx.plot();

    if config.show_axis {
        geometry.axis_lines.push(axis_line(
            config,
            Point::new(plot.left, plot.top),
            Point::new(plot.left, plot.bottom),
        ));
        let baseline_x = if axis.min_value < 0.0 && axis.draw_axis_at_zero {
            ctx.convert_value_to_x(0.0)
        } else {
            plot.left
        };
        geometry.axis_lines.push(axis_line(
            config,
            Point::new(baseline_x, plot.top),
            Point::new(baseline_x, plot.bottom),
        ));
    }

    let ticks = axis.tick_values();
    let last = ticks.len() - 1;
    for (i, value) in ticks.into_iter().enumerate() {
        let x = ctx.convert_value_to_x(value);
        if config.show_grid && i > 0 && i < last {
            geometry.grid_lines.push(grid_line(
                config,
                Point::new(x, plot.top),
                Point::new(x, plot.bottom),
            ));
        }
        if config.show_labels {
            geometry.labels.push(label(
                config,
                format_axis_label(value),
                x,
                plot.bottom + LABEL_GAP,
                TextHAlign::Center,
            ));
        }
    }

    if config.show_labels {
        for (index, text) in category_labels.iter().enumerate() {
            if text.is_empty() {
                continue;
            }
            geometry.labels.push(
                label(
                    config,
                    text.clone(),
                    plot.left - LABEL_GAP,
                    ctx.centered_y(index, category_labels.len()) - config.label_font_size / 2.0,
                    TextHAlign::Right,
                )
                .with_rotation(config.left_label_rotation.degrees()),
            );
        }
    }

    geometry
}

/// Plot context plus axis geometry for a cartesian chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Scaffold {
    pub context: ChartContext,
    pub axes: AxisGeometry,
}

impl Scaffold {
    /// Resolves the plot rectangle for `viewport` and lays out the axes.
    pub fn build(
        viewport: Viewport,
        x_labels: &[String],
        axis: &AxisConfig,
        config: &ChartScaffoldConfig,
        orientation: ChartOrientation,
    ) -> ChartResult<Self> {
        let plot = plot_rect(viewport, config, orientation, !x_labels.is_empty())?;
        let axes = project_axes(x_labels, axis, config, orientation, plot)?;
        let context = ChartContext::new(plot, axis.min_value, axis.max_value)?;
        Ok(Self { context, axes })
    }
}
