use chart_geometry::core::{Point, Rect, Viewport};
use chart_geometry::render::{
    CirclePrimitive, Color, DrawCommand, LinePrimitive, NullRenderer, Paint, RectPrimitive,
    RenderFrame, Renderer, TextHAlign, TextPrimitive,
};
use chart_geometry::{Drawable, compose_frame};

struct Marker(Point);

impl Drawable for Marker {
    fn append_to(&self, frame: &mut RenderFrame) {
        frame.push(CirclePrimitive::filled(self.0, 4.0, Paint::solid(Color::BLACK)));
    }
}

struct Background;

impl Drawable for Background {
    fn append_to(&self, frame: &mut RenderFrame) {
        frame.push(RectPrimitive::new(
            Rect::new(0.0, 0.0, 100.0, 50.0),
            Paint::solid(Color::WHITE),
        ));
    }
}

#[test]
fn layers_are_painted_in_slice_order() {
    let marker = Marker(Point::new(10.0, 10.0));
    let missing: Option<Marker> = None;
    let frame = compose_frame(Viewport::new(100.0, 50.0), &[&Background, &marker, &missing]);

    assert_eq!(frame.len(), 2);
    assert!(matches!(frame.commands[0], DrawCommand::Rect(_)));
    assert!(matches!(frame.commands[1], DrawCommand::Circle(_)));
    assert_eq!(frame.viewport, Viewport::new(100.0, 50.0));
}

#[test]
fn null_renderer_counts_commands_and_text() {
    let frame = RenderFrame::new(Viewport::new(100.0, 50.0))
        .with(LinePrimitive::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            1.0,
            Paint::default(),
        ))
        .with(TextPrimitive::new("42", 5.0, 5.0, 12.0, Color::BLACK, TextHAlign::Left));

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("valid frame");
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_command_count, 2);
    assert_eq!(renderer.last_text_count, 1);
    assert_eq!(frame.texts().count(), 1);
    assert_eq!(frame.lines().count(), 1);
}

#[test]
fn invalid_primitives_fail_validation() {
    let mut renderer = NullRenderer::default();

    let inverted = RenderFrame::new(Viewport::new(100.0, 50.0)).with(RectPrimitive::new(
        Rect::new(10.0, 10.0, 5.0, 20.0),
        Paint::default(),
    ));
    assert!(renderer.render(&inverted).is_err());

    let empty_text = RenderFrame::new(Viewport::new(100.0, 50.0))
        .with(TextPrimitive::new("", 0.0, 0.0, 12.0, Color::BLACK, TextHAlign::Left));
    assert!(renderer.render(&empty_text).is_err());

    let bad_color = RenderFrame::new(Viewport::new(100.0, 50.0)).with(CirclePrimitive::filled(
        Point::new(0.0, 0.0),
        3.0,
        Paint::solid(Color::rgba(2.0, 0.0, 0.0, 1.0)),
    ));
    assert!(renderer.render(&bad_color).is_err());
    assert_eq!(renderer.frames_rendered, 0);
}

#[test]
fn gradients_need_two_stops() {
    assert!(Paint::gradient(vec![Color::BLACK]).is_err());
    let paint = Paint::gradient(vec![Color::BLACK, Color::WHITE]).expect("gradient");
    assert_eq!(paint.palette_entry(3), Paint::solid(Color::WHITE));
    assert_eq!(Color::from_hex_rgb(0xFF0000), Color::rgb(1.0, 0.0, 0.0));
}
