//! Drawing surface consumed by the engine.
//!
//! The engine only issues commands through [`Canvas`]; rasterization belongs
//! to whoever implements it. [`RecordingCanvas`] keeps the commands in memory
//! and is what the tests and the demo draw into.

use crate::data_types::Rect;
use glam::DVec2;
use palette::Srgba;

pub type Color = Srgba;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub font_size: f64,
    /// Clockwise rotation in degrees around the text anchor.
    pub rotation: f64,
}

impl TextStyle {
    pub fn new(color: Color, font_size: f64) -> Self {
        Self {
            color,
            font_size,
            rotation: 0.0,
        }
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

/// Opaque reference to an image owned by the canvas implementation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageRef(pub String);

pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn draw_line(&mut self, from: DVec2, to: DVec2, stroke: &Stroke);

    fn draw_polygon(&mut self, points: &[DVec2], fill: Option<Color>, stroke: Option<&Stroke>);

    /// Draws `text` with its top-left corner at `origin`.
    fn draw_text(&mut self, text: &str, origin: DVec2, style: &TextStyle);

    fn measure_text(&self, text: &str, font_size: f64) -> TextExtent;

    fn set_clip(&mut self, clip: Option<Rect>);

    /// Runs `draw` with every command blended at `alpha`.
    fn with_composite(&mut self, alpha: f32, draw: &mut dyn FnMut(&mut dyn Canvas));

    fn draw_image(&mut self, image: &ImageRef, dest: Rect);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: Color },
    Line { from: DVec2, to: DVec2, stroke: Stroke },
    Polygon { points: Vec<DVec2>, fill: Option<Color>, stroke: Option<Stroke> },
    Text { text: String, origin: DVec2, style: TextStyle },
    Clip(Option<Rect>),
    BeginComposite(f32),
    EndComposite,
    Image { image: ImageRef, dest: Rect },
}

/// Canvas that records commands and measures text with a fixed-advance font:
/// every glyph is `0.6 * font_size` wide and a line is `font_size` tall.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn lines(&self) -> impl Iterator<Item = (&DVec2, &DVec2, &Stroke)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, stroke } => Some((from, to, stroke)),
            _ => None,
        })
    }

    pub fn filled_rects(&self) -> impl Iterator<Item = (&Rect, &Color)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillRect { rect, color } => Some((rect, color)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_line(&mut self, from: DVec2, to: DVec2, stroke: &Stroke) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke: *stroke,
        });
    }

    fn draw_polygon(&mut self, points: &[DVec2], fill: Option<Color>, stroke: Option<&Stroke>) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            fill,
            stroke: stroke.copied(),
        });
    }

    fn draw_text(&mut self, text: &str, origin: DVec2, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            style: *style,
        });
    }

    fn measure_text(&self, text: &str, font_size: f64) -> TextExtent {
        TextExtent {
            width: text.chars().count() as f64 * font_size * 0.6,
            height: font_size,
        }
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.commands.push(DrawCommand::Clip(clip));
    }

    fn with_composite(&mut self, alpha: f32, draw: &mut dyn FnMut(&mut dyn Canvas)) {
        self.commands.push(DrawCommand::BeginComposite(alpha));
        draw(self);
        self.commands.push(DrawCommand::EndComposite);
    }

    fn draw_image(&mut self, image: &ImageRef, dest: Rect) {
        self.commands.push(DrawCommand::Image {
            image: image.clone(),
            dest,
        });
    }
}
