//! Draw-call surface
//!
//! The simulation renders through `RenderSurface`, a canvas-like API with a current
//! fill/stroke style. Hosts implement it over their backend; `DrawList` records calls
//! for tests and headless runs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::Rect;

/// RGBA color (alpha 0-1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const ORANGE: Color = Color::rgb(255, 136, 0);
    pub const SKY: Color = Color::rgb(0, 170, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS color string (`rgba(r, g, b, a)`)
    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
}

/// Canvas-like drawing API
pub trait RenderSurface {
    /// Clear the whole surface
    fn clear(&mut self, width: f32, height: f32);
    fn set_fill(&mut self, color: Color);
    fn set_stroke(&mut self, color: Color);
    fn set_line_width(&mut self, width: f32);
    fn fill_rect(&mut self, rect: Rect);
    fn stroke_rect(&mut self, rect: Rect);
    /// Filled arc (pie) from `start` to `end` radians
    fn fill_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32);
    fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32);
    /// Closed filled polygon
    fn fill_path(&mut self, points: &[Vec2]);
    /// Text at `pos`, font size in pixels
    fn fill_text(&mut self, text: &str, pos: Vec2, size: f32, align: TextAlign);
}

/// A recorded draw call with its resolved style
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, color: Color, line_width: f32 },
    FillArc { center: Vec2, radius: f32, start: f32, end: f32, color: Color },
    StrokeArc { center: Vec2, radius: f32, start: f32, end: f32, color: Color, line_width: f32 },
    FillPath { points: Vec<Vec2>, color: Color },
    Text { text: String, pos: Vec2, size: f32, align: TextAlign, color: Color },
}

/// Recording surface
#[derive(Debug, Clone)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
    fill: Color,
    stroke: Color,
    line_width: f32,
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            fill: Color::BLACK,
            stroke: Color::BLACK,
            line_width: 1.0,
        }
    }

    /// Drop recorded commands (style is kept, like a canvas)
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Filled rectangles drawn with `color`
    pub fn rects_with(&self, color: Color) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { rect, color: c } if *c == color => Some(*rect),
                _ => None,
            })
            .collect()
    }

    /// All text drawn this frame
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl RenderSurface for DrawList {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn set_fill(&mut self, color: Color) {
        self.fill = color;
    }

    fn set_stroke(&mut self, color: Color) {
        self.stroke = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            color: self.fill,
        });
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            color: self.stroke,
            line_width: self.line_width,
        });
    }

    fn fill_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32) {
        self.commands.push(DrawCommand::FillArc {
            center,
            radius,
            start,
            end,
            color: self.fill,
        });
    }

    fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32) {
        self.commands.push(DrawCommand::StrokeArc {
            center,
            radius,
            start,
            end,
            color: self.stroke,
            line_width: self.line_width,
        });
    }

    fn fill_path(&mut self, points: &[Vec2]) {
        self.commands.push(DrawCommand::FillPath {
            points: points.to_vec(),
            color: self.fill,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, size: f32, align: TextAlign) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            size,
            align,
            color: self.fill,
        });
    }
}
