//! Immediate-style 2D drawing commands
//!
//! A small command recorder with fill and line state, tessellated to
//! triangles in screen pixels. The scene is rebuilt from it every frame.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, rgba};

/// Stroke settings for `line_to`
#[derive(Debug, Clone, Copy, PartialEq)]
struct LineStyle {
    width: f32,
    color: [f32; 4],
}

/// Drawing surface that accumulates triangles
#[derive(Debug, Default)]
pub struct Graphics {
    vertices: Vec<Vertex>,
    fill: Option<[f32; 4]>,
    line: Option<LineStyle>,
    pen: Option<Vec2>,
}

impl Graphics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all geometry and reset fill, line and pen state
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.fill = None;
        self.line = None;
        self.pen = None;
    }

    /// Start filling shapes with `color` (0xRRGGBB)
    pub fn begin_fill(&mut self, color: u32, alpha: f32) {
        self.fill = Some(rgba(color, alpha));
    }

    pub fn end_fill(&mut self) {
        self.fill = None;
    }

    /// Set the stroke for subsequent `line_to` calls
    pub fn line_style(&mut self, width: f32, color: u32, alpha: f32) {
        self.line = Some(LineStyle {
            width,
            color: rgba(color, alpha),
        });
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.pen = Some(Vec2::new(x, y));
    }

    /// Stroke from the pen to `(x, y)` and move the pen there
    ///
    /// Without a pen position or line style this only moves the pen.
    pub fn line_to(&mut self, x: f32, y: f32) {
        let to = Vec2::new(x, y);
        if let (Some(from), Some(style)) = (self.pen, self.line) {
            self.vertices
                .extend(shapes::line(from, to, style.width, style.color));
        }
        self.pen = Some(to);
    }

    pub fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if let Some(color) = self.fill {
            self.vertices.extend(shapes::rect(
                Vec2::new(x, y),
                Vec2::new(width, height),
                color,
            ));
        }
    }

    pub fn draw_circle(&mut self, x: f32, y: f32, radius: f32) {
        if let Some(color) = self.fill {
            self.vertices.extend(shapes::circle(
                Vec2::new(x, y),
                radius,
                color,
                shapes::circle_segments(radius),
            ));
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }
}
