//! Drawing surface abstraction.
//!
//! The engine only issues the handful of 2D primitives a backdrop needs.
//! [`PixelCanvas`](crate::raster::PixelCanvas) rasterizes them for the
//! window; [`RecordingCanvas`] keeps them as a list for inspection.

use glam::Vec2;

use crate::visuals::Color;

/// A 2D drawing surface in pixel coordinates, origin top-left.
pub trait Canvas {
    /// Current surface size in pixels.
    fn size(&self) -> (u32, u32);

    /// Resize the surface. Contents after a resize are unspecified until the
    /// next [`clear`](Canvas::clear).
    fn resize(&mut self, width: u32, height: u32);

    /// Fill the whole surface.
    fn clear(&mut self, color: Color);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Draw `text` with its baseline-left corner at `origin`, `size` pixels tall.
    fn fill_text(&mut self, text: &str, origin: Vec2, size: f32, color: Color);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
}

/// One recorded primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Text {
        text: String,
        origin: Vec2,
        size: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
}

/// Canvas that stores every primitive instead of drawing it.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    width: u32,
    height: u32,
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Commands issued since the last clear.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear(_)))
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.last_frame()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, origin: Vec2, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            size,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }
}
