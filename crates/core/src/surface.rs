//! The drawing seam between the animator and whatever displays it.
//!
//! The animator never talks to a canvas directly. It issues four primitive
//! calls on a [`DrawSurface`], so the same field can be drawn into a browser
//! canvas, a software raster, or a [`Recorder`] in tests.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::viewport::Viewport;

/// A 2D drawing target.
///
/// This trait is **object-safe** so frame drivers can hold a
/// `&mut dyn DrawSurface` chosen at runtime.
pub trait DrawSurface {
    /// Erases everything drawn so far.
    fn clear(&mut self);

    /// Matches the surface's backing size to `viewport`.
    fn resize(&mut self, viewport: Viewport);

    /// Fills a circle centered at `center`.
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba);

    /// Strokes a straight segment from `from` to `to`.
    fn line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64);
}

/// One recorded [`DrawSurface`] call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear,
    Resize {
        viewport: Viewport,
    },
    Circle {
        center: DVec2,
        radius: f64,
        color: Rgba,
    },
    Line {
        from: DVec2,
        to: DVec2,
        color: Rgba,
        width: f64,
    },
}

/// A surface that only remembers what it was asked to draw.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded since creation or the last [`Recorder::take`].
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drains the recorded commands.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn circles(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn lines(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }
}

impl DrawSurface for Recorder {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn resize(&mut self, viewport: Viewport) {
        self.commands.push(DrawCommand::Resize { viewport });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }
}
