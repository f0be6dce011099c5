//! Drawing surface abstraction.
//!
//! The animation never talks to a concrete canvas. It draws through
//! [`DrawSurface`], which offers exactly what a 2D canvas context offers:
//! clearing a region, filled circles, stroked line segments and settable
//! fill/stroke state. [`Raster`](crate::Raster) is the software
//! implementation used by the native host; [`Recorder`] logs calls.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Pixel dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero (transient layout state).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Surface area in square pixels.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }

    /// Dimensions as floating-point extents.
    #[inline]
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for SurfaceSize {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

/// Straight-alpha RGBA color. Channels are 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from 8-bit channels and a 0.0-1.0 alpha, CSS `rgba()` style.
    pub fn rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a)
    }
}

/// A 2D raster canvas the animation draws onto.
///
/// Methods are infallible: a surface that cannot draw should simply
/// drop the call.
pub trait DrawSurface {
    /// Set the backing pixel dimensions. Contents are discarded.
    fn resize(&mut self, size: SurfaceSize);

    /// Current backing pixel dimensions.
    fn size(&self) -> SurfaceSize;

    /// Clear a rectangle to fully transparent.
    fn clear_rect(&mut self, origin: Vec2, extent: Vec2);

    fn set_fill_color(&mut self, color: Color);

    fn set_stroke_color(&mut self, color: Color);

    fn set_line_width(&mut self, width: f32);

    /// Fill a circle with the current fill color.
    fn fill_circle(&mut self, center: Vec2, radius: f32);

    /// Stroke a line segment with the current stroke color and width.
    fn stroke_line(&mut self, from: Vec2, to: Vec2);
}

/// Source of the host's current viewport size.
pub trait Viewport {
    fn viewport_size(&self) -> SurfaceSize;
}

impl Viewport for SurfaceSize {
    fn viewport_size(&self) -> SurfaceSize {
        *self
    }
}

impl Viewport for winit::window::Window {
    fn viewport_size(&self) -> SurfaceSize {
        self.inner_size().into()
    }
}

/// A single recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Resize(SurfaceSize),
    Clear { origin: Vec2, extent: Vec2 },
    FillColor(Color),
    StrokeColor(Color),
    LineWidth(f32),
    Circle { center: Vec2, radius: f32 },
    Line { from: Vec2, to: Vec2 },
}

/// A surface that records every call instead of drawing.
///
/// Useful for inspecting exactly what a frame would draw.
#[derive(Debug, Default)]
pub struct Recorder {
    size: SurfaceSize,
    commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    /// All commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop all recorded commands.
    pub fn clear_log(&mut self) {
        self.commands.clear();
    }

    /// Number of filled circles recorded.
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    /// Number of stroked lines recorded.
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }
}

impl DrawSurface for Recorder {
    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.commands.push(DrawCommand::Resize(size));
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear_rect(&mut self, origin: Vec2, extent: Vec2) {
        self.commands.push(DrawCommand::Clear { origin, extent });
    }

    fn set_fill_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::FillColor(color));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::StrokeColor(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::Circle { center, radius });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        self.commands.push(DrawCommand::Line { from, to });
    }
}
