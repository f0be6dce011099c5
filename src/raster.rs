//! Software RGBA raster implementing [`DrawSurface`].
//!
//! Pixels are straight-alpha RGBA8 and composite source-over, the way a
//! 2D canvas context does. The pixel type is `Pod`, so the buffer can be
//! handed to a GPU texture upload or an image encoder as bytes.

use crate::surface::{Color, DrawSurface, SurfaceSize};
use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// A single straight-alpha RGBA8 pixel.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Rgba8 = Rgba8 { r: 0, g: 0, b: 0, a: 0 };

    /// Composite `color` at `coverage` over this pixel (source-over).
    fn blend(&mut self, color: Color, coverage: f32) {
        let sa = (color.a * coverage).clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let da = self.a as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        let mix = |src: f32, dst: u8| {
            let dst = dst as f32 / 255.0;
            let c = (src * sa + dst * da * (1.0 - sa)) / out_a;
            (c.clamp(0.0, 1.0) * 255.0).round() as u8
        };
        self.r = mix(color.r, self.r);
        self.g = mix(color.g, self.g);
        self.b = mix(color.b, self.b);
        self.a = (out_a * 255.0).round() as u8;
    }
}

/// CPU-side canvas.
#[derive(Debug, Clone)]
pub struct Raster {
    size: SurfaceSize,
    pixels: Vec<Rgba8>,
    fill: Color,
    stroke: Color,
    line_width: f32,
}

impl Raster {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            pixels: vec![Rgba8::TRANSPARENT; size.width as usize * size.height as usize],
            fill: Color::new(0.0, 0.0, 0.0, 1.0),
            stroke: Color::new(0.0, 0.0, 0.0, 1.0),
            line_width: 1.0,
        }
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Raw RGBA bytes, row-major, 4 bytes per pixel.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.size.width as usize + x as usize
    }

    /// Blend `color` into every pixel whose center satisfies `inside`,
    /// scanning only the given bounding box.
    fn fill_region(&mut self, min: Vec2, max: Vec2, color: Color, inside: impl Fn(Vec2) -> bool) {
        if self.size.is_empty() {
            return;
        }
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().max(0.0) as u32).min(self.size.width);
        let y1 = (max.y.ceil().max(0.0) as u32).min(self.size.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if inside(center) {
                    let i = self.index(x, y);
                    self.pixels[i].blend(color, 1.0);
                }
            }
        }
    }
}

impl DrawSurface for Raster {
    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.pixels.clear();
        self.pixels
            .resize(size.width as usize * size.height as usize, Rgba8::TRANSPARENT);
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear_rect(&mut self, origin: Vec2, extent: Vec2) {
        if self.size.is_empty() {
            return;
        }
        let end = origin + extent;
        let x0 = (origin.x.max(0.0) as u32).min(self.size.width);
        let y0 = (origin.y.max(0.0) as u32).min(self.size.height);
        let x1 = (end.x.max(0.0) as u32).min(self.size.width);
        let y1 = (end.y.max(0.0) as u32).min(self.size.height);
        if x0 >= x1 {
            return;
        }
        for y in y0..y1 {
            let row = self.index(0, y);
            self.pixels[row + x0 as usize..row + x1 as usize].fill(Rgba8::TRANSPARENT);
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width.max(0.0);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        let r2 = radius * radius;
        let reach = Vec2::splat(radius);
        self.fill_region(center - reach, center + reach, self.fill, |p| {
            p.distance_squared(center) <= r2
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        // Hairlines still cover one pixel row.
        let half = (self.line_width * 0.5).max(0.5);
        let half2 = half * half;
        let seg = to - from;
        let len2 = seg.length_squared();
        let reach = Vec2::splat(half);

        self.fill_region(from.min(to) - reach, from.max(to) + reach, self.stroke, |p| {
            let t = if len2 > 0.0 {
                ((p - from).dot(seg) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            p.distance_squared(from + seg * t) <= half2
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    #[test]
    fn test_new_is_transparent() {
        let raster = Raster::new(SurfaceSize::new(4, 3));
        assert_eq!(raster.pixels().len(), 12);
        assert_eq!(raster.as_bytes().len(), 48);
        assert!(raster.pixels().iter().all(|p| *p == Rgba8::TRANSPARENT));
    }

    #[test]
    fn test_fill_circle_covers_center_only() {
        let mut raster = Raster::new(SurfaceSize::new(20, 20));
        raster.set_fill_color(WHITE);
        raster.fill_circle(Vec2::new(10.0, 10.0), 3.0);

        assert_eq!(raster.pixel(10, 10).unwrap().a, 255);
        assert_eq!(raster.pixel(0, 0).unwrap(), Rgba8::TRANSPARENT);
        assert_eq!(raster.pixel(19, 10).unwrap(), Rgba8::TRANSPARENT);
    }

    #[test]
    fn test_translucent_fill_blends() {
        let mut raster = Raster::new(SurfaceSize::new(4, 4));
        raster.set_fill_color(Color::new(1.0, 0.0, 0.0, 0.5));
        raster.fill_circle(Vec2::new(2.0, 2.0), 2.0);
        let once = raster.pixel(2, 2).unwrap();
        assert_eq!(once, Rgba8 { r: 255, g: 0, b: 0, a: 128 });

        raster.fill_circle(Vec2::new(2.0, 2.0), 2.0);
        let twice = raster.pixel(2, 2).unwrap();
        assert!((191..=192).contains(&twice.a));
        assert_eq!(twice.r, 255);
    }

    #[test]
    fn test_stroke_line_horizontal() {
        let mut raster = Raster::new(SurfaceSize::new(10, 5));
        raster.set_stroke_color(WHITE);
        raster.set_line_width(1.0);
        raster.stroke_line(Vec2::new(1.0, 2.5), Vec2::new(8.0, 2.5));

        for x in 1..8 {
            assert_eq!(raster.pixel(x, 2).unwrap().a, 255, "x = {}", x);
        }
        assert_eq!(raster.pixel(4, 0).unwrap().a, 0);
        assert_eq!(raster.pixel(4, 4).unwrap().a, 0);
    }

    #[test]
    fn test_clear_rect() {
        let mut raster = Raster::new(SurfaceSize::new(6, 6));
        raster.set_fill_color(WHITE);
        raster.fill_circle(Vec2::new(3.0, 3.0), 10.0);
        raster.clear_rect(Vec2::ZERO, Vec2::new(6.0, 6.0));
        assert!(raster.pixels().iter().all(|p| *p == Rgba8::TRANSPARENT));
    }

    #[test]
    fn test_out_of_bounds_draws_are_clipped() {
        let mut raster = Raster::new(SurfaceSize::new(8, 8));
        raster.set_fill_color(WHITE);
        raster.fill_circle(Vec2::new(-50.0, -50.0), 4.0);
        raster.stroke_line(Vec2::new(-10.0, 100.0), Vec2::new(100.0, 200.0));
        raster.clear_rect(Vec2::new(-5.0, -5.0), Vec2::new(100.0, 100.0));
        assert!(raster.pixels().iter().all(|p| *p == Rgba8::TRANSPARENT));

        // Regions entirely past the far edges touch nothing.
        raster.fill_circle(Vec2::new(4.0, 4.0), 10.0);
        raster.clear_rect(Vec2::new(100.0, 0.0), Vec2::new(10.0, 10.0));
        raster.clear_rect(Vec2::new(0.0, 100.0), Vec2::new(10.0, 10.0));
        raster.clear_rect(Vec2::new(100.0, 100.0), Vec2::new(10.0, 10.0));
        raster.clear_rect(Vec2::new(6.0, 0.0), Vec2::new(-4.0, 8.0));
        assert!(raster.pixels().iter().all(|p| p.a == 255));

        // Partially outside is clipped to the overlap.
        raster.clear_rect(Vec2::new(6.0, 6.0), Vec2::new(50.0, 50.0));
        assert_eq!(raster.pixel(7, 7).unwrap(), Rgba8::TRANSPARENT);
        assert_eq!(raster.pixel(5, 5).unwrap().a, 255);
    }

    #[test]
    fn test_resize_reallocates() {
        let mut raster = Raster::new(SurfaceSize::new(2, 2));
        raster.resize(SurfaceSize::new(5, 7));
        assert_eq!(raster.pixels().len(), 35);
        assert_eq!(raster.size(), SurfaceSize::new(5, 7));

        raster.resize(SurfaceSize::new(0, 7));
        assert!(raster.pixels().is_empty());
        raster.fill_circle(Vec2::ZERO, 3.0);
    }
}
