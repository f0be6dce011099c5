//! A single drifting point.

use crate::random::RandomSource;
use crate::surface::{Color, DrawSurface, SurfaceSize};
use glam::Vec2;

/// Ranges used when (re)initializing a particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnParams {
    /// Radius range `[min, max)` in pixels.
    pub radius: (f32, f32),
    /// Velocity components fall in `[-max_speed, max_speed)`.
    pub max_speed: f32,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            radius: (1.0, 3.0),
            max_speed: 0.5,
        }
    }
}

/// A moving point with a reflective boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in surface pixels.
    pub position: Vec2,
    /// Velocity in pixels per admitted tick.
    pub velocity: Vec2,
    pub radius: f32,
}

impl Particle {
    /// Create a particle already reset into `size`.
    pub fn spawn(size: SurfaceSize, params: &SpawnParams, rng: &mut impl RandomSource) -> Self {
        let mut p = Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            radius: params.radius.0,
        };
        p.reset(size, params, rng);
        p
    }

    /// Re-randomize position, radius and velocity.
    ///
    /// Draw order is x, y, radius, vx, vy. On a zero-size surface the
    /// position collapses to the origin instead of going NaN.
    pub fn reset(&mut self, size: SurfaceSize, params: &SpawnParams, rng: &mut impl RandomSource) {
        let extent = size.extent();
        self.position = Vec2::new(rng.next_unit() * extent.x, rng.next_unit() * extent.y);
        self.radius = rng.next_range(params.radius.0, params.radius.1);
        self.velocity = Vec2::new(
            rng.next_range(-params.max_speed, params.max_speed),
            rng.next_range(-params.max_speed, params.max_speed),
        );
    }

    /// Advance one tick, bouncing off the surface edges.
    pub fn update(&mut self, size: SurfaceSize) {
        let extent = size.extent();
        self.position += self.velocity;

        if self.position.x < 0.0 {
            self.velocity.x = self.velocity.x.abs();
        } else if self.position.x > extent.x {
            self.velocity.x = -self.velocity.x.abs();
        }
        if self.position.y < 0.0 {
            self.velocity.y = self.velocity.y.abs();
        } else if self.position.y > extent.y {
            self.velocity.y = -self.velocity.y.abs();
        }

        self.position = self.position.clamp(Vec2::ZERO, extent);
    }

    /// Paint this particle as a filled dot.
    pub fn draw(&self, surface: &mut impl DrawSurface, color: Color) {
        surface.set_fill_color(color);
        surface.fill_circle(self.position, self.radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{SequenceRandom, SmallRandom};
    use crate::surface::{DrawCommand, Recorder};

    fn at(x: f32, y: f32, vx: f32, vy: f32) -> Particle {
        Particle {
            position: Vec2::new(x, y),
            velocity: Vec2::new(vx, vy),
            radius: 2.0,
        }
    }

    #[test]
    fn test_reset_uses_sequence() {
        let mut rng = SequenceRandom::new(vec![0.5, 0.25, 0.5, 0.75, 0.0]);
        let p = Particle::spawn(SurfaceSize::new(800, 600), &SpawnParams::default(), &mut rng);

        assert_eq!(p.position, Vec2::new(400.0, 150.0));
        assert_eq!(p.radius, 2.0);
        assert_eq!(p.velocity, Vec2::new(0.25, -0.5));
    }

    #[test]
    fn test_reset_zero_size_is_finite() {
        let mut rng = SmallRandom::seeded(1);
        let p = Particle::spawn(SurfaceSize::new(0, 0), &SpawnParams::default(), &mut rng);
        assert_eq!(p.position, Vec2::ZERO);
        assert!(p.velocity.is_finite());
    }

    #[test]
    fn test_update_moves_by_velocity() {
        let mut p = at(10.0, 10.0, 0.5, -0.25);
        p.update(SurfaceSize::new(100, 100));
        assert_eq!(p.position, Vec2::new(10.5, 9.75));
        assert_eq!(p.velocity, Vec2::new(0.5, -0.25));
    }

    #[test]
    fn test_update_reflects_right_edge() {
        let mut p = at(99.8, 50.0, 0.5, 0.0);
        p.update(SurfaceSize::new(100, 100));
        assert_eq!(p.position.x, 100.0);
        assert_eq!(p.velocity.x, -0.5);

        p.update(SurfaceSize::new(100, 100));
        assert_eq!(p.position.x, 99.5);
    }

    #[test]
    fn test_update_reflects_top_edge() {
        let mut p = at(50.0, 0.1, 0.0, -0.4);
        p.update(SurfaceSize::new(100, 100));
        assert_eq!(p.position.y, 0.0);
        assert_eq!(p.velocity.y, 0.4);
    }

    #[test]
    fn test_update_stays_in_bounds() {
        let size = SurfaceSize::new(37, 23);
        let mut rng = SmallRandom::seeded(99);
        let params = SpawnParams { radius: (1.0, 3.0), max_speed: 5.0 };
        for _ in 0..50 {
            let mut p = Particle::spawn(size, &params, &mut rng);
            for _ in 0..500 {
                p.update(size);
                assert!(p.position.x >= 0.0 && p.position.x <= 37.0);
                assert!(p.position.y >= 0.0 && p.position.y <= 23.0);
            }
        }
    }

    #[test]
    fn test_draw_does_not_mutate() {
        let p = at(3.0, 4.0, 1.0, 1.0);
        let before = p;
        let mut rec = Recorder::new(SurfaceSize::new(10, 10));
        let color = Color::rgba8(25, 25, 112, 0.5);
        p.draw(&mut rec, color);

        assert_eq!(p, before);
        assert_eq!(
            rec.commands(),
            &[
                DrawCommand::FillColor(color),
                DrawCommand::Circle { center: Vec2::new(3.0, 4.0), radius: 2.0 },
            ]
        );
    }
}
