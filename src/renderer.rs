//! Particle and proximity-line rendering.
//!
//! Every frame clears the surface, draws all particles, then walks every
//! unordered pair and strokes a line when the pair is closer than a
//! threshold. The threshold scales with `width + height` so connection
//! density looks the same on any viewport. Distances are compared squared.
//!
//! This pass is O(n²) in particle count and dominates frame cost, which is
//! why [`Density`](crate::Density) caps the count.

use crate::config::BackdropConfig;
use crate::particle::Particle;
use crate::surface::{Color, DrawSurface, SurfaceSize};
use glam::Vec2;

/// What a frame drew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub particles: usize,
    pub connections: usize,
}

/// Draws particles and the lines between nearby pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityRenderer {
    pub particle_color: Color,
    pub line_color: Color,
    pub line_width: f32,
    /// Threshold distance as a fraction of `width + height`.
    pub connection_fraction: f32,
}

impl Default for ProximityRenderer {
    fn default() -> Self {
        Self::from_config(&BackdropConfig::default())
    }
}

impl ProximityRenderer {
    pub fn from_config(config: &BackdropConfig) -> Self {
        Self {
            particle_color: config.particle_color,
            line_color: config.line_color,
            line_width: config.line_width,
            connection_fraction: config.connection_fraction,
        }
    }

    /// Squared connection threshold for a surface of this size.
    pub fn threshold_squared(&self, size: SurfaceSize) -> f32 {
        let threshold = self.connection_fraction * (size.width as f32 + size.height as f32);
        threshold * threshold
    }

    /// Clear the surface and draw one complete frame.
    ///
    /// Zero-size surfaces are skipped entirely.
    pub fn render(&self, surface: &mut impl DrawSurface, particles: &[Particle], size: SurfaceSize) -> FrameStats {
        if size.is_empty() {
            return FrameStats::default();
        }

        surface.clear_rect(Vec2::ZERO, size.extent());

        for particle in particles {
            particle.draw(surface, self.particle_color);
        }

        surface.set_stroke_color(self.line_color);
        surface.set_line_width(self.line_width);

        let mut connections = 0;
        for (a, b) in connected_pairs(particles, self.threshold_squared(size)) {
            surface.stroke_line(particles[a].position, particles[b].position);
            connections += 1;
        }

        FrameStats {
            particles: particles.len(),
            connections,
        }
    }
}

/// Whether two points are strictly closer than `sqrt(threshold_sq)`.
#[inline]
pub fn connects(a: Vec2, b: Vec2, threshold_sq: f32) -> bool {
    a.distance_squared(b) < threshold_sq
}

/// Index pairs `(i, j)` with `i < j` whose particles connect.
pub fn connected_pairs(particles: &[Particle], threshold_sq: f32) -> impl Iterator<Item = (usize, usize)> + '_ {
    (0..particles.len()).flat_map(move |a| {
        ((a + 1)..particles.len())
            .filter(move |&b| connects(particles[a].position, particles[b].position, threshold_sq))
            .map(move |b| (a, b))
    })
}
