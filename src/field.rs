//! The particle collection and its viewport-adaptive density.
//!
//! The number of particles scales with surface area, normalized against a
//! reference resolution, then clamped. Small phones still get a populated
//! field, and 4K displays do not blow up the O(n²) connection pass.
//!
//! | Surface | Raw | Count |
//! |---------|-----|-------|
//! | 1920×1080 | 120 | 120 |
//! | 480×270 | 7.5 | 60 (floor) |
//! | 3840×2160 | 480 | 180 (cap) |

use crate::config::BackdropConfig;
use crate::particle::{Particle, SpawnParams};
use crate::random::RandomSource;
use crate::surface::SurfaceSize;

/// Area-proportional particle count with a floor and a cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Density {
    pub reference: SurfaceSize,
    pub base_count: u32,
    pub min_count: u32,
    pub max_count: u32,
}

impl Default for Density {
    fn default() -> Self {
        Self {
            reference: SurfaceSize::new(1920, 1080),
            base_count: 120,
            min_count: 60,
            max_count: 180,
        }
    }
}

impl Density {
    /// Particle count for a surface of the given size.
    ///
    /// Monotone non-decreasing in area and always within
    /// `[min_count, max_count]`. Zero-size surfaces get `min_count`.
    /// If the bounds are inverted, `max_count` wins.
    pub fn target_count(&self, size: SurfaceSize) -> usize {
        let floor = self.min_count.min(self.max_count);
        if size.is_empty() || self.reference.is_empty() {
            return floor as usize;
        }
        let raw = self.base_count as f64 * size.area() / self.reference.area();
        let count = raw.round().clamp(floor as f64, self.max_count as f64);
        count as usize
    }
}

/// Owns every particle in the animation.
pub struct ParticleField<R: RandomSource> {
    particles: Vec<Particle>,
    density: Density,
    spawn: SpawnParams,
    rng: R,
}

impl<R: RandomSource> ParticleField<R> {
    /// Create an empty field. Call [`repopulate`](Self::repopulate) before ticking.
    pub fn new(density: Density, spawn: SpawnParams, rng: R) -> Self {
        Self {
            particles: Vec::new(),
            density,
            spawn,
            rng,
        }
    }

    /// Create an empty field from a [`BackdropConfig`].
    pub fn from_config(config: &BackdropConfig, rng: R) -> Self {
        let density = Density {
            reference: SurfaceSize::new(config.reference_width, config.reference_height),
            base_count: config.base_count,
            min_count: config.min_count,
            max_count: config.max_count,
        };
        let spawn = SpawnParams {
            radius: config.radius_range,
            max_speed: config.max_speed,
        };
        Self::new(density, spawn, rng)
    }

    /// How many particles a surface of this size should hold.
    pub fn compute_target_count(&self, size: SurfaceSize) -> usize {
        self.density.target_count(size)
    }

    /// Discard every particle and spawn a fresh set sized for `size`.
    pub fn repopulate(&mut self, size: SurfaceSize) {
        let count = self.compute_target_count(size);
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles.push(Particle::spawn(size, &self.spawn, &mut self.rng));
        }
        tracing::debug!(
            width = size.width,
            height = size.height,
            count,
            "repopulated particle field"
        );
    }

    /// Advance every particle by one tick.
    pub fn tick(&mut self, size: SurfaceSize) {
        for particle in &mut self.particles {
            particle.update(size);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn density(&self) -> &Density {
        &self.density
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{SequenceRandom, SmallRandom};

    #[test]
    fn test_reference_resolution_is_unclamped() {
        let density = Density::default();
        assert_eq!(density.target_count(SurfaceSize::new(1920, 1080)), 120);
    }

    #[test]
    fn test_small_surface_hits_floor() {
        let density = Density::default();
        assert_eq!(density.target_count(SurfaceSize::new(480, 270)), 60);
    }

    #[test]
    fn test_large_surface_hits_cap() {
        let density = Density::default();
        assert_eq!(density.target_count(SurfaceSize::new(3840, 2160)), 180);
    }

    #[test]
    fn test_zero_size_is_min() {
        let density = Density::default();
        assert_eq!(density.target_count(SurfaceSize::new(0, 1080)), 60);
        assert_eq!(density.target_count(SurfaceSize::new(1920, 0)), 60);
    }

    #[test]
    fn test_inverted_bounds_cap_at_max() {
        let density = Density {
            min_count: 200,
            max_count: 100,
            ..Density::default()
        };
        assert_eq!(density.target_count(SurfaceSize::new(1920, 1080)), 100);
        assert_eq!(density.target_count(SurfaceSize::new(480, 270)), 100);
        assert_eq!(density.target_count(SurfaceSize::new(0, 0)), 100);

        let mut field = ParticleField::new(density, SpawnParams::default(), SmallRandom::seeded(4));
        field.repopulate(SurfaceSize::new(1920, 1080));
        assert_eq!(field.len(), 100);
    }

    #[test]
    fn test_target_count_monotone_and_bounded() {
        let density = Density::default();
        let mut last = 0;
        // Grow area steadily along the diagonal.
        for step in 1..400u32 {
            let size = SurfaceSize::new(step * 12, step * 7);
            let count = density.target_count(size);
            assert!(count >= last, "count dropped at {:?}", size);
            assert!((60..=180).contains(&count));
            last = count;
        }
    }

    #[test]
    fn test_repopulate_matches_target() {
        let mut field = ParticleField::new(Density::default(), SpawnParams::default(), SmallRandom::seeded(3));
        for &(w, h) in &[(1920, 1080), (480, 270), (3840, 2160), (1280, 720), (0, 0)] {
            let size = SurfaceSize::new(w, h);
            field.repopulate(size);
            assert_eq!(field.len(), field.compute_target_count(size));
        }
    }

    #[test]
    fn test_repopulate_discards_old_particles() {
        let mut field = ParticleField::new(Density::default(), SpawnParams::default(), SmallRandom::seeded(5));
        field.repopulate(SurfaceSize::new(3840, 2160));
        field.repopulate(SurfaceSize::new(100, 100));
        for p in field.particles() {
            assert!(p.position.x <= 100.0 && p.position.y <= 100.0);
        }
    }

    #[test]
    fn test_tick_updates_all() {
        let mut field = ParticleField::new(
            Density::default(),
            SpawnParams::default(),
            SequenceRandom::new(vec![0.5, 0.5, 0.5, 1.0, 1.0]),
        );
        let size = SurfaceSize::new(1920, 1080);
        field.repopulate(size);
        let before: Vec<_> = field.particles().to_vec();
        field.tick(size);

        assert_eq!(field.len(), before.len());
        for (old, new) in before.iter().zip(field.particles()) {
            assert_eq!(new.position, old.position + old.velocity);
        }
    }

    #[test]
    fn test_from_config() {
        let config = BackdropConfig::new().with_counts(10, 5, 20);
        let field = ParticleField::from_config(&config, SmallRandom::seeded(0));
        assert_eq!(field.compute_target_count(SurfaceSize::new(1920, 1080)), 10);
        assert_eq!(field.compute_target_count(SurfaceSize::new(10, 10)), 5);
    }
}
