//! Headless rendering to an image file.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::backdrop::Scene;
use crate::config::BackdropConfig;
use crate::controller::SurfaceController;
use crate::error::{BackdropError, HostError};
use crate::field::ParticleField;
use crate::random::SmallRandom;
use crate::raster::Raster;
use crate::renderer::{FrameStats, ProximityRenderer};
use crate::surface::{Color, DrawSurface, SurfaceSize};

/// Simulate `ticks` ticks at `size` and return the final frame.
///
/// Runs without a scheduler: every tick is admitted. `seed` makes the
/// result reproducible.
pub fn render_frame(
    config: &BackdropConfig,
    size: SurfaceSize,
    ticks: u32,
    seed: Option<u64>,
) -> Result<(Raster, FrameStats), BackdropError> {
    config.validate()?;
    let rng = match seed {
        Some(seed) => SmallRandom::seeded(seed),
        None => SmallRandom::from_entropy(),
    };

    let mut scene = Scene {
        surface: Raster::new(size),
        field: ParticleField::from_config(config, rng),
        controller: SurfaceController::new(config.resize_debounce_ms),
        renderer: ProximityRenderer::from_config(config),
        last_frame: FrameStats::default(),
    };
    scene
        .controller
        .initialize(&size, &mut scene.surface, &mut scene.field);

    for _ in 0..ticks.max(1) {
        scene.step();
    }
    Ok((scene.surface, scene.last_frame))
}

/// Flatten a raster over an opaque background.
pub fn to_image(raster: &Raster, background: Color) -> RgbaImage {
    let size = raster.size();
    let bg = [background.r, background.g, background.b].map(|c| c.clamp(0.0, 1.0) * 255.0);

    let mut image = RgbaImage::new(size.width, size.height);
    for (pixel, src) in image.pixels_mut().zip(raster.pixels()) {
        let a = src.a as f32 / 255.0;
        let mix = |s: u8, d: f32| (s as f32 * a + d * (1.0 - a)).round() as u8;
        *pixel = Rgba([mix(src.r, bg[0]), mix(src.g, bg[1]), mix(src.b, bg[2]), 255]);
    }
    image
}

/// Render a frame and write it to `path` as an image (format from the extension).
pub fn snapshot(
    config: &BackdropConfig,
    size: SurfaceSize,
    ticks: u32,
    path: impl AsRef<Path>,
) -> Result<FrameStats, HostError> {
    let (raster, stats) = render_frame(config, size, ticks, None)?;
    to_image(&raster, config.background_color).save(path.as_ref())?;

    tracing::info!(
        path = %path.as_ref().display(),
        particles = stats.particles,
        connections = stats.connections,
        "snapshot written"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_frame_is_reproducible() {
        let config = BackdropConfig::default();
        let size = SurfaceSize::new(320, 200);
        let (a, stats_a) = render_frame(&config, size, 10, Some(5)).unwrap();
        let (b, stats_b) = render_frame(&config, size, 10, Some(5)).unwrap();

        assert_eq!(stats_a, stats_b);
        assert_eq!(a.pixels(), b.pixels());
        assert_eq!(stats_a.particles, 60);
    }

    #[test]
    fn test_render_frame_rejects_invalid_config() {
        let config = BackdropConfig::default().with_counts(10, 50, 20);
        let result = render_frame(&config, SurfaceSize::new(10, 10), 1, Some(1));
        assert!(matches!(result, Err(BackdropError::Config(_))));
    }

    #[test]
    fn test_to_image_is_opaque_background() {
        let raster = Raster::new(SurfaceSize::new(3, 2));
        let image = to_image(&raster, Color::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(image.dimensions(), (3, 2));
        assert!(image.pixels().all(|p| *p == Rgba([255, 0, 0, 255])));
    }
}
