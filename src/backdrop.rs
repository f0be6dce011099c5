//! The assembled animation.
//!
//! [`Backdrop`] owns every piece explicitly: the particle field, the
//! surface and its controller, the renderer, and the scheduler that drives
//! them. A host forwards two kinds of events:
//!
//! - every frame: [`Backdrop::on_frame`] with a millisecond timestamp
//! - every resize: [`Backdrop::notify_resize`]
//!
//! ```ignore
//! use backdrop::prelude::*;
//!
//! let viewport = SurfaceSize::new(1280, 720);
//! let mut backdrop = Backdrop::attach(
//!     &BackdropConfig::default(),
//!     Some(Raster::new(viewport)),
//!     SmallRandom::from_entropy(),
//!     &viewport,
//! )?;
//!
//! loop {
//!     backdrop.on_frame(clock.now_ms(), &viewport, &mut host);
//! }
//! ```

use crate::config::BackdropConfig;
use crate::controller::SurfaceController;
use crate::error::BackdropError;
use crate::field::ParticleField;
use crate::random::RandomSource;
use crate::renderer::{FrameStats, ProximityRenderer};
use crate::scheduler::{FrameHost, FrameOutcome, FrameScheduler};
use crate::surface::{DrawSurface, SurfaceSize, Viewport};

/// Everything one admitted tick reads and writes.
pub struct Scene<S, R: RandomSource> {
    pub surface: S,
    pub field: ParticleField<R>,
    pub controller: SurfaceController,
    pub renderer: ProximityRenderer,
    /// Stats from the most recent admitted tick.
    pub last_frame: FrameStats,
}

impl<S: DrawSurface, R: RandomSource> Scene<S, R> {
    /// One simulation step: update every particle, then redraw.
    ///
    /// Dimensions are read once, so the whole tick sees a single size.
    pub fn step(&mut self) -> FrameStats {
        let size = self.controller.size();
        self.field.tick(size);
        self.last_frame = self.renderer.render(&mut self.surface, self.field.particles(), size);
        self.last_frame
    }
}

/// A running particle-constellation animation.
pub struct Backdrop<S, R: RandomSource> {
    scene: Scene<S, R>,
    scheduler: FrameScheduler<Scene<S, R>>,
}

impl<S, R> Backdrop<S, R>
where
    S: DrawSurface + 'static,
    R: RandomSource + 'static,
{
    /// Size the surface, populate the field and start the frame loop.
    ///
    /// `surface` is whatever the host could provide. `None` means no drawing
    /// context exists, and the animation refuses to start with
    /// [`BackdropError::ContextUnavailable`].
    pub fn attach(
        config: &BackdropConfig,
        surface: Option<S>,
        rng: R,
        viewport: &impl Viewport,
    ) -> Result<Self, BackdropError> {
        config.validate()?;
        let Some(surface) = surface else {
            tracing::warn!("no drawing surface available; animation disabled");
            return Err(BackdropError::ContextUnavailable);
        };

        let mut scene = Scene {
            surface,
            field: ParticleField::from_config(config, rng),
            controller: SurfaceController::new(config.resize_debounce_ms),
            renderer: ProximityRenderer::from_config(config),
            last_frame: FrameStats::default(),
        };
        scene
            .controller
            .initialize(viewport, &mut scene.surface, &mut scene.field);

        let mut scheduler = FrameScheduler::new(config.tick_interval_ms());
        scheduler.start(|scene: &mut Scene<S, R>| {
            scene.step();
            Ok(())
        });

        tracing::info!(
            width = scene.controller.size().width,
            height = scene.controller.size().height,
            particles = scene.field.len(),
            "backdrop started"
        );

        Ok(Self { scene, scheduler })
    }

    /// Record a host resize notification. Applied after the debounce window.
    pub fn notify_resize(&mut self, now_ms: f64) {
        self.scene.controller.notify_resize(now_ms);
    }

    /// Handle one host frame.
    ///
    /// Applies a due resize first, so the tick that follows sees the new
    /// dimensions in full.
    pub fn on_frame(&mut self, now_ms: f64, viewport: &impl Viewport, host: &mut impl FrameHost) -> FrameOutcome {
        let Scene {
            surface,
            field,
            controller,
            ..
        } = &mut self.scene;
        controller.poll(now_ms, viewport, surface, field);

        self.scheduler.on_frame(now_ms, host, &mut self.scene)
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn size(&self) -> SurfaceSize {
        self.scene.controller.size()
    }

    pub fn surface(&self) -> &S {
        &self.scene.surface
    }

    pub fn field(&self) -> &ParticleField<R> {
        &self.scene.field
    }

    pub fn scene(&self) -> &Scene<S, R> {
        &self.scene
    }

    pub fn scheduler(&self) -> &FrameScheduler<Scene<S, R>> {
        &self.scheduler
    }

    /// Stats from the most recent admitted tick.
    pub fn last_frame(&self) -> FrameStats {
        self.scene.last_frame
    }
}
