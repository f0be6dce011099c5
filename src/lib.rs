//! # Backdrop
//!
//! An ambient particle-constellation animation for a full-window background.
//!
//! A field of small drifting circles bounces inside the viewport, and every
//! pair of particles closer than a viewport-relative threshold is joined by a
//! thin line. The particle count scales with viewport area, the simulation
//! runs at a fixed tick rate regardless of display refresh rate, and resize
//! bursts are debounced into a single rebuild.
//!
//! ## Quick Start
//!
//! ```ignore
//! use backdrop::prelude::*;
//!
//! fn main() -> Result<(), HostError> {
//!     let config = BackdropConfig::new()
//!         .with_tick_rate(50.0)
//!         .with_counts(120, 60, 180);
//!     backdrop::run(config)
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Drawing surfaces
//!
//! Everything is drawn through the [`DrawSurface`] trait, a minimal 2D canvas.
//! [`Raster`] rasterizes on the CPU; [`Recorder`] keeps a log of calls.
//!
//! ### Density
//!
//! [`Density`] maps viewport area to a particle count: `base_count` at the
//! reference resolution, scaled linearly by area and clamped to
//! `[min_count, max_count]`.
//!
//! ### Scheduling
//!
//! [`FrameScheduler`] is driven by host frames and admits at most one tick
//! per interval. A failing tick is logged and the loop continues.
//!
//! ### Hosting
//!
//! [`run`] opens a native window. [`snapshot`] renders headlessly to a PNG.
//! Custom hosts use [`Backdrop`] directly, forwarding
//! [`Backdrop::on_frame`] and [`Backdrop::notify_resize`].

pub mod backdrop;
pub mod config;
pub mod controller;
pub mod error;
pub mod field;
mod gpu;
pub mod particle;
pub mod random;
pub mod raster;
pub mod renderer;
pub mod scheduler;
pub mod snapshot;
pub mod surface;
pub mod time;
mod window;

pub use backdrop::{Backdrop, Scene};
pub use config::BackdropConfig;
pub use controller::{ResizeDebouncer, SurfaceController};
pub use error::{BackdropError, ConfigError, GpuError, HostError};
pub use field::{Density, ParticleField};
pub use glam::Vec2;
pub use particle::{Particle, SpawnParams};
pub use random::{RandomSource, SequenceRandom, SmallRandom};
pub use raster::{Raster, Rgba8};
pub use renderer::{FrameStats, ProximityRenderer};
pub use scheduler::{FrameHost, FrameOutcome, FrameScheduler};
pub use snapshot::{render_frame, snapshot};
pub use surface::{Color, DrawCommand, DrawSurface, Recorder, SurfaceSize, Viewport};
pub use time::Clock;
pub use window::run;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use backdrop::prelude::*;
/// ```
pub mod prelude {
    pub use crate::backdrop::Backdrop;
    pub use crate::config::BackdropConfig;
    pub use crate::error::{BackdropError, HostError};
    pub use crate::random::{RandomSource, SmallRandom};
    pub use crate::raster::Raster;
    pub use crate::scheduler::{FrameHost, FrameOutcome};
    pub use crate::surface::{Color, DrawSurface, SurfaceSize, Viewport};
    pub use crate::time::Clock;
    pub use crate::Vec2;
}
