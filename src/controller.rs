//! Surface sizing and resize debouncing.
//!
//! Window drags fire resize events far faster than it is worth rebuilding
//! the particle field. Signals are coalesced: the rebuild runs once, a
//! quiet period after the last signal of a burst.

use crate::field::ParticleField;
use crate::random::RandomSource;
use crate::surface::{DrawSurface, SurfaceSize, Viewport};

/// Trailing-edge debounce over millisecond timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeDebouncer {
    quiet_ms: f64,
    last_signal: Option<f64>,
}

impl ResizeDebouncer {
    pub fn new(quiet_ms: f64) -> Self {
        Self {
            quiet_ms: quiet_ms.max(0.0),
            last_signal: None,
        }
    }

    /// Record a signal. Restarts the quiet period.
    pub fn notify(&mut self, now_ms: f64) {
        self.last_signal = Some(now_ms);
    }

    pub fn is_pending(&self) -> bool {
        self.last_signal.is_some()
    }

    /// Drop any pending signal.
    pub fn cancel(&mut self) {
        self.last_signal = None;
    }

    /// True exactly once per burst, when the quiet period has elapsed.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.last_signal {
            Some(last) if now_ms - last >= self.quiet_ms => {
                self.last_signal = None;
                true
            }
            _ => false,
        }
    }
}

/// Sole owner and writer of the surface's pixel dimensions.
#[derive(Debug)]
pub struct SurfaceController {
    size: SurfaceSize,
    debouncer: ResizeDebouncer,
    resizes: u64,
}

impl SurfaceController {
    pub fn new(debounce_ms: f64) -> Self {
        Self {
            size: SurfaceSize::default(),
            debouncer: ResizeDebouncer::new(debounce_ms),
            resizes: 0,
        }
    }

    /// Current surface dimensions.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Number of times the surface has been (re)sized.
    pub fn resize_count(&self) -> u64 {
        self.resizes
    }

    /// Whether a resize is waiting out its quiet period.
    pub fn resize_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Size the surface and populate the field immediately, bypassing the debounce.
    pub fn initialize<R: RandomSource>(
        &mut self,
        viewport: &impl Viewport,
        surface: &mut impl DrawSurface,
        field: &mut ParticleField<R>,
    ) {
        self.debouncer.cancel();
        self.handle_resize(viewport, surface, field);
    }

    /// Read the viewport, resize the surface to match and repopulate the field.
    pub fn handle_resize<R: RandomSource>(
        &mut self,
        viewport: &impl Viewport,
        surface: &mut impl DrawSurface,
        field: &mut ParticleField<R>,
    ) {
        let size = viewport.viewport_size();
        surface.resize(size);
        field.repopulate(size);
        self.size = size;
        self.resizes += 1;

        if size.is_empty() {
            tracing::debug!(width = size.width, height = size.height, "surface is empty; rendering paused");
        } else {
            tracing::debug!(width = size.width, height = size.height, "surface resized");
        }
    }

    /// Record a host resize notification.
    pub fn notify_resize(&mut self, now_ms: f64) {
        self.debouncer.notify(now_ms);
    }

    /// Run a pending resize if its quiet period has elapsed.
    ///
    /// Returns true when [`handle_resize`](Self::handle_resize) ran.
    pub fn poll<R: RandomSource>(
        &mut self,
        now_ms: f64,
        viewport: &impl Viewport,
        surface: &mut impl DrawSurface,
        field: &mut ParticleField<R>,
    ) -> bool {
        if !self.debouncer.poll(now_ms) {
            return false;
        }
        self.handle_resize(viewport, surface, field);
        true
    }
}
