//! Throttled, self-rescheduling frame loop.
//!
//! Hosts call [`FrameScheduler::on_frame`] at whatever cadence they like
//! (display refresh, a timer, a test loop) with a monotonically increasing
//! millisecond timestamp. The scheduler always asks the host for the next
//! frame, then admits at most one tick per `1000 / tick_rate` ms. This keeps
//! animation speed identical on 60 Hz and 144 Hz displays.
//!
//! ```ignore
//! let mut scheduler = FrameScheduler::new(20.0);
//! scheduler.start(|scene: &mut Scene| scene.step());
//!
//! // host frame callback:
//! scheduler.on_frame(now_ms, &mut window, &mut scene);
//! ```

use crate::error::{BackdropError, ConfigError};
use std::panic::{self, AssertUnwindSafe};

/// Work performed on every admitted tick.
pub type TickCallback<T> = Box<dyn FnMut(&mut T) -> Result<(), BackdropError>>;

/// The host's "call me again next frame" hook.
pub trait FrameHost {
    fn request_frame(&mut self);
}

impl FrameHost for std::sync::Arc<winit::window::Window> {
    fn request_frame(&mut self) {
        self.request_redraw();
    }
}

/// What happened on a single host frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The scheduler has not been started.
    Idle,
    /// Too soon since the last admitted tick. Nothing ran.
    Throttled,
    /// The tick ran to completion.
    Admitted,
    /// The tick ran and failed. The loop continues.
    Failed,
}

enum State<T> {
    Idle,
    Running {
        callback: TickCallback<T>,
        last_admitted: Option<f64>,
    },
}

/// Fixed-rate gate in front of a host-driven frame callback.
pub struct FrameScheduler<T> {
    interval_ms: f64,
    state: State<T>,
    admitted: u64,
    failures: u64,
}

impl<T> FrameScheduler<T> {
    /// Create an idle scheduler admitting at most one tick per `interval_ms`.
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(0.0),
            state: State::Idle,
            admitted: 0,
            failures: 0,
        }
    }

    /// Create an idle scheduler for a target rate in ticks per second.
    ///
    /// The rate must be finite and positive.
    pub fn with_rate(ticks_per_second: f64) -> Result<Self, ConfigError> {
        if !(ticks_per_second.is_finite() && ticks_per_second > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "tick rate must be positive, got {}",
                ticks_per_second
            )));
        }
        Ok(Self::new(1000.0 / ticks_per_second))
    }

    /// Register the tick callback and start running.
    ///
    /// Calling this on a running scheduler replaces the callback and
    /// restarts the throttle window.
    pub fn start<F>(&mut self, callback: F)
    where
        F: FnMut(&mut T) -> Result<(), BackdropError> + 'static,
    {
        self.state = State::Running {
            callback: Box::new(callback),
            last_admitted: None,
        };
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Number of admitted ticks so far, including failed ones.
    pub fn admitted_ticks(&self) -> u64 {
        self.admitted
    }

    /// Number of admitted ticks that failed.
    pub fn failed_ticks(&self) -> u64 {
        self.failures
    }

    /// Handle one host frame.
    ///
    /// While running, the next frame is always requested first, so a
    /// failing tick can never stall the loop. The first frame after
    /// `start` is always admitted.
    pub fn on_frame(&mut self, timestamp_ms: f64, host: &mut impl FrameHost, target: &mut T) -> FrameOutcome {
        let State::Running { callback, last_admitted } = &mut self.state else {
            return FrameOutcome::Idle;
        };

        host.request_frame();

        if let Some(last) = *last_admitted {
            if timestamp_ms - last < self.interval_ms {
                return FrameOutcome::Throttled;
            }
        }
        *last_admitted = Some(timestamp_ms);
        self.admitted += 1;

        let result = panic::catch_unwind(AssertUnwindSafe(|| callback(target)));
        match result {
            Ok(Ok(())) => {
                tracing::trace!(timestamp_ms, tick = self.admitted, "tick admitted");
                FrameOutcome::Admitted
            }
            Ok(Err(e)) => {
                self.failures += 1;
                tracing::warn!(timestamp_ms, error = %e, "tick failed; continuing");
                FrameOutcome::Failed
            }
            Err(_) => {
                self.failures += 1;
                tracing::warn!(timestamp_ms, "tick panicked; continuing");
                FrameOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingHost {
        requests: u32,
    }

    impl FrameHost for CountingHost {
        fn request_frame(&mut self) {
            self.requests += 1;
        }
    }

    #[test]
    fn test_idle_does_nothing() {
        let mut scheduler: FrameScheduler<u32> = FrameScheduler::new(20.0);
        let mut host = CountingHost::default();
        let mut ticks = 0;

        assert!(!scheduler.is_running());
        assert_eq!(scheduler.on_frame(0.0, &mut host, &mut ticks), FrameOutcome::Idle);
        assert_eq!(host.requests, 0);
    }

    #[test]
    fn test_every_fourth_frame_admitted() {
        let mut scheduler = FrameScheduler::with_rate(50.0).unwrap();
        scheduler.start(|ticks: &mut Vec<f64>| {
            ticks.push(0.0);
            Ok(())
        });
        let mut host = CountingHost::default();
        let mut ticks = Vec::new();

        let mut admitted_at = Vec::new();
        for i in 0..40 {
            let t = i as f64 * 5.0;
            if scheduler.on_frame(t, &mut host, &mut ticks) == FrameOutcome::Admitted {
                admitted_at.push(i);
            }
        }

        assert_eq!(admitted_at, (0..40).step_by(4).collect::<Vec<_>>());
        assert_eq!(ticks.len(), 10);
        assert_eq!(host.requests, 40);
    }

    #[test]
    fn test_with_rate_rejects_non_positive() {
        for rate in [0.0, -50.0, f64::NAN, f64::INFINITY] {
            let result: Result<FrameScheduler<u32>, _> = FrameScheduler::with_rate(rate);
            assert!(matches!(result, Err(ConfigError::Invalid(_))), "rate = {}", rate);
        }
        let scheduler: FrameScheduler<u32> = FrameScheduler::with_rate(50.0).unwrap();
        assert_eq!(scheduler.interval_ms(), 20.0);
    }

    #[test]
    fn test_exact_interval_is_admitted() {
        let mut scheduler = FrameScheduler::new(20.0);
        scheduler.start(|n: &mut u32| {
            *n += 1;
            Ok(())
        });
        let mut host = CountingHost::default();
        let mut n = 0;

        scheduler.on_frame(100.0, &mut host, &mut n);
        assert_eq!(scheduler.on_frame(119.9, &mut host, &mut n), FrameOutcome::Throttled);
        assert_eq!(scheduler.on_frame(120.0, &mut host, &mut n), FrameOutcome::Admitted);
        assert_eq!(n, 2);
    }

    #[test]
    fn test_slow_host_admits_every_frame() {
        let mut scheduler = FrameScheduler::new(20.0);
        scheduler.start(|n: &mut u32| {
            *n += 1;
            Ok(())
        });
        let mut host = CountingHost::default();
        let mut n = 0;

        for i in 0..10 {
            scheduler.on_frame(i as f64 * 33.0, &mut host, &mut n);
        }
        assert_eq!(n, 10);
    }

    #[test]
    fn test_error_does_not_stop_loop() {
        let mut scheduler = FrameScheduler::new(20.0);
        scheduler.start(|n: &mut u32| {
            *n += 1;
            if *n == 2 {
                Err(BackdropError::Tick("bad frame".into()))
            } else {
                Ok(())
            }
        });
        let mut host = CountingHost::default();
        let mut n = 0;

        assert_eq!(scheduler.on_frame(0.0, &mut host, &mut n), FrameOutcome::Admitted);
        assert_eq!(scheduler.on_frame(20.0, &mut host, &mut n), FrameOutcome::Failed);
        assert_eq!(scheduler.on_frame(40.0, &mut host, &mut n), FrameOutcome::Admitted);
        assert_eq!(scheduler.failed_ticks(), 1);
        assert_eq!(scheduler.admitted_ticks(), 3);
        assert_eq!(host.requests, 3);
    }

    #[test]
    fn test_panic_does_not_stop_loop() {
        let mut scheduler = FrameScheduler::new(20.0);
        scheduler.start(|n: &mut u32| {
            *n += 1;
            if *n == 1 {
                panic!("draw exploded");
            }
            Ok(())
        });
        let mut host = CountingHost::default();
        let mut n = 0;

        assert_eq!(scheduler.on_frame(0.0, &mut host, &mut n), FrameOutcome::Failed);
        assert_eq!(scheduler.on_frame(25.0, &mut host, &mut n), FrameOutcome::Admitted);
        assert!(scheduler.is_running());
        assert_eq!(host.requests, 2);
    }
}
