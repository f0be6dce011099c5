//! Host clock for the frame loop.
//!
//! Converts `Instant`s into the monotonically increasing millisecond
//! timestamps that [`FrameScheduler`](crate::FrameScheduler) and
//! [`SurfaceController`](crate::SurfaceController) consume, and measures
//! the admitted tick rate for diagnostics.
//!
//! # Example
//!
//! ```ignore
//! use backdrop::time::Clock;
//!
//! let mut clock = Clock::new();
//!
//! // In your host's frame callback:
//! let now = clock.now_ms();
//! if scheduler.on_frame(now, &mut host, &mut scene) == FrameOutcome::Admitted {
//!     clock.record_tick();
//! }
//! println!("Ticks/s: {:.1}", clock.tick_rate());
//! ```

use std::time::{Duration, Instant};

/// Millisecond timestamps plus a measured tick rate.
#[derive(Debug)]
pub struct Clock {
    /// When the clock was created.
    start: Instant,
    /// Total ticks recorded since start.
    tick_count: u64,
    /// Measured ticks per second (updated periodically).
    tick_rate: f32,
    /// Tick count at last rate update.
    rate_tick_count: u64,
    /// Time of last rate calculation.
    rate_update_time: Instant,
    /// How often to update the rate calculation.
    rate_update_interval: Duration,
}

impl Clock {
    /// Create a new clock starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            tick_count: 0,
            tick_rate: 0.0,
            rate_tick_count: 0,
            rate_update_time: now,
            rate_update_interval: Duration::from_millis(500),
        }
    }

    /// Milliseconds since the clock was created.
    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.ms_at(Instant::now())
    }

    /// Milliseconds between clock creation and `instant`. Saturates at zero.
    #[inline]
    pub fn ms_at(&self, instant: Instant) -> f64 {
        instant.saturating_duration_since(self.start).as_secs_f64() * 1000.0
    }

    /// Record an admitted tick. Returns true when the measured rate was refreshed.
    pub fn record_tick(&mut self) -> bool {
        self.record_tick_at(Instant::now())
    }

    fn record_tick_at(&mut self, now: Instant) -> bool {
        self.tick_count += 1;

        let rate_elapsed = now.saturating_duration_since(self.rate_update_time);
        if rate_elapsed >= self.rate_update_interval {
            let ticks_since = self.tick_count - self.rate_tick_count;
            self.tick_rate = ticks_since as f32 / rate_elapsed.as_secs_f32();
            self.rate_tick_count = self.tick_count;
            self.rate_update_time = now;
            return true;
        }
        false
    }

    /// Total ticks recorded since start.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.tick_count
    }

    /// Measured admitted ticks per second.
    #[inline]
    pub fn tick_rate(&self) -> f32 {
        self.tick_rate
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_new() {
        let clock = Clock::new();
        assert_eq!(clock.ticks(), 0);
        assert_eq!(clock.tick_rate(), 0.0);
    }

    #[test]
    fn test_now_is_monotonic() {
        let clock = Clock::new();
        let a = clock.now_ms();
        thread::sleep(Duration::from_millis(5));
        let b = clock.now_ms();
        assert!(b > a);
        assert!(b >= 5.0);
    }

    #[test]
    fn test_ms_at_before_start_saturates() {
        let earlier = Instant::now();
        let clock = Clock::new();
        assert_eq!(clock.ms_at(earlier), 0.0);
    }

    #[test]
    fn test_tick_rate_measured() {
        let mut clock = Clock::new();
        let start = clock.start;
        for i in 1..=25 {
            clock.record_tick_at(start + Duration::from_millis(i * 20));
        }
        // 25 ticks over 500 ms
        assert!((clock.tick_rate() - 50.0).abs() < 0.01);
        assert_eq!(clock.ticks(), 25);
    }
}
