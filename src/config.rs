//! Animation configuration.
//!
//! All tunables live in [`BackdropConfig`]. It can be built in code with the
//! `with_*` methods or loaded from JSON; every field has a default, so a
//! config file only needs to name what it changes:
//!
//! ```json
//! { "max_count": 120, "tick_rate": 30.0 }
//! ```

use crate::error::ConfigError;
use crate::surface::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete animation configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackdropConfig {
    /// Width of the resolution at which exactly `base_count` particles appear.
    pub reference_width: u32,
    /// Height of the reference resolution.
    pub reference_height: u32,
    /// Particle count at the reference resolution.
    pub base_count: u32,
    /// Upper bound on particle count. Bounds the O(n²) connection pass.
    pub max_count: u32,
    /// Lower bound on particle count, so small viewports still look populated.
    pub min_count: u32,
    /// Admitted ticks per second.
    pub tick_rate: f64,
    /// Connection threshold as a fraction of `width + height`.
    pub connection_fraction: f32,
    /// Quiet period before a burst of resize signals is processed.
    pub resize_debounce_ms: f64,
    /// Particle radius range `[min, max)` in pixels.
    pub radius_range: (f32, f32),
    /// Velocity components are drawn from `[-max_speed, max_speed)` pixels/tick.
    pub max_speed: f32,
    pub particle_color: Color,
    pub line_color: Color,
    pub line_width: f32,
    /// Color the host shows behind the animation.
    pub background_color: Color,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            reference_width: 1920,
            reference_height: 1080,
            base_count: 120,
            max_count: 180,
            min_count: 60,
            tick_rate: 50.0,
            connection_fraction: 0.18,
            resize_debounce_ms: 200.0,
            radius_range: (1.0, 3.0),
            max_speed: 0.5,
            particle_color: Color::rgba8(25, 25, 112, 0.5),
            line_color: Color::rgba8(100, 200, 250, 0.25),
            line_width: 1.0,
            background_color: Color::new(0.02, 0.02, 0.05, 1.0), // Dark blue-black
        }
    }
}

impl BackdropConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reference resolution for density normalization.
    pub fn with_reference_resolution(mut self, width: u32, height: u32) -> Self {
        self.reference_width = width;
        self.reference_height = height;
        self
    }

    /// Set the base, minimum and maximum particle counts.
    pub fn with_counts(mut self, base: u32, min: u32, max: u32) -> Self {
        self.base_count = base;
        self.min_count = min;
        self.max_count = max;
        self
    }

    /// Set the admitted tick rate (ticks per second).
    pub fn with_tick_rate(mut self, rate: f64) -> Self {
        self.tick_rate = rate;
        self
    }

    /// Set the connection threshold fraction.
    pub fn with_connection_fraction(mut self, fraction: f32) -> Self {
        self.connection_fraction = fraction;
        self
    }

    /// Set the resize debounce window in milliseconds.
    pub fn with_resize_debounce(mut self, ms: f64) -> Self {
        self.resize_debounce_ms = ms;
        self
    }

    /// Set the particle and line colors.
    pub fn with_colors(mut self, particle: Color, line: Color) -> Self {
        self.particle_color = particle;
        self.line_color = line;
        self
    }

    /// Minimum time between admitted ticks, in milliseconds.
    pub fn tick_interval_ms(&self) -> f64 {
        1000.0 / self.tick_rate
    }

    /// Check that the values are usable together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reference_width == 0 || self.reference_height == 0 {
            return Err(ConfigError::Invalid("reference resolution must be non-zero".into()));
        }
        if self.min_count > self.max_count {
            return Err(ConfigError::Invalid(format!(
                "min_count ({}) exceeds max_count ({})",
                self.min_count, self.max_count
            )));
        }
        if !(self.tick_rate.is_finite() && self.tick_rate > 0.0) {
            return Err(ConfigError::Invalid("tick_rate must be positive".into()));
        }
        if !(self.connection_fraction.is_finite() && self.connection_fraction >= 0.0) {
            return Err(ConfigError::Invalid("connection_fraction must be non-negative".into()));
        }
        if !(self.resize_debounce_ms.is_finite() && self.resize_debounce_ms >= 0.0) {
            return Err(ConfigError::Invalid("resize_debounce_ms must be non-negative".into()));
        }
        let (lo, hi) = self.radius_range;
        if !(lo > 0.0 && hi >= lo) {
            return Err(ConfigError::Invalid(format!("radius_range ({}, {}) is empty or non-positive", lo, hi)));
        }
        if !(self.max_speed.is_finite() && self.max_speed >= 0.0) {
            return Err(ConfigError::Invalid("max_speed must be non-negative".into()));
        }
        Ok(())
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
