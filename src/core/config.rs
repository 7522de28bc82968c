//! Runtime configuration.
//!
//! Projects may carry an optional `"config"` object that overrides these
//! defaults. Every field has a default so partial configs are valid.

use serde::{Deserialize, Serialize};

/// Configuration for a running game.
///
/// ## Example
///
/// ```
/// use rust_mmf::core::RuntimeConfig;
///
/// let config = RuntimeConfig::new()
///     .with_screen(320, 240)
///     .with_target_fps(30)
///     .with_max_steps(100);
///
/// assert_eq!(config.screen_width, 320);
/// assert!((config.step_seconds() - 1.0 / 30.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Width of the presented surface in pixels.
    pub screen_width: u32,

    /// Height of the presented surface in pixels.
    pub screen_height: u32,

    /// Target steps per second.
    pub target_fps: u32,

    /// Stop the main loop after this many steps. `None` runs until terminated.
    pub max_steps: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            target_fps: 60,
            max_steps: None,
        }
    }
}

impl RuntimeConfig {
    /// Create a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the screen size.
    #[must_use]
    pub fn with_screen(mut self, width: u32, height: u32) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    /// Set the target step rate.
    #[must_use]
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps.max(1);
        self
    }

    /// Bound the number of steps.
    #[must_use]
    pub fn with_max_steps(mut self, steps: u64) -> Self {
        self.max_steps = Some(steps);
        self
    }

    /// Nominal duration of one step.
    #[must_use]
    pub fn step_seconds(&self) -> f64 {
        1.0 / f64::from(self.target_fps.max(1))
    }
}
