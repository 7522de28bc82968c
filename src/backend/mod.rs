//! Platform backend contract.
//!
//! The engine never renders, decodes assets or polls devices itself. It
//! drives a `Backend` at step boundaries and object types call into it for
//! drawing, assets and input.
//!
//! ## Step protocol
//!
//! ```text
//! pre_update -> grid tick -> object ticks (queue draws) -> post_update(camera)
//! ```
//!
//! `pre_update` may request termination (for example, the window was
//! closed). `post_update` flushes queued draws, offset by the camera.
//! `shutdown` is called exactly once when the main loop ends.

mod headless;

pub use headless::{DrawCall, HeadlessBackend};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{Axis, EngineError, HaltResult, Vec2};

/// A loaded image.
///
/// Backends keep the decoded pixels; the engine only needs the path (as a
/// handle) and the size (for collision boxes).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Image {
    pub path: String,
    pub width: u32,
    pub height: u32,
}

impl Image {
    /// Image size as a vector.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(f64::from(self.width), f64::from(self.height))
    }
}

/// A loaded sound effect.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sound {
    pub path: String,
}

/// Platform capabilities the engine requires.
pub trait Backend {
    /// Start of a step. Returns `Halt::Terminate` to stop the game.
    fn pre_update(&mut self) -> HaltResult<()>;

    /// End of a step: present queued draws offset by `camera`.
    fn post_update(&mut self, camera: Vec2) -> Result<(), EngineError>;

    /// Queue an image for this step.
    fn draw(&mut self, image: &Image, position: Vec2);

    /// Load an image by logical asset path.
    fn load_image(&mut self, path: &str) -> Result<Image, EngineError>;

    /// Load a sound effect by logical asset path.
    fn load_sound(&mut self, path: &str) -> Result<Sound, EngineError>;

    /// Start streaming music.
    fn play_music(&mut self, path: &str) -> Result<(), EngineError>;

    /// Current value of an axis, in `-1.0..=1.0`.
    fn poll_axis(&self, axis: Axis) -> f64;

    /// Names of the keys held down this step.
    fn pressed_keys(&self) -> FxHashSet<String>;

    /// Duration of the last step in seconds.
    fn elapsed_step_time(&self) -> f64;

    /// Release platform resources. Called once.
    fn shutdown(&mut self);

    /// Poll an axis by raw id, rejecting ids outside the enumeration.
    fn poll_axis_id(&self, id: u8) -> Result<f64, EngineError> {
        Axis::from_id(id).map(|axis| self.poll_axis(axis))
    }
}
