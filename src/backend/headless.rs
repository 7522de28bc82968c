//! Deterministic in-memory backend.
//!
//! Records everything the engine asks of it, so tests and the `mmf-run`
//! binary can drive a game without a window. Input is scripted by setting
//! axis values and pressed keys between steps.
//!
//! With a project source attached, asset paths are resolved through it and
//! must name existing files.

use std::path::PathBuf;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Axis, EngineError, Halt, HaltResult, RuntimeConfig, Vec2};
use crate::project::ProjectSource;

use super::{Backend, Image, Sound};

/// One presented draw, in screen coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawCall {
    pub image: String,
    pub position: Vec2,
}

/// Headless backend.
///
/// ```
/// use rust_mmf::backend::{Backend, HeadlessBackend};
/// use rust_mmf::core::{Axis, Vec2};
///
/// let mut backend = HeadlessBackend::new()
///     .with_image_size("wall.png", 64, 16)
///     .with_axis(Axis::P1Horizontal, 1.0);
///
/// let image = backend.load_image("wall.png").unwrap();
/// assert_eq!(image.size(), Vec2::new(64.0, 16.0));
/// assert_eq!(backend.poll_axis(Axis::P1Horizontal), 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct HeadlessBackend {
    step_time: f64,
    default_size: (u32, u32),
    image_sizes: FxHashMap<String, (u32, u32)>,
    missing: FxHashSet<String>,
    source: Option<Arc<dyn ProjectSource>>,
    resolved: Vec<PathBuf>,
    axes: FxHashMap<Axis, f64>,
    keys: FxHashSet<String>,
    queue: Vec<DrawCall>,
    frames: Vec<Vec<DrawCall>>,
    loaded_images: Vec<String>,
    loaded_sounds: Vec<String>,
    music: Vec<String>,
    steps: u64,
    close_after: Option<u64>,
    shutdowns: u32,
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self {
            step_time: RuntimeConfig::default().step_seconds(),
            default_size: (32, 32),
            image_sizes: FxHashMap::default(),
            missing: FxHashSet::default(),
            source: None,
            resolved: Vec::new(),
            axes: FxHashMap::default(),
            keys: FxHashSet::default(),
            queue: Vec::new(),
            frames: Vec::new(),
            loaded_images: Vec::new(),
            loaded_sounds: Vec::new(),
            music: Vec::new(),
            steps: 0,
            close_after: None,
            shutdowns: 0,
        }
    }
}

impl HeadlessBackend {
    /// Create a backend stepping at the default 60 fps.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend stepping at the configured rate.
    #[must_use]
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self {
            step_time: config.step_seconds(),
            ..Self::default()
        }
    }

    // === Configuration (builder pattern) ===

    /// Fixed step duration in seconds.
    #[must_use]
    pub fn with_step_time(mut self, seconds: f64) -> Self {
        self.step_time = seconds;
        self
    }

    /// Size reported for a specific image.
    #[must_use]
    pub fn with_image_size(mut self, path: impl Into<String>, width: u32, height: u32) -> Self {
        self.image_sizes.insert(path.into(), (width, height));
        self
    }

    /// Make loading `path` fail.
    #[must_use]
    pub fn with_missing_asset(mut self, path: impl Into<String>) -> Self {
        self.missing.insert(path.into());
        self
    }

    /// Resolve asset paths through `source`.
    #[must_use]
    pub fn with_source(mut self, source: impl ProjectSource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Initial axis value.
    #[must_use]
    pub fn with_axis(mut self, axis: Axis, value: f64) -> Self {
        self.axes.insert(axis, value);
        self
    }

    /// Request termination at the start of step `steps + 1`, as if the window
    /// were closed.
    #[must_use]
    pub fn close_after(mut self, steps: u64) -> Self {
        self.close_after = Some(steps);
        self
    }

    // === Scripted input ===

    /// Set an axis value.
    pub fn set_axis(&mut self, axis: Axis, value: f64) {
        self.axes.insert(axis, value);
    }

    /// Hold a key down.
    pub fn press_key(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into());
    }

    /// Release a key.
    pub fn release_key(&mut self, key: &str) {
        self.keys.remove(key);
    }

    // === Recorded output ===

    /// Every presented step's draws, oldest first.
    #[must_use]
    pub fn presented(&self) -> &[Vec<DrawCall>] {
        &self.frames
    }

    /// Draws of the most recently presented step.
    #[must_use]
    pub fn last_presented(&self) -> Option<&[DrawCall]> {
        self.frames.last().map(Vec::as_slice)
    }

    /// Paths of every image loaded, in load order.
    #[must_use]
    pub fn loaded_images(&self) -> &[String] {
        &self.loaded_images
    }

    /// Paths of every sound loaded.
    #[must_use]
    pub fn loaded_sounds(&self) -> &[String] {
        &self.loaded_sounds
    }

    /// Music tracks started, in order.
    #[must_use]
    pub fn music(&self) -> &[String] {
        &self.music
    }

    /// Resolved file of every asset loaded through a project source.
    #[must_use]
    pub fn resolved_assets(&self) -> &[PathBuf] {
        &self.resolved
    }

    /// Number of `pre_update` calls that started a step.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Number of times `shutdown` ran.
    #[must_use]
    pub fn shutdown_count(&self) -> u32 {
        self.shutdowns
    }

    fn check_asset(&mut self, path: &str) -> Result<(), EngineError> {
        let not_found = |reason: String| EngineError::Asset {
            path: path.to_string(),
            reason,
        };
        if self.missing.contains(path) {
            return Err(not_found("not found".to_string()));
        }
        if let Some(source) = &self.source {
            let file = source.resolve(path);
            if !file.is_file() {
                return Err(not_found(format!("no file at {}", file.display())));
            }
            trace!(path, file = %file.display(), "resolved asset");
            self.resolved.push(file);
        }
        Ok(())
    }
}

impl Backend for HeadlessBackend {
    fn pre_update(&mut self) -> HaltResult<()> {
        if self.close_after.is_some_and(|limit| self.steps >= limit) {
            return Err(Halt::Terminate);
        }
        self.steps += 1;
        self.queue.clear();
        Ok(())
    }

    fn post_update(&mut self, camera: Vec2) -> Result<(), EngineError> {
        let frame = self
            .queue
            .drain(..)
            .map(|call| DrawCall {
                position: call.position - camera,
                ..call
            })
            .collect::<Vec<_>>();
        trace!(step = self.steps, draws = frame.len(), "presented");
        self.frames.push(frame);
        Ok(())
    }

    fn draw(&mut self, image: &Image, position: Vec2) {
        self.queue.push(DrawCall {
            image: image.path.clone(),
            position,
        });
    }

    fn load_image(&mut self, path: &str) -> Result<Image, EngineError> {
        self.check_asset(path)?;
        let (width, height) = self
            .image_sizes
            .get(path)
            .copied()
            .unwrap_or(self.default_size);
        self.loaded_images.push(path.to_string());
        Ok(Image {
            path: path.to_string(),
            width,
            height,
        })
    }

    fn load_sound(&mut self, path: &str) -> Result<Sound, EngineError> {
        self.check_asset(path)?;
        self.loaded_sounds.push(path.to_string());
        Ok(Sound {
            path: path.to_string(),
        })
    }

    fn play_music(&mut self, path: &str) -> Result<(), EngineError> {
        self.check_asset(path)?;
        self.music.push(path.to_string());
        Ok(())
    }

    fn poll_axis(&self, axis: Axis) -> f64 {
        self.axes.get(&axis).copied().unwrap_or(0.0)
    }

    fn pressed_keys(&self) -> FxHashSet<String> {
        self.keys.clone()
    }

    fn elapsed_step_time(&self) -> f64 {
        self.step_time
    }

    fn shutdown(&mut self) {
        self.shutdowns += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::JsonDirSource;

    #[test]
    fn test_draws_flushed_with_camera_offset() {
        let mut backend = HeadlessBackend::new();
        let image = backend.load_image("ship.png").unwrap();

        backend.pre_update().unwrap();
        backend.draw(&image, Vec2::new(10.0, 20.0));
        backend.post_update(Vec2::new(5.0, 5.0)).unwrap();

        let frame = backend.last_presented().unwrap();
        assert_eq!(frame.len(), 1);
        assert_eq!(frame[0].position, Vec2::new(5.0, 15.0));
        assert_eq!(frame[0].image, "ship.png");
    }

    #[test]
    fn test_close_after() {
        let mut backend = HeadlessBackend::new().close_after(2);
        assert!(backend.pre_update().is_ok());
        assert!(backend.pre_update().is_ok());
        assert!(matches!(backend.pre_update(), Err(Halt::Terminate)));
        assert_eq!(backend.steps(), 2);
    }

    #[test]
    fn test_default_image_size() {
        let mut backend = HeadlessBackend::new();
        let image = backend.load_image("anything.png").unwrap();
        assert_eq!((image.width, image.height), (32, 32));
    }

    #[test]
    fn test_missing_asset() {
        let mut backend = HeadlessBackend::new().with_missing_asset("gone.png");
        assert!(matches!(
            backend.load_image("gone.png"),
            Err(EngineError::Asset { .. })
        ));
        assert!(backend.loaded_images().is_empty());
    }

    #[test]
    fn test_poll_axis_id() {
        let backend = HeadlessBackend::new().with_axis(Axis::P2Fire1, 1.0);
        assert_eq!(backend.poll_axis_id(8).unwrap(), 1.0);
        assert_eq!(backend.poll_axis_id(0).unwrap(), 0.0);
        assert!(matches!(backend.poll_axis_id(24), Err(EngineError::UnknownAxis(24))));
    }

    #[test]
    fn test_scripted_keys() {
        let mut backend = HeadlessBackend::new();
        backend.press_key("ESC");
        assert!(backend.pressed_keys().contains("ESC"));
        backend.release_key("ESC");
        assert!(backend.pressed_keys().is_empty());
    }

    #[test]
    fn test_sounds_and_music_recorded() {
        let mut backend = HeadlessBackend::new().with_missing_asset("gone.ogg");
        let sound = backend.load_sound("jump.wav").unwrap();
        backend.play_music("theme.ogg").unwrap();

        assert_eq!(sound.path, "jump.wav");
        assert_eq!(backend.loaded_sounds(), ["jump.wav"]);
        assert_eq!(backend.music(), ["theme.ogg"]);
        assert!(backend.play_music("gone.ogg").is_err());
    }

    #[test]
    fn test_assets_resolved_through_source() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("jump.wav"), b"").unwrap();
        std::fs::write(dir.path().join("theme.ogg"), b"").unwrap();
        let mut backend = HeadlessBackend::new().with_source(JsonDirSource::new(dir.path()));

        backend.load_sound("jump.wav").unwrap();
        backend.play_music("theme.ogg").unwrap();
        assert_eq!(
            backend.resolved_assets(),
            [dir.path().join("jump.wav"), dir.path().join("theme.ogg")]
        );
        assert!(matches!(
            backend.load_image("wall.png"),
            Err(EngineError::Asset { .. })
        ));
        assert!(backend.loaded_images().is_empty());
    }
}
