//! Project loading.
//!
//! A project is an ordered list of frames plus optional runtime
//! configuration. Where it comes from is abstracted by [`ProjectSource`],
//! which also resolves asset paths for backends.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{EngineError, RuntimeConfig};

use super::frame::{Frame, FrameDescription};

/// Name of the project file inside a project directory.
pub const PROJECT_FILE: &str = "project.json";

/// Raw project, as stored.
///
/// ```
/// use rust_mmf::project::ProjectDescription;
///
/// let json = r#"{"config": {"target_fps": 30}, "frames": [{"objs": [], "grid": []}]}"#;
/// let desc: ProjectDescription = serde_json::from_str(json).unwrap();
/// assert_eq!(desc.config.target_fps, 30);
/// assert_eq!(desc.config.screen_width, 800);
/// assert_eq!(desc.frames.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectDescription {
    #[serde(default)]
    pub config: RuntimeConfig,
    pub frames: Vec<FrameDescription>,
}

impl ProjectDescription {
    /// Parse a project from JSON text.
    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Add a frame (builder pattern).
    #[must_use]
    pub fn with_frame(mut self, frame: FrameDescription) -> Self {
        self.frames.push(frame);
        self
    }

    /// Set the configuration (builder pattern).
    #[must_use]
    pub fn with_config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }
}

/// A loaded project.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Project {
    pub config: RuntimeConfig,
    pub frames: Vec<Frame>,
}

impl Project {
    /// Load every frame of a description.
    pub fn from_description(desc: &ProjectDescription) -> Result<Self, EngineError> {
        let frames = desc
            .frames
            .iter()
            .map(Frame::from_description)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            config: desc.config.clone(),
            frames,
        })
    }

    /// Read and load a project from a source.
    pub fn load(source: &dyn ProjectSource) -> Result<Self, EngineError> {
        let project = Self::from_description(&source.project()?)?;
        debug!(frames = project.frames.len(), "loaded project");
        Ok(project)
    }
}

/// Where a project and its assets live.
pub trait ProjectSource: fmt::Debug {
    /// Read the project description.
    fn project(&self) -> Result<ProjectDescription, EngineError>;

    /// Resolve an asset path as written in the project.
    fn resolve(&self, path: &str) -> PathBuf;
}

/// A project directory: `project.json` plus assets, resolved relative to
/// the directory.
#[derive(Clone, Debug)]
pub struct JsonDirSource {
    root: PathBuf,
}

impl JsonDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The project directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ProjectSource for JsonDirSource {
    fn project(&self) -> Result<ProjectDescription, EngineError> {
        let path = self.root.join(PROJECT_FILE);
        debug!(path = %path.display(), "reading project");
        let text = fs::read_to_string(&path)?;
        ProjectDescription::from_json(&text)
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_when_absent() {
        let desc = ProjectDescription::from_json(r#"{"frames": []}"#).unwrap();
        assert_eq!(desc.config, RuntimeConfig::default());
    }

    #[test]
    fn test_missing_frames_is_malformed() {
        let err = ProjectDescription::from_json("{}").unwrap_err();
        assert!(err.is_malformed_project());
    }

    #[test]
    fn test_resolve_relative_to_root() {
        let source = JsonDirSource::new("/games/demo");
        assert_eq!(source.resolve("img/wall.png"), PathBuf::from("/games/demo/img/wall.png"));
    }
}
