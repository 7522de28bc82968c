//! Project data: what the designer wrote, loaded and checked.
//!
//! ## Key Components
//!
//! - [`ObjectDescription`] / [`ObjectBlueprint`]: one object placement
//! - [`Frame`]: a scene's blueprints (an arena addressed by [`BlueprintId`])
//!   and its event grid
//! - [`Project`]: the ordered frames plus runtime configuration
//! - [`ProjectSource`] / [`JsonDirSource`]: where a project comes from
//!
//! Descriptions are the serde shapes; loading turns them into blueprints and
//! frames, resolving duplicate references and rejecting bad ones.

mod blueprint;
mod frame;
mod loader;

pub use blueprint::{BlueprintId, ObjectBlueprint, ObjectDescription};
pub use frame::{Frame, FrameDescription};
pub use loader::{JsonDirSource, Project, ProjectDescription, ProjectSource, PROJECT_FILE};
