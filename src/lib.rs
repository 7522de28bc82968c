//! # rust-mmf
//!
//! A declarative, event-driven game-object runtime.
//!
//! A game is a list of *frames* (scenes). Each frame places objects and
//! declares an *event grid*: rules binding named conditions on objects to
//! named actions on objects. The runtime evaluates the rules every step,
//! ticks every live object, and drives a platform backend.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: the live collection is insertion-ordered, rules run
//!    in declaration order and actions in binding order.
//!
//! 2. **Closed type set**: object types are registered once, before the game
//!    is built. Blueprints naming unknown types are rejected up front.
//!
//! 3. **Shared duplicates**: a duplicate object shares its attribute store
//!    with the root of its duplicate chain.
//!
//! 4. **Explicit termination**: stopping the game is a value (`Halt::Terminate`)
//!    returned through every dispatch path, caught once by the main loop.
//!
//! ## Modules
//!
//! - `core`: ids, geometry, dynamic values, axes, configuration, errors
//! - `project`: blueprints, frames and project loading
//! - `events`: events, actions, the event grid and name resolution
//! - `objects`: the `Behavior` trait, the live collection, the type
//!   registry and builtin types
//! - `backend`: the platform contract and a headless implementation
//! - `runtime`: the `Game` orchestrator

pub mod backend;
pub mod core;
pub mod events;
pub mod objects;
pub mod project;
pub mod runtime;

// Re-export commonly used types
pub use crate::core::{
    Attributes, Axis, EngineError, Halt, HaltResult, ObjectId, RuntimeConfig, Value, Vec2,
};
pub use crate::backend::{Backend, HeadlessBackend};
pub use crate::events::{Action, Event, EventGrid};
pub use crate::objects::{Behavior, ObjectContext, TypeRegistry, World};
pub use crate::project::{JsonDirSource, ObjectDescription, Project, ProjectSource};
pub use crate::runtime::{Game, RunSummary};
