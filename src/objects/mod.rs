//! Runtime objects.
//!
//! ## Key Components
//!
//! - [`Behavior`]: the capability every object type implements
//! - [`ObjectContext`]: what a behavior can reach while it runs
//! - [`World`]: the insertion-ordered live collection and attribute stores
//! - [`TypeRegistry`]: type name to constructor, closed once a game is built
//! - [`builtin`]: `Background`, `Active`, `Input` and `Game`

pub mod behavior;
pub mod builtin;
mod context;
mod registry;
pub mod world;

pub use behavior::Behavior;
pub use context::ObjectContext;
pub use registry::{Constructor, ObjectType, TypeRegistry};
pub use world::{ObjectCore, Removed, StoreId, World};
