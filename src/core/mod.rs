//! Core engine types: identifiers, values, geometry, axes, configuration, errors.
//!
//! This module contains the building blocks every other module uses. None of
//! it knows about frames, rules or specific object types.

pub mod axis;
pub mod config;
pub mod error;
pub mod geometry;
pub mod object_id;
pub mod value;

pub use axis::{Axis, Control};
pub use config::RuntimeConfig;
pub use error::{EngineError, Halt, HaltResult};
pub use geometry::{Bounds, Vec2};
pub use object_id::ObjectId;
pub use value::{Attributes, Value};
