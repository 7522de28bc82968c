//! What an object can see and do while the engine is calling into it.

use crate::backend::Backend;
use crate::core::{EngineError, HaltResult, ObjectId, RuntimeConfig, Value, Vec2};
use crate::project::ObjectDescription;
use crate::runtime::Stage;

use super::world::{ObjectCore, World};

/// Access handed to a `Behavior` during dispatch.
///
/// The object the context was created for is live for the whole call: the
/// engine only dispatches to live objects, and a behavior can't destroy
/// objects through its context.
pub struct ObjectContext<'s, 'a> {
    id: ObjectId,
    stage: &'s mut Stage<'a>,
}

impl<'s, 'a> ObjectContext<'s, 'a> {
    pub(crate) fn new(id: ObjectId, stage: &'s mut Stage<'a>) -> Self {
        Self { id, stage }
    }

    /// The object being dispatched to.
    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The object's core.
    ///
    /// Panics if the object isn't live, which dispatch rules out.
    #[must_use]
    pub fn core(&self) -> &ObjectCore {
        self.stage
            .world()
            .core(self.id)
            .expect("dispatched object is live")
    }

    /// The object's core, mutably.
    pub fn core_mut(&mut self) -> &mut ObjectCore {
        self.stage
            .world_mut()
            .core_mut(self.id)
            .expect("dispatched object is live")
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.core().position
    }

    /// Move the object.
    pub fn set_position(&mut self, position: Vec2) {
        self.core_mut().position = position;
    }

    // === Attributes ===

    /// Read an attribute through the duplicate chain.
    pub fn attribute(&self, key: &str) -> Result<&Value, EngineError> {
        self.stage
            .world()
            .attribute(self.id, key)
            .ok_or_else(|| EngineError::MissingAttribute {
                type_name: self.core().type_name().to_string(),
                key: key.to_string(),
            })
    }

    /// Read a numeric attribute.
    pub fn number_attribute(&self, key: &str) -> Result<f64, EngineError> {
        let value = self.attribute(key)?;
        value.as_number().ok_or_else(|| EngineError::InvalidAttribute {
            key: key.to_string(),
            reason: format!("expected a number, got {}", value.kind()),
        })
    }

    /// Read a text attribute.
    pub fn text_attribute(&self, key: &str) -> Result<&str, EngineError> {
        let value = self.attribute(key)?;
        value.as_text().ok_or_else(|| EngineError::InvalidAttribute {
            key: key.to_string(),
            reason: format!("expected text, got {}", value.kind()),
        })
    }

    /// Write an attribute through the duplicate chain.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let id = self.id;
        self.stage.world_mut().set_attribute(id, key, value.into());
    }

    // === Surroundings ===

    /// The live-object collection.
    #[must_use]
    pub fn world(&self) -> &World {
        self.stage.world()
    }

    /// Every live object named `name`, in collection order.
    #[must_use]
    pub fn find_targets(&self, name: &str) -> Vec<ObjectId> {
        self.stage.world().named(name)
    }

    /// The platform backend.
    pub fn backend(&mut self) -> &mut dyn Backend {
        self.stage.backend_mut()
    }

    /// Read-only backend access, for input polling.
    #[must_use]
    pub fn input(&self) -> &dyn Backend {
        self.stage.backend()
    }

    /// Duration of the current step in seconds.
    #[must_use]
    pub fn step_time(&self) -> f64 {
        self.stage.backend().elapsed_step_time()
    }

    /// Seconds of game time since the game started.
    #[must_use]
    pub fn clock(&self) -> f64 {
        self.stage.clock()
    }

    /// Runtime configuration.
    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        self.stage.config()
    }

    /// Camera offset.
    #[must_use]
    pub fn camera(&self) -> Vec2 {
        self.stage.camera()
    }

    /// Move the camera.
    pub fn set_camera(&mut self, camera: Vec2) {
        self.stage.set_camera(camera);
    }

    /// Spawn and initialize a new object from a description.
    ///
    /// On failure the live collection is unchanged.
    pub fn spawn(&mut self, description: &ObjectDescription) -> HaltResult<ObjectId> {
        self.stage.spawn(description)
    }
}
