//! Borrowed dispatch view over a running game.
//!
//! `Stage` bundles everything a dispatch needs (live objects, backend,
//! camera, registry, configuration and clock) as disjoint borrows of the
//! `Game`, so the grid can evaluate rules while objects mutate the world.
//!
//! ## Dispatch
//!
//! A behavior is checked out of the world for the duration of its call and
//! put back afterwards, which lets it receive `&mut self` alongside a context
//! that can reach every other object. If the object dies during its own call
//! the behavior is dropped instead of restored.

use tracing::{info, trace};

use crate::backend::Backend;
use crate::core::{HaltResult, ObjectId, RuntimeConfig, Value, Vec2};
use crate::events::{Participants, DESTROY};
use crate::objects::{Behavior, ObjectContext, TypeRegistry, World};
use crate::project::{BlueprintId, Frame, ObjectDescription};

/// Mutable view of a running game, handed to the grid and to behaviors.
pub struct Stage<'a> {
    world: &'a mut World,
    backend: &'a mut dyn Backend,
    camera: &'a mut Vec2,
    registry: &'a TypeRegistry,
    config: &'a RuntimeConfig,
    clock: f64,
}

impl<'a> Stage<'a> {
    pub fn new(
        world: &'a mut World,
        backend: &'a mut dyn Backend,
        camera: &'a mut Vec2,
        registry: &'a TypeRegistry,
        config: &'a RuntimeConfig,
        clock: f64,
    ) -> Self {
        Self {
            world,
            backend,
            camera,
            registry,
            config,
            clock,
        }
    }

    // === Accessors ===

    /// Live objects.
    #[must_use]
    pub fn world(&self) -> &World {
        self.world
    }

    /// Live objects, mutably.
    pub fn world_mut(&mut self) -> &mut World {
        self.world
    }

    /// The backend.
    #[must_use]
    pub fn backend(&self) -> &dyn Backend {
        &*self.backend
    }

    /// The backend, mutably.
    pub fn backend_mut(&mut self) -> &mut dyn Backend {
        &mut *self.backend
    }

    /// Camera offset.
    #[must_use]
    pub fn camera(&self) -> Vec2 {
        *self.camera
    }

    /// Move the camera.
    pub fn set_camera(&mut self, camera: Vec2) {
        *self.camera = camera;
    }

    /// Runtime configuration.
    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        self.config
    }

    /// Accumulated step time in seconds.
    #[must_use]
    pub fn clock(&self) -> f64 {
        self.clock
    }

    // === Dispatch ===

    /// Run `f` against the behavior of `id`. `None` if the object isn't live
    /// or is already being dispatched to.
    fn dispatch<T>(
        &mut self,
        id: ObjectId,
        f: impl FnOnce(&mut dyn Behavior, &mut ObjectContext<'_, '_>) -> HaltResult<T>,
    ) -> Option<HaltResult<T>> {
        let mut behavior = self.world.take_behavior(id)?;
        let result = {
            let mut ctx = ObjectContext::new(id, self);
            f(behavior.as_mut(), &mut ctx)
        };
        self.world.restore_behavior(id, behavior);
        Some(result)
    }

    /// Call `init` on a live object.
    pub fn init_object(&mut self, id: ObjectId) -> HaltResult<()> {
        self.dispatch(id, |b, ctx| b.init(ctx)).unwrap_or(Ok(()))
    }

    /// Call `tick` on a live object. Dead objects are skipped.
    pub fn tick_object(&mut self, id: ObjectId) -> HaltResult<()> {
        self.dispatch(id, |b, ctx| b.tick(ctx)).unwrap_or(Ok(()))
    }

    /// Evaluate a condition on an object. Dead objects never fire.
    pub fn check_event(
        &mut self,
        id: ObjectId,
        name: &str,
        arg: &Value,
    ) -> HaltResult<Option<Participants>> {
        self.dispatch(id, |b, ctx| b.check_event(ctx, name, arg))
            .unwrap_or(Ok(None))
    }

    /// Deliver an action to an object.
    ///
    /// `Destroy` removes the object and runs its destroy hook; anything else
    /// goes to `handle_action`. Triggering a dead object does nothing.
    pub fn trigger(&mut self, id: ObjectId, name: &str, arg: &Value) -> HaltResult<()> {
        if name == DESTROY {
            return self.destroy(id);
        }
        self.dispatch(id, |b, ctx| b.handle_action(ctx, name, arg))
            .unwrap_or(Ok(()))
    }

    /// Remove an object and run its destroy hook once. No-op if not live.
    pub fn destroy(&mut self, id: ObjectId) -> HaltResult<()> {
        let Some(removed) = self.world.remove(id) else {
            return Ok(());
        };
        match removed.behavior {
            Some(mut behavior) => behavior.on_destroy(),
            None => Ok(()),
        }
    }

    /// Destroy every live object, in collection order.
    ///
    /// Keeps going after a halt so nothing from the old frame survives; the
    /// first halt is returned.
    pub fn destroy_all(&mut self) -> HaltResult<()> {
        let mut first = Ok(());
        for id in self.world.ids() {
            if let Err(halt) = self.destroy(id) {
                if first.is_ok() {
                    first = Err(halt);
                }
            }
        }
        first
    }

    // === Creation ===

    /// Create and initialize one object outside frame activation.
    ///
    /// The type and attributes are checked before anything is inserted. An
    /// object whose `init` fails is removed again without its destroy hook,
    /// so a failure leaves the live collection unchanged. `duplicate_of` has
    /// no meaning outside a frame and is ignored.
    pub fn spawn(&mut self, desc: &ObjectDescription) -> HaltResult<ObjectId> {
        let object_type = self.registry.lookup(&desc.type_name)?;
        object_type.validate(&desc.attrib)?;

        let id = self.world.spawn(
            desc.type_name.clone(),
            desc.name.clone(),
            desc.pos,
            object_type.construct(),
        );
        self.world.install_attributes(id, desc.attrib.clone());
        if let Err(halt) = self.init_object(id) {
            self.world.remove(id);
            return Err(halt);
        }
        Ok(id)
    }

    /// Destroy the current objects and instantiate `frame`.
    ///
    /// 1. destroy every live object
    /// 2. spawn one object per blueprint, in order
    /// 3. link duplicates to the objects spawned from their sources
    /// 4. install and check attributes of non-duplicates
    /// 5. `init` every new object, in order
    ///
    /// Returns the new objects' ids in blueprint order. A termination
    /// requested during step 1 stops activation before anything is spawned.
    pub fn activate(&mut self, frame: &Frame) -> HaltResult<Vec<ObjectId>> {
        self.destroy_all()?;

        let mut ids = Vec::with_capacity(frame.len());
        for blueprint in frame.blueprints() {
            let object_type = self.registry.lookup(&blueprint.type_name)?;
            ids.push(self.world.spawn(
                blueprint.type_name.clone(),
                blueprint.name.clone(),
                blueprint.position,
                object_type.construct(),
            ));
        }

        for (blueprint, &id) in frame.blueprints().iter().zip(&ids) {
            if let Some(source) = blueprint.duplicate_of() {
                self.world.set_duplicate(id, ids[source.index()]);
            }
        }
        for &id in &ids {
            self.world.share_root_store(id)?;
        }

        for (index, (blueprint, &id)) in frame.blueprints().iter().zip(&ids).enumerate() {
            if blueprint.is_duplicate() {
                continue;
            }
            let object_type = self.registry.lookup(&blueprint.type_name)?;
            object_type.validate(&blueprint.attributes)?;
            trace!(blueprint = %BlueprintId::new(index), object = %id, "installing attributes");
            self.world.install_attributes(id, blueprint.attributes.clone());
        }

        for &id in &ids {
            self.init_object(id)?;
        }
        info!(objects = ids.len(), rules = frame.grid().len(), "frame activated");
        Ok(ids)
    }
}

impl std::fmt::Debug for Stage<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("world", &self.world)
            .field("camera", &self.camera)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

