//! The live-object collection.
//!
//! `World` owns every currently instantiated object of the active frame:
//! its identity and placement (`ObjectCore`), its behavior, and the attribute
//! stores.
//!
//! ## Ordering
//!
//! Iteration follows insertion order. Broadcast actions reach objects in that
//! order, so rule firing is reproducible. The order list is an `im::Vector`,
//! which makes [`World::ids`] an O(1) snapshot that stays valid while the
//! world is mutated.
//!
//! ## Attribute stores
//!
//! Every object points at one store through a `StoreId`. A duplicate's handle
//! is redirected to the store of its chain root once, at activation, so every
//! read or write is a single lookup and writes through any member of the
//! chain are visible through all of them. A store is dropped when the last
//! live object referencing it is destroyed.

use im::Vector;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::core::{Attributes, EngineError, ObjectId, Value, Vec2};

use super::behavior::Behavior;

/// Handle of an attribute store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StoreId(u32);

/// Identity and placement of a live object.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectCore {
    id: ObjectId,
    type_name: String,

    /// Instance name. Not unique.
    pub name: String,

    /// Current position.
    pub position: Vec2,

    /// Visible extent, once known. Objects without a size never collide.
    pub size: Option<Vec2>,

    duplicate_of: Option<ObjectId>,
    store: StoreId,
}

impl ObjectCore {
    /// The object's identity.
    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Registered type the object was built from.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The duplicate source this object was spawned from, if any.
    #[must_use]
    pub fn duplicate_of(&self) -> Option<ObjectId> {
        self.duplicate_of
    }

    /// Check if this object is a direct duplicate of `source`.
    #[must_use]
    pub fn is_duplicate_of(&self, source: ObjectId) -> bool {
        self.duplicate_of == Some(source)
    }
}

/// An object removed from the world.
pub struct Removed {
    pub core: ObjectCore,
    /// `None` if the behavior was checked out for dispatch when removed.
    pub behavior: Option<Box<dyn Behavior>>,
}

/// Insertion-ordered collection of live objects.
#[derive(Default)]
pub struct World {
    order: Vector<ObjectId>,
    cores: FxHashMap<ObjectId, ObjectCore>,
    behaviors: FxHashMap<ObjectId, Box<dyn Behavior>>,
    stores: FxHashMap<StoreId, Attributes>,
    next_id: u32,
    next_store: u32,
}

impl World {
    /// Create an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object at the end of the collection.
    ///
    /// The object gets its own empty attribute store.
    pub fn spawn(
        &mut self,
        type_name: impl Into<String>,
        name: impl Into<String>,
        position: Vec2,
        behavior: Box<dyn Behavior>,
    ) -> ObjectId {
        let id = ObjectId::new(self.next_id);
        self.next_id += 1;

        let store = StoreId(self.next_store);
        self.next_store += 1;
        self.stores.insert(store, Attributes::default());

        let core = ObjectCore {
            id,
            type_name: type_name.into(),
            name: name.into(),
            position,
            size: None,
            duplicate_of: None,
            store,
        };
        debug!(%id, type_name = %core.type_name, name = %core.name, "spawned object");

        self.cores.insert(id, core);
        self.behaviors.insert(id, behavior);
        self.order.push_back(id);
        id
    }

    /// Remove an object. Returns `None` if it wasn't live.
    pub fn remove(&mut self, id: ObjectId) -> Option<Removed> {
        let core = self.cores.remove(&id)?;
        if let Some(index) = self.order.index_of(&id) {
            self.order.remove(index);
        }
        let behavior = self.behaviors.remove(&id);

        if !self.cores.values().any(|c| c.store == core.store) {
            self.stores.remove(&core.store);
        }
        debug!(%id, name = %core.name, "removed object");

        Some(Removed { core, behavior })
    }

    // === Queries ===

    /// Check if an object is live.
    #[must_use]
    pub fn is_live(&self, id: ObjectId) -> bool {
        self.cores.contains_key(&id)
    }

    /// Number of live objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if there are no live objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Snapshot of live ids in collection order.
    #[must_use]
    pub fn ids(&self) -> Vector<ObjectId> {
        self.order.clone()
    }

    /// Get an object's core.
    #[must_use]
    pub fn core(&self, id: ObjectId) -> Option<&ObjectCore> {
        self.cores.get(&id)
    }

    /// Get an object's core mutably.
    pub fn core_mut(&mut self, id: ObjectId) -> Option<&mut ObjectCore> {
        self.cores.get_mut(&id)
    }

    /// Iterate over live objects in collection order.
    pub fn iter(&self) -> impl Iterator<Item = &ObjectCore> {
        self.order.iter().filter_map(move |id| self.cores.get(id))
    }

    /// Ids of every live object named `name`, in collection order.
    #[must_use]
    pub fn named(&self, name: &str) -> Vec<ObjectId> {
        self.iter().filter(|c| c.name == name).map(ObjectCore::id).collect()
    }

    // === Duplicates ===

    /// Record that `id` duplicates `source`.
    pub fn set_duplicate(&mut self, id: ObjectId, source: ObjectId) {
        if let Some(core) = self.cores.get_mut(&id) {
            core.duplicate_of = Some(source);
        }
    }

    /// Follow the duplicate chain from `id` to its root.
    pub fn chain_root(&self, id: ObjectId) -> Result<ObjectId, EngineError> {
        let mut current = id;
        let mut steps = 0;
        while let Some(source) = self.cores.get(&current).and_then(|c| c.duplicate_of) {
            if !self.cores.contains_key(&source) {
                break;
            }
            current = source;
            steps += 1;
            if steps > self.cores.len() {
                return Err(EngineError::MalformedProject(format!(
                    "duplicate chain of {id} forms a cycle"
                )));
            }
        }
        Ok(current)
    }

    /// Point a duplicate's attribute handle at its chain root's store.
    pub fn share_root_store(&mut self, id: ObjectId) -> Result<(), EngineError> {
        let root = self.chain_root(id)?;
        if root == id {
            return Ok(());
        }
        let root_store = self.cores[&root].store;
        let Some(core) = self.cores.get_mut(&id) else {
            return Ok(());
        };
        let own = std::mem::replace(&mut core.store, root_store);
        if own != root_store && !self.cores.values().any(|c| c.store == own) {
            self.stores.remove(&own);
        }
        Ok(())
    }

    // === Attributes ===

    /// Replace the contents of an object's attribute store.
    pub fn install_attributes(&mut self, id: ObjectId, attributes: Attributes) {
        if let Some(store) = self.cores.get(&id).map(|c| c.store) {
            self.stores.insert(store, attributes);
        }
    }

    /// The attribute store an object reads through.
    #[must_use]
    pub fn attributes(&self, id: ObjectId) -> Option<&Attributes> {
        self.cores.get(&id).and_then(|c| self.stores.get(&c.store))
    }

    /// Read an attribute through the object's duplicate chain.
    #[must_use]
    pub fn attribute(&self, id: ObjectId, key: &str) -> Option<&Value> {
        self.attributes(id).and_then(|a| a.get(key))
    }

    /// Write an attribute through the object's duplicate chain.
    ///
    /// Returns `false` if the object isn't live.
    pub fn set_attribute(&mut self, id: ObjectId, key: impl Into<String>, value: Value) -> bool {
        let Some(store) = self.cores.get(&id).map(|c| c.store) else {
            return false;
        };
        self.stores.entry(store).or_default().insert(key.into(), value);
        true
    }

    // === Behaviors ===

    /// Check a behavior out for dispatch.
    pub(crate) fn take_behavior(&mut self, id: ObjectId) -> Option<Box<dyn Behavior>> {
        self.behaviors.remove(&id)
    }

    /// Return a checked-out behavior. Dropped if the object died meanwhile.
    pub(crate) fn restore_behavior(&mut self, id: ObjectId, behavior: Box<dyn Behavior>) {
        if self.cores.contains_key(&id) {
            self.behaviors.insert(id, behavior);
        }
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("objects", &self.iter().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
