//! Object type registry.
//!
//! Maps a type name (as written in blueprints) to a constructor and the
//! attribute names the type requires. A `Game` takes its registry by value
//! when built, so the set of types is closed from then on.

use rustc_hash::FxHashMap;

use crate::core::{Attributes, EngineError};

use super::behavior::Behavior;
use super::builtin::{Active, Background, GameController, Input};

/// Constructor for a fresh behavior.
pub type Constructor = fn() -> Box<dyn Behavior>;

/// A registered object type.
#[derive(Clone, Debug)]
pub struct ObjectType {
    name: String,
    attributes: &'static [&'static str],
    construct: Constructor,
}

impl ObjectType {
    /// Describe a type.
    pub fn new(
        name: impl Into<String>,
        attributes: &'static [&'static str],
        construct: Constructor,
    ) -> Self {
        Self {
            name: name.into(),
            attributes,
            construct,
        }
    }

    /// Type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute names every instance must provide.
    #[must_use]
    pub fn attributes(&self) -> &'static [&'static str] {
        self.attributes
    }

    /// Build a fresh behavior.
    #[must_use]
    pub fn construct(&self) -> Box<dyn Behavior> {
        (self.construct)()
    }

    /// Check that `attributes` provides every required name.
    pub fn validate(&self, attributes: &Attributes) -> Result<(), EngineError> {
        match self.attributes.iter().find(|key| !attributes.contains_key(**key)) {
            Some(key) => Err(EngineError::MissingAttribute {
                type_name: self.name.clone(),
                key: (*key).to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Registry of object types.
///
/// ## Example
///
/// ```
/// use rust_mmf::objects::TypeRegistry;
///
/// let registry = TypeRegistry::with_builtins();
/// assert!(registry.contains("Background"));
/// assert!(registry.contains("Game"));
/// assert!(registry.lookup("Ghost").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    types: FxHashMap<String, ObjectType>,
}

impl TypeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the builtin types: `Background`, `Active`,
    /// `Input` and `Game`.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Background::object_type());
        registry.register(Active::object_type());
        registry.register(Input::object_type());
        registry.register(GameController::object_type());
        registry
    }

    /// Register a type.
    ///
    /// Panics if a type with the same name already exists.
    pub fn register(&mut self, object_type: ObjectType) {
        if self.types.contains_key(object_type.name()) {
            panic!("Object type {:?} already registered", object_type.name());
        }
        self.types.insert(object_type.name.clone(), object_type);
    }

    /// Get a type by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ObjectType> {
        self.types.get(name)
    }

    /// Get a type by name, failing with `UnknownObjectType`.
    pub fn lookup(&self, name: &str) -> Result<&ObjectType, EngineError> {
        self.get(name)
            .ok_or_else(|| EngineError::UnknownObjectType(name.to_string()))
    }

    /// Check if a type name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered type names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
