//! Object blueprints - the static description of one object placement.
//!
//! `ObjectDescription` is the raw, serialized form produced by a loader (or
//! carried by a `Create object` action). `ObjectBlueprint` is the loaded form
//! owned by a `Frame`, with its duplicate source resolved to a `BlueprintId`
//! inside the same frame.

use serde::{Deserialize, Serialize};

use crate::core::{Attributes, EngineError, Value, Vec2};

/// Index of a blueprint within its frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlueprintId(pub usize);

impl BlueprintId {
    /// Create a blueprint ID from an index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for BlueprintId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Blueprint({})", self.0)
    }
}

/// Raw description of one object placement.
///
/// ```
/// use rust_mmf::project::ObjectDescription;
///
/// let json = r#"{"type": "Background", "name": "wall", "pos": [0, 0],
///                "attrib": {"Sprite name": "wall.png"}, "duplicate_of": null}"#;
/// let desc: ObjectDescription = serde_json::from_str(json).unwrap();
/// assert_eq!(desc.type_name, "Background");
/// assert_eq!(desc.duplicate_of, None);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectDescription {
    /// Registered object type.
    #[serde(rename = "type")]
    pub type_name: String,

    /// Instance name. Not unique.
    pub name: String,

    /// Initial position.
    pub pos: Vec2,

    /// Attribute values.
    pub attrib: Attributes,

    /// Index of the sibling blueprint this one duplicates.
    #[serde(default)]
    pub duplicate_of: Option<usize>,
}

impl ObjectDescription {
    /// Create a description with no attributes.
    pub fn new(type_name: impl Into<String>, name: impl Into<String>, pos: Vec2) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            pos,
            attrib: Attributes::default(),
            duplicate_of: None,
        }
    }

    /// Add an attribute (builder pattern).
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrib.insert(key.into(), value.into());
        self
    }

    /// Mark as a duplicate of the blueprint at `index` (builder pattern).
    #[must_use]
    pub fn duplicate_of(mut self, index: usize) -> Self {
        self.duplicate_of = Some(index);
        self
    }

    /// Parse a description carried as a dynamic value (`Create object`).
    pub fn from_value(value: &Value) -> Result<Self, EngineError> {
        let json = serde_json::to_value(value)?;
        serde_json::from_value(json).map_err(|e| {
            EngineError::MalformedProject(format!("invalid object description: {e}"))
        })
    }
}

/// A loaded blueprint.
///
/// Immutable once its frame is loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectBlueprint {
    /// Registered object type.
    pub type_name: String,

    /// Instance name.
    pub name: String,

    /// Initial position.
    pub position: Vec2,

    /// Attribute values installed at activation (ignored for duplicates).
    pub attributes: Attributes,

    /// Resolved duplicate source within the same frame.
    pub(crate) duplicate_of: Option<BlueprintId>,
}

impl ObjectBlueprint {
    /// Build an unresolved blueprint from its description.
    #[must_use]
    pub fn from_description(desc: &ObjectDescription) -> Self {
        Self {
            type_name: desc.type_name.clone(),
            name: desc.name.clone(),
            position: desc.pos,
            attributes: desc.attrib.clone(),
            duplicate_of: None,
        }
    }

    /// The blueprint this one duplicates, if any.
    #[must_use]
    pub fn duplicate_of(&self) -> Option<BlueprintId> {
        self.duplicate_of
    }

    /// Check if this blueprint is a duplicate.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        self.duplicate_of.is_some()
    }
}
