//! Frames: a scene's blueprints plus its event grid.

use serde::{Deserialize, Serialize};

use crate::core::EngineError;
use crate::events::EventGrid;

use super::blueprint::{BlueprintId, ObjectBlueprint, ObjectDescription};

/// Raw description of one frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameDescription {
    /// Object placements, in activation order.
    pub objs: Vec<ObjectDescription>,

    /// Rule table.
    #[serde(default)]
    pub grid: EventGrid,
}

impl FrameDescription {
    /// Create an empty frame description.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object placement (builder pattern).
    #[must_use]
    pub fn with_object(mut self, object: ObjectDescription) -> Self {
        self.objs.push(object);
        self
    }

    /// Set the rule table (builder pattern).
    #[must_use]
    pub fn with_grid(mut self, grid: EventGrid) -> Self {
        self.grid = grid;
        self
    }
}

/// A loaded frame. Immutable.
///
/// Blueprints live in an arena addressed by [`BlueprintId`]; duplicate
/// references are indices into it, resolved and checked once at load.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    blueprints: Vec<ObjectBlueprint>,
    grid: EventGrid,
}

impl Frame {
    /// Load a frame.
    ///
    /// Builds every blueprint first, then resolves duplicate indices, so a
    /// blueprint may duplicate one declared after it. Fails with
    /// `MalformedProject` on an out-of-range index or a duplicate cycle.
    pub fn from_description(desc: &FrameDescription) -> Result<Self, EngineError> {
        let mut blueprints: Vec<_> = desc
            .objs
            .iter()
            .map(ObjectBlueprint::from_description)
            .collect();

        for (index, object) in desc.objs.iter().enumerate() {
            let Some(source) = object.duplicate_of else {
                continue;
            };
            if source >= blueprints.len() {
                return Err(EngineError::MalformedProject(format!(
                    "object {index} (\"{}\") duplicates object {source}, but the frame has {} objects",
                    object.name,
                    blueprints.len()
                )));
            }
            blueprints[index].duplicate_of = Some(BlueprintId::new(source));
        }

        let frame = Self {
            blueprints,
            grid: desc.grid.clone(),
        };
        for index in 0..frame.len() {
            frame.root_of(BlueprintId::new(index))?;
        }
        Ok(frame)
    }

    /// Blueprints in activation order.
    #[must_use]
    pub fn blueprints(&self) -> &[ObjectBlueprint] {
        &self.blueprints
    }

    /// Get a blueprint by id.
    #[must_use]
    pub fn blueprint(&self, id: BlueprintId) -> Option<&ObjectBlueprint> {
        self.blueprints.get(id.index())
    }

    /// The frame's rule table.
    #[must_use]
    pub fn grid(&self) -> &EventGrid {
        &self.grid
    }

    /// Number of blueprints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    /// Check if the frame has no blueprints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }

    /// Follow duplicate references from `id` to the blueprint that owns the
    /// attributes.
    pub fn root_of(&self, id: BlueprintId) -> Result<BlueprintId, EngineError> {
        let mut current = id;
        for _ in 0..=self.blueprints.len() {
            match self.blueprint(current).and_then(ObjectBlueprint::duplicate_of) {
                Some(source) => current = source,
                None => return Ok(current),
            }
        }
        Err(EngineError::MalformedProject(format!(
            "duplicate chain of object {id} forms a cycle"
        )))
    }
}
