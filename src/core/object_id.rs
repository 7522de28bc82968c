//! Runtime object identification.
//!
//! Every spawned object gets a unique `ObjectId` from the `World` that owns
//! it. Names are not identities: several live objects may share a name, and
//! the event grid relies on that. Identity comparisons (for example "is this
//! the participant that fired the event?") always use `ObjectId`.
//!
//! ## Allocation
//!
//! IDs are allocated monotonically and are never reused during a game, so an
//! ID held across a frame switch can never alias a newer object.
//!
//! ```
//! use rust_mmf::core::ObjectId;
//!
//! let a = ObjectId::new(1);
//! let b = ObjectId::new(2);
//! assert_ne!(a, b);
//! assert_eq!(a.next(), b);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a runtime object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl ObjectId {
    /// Create an object ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The ID allocated right after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u32> for ObjectId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Object({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next() {
        assert_eq!(ObjectId::new(0).next(), ObjectId::new(1));
        assert_eq!(ObjectId::new(41).next().raw(), 42);
    }

    #[test]
    fn test_ordering() {
        assert!(ObjectId(1) < ObjectId(2));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ObjectId(42)), "Object(42)");
    }

    #[test]
    fn test_serialization() {
        let id = ObjectId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
