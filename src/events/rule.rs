//! Events, actions and rules - the rows of an event grid.
//!
//! Both `Event` and `Action` are plain value records: a name, the name of
//! the objects they address, and a loosely typed parameter. Equality is
//! structural.

use serde::{Deserialize, Serialize};

use crate::core::Value;

/// Reserved action handled uniformly by every object.
pub const DESTROY: &str = "Destroy";

/// A named, parameterized condition checked against matching live objects.
///
/// ```
/// use rust_mmf::events::Event;
///
/// let event = Event::new("Collision", "player").with_arg("enemy");
/// assert_eq!(event.target, "player");
/// assert_eq!(event.arg.as_text(), Some("enemy"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event name, interpreted by object types.
    pub name: String,

    /// Name of the objects whose condition is checked.
    #[serde(rename = "objname")]
    pub target: String,

    /// Event parameter.
    #[serde(default)]
    pub arg: Value,
}

impl Event {
    /// Create an event with no argument.
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            arg: Value::Null,
        }
    }

    /// Set the argument (builder pattern).
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<Value>) -> Self {
        self.arg = arg.into();
        self
    }
}

/// A named, parameterized effect applied when its event fires.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Action name, interpreted by object types (except `Destroy`).
    pub name: String,

    /// Name of the objects the action addresses.
    #[serde(rename = "objname")]
    pub target: String,

    /// Action parameter.
    #[serde(default)]
    pub value: Value,
}

impl Action {
    /// Create an action with no value.
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            value: Value::Null,
        }
    }

    /// Create a `Destroy` action.
    pub fn destroy(target: impl Into<String>) -> Self {
        Self::new(DESTROY, target)
    }

    /// Set the value (builder pattern).
    #[must_use]
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    /// Check if this is the reserved `Destroy` action.
    #[must_use]
    pub fn is_destroy(&self) -> bool {
        self.name == DESTROY
    }
}

/// One row of the grid: an event and the actions bound to it, in order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub event: Event,
    pub actions: Vec<Action>,
}

impl Rule {
    /// Create a rule with no actions.
    #[must_use]
    pub fn new(event: Event) -> Self {
        Self {
            event,
            actions: Vec::new(),
        }
    }

    /// Bind an action (builder pattern).
    #[must_use]
    pub fn then(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        let a = Event::new("Key pressed", "input").with_arg("ESC");
        let b = Event::new("Key pressed", "input").with_arg("ESC");
        let c = Event::new("Key pressed", "input").with_arg("RETURN");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_deserialize_with_objname() {
        let json = r#"{"name": "Move", "objname": "player", "value": [1, 2]}"#;
        let action: Action = serde_json::from_str(json).unwrap();
        assert_eq!(action.target, "player");
        assert_eq!(action.value.as_list().map(<[_]>::len), Some(2));
    }

    #[test]
    fn test_missing_arg_is_null() {
        let json = r#"{"name": "Frame start", "objname": "game"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(event.arg.is_null());
    }

    #[test]
    fn test_destroy() {
        assert!(Action::destroy("enemy").is_destroy());
        assert!(!Action::new("Move", "enemy").is_destroy());
    }
}
