//! Dynamic values for attributes, event arguments and action values.
//!
//! Projects are authored as data, so attribute values and rule arguments are
//! loosely typed. The engine doesn't interpret them; object types do.
//!
//! ## Value Types
//!
//! - `Null`: absent argument (`Destroy`, `Frame start`)
//! - `Bool`, `Int`, `Float`: scalars
//! - `Text`: names, sprite paths, key names
//! - `List`: vectors (`Move`, `Camera: Move`)
//! - `Map`: object descriptions (`Create object`)

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::geometry::Vec2;

/// A loosely typed value.
///
/// Deserializes from any JSON value; integers stay `Int`, everything else
/// numeric becomes `Float`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Check for `Null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as integer if this is an Int value.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as a number if this is an Int or Float value.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as bool if this is a Bool value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string reference if this is a Text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as list reference if this is a List value.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    /// Get as map reference if this is a Map value.
    #[must_use]
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Interpret as a 2D vector: a list of exactly two numbers.
    ///
    /// Returns a description of the mismatch otherwise.
    pub fn as_vec2(&self) -> Result<Vec2, String> {
        let Some(items) = self.as_list() else {
            return Err(format!("expected a 2D vector, got {}", self.kind()));
        };
        if items.len() != 2 {
            return Err(format!("value is a {}D vector, must be 2D", items.len()));
        }
        let x = items[0].as_number().ok_or("x component is not a number")?;
        let y = items[1].as_number().ok_or("y component is not a number")?;
        Ok(Vec2::new(x, y))
    }

    /// Short name of the variant, for error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<Vec2> for Value {
    fn from(v: Vec2) -> Self {
        Value::List(vec![Value::Float(v.x), Value::Float(v.y)])
    }
}

/// Attribute map of one object (or of one duplicate chain).
pub type Attributes = FxHashMap<String, Value>;
