//! The Value type - a tree-shaped data structure.
//!
//! Every format decodes into a `Value` and encodes from one; the registry
//! stores its data as a `Map` of them.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::Path;

/// An insertion-ordered mapping of unique string keys.
pub type Map = IndexMap<String, Value>;

/// A dynamically-typed tree node.
///
/// # Design Notes
///
/// - Maps keep insertion order, so documents serialize in the order they were loaded
/// - The tree owns all of its children; `clone` is a deep copy
/// - Uses `i64` for integers and `f64` for everything else numeric
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absence of a value. Distinct from "path doesn't exist".
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// Ordered sequence of values.
    Array(Vec<Value>),
    /// Key-value map with string keys.
    Map(Map),
}

impl Value {
    pub fn null() -> Self {
        Value::Null
    }

    /// Create an empty map.
    pub fn map() -> Self {
        Value::Map(Map::new())
    }

    /// Create an empty array.
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// True for `Null` and the empty string.
    ///
    /// Registry lookups and merges treat such values as if they were never set.
    pub fn is_unset(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// The plain text form of a scalar.
    ///
    /// `true` renders as `"1"` and both `false` and `Null` as `""`. Floats use
    /// the shortest round-trip form, so `1.0` renders as `"1"`. Containers
    /// have no text form and render as `""`.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(true) => "1".to_string(),
            Value::Bool(false) => String::new(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
            Value::Array(_) | Value::Map(_) => String::new(),
        }
    }

    /// Get a reference to a nested value by path.
    ///
    /// Only maps are traversed: returns `None` if any segment is missing or
    /// an intermediate value is not a map.
    pub fn get(&self, path: &Path) -> Option<&Value> {
        let mut current = self;
        for component in path.iter() {
            current = match current {
                Value::Map(map) => map.get(component.as_str())?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Get a mutable reference to a nested value by path.
    pub fn get_mut(&mut self, path: &Path) -> Option<&mut Value> {
        let mut current = self;
        for component in path.iter() {
            current = match current {
                Value::Map(map) => map.get_mut(component.as_str())?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Set a value at a path, returning the value it replaced.
    ///
    /// Missing intermediate segments are created as empty maps. An
    /// intermediate segment holding anything other than a map is overwritten
    /// with an empty map, discarding what was there.
    pub fn set(&mut self, path: &Path, value: Value) -> Option<Value> {
        let Some((last, parents)) = path.components.split_last() else {
            return Some(std::mem::replace(self, value));
        };

        let mut current = self;
        for component in parents {
            current = current
                .force_map()
                .entry(component.clone())
                .or_insert_with(Value::map);
        }

        current.force_map().insert(last.clone(), value)
    }

    /// Remove a value at a path, returning it if it existed.
    pub fn remove(&mut self, path: &Path) -> Option<Value> {
        let (last, parents) = path.components.split_last()?;
        let parent = self.get_mut(&Path::from_components(parents.to_vec()))?;
        match parent {
            Value::Map(map) => map.shift_remove(last.as_str()),
            _ => None,
        }
    }

    /// Borrow this value as a map, replacing it with an empty one first if
    /// it is anything else.
    fn force_map(&mut self) -> &mut Map {
        if !self.is_map() {
            *self = Value::map();
        }
        match self {
            Value::Map(map) => map,
            _ => unreachable!("value was just replaced with a map"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => arr.serialize(serializer),
            Value::Map(map) => map.serialize(serializer),
        }
    }
}

// Conversion from common types

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Value::Map(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}
