//! The path-addressed registry tree.

use std::fmt;
use std::path::Path as FilePath;
use std::str::FromStr;
use std::sync::Arc;

use dotreg_core::{Error, FormatKind, Map, Options, Path, Value};
use dotreg_formats::{from_value, to_value, Formats};
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};

use crate::source::{FileSource, LocalFiles};

/// A tree of named values addressed by dotted paths.
///
/// The root is always a map. Reads treat `Null` and the empty string as
/// unset, while [`Registry::exists`] only checks that every key on the path
/// is present:
///
/// ```rust
/// use dotreg::{Registry, Value};
///
/// let mut registry = Registry::new();
/// registry.set("site.title", "");
///
/// assert!(registry.exists("site.title"));
/// assert_eq!(registry.get("site.title"), None);
/// assert_eq!(registry.get_or("site.title", "Untitled"), Value::from("Untitled"));
/// ```
///
/// Cloning copies the whole tree; clones never share data.
#[derive(Clone, Debug)]
pub struct Registry {
    data: Value,
    formats: Arc<Formats>,
}

impl Registry {
    /// Create an empty registry using the shared format factory.
    pub fn new() -> Self {
        Self::with_formats(Formats::shared())
    }

    /// Create an empty registry resolving formats through `formats`.
    pub fn with_formats(formats: Arc<Formats>) -> Self {
        Self {
            data: Value::map(),
            formats,
        }
    }

    /// Create a registry holding `data`.
    pub fn from_value(data: Value) -> Self {
        let mut registry = Self::new();
        registry.load_value(data);
        registry
    }

    /// Create a registry holding the set values of `source`.
    pub fn from_registry(source: &Registry) -> Self {
        let mut registry = Self::with_formats(source.formats.clone());
        registry.merge(source);
        registry
    }

    /// Create a registry from text in the named format. Empty text gives an
    /// empty registry.
    pub fn from_str_format(data: &str, format: &str) -> Result<Self, Error> {
        let mut registry = Self::new();
        if !data.is_empty() {
            registry.load_str(data, format, &Options::default())?;
        }
        Ok(registry)
    }

    /// The format factory this registry resolves names through.
    pub fn formats(&self) -> &Arc<Formats> {
        &self.formats
    }

    /// The root map.
    pub fn root(&self) -> &Map {
        match &self.data {
            Value::Map(map) => map,
            _ => unreachable!("registry root is always a map"),
        }
    }

    fn root_mut(&mut self) -> &mut Map {
        match &mut self.data {
            Value::Map(map) => map,
            _ => unreachable!("registry root is always a map"),
        }
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.root().len()
    }

    pub fn is_empty(&self) -> bool {
        self.root().is_empty()
    }

    /// Top-level keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.root().keys()
    }

    /// Look up a path regardless of what it holds.
    fn lookup(&self, path: &str) -> Option<&Value> {
        if !path.contains('.') {
            return self.root().get(path);
        }
        self.data.get(&Path::parse(path))
    }

    /// Get the value at `path`.
    ///
    /// Returns `None` when a key on the path is missing, an intermediate
    /// value is not a map, or the value is `Null` or an empty string.
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.lookup(path).filter(|value| !value.is_unset())
    }

    /// Get the value at `path`, or `default` when [`Registry::get`] finds nothing.
    pub fn get_or(&self, path: &str, default: impl Into<Value>) -> Value {
        match self.get(path) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    /// Get the value at `path` converted into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, Error> {
        self.get(path).cloned().map(from_value::<T>).transpose()
    }

    /// Set the value at `path`, returning the value it replaced.
    ///
    /// Intermediate keys that are missing or hold anything other than a map
    /// are replaced with empty maps, so setting `a.b.c` always succeeds. Note
    /// that setting `a.b` afterwards discards everything below it.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Option<Value> {
        self.data.set(&Path::parse(path), value.into())
    }

    /// True when every key on `path` is present, whatever the value.
    pub fn exists(&self, path: &str) -> bool {
        !path.is_empty() && self.lookup(path).is_some()
    }

    /// Read `key`, falling back to `default`, and store the result.
    pub fn def(&mut self, key: &str, default: &str) -> Value {
        let value = self.get_or(key, default);
        self.set(key, value.clone());
        value
    }

    /// Remove the value at `path`, returning it if it was present.
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        self.data.remove(&Path::parse(path))
    }

    /// Copy the top-level entries of `source` into this registry.
    ///
    /// Entries holding `Null` or an empty string are skipped. Nested maps are
    /// copied whole, replacing whatever this registry held under the same
    /// key rather than being merged field by field.
    pub fn merge(&mut self, source: &Registry) -> bool {
        let root = self.root_mut();
        for (key, value) in source.to_array() {
            if !value.is_unset() {
                root.insert(key, value);
            }
        }
        true
    }

    /// Bind raw data into `parent`, rebuilding nested maps.
    ///
    /// Arrays bind their elements under their index; scalars bind nothing.
    fn bind_data(parent: &mut Map, data: Value) {
        let pairs: Vec<(String, Value)> = match data {
            Value::Map(map) => map.into_iter().collect(),
            Value::Array(arr) => arr
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            other => {
                log::debug!("Nothing to bind from {:?}", other);
                return;
            }
        };

        for (key, value) in pairs {
            match value {
                Value::Map(map) => {
                    let mut child = Map::new();
                    Self::bind_data(&mut child, Value::Map(map));
                    parent.insert(key, Value::Map(child));
                }
                other => {
                    parent.insert(key, other);
                }
            }
        }
    }

    /// Load the entries of a map.
    pub fn load_array(&mut self, array: Map) -> bool {
        self.load_value(Value::Map(array))
    }

    /// Load a raw value.
    pub fn load_value(&mut self, data: Value) -> bool {
        Self::bind_data(self.root_mut(), data);
        true
    }

    /// Load the fields of any serializable type.
    pub fn load_object<T: Serialize>(&mut self, object: &T) -> Result<bool, Error> {
        let value = to_value(object)?;
        Ok(self.load_value(value))
    }

    /// Parse `data` with the named format and load the result.
    ///
    /// Nothing is loaded when the format is unknown or the text fails to
    /// parse.
    pub fn load_str(&mut self, data: &str, format: &str, options: &Options) -> Result<bool, Error> {
        let adapter = self.formats.get(format)?;
        let value = adapter.decode(data, options)?;
        Ok(self.load_value(value))
    }

    /// Load a file from the local filesystem.
    ///
    /// See [`Registry::load_file_from`].
    pub fn load_file(
        &mut self,
        path: impl AsRef<FilePath>,
        format: &str,
        options: &Options,
    ) -> Result<bool, Error> {
        self.load_file_from(&LocalFiles, path, format, options)
    }

    /// Load a file read through `source`.
    ///
    /// A file that cannot be read is treated as empty text, which every
    /// format decodes to an empty registry. Contents that are not valid
    /// UTF-8 are a decode error, as are format and parse errors.
    pub fn load_file_from(
        &mut self,
        source: &dyn FileSource,
        path: impl AsRef<FilePath>,
        format: &str,
        options: &Options,
    ) -> Result<bool, Error> {
        let kind = FormatKind::from_name(format)?;
        let data = match source.read(path.as_ref()) {
            Ok(bytes) => String::from_utf8(bytes).map_err(|e| Error::decode(kind, e.to_string()))?,
            Err(e) => {
                log::warn!("{}, loading empty registry data", e);
                String::new()
            }
        };
        self.load_str(&data, format, options)
    }

    /// A copy of the tree as a plain map.
    pub fn to_array(&self) -> Map {
        self.root().clone()
    }

    /// A copy of the tree as a single value.
    pub fn to_object(&self) -> Value {
        self.data.clone()
    }

    /// Serialize the tree with the named format.
    pub fn to_string_as(&self, format: &str, options: &Options) -> Result<String, Error> {
        self.formats.get(format)?.encode(&self.data, options)
    }

    /// Serialize the tree as compact JSON.
    pub fn to_json(&self) -> Result<String, Error> {
        self.to_string_as("json", &Options::default())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Registry {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl FromStr for Registry {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Registry::from_str_format(s, "json")
    }
}

impl From<Map> for Registry {
    fn from(map: Map) -> Self {
        Registry::from_value(Value::Map(map))
    }
}

impl Serialize for Registry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.data.serialize(serializer)
    }
}
