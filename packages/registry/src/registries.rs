//! Named registry instances.

use std::collections::HashMap;
use std::sync::Arc;

use dotreg_formats::Formats;

use crate::Registry;

/// A pool of registries looked up by id, each created on first request.
///
/// ```rust
/// use dotreg::{Registries, Value};
///
/// let mut registries = Registries::new();
/// registries.instance("app").set("name", "demo");
///
/// assert_eq!(registries.instance("app").get("name"), Some(&Value::from("demo")));
/// assert!(registries.instance("other").is_empty());
/// ```
#[derive(Debug)]
pub struct Registries {
    formats: Arc<Formats>,
    instances: HashMap<String, Registry>,
}

impl Registries {
    /// Create an empty pool whose registries use the shared format factory.
    pub fn new() -> Self {
        Self::with_formats(Formats::shared())
    }

    /// Create an empty pool whose registries use `formats`.
    pub fn with_formats(formats: Arc<Formats>) -> Self {
        Self {
            formats,
            instances: HashMap::new(),
        }
    }

    /// The registry for `id`, created empty if it does not exist yet.
    pub fn instance(&mut self, id: &str) -> &mut Registry {
        let formats = &self.formats;
        self.instances.entry(id.to_string()).or_insert_with(|| {
            log::debug!("Creating registry instance '{}'", id);
            Registry::with_formats(formats.clone())
        })
    }

    /// The registry for `id`, if it was created.
    pub fn get(&self, id: &str) -> Option<&Registry> {
        self.instances.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.instances.contains_key(id)
    }

    /// Drop the registry for `id`, returning it.
    pub fn remove(&mut self, id: &str) -> Option<Registry> {
        self.instances.remove(id)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl Default for Registries {
    fn default() -> Self {
        Self::new()
    }
}
