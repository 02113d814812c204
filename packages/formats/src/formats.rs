//! Format adapter factory.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use dotreg_core::{Error, Format, FormatKind, Options, Value};
use lazy_static::lazy_static;

use crate::{JsonFormat, PhpFormat, XmlFormat, YamlFormat};

lazy_static! {
    static ref SHARED: Arc<Formats> = Arc::new(Formats::new());
}

/// Build a fresh adapter for a format.
pub fn adapter_for(kind: FormatKind) -> Arc<dyn Format> {
    match kind {
        FormatKind::Json => Arc::new(JsonFormat),
        FormatKind::Yaml => Arc::new(YamlFormat),
        FormatKind::Xml => Arc::new(XmlFormat),
        FormatKind::Php => Arc::new(PhpFormat),
    }
}

/// Resolves format names to adapters, creating each adapter on first use
/// and reusing it afterwards.
///
/// Registries receive a `Formats` explicitly; [`Formats::shared`] is the
/// default instance for callers that do not care about isolation.
///
/// ```rust
/// use std::sync::Arc;
/// use dotreg_formats::Formats;
///
/// let formats = Formats::new();
/// let a = formats.get("JSON").unwrap();
/// let b = formats.get("js-on").unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
#[derive(Default)]
pub struct Formats {
    adapters: Mutex<HashMap<FormatKind, Arc<dyn Format>>>,
}

impl Formats {
    /// Create an empty factory.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide factory.
    pub fn shared() -> Arc<Formats> {
        SHARED.clone()
    }

    /// Resolve an adapter by (unnormalized) name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Format>, Error> {
        let kind = FormatKind::from_name(name)?;
        Ok(self.adapter(kind))
    }

    /// Resolve an adapter by kind.
    pub fn adapter(&self, kind: FormatKind) -> Arc<dyn Format> {
        let mut adapters = self
            .adapters
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        adapters
            .entry(kind)
            .or_insert_with(|| {
                log::debug!("Creating {} format adapter", kind);
                adapter_for(kind)
            })
            .clone()
    }

    /// Number of adapters created so far.
    pub fn loaded(&self) -> usize {
        self.adapters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Encode a value with the named format.
    pub fn encode(&self, name: &str, value: &Value, options: &Options) -> Result<String, Error> {
        self.get(name)?.encode(value, options)
    }

    /// Decode text with the named format.
    pub fn decode(&self, name: &str, data: &str, options: &Options) -> Result<Value, Error> {
        self.get(name)?.decode(data, options)
    }
}

impl std::fmt::Debug for Formats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Formats")
            .field("loaded", &self.loaded())
            .finish()
    }
}
