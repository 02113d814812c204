//! Format names and the adapter contract.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::{Error, Options, Value};

/// The text formats a registry can be loaded from or written to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormatKind {
    Json,
    Yaml,
    Xml,
    /// A PHP class literal. Write-only.
    Php,
}

impl FormatKind {
    /// Every supported format.
    pub const ALL: [FormatKind; 4] = [
        FormatKind::Json,
        FormatKind::Yaml,
        FormatKind::Xml,
        FormatKind::Php,
    ];

    /// Resolve a user-supplied format name.
    ///
    /// The name is normalized first (see [`normalize_name`]), so `"JSON"`,
    /// `"json"` and `"Js!on"` all resolve to [`FormatKind::Json`].
    pub fn from_name(name: &str) -> Result<Self, Error> {
        let normalized = normalize_name(name);
        match normalized.as_str() {
            "json" => Ok(FormatKind::Json),
            "yaml" => Ok(FormatKind::Yaml),
            "xml" => Ok(FormatKind::Xml),
            "php" => Ok(FormatKind::Php),
            _ => Err(Error::UnknownFormat { name: normalized }),
        }
    }

    /// The canonical (normalized) name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatKind::Json => "json",
            FormatKind::Yaml => "yaml",
            FormatKind::Xml => "xml",
            FormatKind::Php => "php",
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormatKind::from_name(s)
    }
}

/// Lower-case a format name and drop everything outside `[A-Za-z0-9_]`.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Two-way conversion between a `Value` tree and one text format.
///
/// Adapters hold no per-registry state, so one instance can be shared by
/// every registry in the process.
///
/// # Implementing an adapter
///
/// ```rust
/// use dotreg_core::{Error, Format, FormatKind, Options, Value};
///
/// struct Upper;
///
/// impl Format for Upper {
///     fn kind(&self) -> FormatKind {
///         FormatKind::Json
///     }
///
///     fn encode(&self, value: &Value, _options: &Options) -> Result<String, Error> {
///         Ok(value.to_display_string().to_uppercase())
///     }
///
///     fn decode(&self, data: &str, _options: &Options) -> Result<Value, Error> {
///         Ok(Value::from(data.to_lowercase()))
///     }
/// }
///
/// let encoded = Upper.encode(&Value::from("abc"), &Options::default()).unwrap();
/// assert_eq!(encoded, "ABC");
/// ```
pub trait Format: Send + Sync {
    /// The format this adapter handles.
    fn kind(&self) -> FormatKind;

    /// Serialize a value tree into text.
    fn encode(&self, value: &Value, options: &Options) -> Result<String, Error>;

    /// Parse text into a value tree.
    fn decode(&self, data: &str, options: &Options) -> Result<Value, Error>;
}

impl<T: Format + ?Sized> Format for Box<T> {
    fn kind(&self) -> FormatKind {
        self.as_ref().kind()
    }

    fn encode(&self, value: &Value, options: &Options) -> Result<String, Error> {
        self.as_ref().encode(value, options)
    }

    fn decode(&self, data: &str, options: &Options) -> Result<Value, Error> {
        self.as_ref().decode(data, options)
    }
}

impl<T: Format + ?Sized> Format for Arc<T> {
    fn kind(&self) -> FormatKind {
        self.as_ref().kind()
    }

    fn encode(&self, value: &Value, options: &Options) -> Result<String, Error> {
        self.as_ref().encode(value, options)
    }

    fn decode(&self, data: &str, options: &Options) -> Result<Value, Error> {
        self.as_ref().decode(data, options)
    }
}
