//! dotreg: a hierarchical key-value registry
//!
//! A [`Registry`] is a tree of named values addressed by dotted paths. It can
//! be loaded from and written to JSON, YAML, XML and (write-only) PHP class
//! literals.
//!
//! # Example
//!
//! ```rust
//! use dotreg::{Options, Registry, Value};
//!
//! let mut registry = Registry::new();
//! registry
//!     .load_str(r#"{"database": {"host": "localhost"}}"#, "json", &Options::default())
//!     .unwrap();
//!
//! registry.set("database.port", 5432);
//! assert_eq!(registry.get("database.host"), Some(&Value::from("localhost")));
//! assert_eq!(registry.get_or("database.user", "root"), Value::from("root"));
//!
//! let yaml = registry.to_string_as("yaml", &Options::default()).unwrap();
//! assert_eq!(yaml, "database:\n  host: localhost\n  port: 5432\n");
//! ```

mod registries;
mod registry;
mod source;

pub use registries::Registries;
pub use registry::Registry;
pub use source::{FileSource, LocalFiles};

pub use dotreg_core::{path, Error, Format, FormatKind, Map, Options, Path, Value};
pub use dotreg_formats::Formats;
