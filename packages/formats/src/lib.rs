//! Format adapters for dotreg
//!
//! Each adapter implements [`dotreg_core::Format`] for one text format:
//! - `JsonFormat`: JSON objects, falling back to YAML for anything else
//! - `YamlFormat`: block-style YAML
//! - `XmlFormat`: `<node name=".." type="..">` documents
//! - `PhpFormat`: write-only PHP class literals
//!
//! Adapters are resolved by name through [`Formats`], which builds each one
//! lazily and hands out shared instances.
//!
//! # Example
//!
//! ```rust
//! use dotreg_core::Options;
//! use dotreg_formats::Formats;
//!
//! let formats = Formats::new();
//! let value = formats.decode("JSON", r#"{"a": {"b": 1}}"#, &Options::default()).unwrap();
//! let yaml = formats.encode("yaml", &value, &Options::default()).unwrap();
//! assert_eq!(yaml, "a:\n  b: 1\n");
//! ```

mod convert;
mod formats;
mod json;
mod php;
mod xml;
mod yaml;

pub use convert::{from_value, json_to_value, to_value, value_to_json, yaml_to_value};
pub use formats::{adapter_for, Formats};
pub use json::JsonFormat;
pub use php::PhpFormat;
pub use xml::XmlFormat;
pub use yaml::YamlFormat;
