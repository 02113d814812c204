//! Core dotreg: the data model shared by the registry and its formats.
//!
//! - `Value`: the tree-shaped data every format reads and writes
//! - `Path`: a dotted address into a `Value` tree (`a.b.c`)
//! - `Format`: the encode/decode contract each text format implements
//! - `FormatKind`: the closed set of supported format names
//!
//! # Example
//!
//! ```rust
//! use dotreg_core::{path, Value};
//!
//! let mut tree = Value::map();
//! tree.set(&path!("server.port"), Value::from(8080));
//! assert_eq!(tree.get(&path!("server.port")), Some(&Value::Integer(8080)));
//! ```

mod error;
mod format;
mod options;
mod path;
mod value;

pub use error::Error;
pub use format::{normalize_name, Format, FormatKind};
pub use options::Options;
pub use path::Path;
pub use value::{Map, Value};
