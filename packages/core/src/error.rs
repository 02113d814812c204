//! Error types shared by every dotreg layer.

use std::io;
use std::path::PathBuf;

use crate::format::FormatKind;

/// Errors raised while resolving formats or converting data.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The requested format name does not match any adapter.
    #[error("unable to resolve registry format ({name})")]
    UnknownFormat { name: String },

    /// An adapter could not parse its input text.
    #[error("error decoding {format} data: {message}")]
    Decode { format: FormatKind, message: String },

    /// An adapter could not serialize a value.
    #[error("error encoding {format} data: {message}")]
    Encode { format: FormatKind, message: String },

    /// A registry source file could not be read.
    #[error("unable to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A value could not be converted to or from a Rust type.
    #[error("conversion error: {message}")]
    Conversion { message: String },
}

impl Error {
    /// Create a decode error for the given format.
    pub fn decode(format: FormatKind, message: impl Into<String>) -> Self {
        Error::Decode {
            format,
            message: message.into(),
        }
    }

    /// Create an encode error for the given format.
    pub fn encode(format: FormatKind, message: impl Into<String>) -> Self {
        Error::Encode {
            format,
            message: message.into(),
        }
    }
}
