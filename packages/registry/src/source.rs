//! Where registry files come from.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dotreg_core::Error;

/// Reads the raw bytes of a registry source file.
pub trait FileSource {
    /// Read a whole file.
    ///
    /// Fails with [`Error::FileRead`] when the file is missing or unreadable.
    fn read(&self, path: &Path) -> Result<Vec<u8>, Error>;
}

/// Reads from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFiles;

impl FileSource for LocalFiles {
    fn read(&self, path: &Path) -> Result<Vec<u8>, Error> {
        log::debug!("Reading {}...", path.display());
        fs::read(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// In-memory files, keyed by path.
impl FileSource for HashMap<PathBuf, Vec<u8>> {
    fn read(&self, path: &Path) -> Result<Vec<u8>, Error> {
        self.get(path).cloned().ok_or_else(|| Error::FileRead {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        })
    }
}

impl<T: FileSource + ?Sized> FileSource for &T {
    fn read(&self, path: &Path) -> Result<Vec<u8>, Error> {
        (*self).read(path)
    }
}
