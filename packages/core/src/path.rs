//! Dotted registry paths.

use std::fmt;

/// A dotted path into a registry tree.
///
/// Paths are split on `.` and never fail to parse. Segments are kept
/// verbatim, so `a..b` has an empty middle segment and the empty string is a
/// path of one empty segment.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Path {
    pub components: Vec<String>,
}

impl Path {
    /// Parse a dotted path.
    ///
    /// ```rust
    /// use dotreg_core::Path;
    ///
    /// let path = Path::parse("database.primary.host");
    /// assert_eq!(path.len(), 3);
    /// assert_eq!(path.last(), Some("host"));
    /// ```
    pub fn parse(s: &str) -> Self {
        Path {
            components: s.split('.').map(str::to_string).collect(),
        }
    }

    /// Build a path from already-split segments.
    pub fn from_components(components: Vec<String>) -> Self {
        Path { components }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// True when the path addresses a top-level key.
    pub fn is_single(&self) -> bool {
        self.components.len() == 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.components.iter()
    }

    pub fn first(&self) -> Option<&str> {
        self.components.first().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.components.last().map(String::as_str)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.components.join("."))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::parse(s)
    }
}

impl From<&String> for Path {
    fn from(s: &String) -> Self {
        Path::parse(s)
    }
}

impl From<&Path> for Path {
    fn from(p: &Path) -> Self {
        p.clone()
    }
}

/// Create a path from a string literal.
#[macro_export]
macro_rules! path {
    ($s:expr) => {
        $crate::Path::parse($s)
    };
}
