//! Options passed through to format adapters.

use serde::Deserialize;

/// Adapter options.
///
/// Each adapter reads only the fields it understands. Every field has a
/// default, so options can be deserialized from a partial document:
///
/// ```rust
/// use dotreg_core::Options;
///
/// let options: Options = serde_json::from_str(r#"{"name": "config"}"#).unwrap();
/// assert_eq!(options.name, "config");
/// assert_eq!(options.node_name, "node");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// XML root element name.
    pub name: String,
    /// XML element name used for every entry.
    #[serde(alias = "nodeName")]
    pub node_name: String,
    /// PHP class name.
    pub class: String,
    /// Whether the PHP output ends with `?>`.
    #[serde(alias = "closingtag")]
    pub closing_tag: bool,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            name: "registry".to_string(),
            node_name: "node".to_string(),
            class: "Registry".to_string(),
            closing_tag: true,
            pretty: false,
        }
    }
}

impl Options {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_node_name(mut self, node_name: impl Into<String>) -> Self {
        self.node_name = node_name.into();
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn with_closing_tag(mut self, closing_tag: bool) -> Self {
        self.closing_tag = closing_tag;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = Options::default();
        assert_eq!(options.name, "registry");
        assert_eq!(options.node_name, "node");
        assert_eq!(options.class, "Registry");
        assert!(options.closing_tag);
        assert!(!options.pretty);
    }

    #[test]
    fn builders() {
        let options = Options::default()
            .with_name("config")
            .with_node_name("entry")
            .with_class("AppConfig")
            .with_closing_tag(false)
            .with_pretty(true);
        assert_eq!(options.name, "config");
        assert_eq!(options.node_name, "entry");
        assert_eq!(options.class, "AppConfig");
        assert!(!options.closing_tag);
        assert!(options.pretty);
    }

    #[test]
    fn deserialize_accepts_legacy_keys() {
        let options: Options =
            serde_json::from_str(r#"{"nodeName": "item", "closingtag": false}"#).unwrap();
        assert_eq!(options.node_name, "item");
        assert!(!options.closing_tag);
        assert_eq!(options.name, "registry");
    }
}
