//! JSON format adapter.

use dotreg_core::{Error, Format, FormatKind, Options, Value};

use crate::convert::json_to_value;
use crate::yaml::YamlFormat;

/// JSON adapter.
///
/// Decoding only treats text that looks like a JSON object (starts with `{`
/// or ends with `}`) as JSON; anything else is handed to [`YamlFormat`].
/// Since YAML is a superset of JSON this keeps plain JSON arrays and scalars
/// working too.
///
/// ```rust
/// use dotreg_core::{Format, Options, Value};
/// use dotreg_formats::JsonFormat;
///
/// let value = JsonFormat.decode("name: from yaml", &Options::default()).unwrap();
/// assert_eq!(value.as_map().unwrap().get("name"), Some(&Value::from("from yaml")));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl Format for JsonFormat {
    fn kind(&self) -> FormatKind {
        FormatKind::Json
    }

    fn encode(&self, value: &Value, options: &Options) -> Result<String, Error> {
        let encoded = if options.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        encoded.map_err(|e| Error::encode(FormatKind::Json, e.to_string()))
    }

    fn decode(&self, data: &str, options: &Options) -> Result<Value, Error> {
        let data = data.trim();
        if !data.starts_with('{') && !data.ends_with('}') {
            log::debug!("Input is not a JSON object, decoding as YAML");
            return YamlFormat.decode(data, options);
        }

        let json: serde_json::Value = serde_json::from_str(data)
            .map_err(|e| Error::decode(FormatKind::Json, e.to_string()))?;

        Ok(json_to_value(json))
    }
}
