//! YAML format adapter.

use dotreg_core::{Error, Format, FormatKind, Options, Value};

use crate::convert::yaml_to_value;

/// YAML adapter.
///
/// Output is block style with two-space indentation. Decoded documents are
/// normalized to plain maps, arrays and scalars; YAML tags do not survive.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormat;

impl Format for YamlFormat {
    fn kind(&self) -> FormatKind {
        FormatKind::Yaml
    }

    fn encode(&self, value: &Value, _options: &Options) -> Result<String, Error> {
        serde_yaml::to_string(value).map_err(|e| Error::encode(FormatKind::Yaml, e.to_string()))
    }

    fn decode(&self, data: &str, _options: &Options) -> Result<Value, Error> {
        let data = data.trim();
        if data.is_empty() {
            return Ok(Value::map());
        }

        let yaml: serde_yaml::Value = serde_yaml::from_str(data)
            .map_err(|e| Error::decode(FormatKind::Yaml, e.to_string()))?;

        Ok(yaml_to_value(yaml))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotreg_core::path;

    fn decode(data: &str) -> Result<Value, Error> {
        YamlFormat.decode(data, &Options::default())
    }

    fn encode(value: &Value) -> String {
        YamlFormat.encode(value, &Options::default()).unwrap()
    }

    #[test]
    fn decode_block_document() {
        let value = decode(
            "
database:
  host: localhost
  port: 5432
  ratio: 0.5
  enabled: true
tags:
  - a
  - b
",
        )
        .unwrap();

        assert_eq!(value.get(&path!("database.host")), Some(&Value::from("localhost")));
        assert_eq!(value.get(&path!("database.port")), Some(&Value::Integer(5432)));
        assert_eq!(value.get(&path!("database.ratio")), Some(&Value::Float(0.5)));
        assert_eq!(value.get(&path!("database.enabled")), Some(&Value::Bool(true)));
        assert_eq!(value.get(&path!("tags")), Some(&Value::from(vec!["a", "b"])));
    }

    #[test]
    fn decode_error_carries_parser_message() {
        let err = decode("a: [1, 2").unwrap_err();
        match err {
            Error::Decode { format, message } => {
                assert_eq!(format, FormatKind::Yaml);
                assert!(!message.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn encode_is_block_style() {
        let mut value = Value::map();
        value.set(&path!("a.b"), Value::from(1));
        value.set(&path!("a.c"), Value::from("text"));
        value.set(&path!("list"), Value::from(vec![1, 2]));

        assert_eq!(encode(&value), "a:\n  b: 1\n  c: text\nlist:\n- 1\n- 2\n");
    }

    #[test]
    fn encode_quotes_ambiguous_strings() {
        let mut value = Value::map();
        value.set(&path!("port"), Value::from("8080"));

        let decoded = decode(&encode(&value)).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn scalar_map_round_trip() {
        let mut value = Value::map();
        value.set(&path!("name"), Value::from("dotreg"));
        value.set(&path!("count"), Value::from(3));
        value.set(&path!("ratio"), Value::from(1.25));
        value.set(&path!("enabled"), Value::from(false));
        value.set(&path!("nothing"), Value::Null);

        assert_eq!(decode(&encode(&value)).unwrap(), value);
    }
}
