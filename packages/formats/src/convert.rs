//! Conversions between Value and serde types.

use dotreg_core::{Error, Map, Value};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Convert a Value to a Rust type via serde.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    let json = value_to_json(value);
    serde_json::from_value(json).map_err(|e| Error::Conversion {
        message: e.to_string(),
    })
}

/// Convert a Rust type to a Value via serde.
pub fn to_value<T: Serialize>(data: &T) -> Result<Value, Error> {
    let json = serde_json::to_value(data).map_err(|e| Error::Conversion {
        message: e.to_string(),
    })?;
    Ok(json_to_value(json))
}

/// Convert our Value to serde_json::Value.
pub fn value_to_json(value: Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(b),
        Value::Integer(i) => serde_json::Value::Number(i.into()),
        Value::Float(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s),
        Value::Array(arr) => serde_json::Value::Array(arr.into_iter().map(value_to_json).collect()),
        Value::Map(map) => serde_json::Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, value_to_json(v)))
                .collect(),
        ),
    }
}

/// Convert serde_json::Value to our Value.
pub fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => number_to_value(n.as_i64(), n.as_f64(), || n.to_string()),
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(json_to_value).collect()),
        serde_json::Value::Object(map) => Value::Map(
            map.into_iter()
                .map(|(k, v)| (k, json_to_value(v)))
                .collect(),
        ),
    }
}

/// Convert serde_yaml::Value to our Value.
///
/// Tags are dropped in favour of the tagged value and mapping keys are
/// turned into strings, leaving only plain scalars, maps and arrays.
pub fn yaml_to_value(yaml: serde_yaml::Value) -> Value {
    match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => number_to_value(n.as_i64(), n.as_f64(), || n.to_string()),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(seq) => {
            Value::Array(seq.into_iter().map(yaml_to_value).collect())
        }
        serde_yaml::Value::Mapping(mapping) => Value::Map(
            mapping
                .into_iter()
                .map(|(k, v)| (yaml_key(k), yaml_to_value(v)))
                .collect::<Map>(),
        ),
        serde_yaml::Value::Tagged(tagged) => yaml_to_value(tagged.value),
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Null => String::new(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        complex => serde_yaml::to_string(&complex)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn number_to_value(int: Option<i64>, float: Option<f64>, text: impl FnOnce() -> String) -> Value {
    if let Some(i) = int {
        Value::Integer(i)
    } else if let Some(f) = float {
        Value::Float(f)
    } else {
        // Fallback for numbers neither i64 nor f64 can hold
        Value::String(text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Database {
        host: String,
        port: u16,
        replicas: Vec<String>,
    }

    #[test]
    fn roundtrip_struct() {
        let original = Database {
            host: "localhost".to_string(),
            port: 5432,
            replicas: vec!["r1".to_string(), "r2".to_string()],
        };

        let value = to_value(&original).unwrap();
        assert!(value.is_map());
        let recovered: Database = from_value(value).unwrap();

        assert_eq!(original, recovered);
    }

    #[test]
    fn from_value_type_mismatch() {
        let err = from_value::<Database>(Value::from("nope")).unwrap_err();
        assert!(matches!(err, Error::Conversion { .. }));
    }

    #[test]
    fn json_to_value_numbers() {
        let json = serde_json::json!({
            "integer": 42,
            "float": 2.75,
            "negative": -100,
            "huge": 18446744073709551615u64
        });

        let value = json_to_value(json);
        let map = value.as_map().unwrap();
        assert_eq!(map.get("integer"), Some(&Value::Integer(42)));
        assert_eq!(map.get("negative"), Some(&Value::Integer(-100)));
        assert_eq!(map.get("float"), Some(&Value::Float(2.75)));
        assert!(matches!(map.get("huge"), Some(Value::Float(_))));
    }

    #[test]
    fn json_object_order_is_kept() {
        let json: serde_json::Value = serde_json::from_str(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let value = json_to_value(json);
        let keys: Vec<&String> = value.as_map().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn value_to_json_non_finite_float_is_null() {
        assert_eq!(value_to_json(Value::Float(f64::NAN)), serde_json::Value::Null);
    }

    #[test]
    fn value_to_json_arrays() {
        let value = Value::from(vec![1, 2, 3]);
        assert_eq!(value_to_json(value), serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn yaml_tags_are_stripped() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("answer: !custom 42\n").unwrap();
        let value = yaml_to_value(yaml);
        assert_eq!(value.as_map().unwrap().get("answer"), Some(&Value::Integer(42)));
    }

    #[test]
    fn yaml_keys_become_strings() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("1: one\ntrue: yes\n~: nothing\n").unwrap();
        let value = yaml_to_value(yaml);
        let map = value.as_map().unwrap();
        assert_eq!(map.get("1"), Some(&Value::from("one")));
        assert_eq!(map.get("true"), Some(&Value::from("yes")));
        assert_eq!(map.get(""), Some(&Value::from("nothing")));
    }
}
