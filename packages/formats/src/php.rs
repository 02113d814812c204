//! PHP class literal adapter.

use dotreg_core::{Error, Format, FormatKind, Options, Value};

/// Renders a registry as a PHP class with one public property per top-level
/// key, for generating static configuration files.
///
/// This adapter is write-only: decoding never parses anything and always
/// returns the success sentinel `Value::Bool(true)`, which binds no data.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhpFormat;

impl Format for PhpFormat {
    fn kind(&self) -> FormatKind {
        FormatKind::Php
    }

    fn encode(&self, value: &Value, options: &Options) -> Result<String, Error> {
        let mut out = format!("<?php\nclass {} {{\n", options.class);

        if let Value::Map(map) = value {
            for (key, field) in map {
                let literal = match field {
                    Value::Null => continue,
                    Value::Map(_) | Value::Array(_) => array_literal(field),
                    scalar => format!("'{}'", escape_single(&scalar.to_display_string())),
                };
                out.push_str(&format!("\tpublic ${} = {};\n", key, literal));
            }
        }

        out.push('}');
        if options.closing_tag {
            out.push_str("\n?>");
        }
        Ok(out)
    }

    /// PHP sources are never parsed. The `true` sentinel binds no keys, so
    /// loading PHP text leaves a registry unchanged instead of storing the
    /// sentinel under key `"0"`.
    fn decode(&self, _data: &str, _options: &Options) -> Result<Value, Error> {
        log::debug!("PHP format is write-only, nothing decoded");
        Ok(Value::Bool(true))
    }
}

/// An inline `["key" => "value", ...]` literal. Arrays are keyed by index.
fn array_literal(value: &Value) -> String {
    let items: Vec<String> = match value {
        Value::Map(map) => map.iter().map(|(k, v)| array_item(k, v)).collect(),
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .map(|(i, v)| array_item(&i.to_string(), v))
            .collect(),
        _ => Vec::new(),
    };
    format!("[{}]", items.join(", "))
}

fn array_item(key: &str, value: &Value) -> String {
    match value {
        Value::Map(_) | Value::Array(_) => {
            format!("\"{}\" => {}", add_slashes(key), array_literal(value))
        }
        scalar => format!(
            "\"{}\" => \"{}\"",
            add_slashes(key),
            add_slashes(&scalar.to_display_string())
        ),
    }
}

/// Escape `\` and `'` for a single-quoted literal.
fn escape_single(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape quotes, backslashes and NUL bytes.
fn add_slashes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | '\'' | '"' => {
                out.push('\\');
                out.push(c);
            }
            '\0' => out.push_str("\\0"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotreg_core::path;

    #[test]
    fn encode_scalars() {
        let mut value = Value::map();
        value.set(&path!("host"), Value::from("localhost"));
        value.set(&path!("port"), Value::from(3306));
        value.set(&path!("debug"), Value::from(true));
        value.set(&path!("off"), Value::from(false));

        let php = PhpFormat
            .encode(&value, &Options::default().with_class("JConfig"))
            .unwrap();
        assert_eq!(
            php,
            "<?php\nclass JConfig {\n\tpublic $host = 'localhost';\n\tpublic $port = '3306';\n\tpublic $debug = '1';\n\tpublic $off = '';\n}\n?>"
        );
    }

    #[test]
    fn encode_without_closing_tag() {
        let php = PhpFormat
            .encode(&Value::map(), &Options::default().with_closing_tag(false))
            .unwrap();
        assert_eq!(php, "<?php\nclass Registry {\n}");
    }

    #[test]
    fn null_fields_are_skipped() {
        let mut value = Value::map();
        value.set(&path!("gone"), Value::Null);
        value.set(&path!("kept"), Value::from("x"));

        let php = PhpFormat.encode(&value, &Options::default()).unwrap();
        assert!(!php.contains("gone"));
        assert!(php.contains("\tpublic $kept = 'x';\n"));
    }

    #[test]
    fn scalars_are_escaped() {
        let mut value = Value::map();
        value.set(&path!("path"), Value::from(r"C:\dir\it's"));

        let php = PhpFormat.encode(&value, &Options::default()).unwrap();
        assert!(php.contains(r"public $path = 'C:\\dir\\it\'s';"));
    }

    #[test]
    fn nested_values_are_array_literals() {
        let mut value = Value::map();
        value.set(&path!("db.host"), Value::from("localhost"));
        value.set(&path!("db.port"), Value::from(3306));
        value.set(&path!("db.opts.ssl"), Value::from(true));
        value.set(&path!("hosts"), Value::from(vec!["a", "say \"hi\""]));

        let php = PhpFormat.encode(&value, &Options::default()).unwrap();
        assert!(php.contains(
            "\tpublic $db = [\"host\" => \"localhost\", \"port\" => \"3306\", \"opts\" => [\"ssl\" => \"1\"]];\n"
        ));
        assert!(php.contains("\tpublic $hosts = [\"0\" => \"a\", \"1\" => \"say \\\"hi\\\"\"];\n"));
    }

    #[test]
    fn decode_is_a_no_op_sentinel() {
        let value = PhpFormat
            .decode("<?php class X { public $a = 'b'; } ?>", &Options::default())
            .unwrap();
        assert_eq!(value, Value::Bool(true));
    }
}
