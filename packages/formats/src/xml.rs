//! XML format adapter.
//!
//! Documents have one root element holding a flat list of entry elements.
//! Every entry carries its key in a `name` attribute and its type in a
//! `type` attribute:
//!
//! ```xml
//! <?xml version="1.0"?>
//! <registry><node name="port" type="integer">8080</node><node name="db" type="object"><node name="host" type="string">localhost</node></node></registry>
//! ```
//!
//! The `type` attribute is what tells maps (`object`) and arrays (`array`)
//! apart on the way back in; documents without it decode every container as
//! a map.

use std::borrow::Cow;
use std::fmt::Display;
use std::io::Write;

use dotreg_core::{Error, Format, FormatKind, Map, Options, Value};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

/// Deepest element nesting accepted on decode, counting the root.
const MAX_DEPTH: usize = 128;

/// XML adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlFormat;

impl Format for XmlFormat {
    fn kind(&self) -> FormatKind {
        FormatKind::Xml
    }

    fn encode(&self, value: &Value, options: &Options) -> Result<String, Error> {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", None, None)))
            .map_err(encode_error)?;
        writer.get_mut().write_all(b"\n").map_err(encode_error)?;

        let root = BytesStart::new(options.name.as_str());
        if entries(value).is_empty() {
            writer.write_event(Event::Empty(root)).map_err(encode_error)?;
        } else {
            writer.write_event(Event::Start(root)).map_err(encode_error)?;
            write_children(&mut writer, value, &options.node_name)?;
            writer
                .write_event(Event::End(BytesEnd::new(options.name.as_str())))
                .map_err(encode_error)?;
        }

        let mut xml = String::from_utf8(writer.into_inner()).map_err(encode_error)?;
        xml.push('\n');
        Ok(xml)
    }

    fn decode(&self, data: &str, _options: &Options) -> Result<Value, Error> {
        if data.trim().is_empty() {
            return Ok(Value::map());
        }

        let root = parse_document(data).map_err(|message| Error::decode(FormatKind::Xml, message))?;

        let mut map = Map::new();
        for child in &root.children {
            map.insert(child.key(), child.to_value()?);
        }
        Ok(Value::Map(map))
    }
}

/// The native type tag written to the `type` attribute.
pub(crate) fn type_tag(value: &Value) -> &'static str {
    match value {
        Value::Null => "NULL",
        Value::Bool(_) => "boolean",
        Value::Integer(_) => "integer",
        Value::Float(_) => "double",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Map(_) => "object",
    }
}

fn encode_error(e: impl Display) -> Error {
    Error::encode(FormatKind::Xml, e.to_string())
}

/// Keyed children of a container. Array entries are keyed by index.
fn entries(value: &Value) -> Vec<(Cow<'_, str>, &Value)> {
    match value {
        Value::Map(map) => map
            .iter()
            .map(|(k, v)| (Cow::Borrowed(k.as_str()), v))
            .collect(),
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .map(|(i, v)| (Cow::Owned(i.to_string()), v))
            .collect(),
        _ => Vec::new(),
    }
}

fn write_children<W: Write>(
    writer: &mut Writer<W>,
    value: &Value,
    node_name: &str,
) -> Result<(), Error> {
    for (key, child) in entries(value) {
        let mut start = BytesStart::new(node_name);
        start.push_attribute(("name", key.as_ref()));
        start.push_attribute(("type", type_tag(child)));

        let text = child.to_display_string();
        let is_empty = match child {
            Value::Map(map) => map.is_empty(),
            Value::Array(arr) => arr.is_empty(),
            _ => text.is_empty(),
        };
        if is_empty {
            writer.write_event(Event::Empty(start)).map_err(encode_error)?;
            continue;
        }

        writer.write_event(Event::Start(start)).map_err(encode_error)?;
        match child {
            Value::Map(_) | Value::Array(_) => write_children(writer, child, node_name)?,
            _ => writer
                .write_event(Event::Text(BytesText::new(&text)))
                .map_err(encode_error)?,
        }
        writer
            .write_event(Event::End(BytesEnd::new(node_name)))
            .map_err(encode_error)?;
    }
    Ok(())
}

/// A parsed element: only the attributes and content the registry uses.
#[derive(Debug, Default)]
struct Element {
    name: Option<String>,
    kind: Option<String>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, String> {
        let mut element = Element::default();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| e.to_string())?;
            let value = attr.unescape_value().map_err(|e| e.to_string())?;
            match attr.key.as_ref() {
                b"name" => element.name = Some(value.into_owned()),
                b"type" => element.kind = Some(value.into_owned()),
                _ => {}
            }
        }
        Ok(element)
    }

    fn key(&self) -> String {
        self.name.clone().unwrap_or_default()
    }

    fn to_value(&self) -> Result<Value, Error> {
        let value = match self.kind.as_deref() {
            Some("integer") => Value::Integer(self.parse_text("integer")?),
            Some("double") => Value::Float(self.parse_text("double")?),
            Some("boolean") => {
                let text = self.text.trim();
                Value::Bool(!(text.is_empty() || text == "0" || text.eq_ignore_ascii_case("false")))
            }
            Some("string") => Value::String(self.text.clone()),
            Some("NULL") => Value::Null,
            Some("array") => Value::Array(
                self.children
                    .iter()
                    .map(Element::to_value)
                    .collect::<Result<_, _>>()?,
            ),
            _ => {
                let mut map = Map::new();
                for child in &self.children {
                    map.insert(child.key(), child.to_value()?);
                }
                Value::Map(map)
            }
        };
        Ok(value)
    }

    fn parse_text<T: std::str::FromStr>(&self, kind: &str) -> Result<T, Error> {
        self.text.trim().parse().map_err(|_| {
            Error::decode(
                FormatKind::Xml,
                format!(
                    "invalid {} value '{}' for node '{}'",
                    kind,
                    self.text,
                    self.key()
                ),
            )
        })
    }
}

/// Parse a document into its root element.
fn parse_document(data: &str) -> Result<Element, String> {
    let mut reader = Reader::from_str(data);
    let mut stack: Vec<Element> = Vec::new();

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(start) => {
                if stack.len() >= MAX_DEPTH {
                    return Err(format!(
                        "recursion limit exceeded at position {}",
                        reader.buffer_position()
                    ));
                }
                stack.push(Element::from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = Element::from_start(&start)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| "unexpected closing tag".to_string())?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => return Ok(element),
                }
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&text.unescape().map_err(|e| e.to_string())?);
                }
            }
            Event::CData(cdata) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&String::from_utf8_lossy(&cdata.into_inner()));
                }
            }
            Event::Eof => return Err("missing root element".to_string()),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotreg_core::path;

    fn encode(value: &Value) -> String {
        XmlFormat.encode(value, &Options::default()).unwrap()
    }

    fn decode(data: &str) -> Result<Value, Error> {
        XmlFormat.decode(data, &Options::default())
    }

    fn sample() -> Value {
        let mut value = Value::map();
        value.set(&path!("name"), Value::from("dotreg"));
        value.set(&path!("port"), Value::from(8080));
        value.set(&path!("ratio"), Value::from(0.5));
        value.set(&path!("debug"), Value::from(true));
        value.set(&path!("db.host"), Value::from("localhost"));
        value.set(&path!("tags"), Value::from(vec!["a", "b"]));
        value
    }

    #[test]
    fn encode_document() {
        let expected = concat!(
            "<?xml version=\"1.0\"?>\n",
            "<registry>",
            "<node name=\"name\" type=\"string\">dotreg</node>",
            "<node name=\"port\" type=\"integer\">8080</node>",
            "<node name=\"ratio\" type=\"double\">0.5</node>",
            "<node name=\"debug\" type=\"boolean\">1</node>",
            "<node name=\"db\" type=\"object\"><node name=\"host\" type=\"string\">localhost</node></node>",
            "<node name=\"tags\" type=\"array\"><node name=\"0\" type=\"string\">a</node><node name=\"1\" type=\"string\">b</node></node>",
            "</registry>\n",
        );
        assert_eq!(encode(&sample()), expected);
    }

    #[test]
    fn encode_uses_custom_element_names() {
        let mut value = Value::map();
        value.set(&path!("k"), Value::from("v"));

        let options = Options::default().with_name("config").with_node_name("entry");
        let xml = XmlFormat.encode(&value, &options).unwrap();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\"?>\n<config><entry name=\"k\" type=\"string\">v</entry></config>\n"
        );
    }

    #[test]
    fn encode_empty_registry() {
        assert_eq!(encode(&Value::map()), "<?xml version=\"1.0\"?>\n<registry/>\n");
    }

    #[test]
    fn empty_values_are_empty_elements() {
        let mut value = Value::map();
        value.set(&path!("nothing"), Value::Null);
        value.set(&path!("off"), Value::from(false));

        let xml = encode(&value);
        assert!(xml.contains("<node name=\"nothing\" type=\"NULL\"/>"));
        assert!(xml.contains("<node name=\"off\" type=\"boolean\"/>"));
    }

    #[test]
    fn typed_round_trip() {
        let mut value = sample();
        value.set(&path!("nothing"), Value::Null);
        value.set(&path!("off"), Value::from(false));
        value.set(&path!("blank"), Value::from(""));
        value.set(&path!("empty_list"), Value::array());
        value.set(&path!("empty_map"), Value::map());

        assert_eq!(decode(&encode(&value)).unwrap(), value);
    }

    #[test]
    fn text_is_escaped() {
        let mut value = Value::map();
        value.set(&path!("expr"), Value::from("a < b && \"c\""));

        let xml = encode(&value);
        assert!(xml.contains("a &lt; b &amp;&amp;"));
        assert_eq!(decode(&xml).unwrap(), value);
    }

    #[test]
    fn untyped_containers_decode_as_maps() {
        let xml = r#"<registry>
            <node name="db">
                <node name="host" type="string">localhost</node>
            </node>
        </registry>"#;

        let value = decode(xml).unwrap();
        assert_eq!(value.get(&path!("db.host")), Some(&Value::from("localhost")));
    }

    #[test]
    fn boolean_text_coercion() {
        let xml = r#"<registry><node name="a" type="boolean">1</node><node name="b" type="boolean">0</node><node name="c" type="boolean">yes</node></registry>"#;
        let value = decode(xml).unwrap();
        assert_eq!(value.get(&path!("a")), Some(&Value::Bool(true)));
        assert_eq!(value.get(&path!("b")), Some(&Value::Bool(false)));
        assert_eq!(value.get(&path!("c")), Some(&Value::Bool(true)));
    }

    #[test]
    fn invalid_integer_is_a_decode_error() {
        let xml = r#"<registry><node name="port" type="integer">eighty</node></registry>"#;
        let err = decode(xml).unwrap_err();
        assert!(matches!(
            err,
            Error::Decode {
                format: FormatKind::Xml,
                ..
            }
        ));
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn empty_input_is_an_empty_map() {
        assert_eq!(decode("").unwrap(), Value::map());
        assert_eq!(decode(" \n ").unwrap(), Value::map());
    }

    #[test]
    fn malformed_documents_are_decode_errors() {
        assert!(decode("just text").is_err());
        assert!(decode("<registry><node name=\"a\"></registry>").is_err());
    }

    fn nested(depth: usize) -> String {
        let mut xml = String::from("<registry>");
        xml.push_str(&"<node name=\"a\">".repeat(depth));
        xml.push_str(&"</node>".repeat(depth));
        xml.push_str("</registry>");
        xml
    }

    #[test]
    fn deep_nesting_is_a_decode_error() {
        match decode(&nested(200)) {
            Err(Error::Decode { format, message }) => {
                assert_eq!(format, FormatKind::Xml);
                assert!(message.contains("recursion limit exceeded"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn moderate_nesting_decodes() {
        let value = decode(&nested(100)).unwrap();
        let path = dotreg_core::Path::from_components(vec!["a".to_string(); 100]);
        assert_eq!(value.get(&path), Some(&Value::map()));
    }

    #[test]
    fn type_tags() {
        assert_eq!(type_tag(&Value::Null), "NULL");
        assert_eq!(type_tag(&Value::from(1)), "integer");
        assert_eq!(type_tag(&Value::from(1.0)), "double");
        assert_eq!(type_tag(&Value::map()), "object");
        assert_eq!(type_tag(&Value::array()), "array");
    }
}
