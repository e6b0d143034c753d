//! XML to JSON normalization.
//!
//! The document's root element becomes the only key of the resulting object.
//! Attributes are keys prefixed with `-`, text next to attributes or child
//! elements lives under `#text`, and repeated siblings become arrays. Leaf
//! text stays a string; no type casting is attempted.

use std::mem;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};
use thiserror::Error;

const ATTRIBUTE_PREFIX: char = '-';
const TEXT_KEY: &str = "#text";

#[derive(Debug, Error)]
pub enum XmlError {
    #[error(transparent)]
    Syntax(#[from] quick_xml::Error),

    #[error("document has no root element")]
    NoRoot,

    #[error("element <{0}> is never closed")]
    Unclosed(String),
}

struct Element {
    name: String,
    fields: Map<String, Value>,
    text: String,
}

impl Element {
    fn open(start: &BytesStart) -> Result<Element, XmlError> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut fields = Map::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let key = attribute_key(attribute.key.as_ref(), attribute.key.local_name().as_ref());
            let value = attribute.unescape_value()?.into_owned();
            fields.insert(key, Value::String(value));
        }
        Ok(Element {
            name,
            fields,
            text: String::new(),
        })
    }

    fn close(self) -> (String, Value) {
        let Element {
            name,
            mut fields,
            text,
        } = self;
        let text = text.trim();
        if fields.is_empty() {
            return (name, Value::String(text.to_string()));
        }
        if !text.is_empty() {
            fields.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
        }
        (name, Value::Object(fields))
    }

    fn add_child(&mut self, name: String, value: Value) {
        insert_or_append(&mut self.fields, name, value);
    }
}

/// Namespace declarations keep their full name, everything else is reduced to
/// its local name.
fn attribute_key(qualified: &[u8], local: &[u8]) -> String {
    let name = if qualified.starts_with(b"xmlns") {
        qualified
    } else {
        local
    };
    format!("{}{}", ATTRIBUTE_PREFIX, String::from_utf8_lossy(name))
}

fn insert_or_append(fields: &mut Map<String, Value>, name: String, value: Value) {
    match fields.get_mut(&name) {
        None => {
            fields.insert(name, value);
        }
        Some(Value::Array(values)) => values.push(value),
        Some(existing) => {
            let first = mem::take(existing);
            *existing = Value::Array(vec![first, value]);
        }
    }
}

/// Parses an XML document into a JSON value keyed by the root element name.
pub fn to_value(xml: &[u8]) -> Result<Value, XmlError> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut open: Vec<Element> = Vec::new();

    loop {
        let closed = match reader.read_event_into(&mut buf)? {
            Event::Start(start) => {
                open.push(Element::open(&start)?);
                None
            }
            Event::Empty(start) => Some(Element::open(&start)?.close()),
            Event::End(_) => open.pop().map(Element::close),
            Event::Text(text) => {
                if let Some(element) = open.last_mut() {
                    element.text.push_str(&text.unescape()?);
                }
                None
            }
            Event::CData(data) => {
                if let Some(element) = open.last_mut() {
                    element
                        .text
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
                None
            }
            Event::Eof => {
                return match open.pop() {
                    Some(element) => Err(XmlError::Unclosed(element.name)),
                    None => Err(XmlError::NoRoot),
                }
            }
            _ => None,
        };

        if let Some((name, value)) = closed {
            match open.last_mut() {
                Some(parent) => parent.add_child(name, value),
                None => {
                    let mut root = Map::new();
                    root.insert(name, value);
                    return Ok(Value::Object(root));
                }
            }
        }
        buf.clear();
    }
}
