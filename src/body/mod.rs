use std::fmt::{Debug, Formatter};
use std::io;

use serde::Serialize;


/// A request body.
///
/// Text and bytes are sent as given; anything else is encoded as JSON when the
/// request is prepared.
pub enum Body<'a> {
    Text(String),
    Bytes(Vec<u8>),
    Json(Box<dyn JsonPayload + 'a>),
}

impl<'a> Body<'a> {
    pub fn json<T>(value: T) -> Body<'a>
    where
        T: Serialize + 'a,
    {
        Body::Json(Box::new(value))
    }
}

impl Debug for Body<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Body::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Body::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Body::Json(_) => f.write_str("Json(..)"),
        }
    }
}

impl From<String> for Body<'_> {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<&str> for Body<'_> {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Body<'_> {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(bytes)
    }
}

impl From<&[u8]> for Body<'_> {
    fn from(bytes: &[u8]) -> Self {
        Body::Bytes(bytes.to_vec())
    }
}

impl From<serde_json::Value> for Body<'_> {
    fn from(value: serde_json::Value) -> Self {
        Body::json(value)
    }
}

/// A value that can be written as a JSON request payload.
pub trait JsonPayload {
    fn encode(&self, escape_html: bool) -> serde_json::Result<Vec<u8>>;
}

impl<T: Serialize> JsonPayload for T {
    fn encode(&self, escape_html: bool) -> serde_json::Result<Vec<u8>> {
        let mut payload = Vec::with_capacity(128);
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut payload, EscapingFormatter { escape_html });
        self.serialize(&mut serializer)?;
        payload.push(b'\n');
        Ok(payload)
    }
}

/// Turns an optional body into the bytes put on the wire.
pub fn prepare(body: Option<Body>, disable_escape_html: bool) -> serde_json::Result<Option<Vec<u8>>> {
    let payload = match body {
        None => None,
        Some(Body::Text(text)) => Some(text.into_bytes()),
        Some(Body::Bytes(bytes)) => Some(bytes),
        Some(Body::Json(value)) => Some(value.encode(!disable_escape_html)?),
    };
    Ok(payload)
}

/// Compact JSON output that escapes `<`, `>` and `&` when `escape_html` is
/// set. U+2028 and U+2029 are always escaped.
struct EscapingFormatter {
    escape_html: bool,
}

impl serde_json::ser::Formatter for EscapingFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, c) in fragment.char_indices() {
            let escaped = match c {
                '<' if self.escape_html => "\\u003c",
                '>' if self.escape_html => "\\u003e",
                '&' if self.escape_html => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..index].as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = index + c.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}
