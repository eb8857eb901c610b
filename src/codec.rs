use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};
use serde_json::{Map, Value};

use crate::{config::OutputFormat, error::ParseError};

/// Key holding an element's attributes in the XML tree.
pub const ATTR_KEY: &str = "$";

/// Key holding an element's text when it also has children or attributes.
pub const TEXT_KEY: &str = "_";

/// XML documents wrap the payload in this root element.
pub const XML_ROOT: &str = "response";

/// A decoded body: the payload to shape, and the body as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    /// Fields of the response.
    pub payload: Value,
    /// Full parsed body.
    pub raw: Value,
}

/// Turns response bodies of one output format into [`Decoded`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCodec {
    /// The body is the payload.
    Json,
    /// The payload sits under the `response` root element.
    Xml,
}

impl ResponseCodec {
    /// Picks the codec for a configured format.
    ///
    /// Anything that is not JSON is read as XML.
    pub fn for_format(format: &OutputFormat) -> Self {
        if format.is_json() {
            ResponseCodec::Json
        } else {
            ResponseCodec::Xml
        }
    }

    /// Parses `body`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the body is not valid JSON or XML.
    pub fn decode(self, body: &str) -> Result<Decoded, ParseError> {
        match self {
            ResponseCodec::Json => {
                let raw: Value = serde_json::from_str(body)?;
                Ok(Decoded {
                    payload: raw.clone(),
                    raw,
                })
            }
            ResponseCodec::Xml => {
                let raw = xml_to_value(body)?;
                let payload = raw.get(XML_ROOT).cloned().unwrap_or(Value::Null);
                Ok(Decoded { payload, raw })
            }
        }
    }
}

#[derive(Debug, Default)]
struct Element {
    name: String,
    attrs: Map<String, Value>,
    children: Map<String, Value>,
    text: String,
}

impl Element {
    fn into_value(self) -> Value {
        if self.attrs.is_empty() && self.children.is_empty() {
            return Value::String(self.text);
        }
        let mut obj = self.children;
        if !self.attrs.is_empty() {
            obj.insert(ATTR_KEY.to_owned(), Value::Object(self.attrs));
        }
        if !self.text.trim().is_empty() {
            obj.insert(TEXT_KEY.to_owned(), Value::String(self.text));
        }
        Value::Object(obj)
    }
}

/// Repeated siblings collect into an array; a lone element stays a scalar.
fn insert_child(map: &mut Map<String, Value>, name: String, value: Value) {
    match map.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            map.insert(name, value);
        }
    }
}

/// Parses an XML document into `{ root_name: tree }`.
///
/// Elements without attributes or children become strings. Attributes go
/// under [`ATTR_KEY`], text next to children under [`TEXT_KEY`].
///
/// # Errors
///
/// Fails on syntax errors, unclosed elements, text outside the root, or a
/// document without a root element.
pub fn xml_to_value(body: &str) -> Result<Value, ParseError> {
    let mut reader = Reader::from_str(body);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                if root.is_some() {
                    return Err(ParseError::Malformed("more than one root element".into()));
                }
                stack.push(open(&start)?);
            }
            Event::Empty(start) => {
                if root.is_some() {
                    return Err(ParseError::Malformed("more than one root element".into()));
                }
                close(&mut stack, &mut root, open(&start)?);
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ParseError::Malformed("unexpected closing tag".into()))?;
                close(&mut stack, &mut root, element);
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                match stack.last_mut() {
                    Some(parent) => parent.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => {
                        return Err(ParseError::Malformed(
                            "text outside of the root element".into(),
                        ))
                    }
                }
            }
            Event::CData(data) => {
                let data = data.into_inner();
                match stack.last_mut() {
                    Some(parent) => parent.text.push_str(&String::from_utf8_lossy(&data)),
                    None => {
                        return Err(ParseError::Malformed(
                            "character data outside of the root element".into(),
                        ))
                    }
                }
            }
            Event::Eof => break,
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) | Event::Comment(_) => {}
        }
    }

    if let Some(unclosed) = stack.last() {
        return Err(ParseError::Malformed(format!(
            "element <{}> is never closed",
            unclosed.name
        )));
    }

    let (name, value) =
        root.ok_or_else(|| ParseError::Malformed("document has no root element".into()))?;
    let mut doc = Map::new();
    doc.insert(name, value);
    Ok(Value::Object(doc))
}

fn open(start: &BytesStart<'_>) -> Result<Element, ParseError> {
    let mut element = Element {
        name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
        ..Element::default()
    };
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attrs.insert(key, Value::String(value));
    }
    Ok(element)
}

fn close(stack: &mut Vec<Element>, root: &mut Option<(String, Value)>, element: Element) {
    let name = element.name.clone();
    let value = element.into_value();
    match stack.last_mut() {
        Some(parent) => insert_child(&mut parent.children, name, value),
        None => *root = Some((name, value)),
    }
}
