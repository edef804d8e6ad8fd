//! # JSON <-> XML Codec
//!
//! The [`MarkupCodec`] trait is the seam between argument values and the markup carried in a
//! SOAP body. The invoker only calls it; it never inspects the markup it produces.
//!
//! ## Default mapping ([`XmlCodec`])
//!
//! 1. **Encoding (JSON -> XML)**:
//!    - An object becomes one child element per key, in key order.
//!    - An array repeats its parent element once per item.
//!    - Strings, numbers and booleans become escaped text. `null` becomes an empty element.
//!
//! 2. **Decoding (XML -> JSON)**:
//!    - Namespace prefixes are dropped and attributes are ignored.
//!    - An element with children becomes an object, repeated siblings become an array. Text
//!      between child elements is dropped.
//!    - An element with only text becomes a string holding the text exactly as sent, an empty
//!      element becomes `null`.
//!    - The result is the content of `<Envelope><Body>`, keyed by element name.
use quick_xml::{Reader, escape::escape, events::Event};
use serde_json::{Map, Value};
use std::fmt::Display;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Malformed XML: '{0}'")]
    Xml(String),
    #[error("Expected element '{0}' was not found in the response")]
    MissingElement(String),
    #[error("SOAP fault '{code}': '{message}'")]
    Fault { code: String, message: String },
    #[error("Invalid arguments: '{0}'")]
    InvalidArguments(String),
}

/// Serializes call arguments into body markup and parses response payloads.
pub trait MarkupCodec: Send + Sync {
    /// Wraps `args` as named parameters under the operation element.
    fn rpc_xml(&self, operation: &str, args: &Value) -> Result<String, CodecError>;

    /// Serializes `args` as the single document element `element`.
    fn document_xml(&self, element: &str, args: &Value) -> Result<String, CodecError>;

    /// Parses a response envelope and returns the content of its body.
    fn xml_to_object(&self, raw: &str) -> Result<Value, CodecError>;
}

/// The default [`MarkupCodec`], backed by `quick-xml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlCodec;

impl MarkupCodec for XmlCodec {
    fn rpc_xml(&self, operation: &str, args: &Value) -> Result<String, CodecError> {
        let empty = Map::new();
        let params = match args {
            Value::Object(params) => params,
            Value::Null => &empty,
            other => {
                return Err(CodecError::InvalidArguments(format!(
                    "RPC arguments must be an object, got '{other}'"
                )));
            }
        };

        let mut out = String::new();
        out.push_str(&format!("<ns0:{operation}>"));
        for (key, value) in params {
            write_element(&mut out, key, value)?;
        }
        out.push_str(&format!("</ns0:{operation}>"));
        Ok(out)
    }

    fn document_xml(&self, element: &str, args: &Value) -> Result<String, CodecError> {
        if args.is_array() {
            return Err(CodecError::InvalidArguments(format!(
                "Document '{element}' must be a single element, got an array"
            )));
        }

        let mut out = String::new();
        write_element(&mut out, &format!("ns0:{element}"), args)?;
        Ok(out)
    }

    fn xml_to_object(&self, raw: &str) -> Result<Value, CodecError> {
        let (root, envelope) = parse_document(raw)?;
        if root != "Envelope" {
            return Err(CodecError::MissingElement("Envelope".to_string()));
        }

        let body = match envelope {
            Value::Object(mut children) => children
                .remove("Body")
                .ok_or_else(|| CodecError::MissingElement("Body".to_string()))?,
            _ => return Err(CodecError::MissingElement("Body".to_string())),
        };

        let body = match body {
            Value::Object(children) => children,
            Value::Null => Map::new(),
            Value::String(text) if text.trim().is_empty() => Map::new(),
            _ => return Err(CodecError::MissingElement("Body".to_string())),
        };

        if let Some(fault) = body.get("Fault") {
            return Err(fault_error(fault));
        }

        Ok(Value::Object(body))
    }
}

fn write_element(out: &mut String, name: &str, value: &Value) -> Result<(), CodecError> {
    if !is_valid_name(name) {
        return Err(CodecError::InvalidArguments(format!(
            "'{name}' is not a valid element name"
        )));
    }

    match value {
        Value::Null => out.push_str(&format!("<{name}/>")),
        Value::Array(items) => {
            for item in items {
                write_element(out, name, item)?;
            }
        }
        Value::Object(children) => {
            out.push_str(&format!("<{name}>"));
            for (key, child) in children {
                write_element(out, key, child)?;
            }
            out.push_str(&format!("</{name}>"));
        }
        Value::String(text) => out.push_str(&format!("<{name}>{}</{name}>", escape(text))),
        Value::Bool(_) | Value::Number(_) => out.push_str(&format!("<{name}>{value}</{name}>")),
    }
    Ok(())
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '.')
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
}

/// An element being decoded.
struct Node {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl Node {
    fn new(name: String) -> Self {
        Self {
            name,
            children: Map::new(),
            text: String::new(),
        }
    }

    fn into_value(self) -> Value {
        if !self.children.is_empty() {
            Value::Object(self.children)
        } else if self.text.is_empty() {
            Value::Null
        } else {
            Value::String(self.text)
        }
    }
}

fn xml_error(err: impl Display) -> CodecError {
    CodecError::Xml(err.to_string())
}

/// Parses a whole document into the name and value of its root element.
fn parse_document(raw: &str) -> Result<(String, Value), CodecError> {
    let mut reader = Reader::from_str(raw);

    let mut stack: Vec<Node> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(start) => {
                stack.push(Node::new(local_name(start.local_name().as_ref())?));
            }
            Event::Empty(start) => {
                let node = Node::new(local_name(start.local_name().as_ref())?);
                close(&mut stack, &mut root, node)?;
            }
            Event::End(_) => {
                let node = stack.pop().ok_or_else(|| xml_error("unbalanced end tag"))?;
                close(&mut stack, &mut root, node)?;
            }
            Event::Text(text) => {
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&text.unescape().map_err(xml_error)?);
                }
            }
            Event::CData(data) => {
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(xml_error("unexpected end of document"));
    }

    root.ok_or_else(|| xml_error("document has no root element"))
}

fn close(
    stack: &mut [Node],
    root: &mut Option<(String, Value)>,
    node: Node,
) -> Result<(), CodecError> {
    let name = node.name.clone();
    let value = node.into_value();

    match stack.last_mut() {
        Some(parent) => insert_child(&mut parent.children, name, value),
        None if root.is_none() => *root = Some((name, value)),
        None => return Err(xml_error("document has more than one root element")),
    }
    Ok(())
}

fn insert_child(children: &mut Map<String, Value>, name: String, value: Value) {
    match children.get_mut(&name) {
        // Decoded elements are never arrays, so an array here holds repeated siblings.
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            children.insert(name, value);
        }
    }
}

fn local_name(bytes: &[u8]) -> Result<String, CodecError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(xml_error)
}

fn fault_error(fault: &Value) -> CodecError {
    let field = |name: &str| {
        fault
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    CodecError::Fault {
        code: field("faultcode"),
        message: field("faultstring"),
    }
}
