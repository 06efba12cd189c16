//! XMP XML/RDF parser
//!
//! This module turns a located `rdf:RDF` fragment into an [`Element`]
//! tree with every element and attribute name resolved to its namespace
//! URI. Any well-formedness problem (mismatched or unclosed tags, unbound
//! prefixes, unknown entities) is a parse error.

use crate::core::error::{XmpError, XmpResult};
use crate::core::namespace::ns;
use crate::core::node::{Attribute, Element, Node};
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

/// Parser for raw XMP fragments
pub struct XmpParser {
    stack: Vec<Element>,
}

impl XmpParser {
    /// Create a new XMP parser
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Parse a fragment and return its root element
    pub fn parse(&mut self, xml: &str) -> XmpResult<Element> {
        if xml.trim().is_empty() {
            return Err(XmpError::BadParam("Fragment text is empty".to_string()));
        }

        self.stack.clear();
        let mut reader = NsReader::from_str(xml);
        reader.config_mut().expand_empty_elements = true;

        let mut buf = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let element = Self::start_element(&reader, &e)?;
                    self.stack.push(element);
                }
                Ok(Event::End(_)) => {
                    let Some(element) = self.stack.pop() else {
                        return Err(XmpError::ParseError("Unexpected end tag".to_string()));
                    };
                    match self.stack.last_mut() {
                        Some(parent) => parent.children.push(Node::Element(element)),
                        None if root.is_none() => root = Some(element),
                        None => {
                            return Err(XmpError::ParseError(
                                "More than one root element".to_string(),
                            ))
                        }
                    }
                }
                Ok(Event::Text(e)) => {
                    let raw_text = String::from_utf8_lossy(e.as_ref());
                    let text = match unescape(&raw_text) {
                        Ok(unescaped) => unescaped.to_string(),
                        Err(_) => raw_text.to_string(),
                    };
                    self.push_text(&text);
                }
                Ok(Event::CData(e)) => {
                    let text = String::from_utf8_lossy(&e.into_inner()).to_string();
                    self.push_text(&text);
                }
                Ok(Event::GeneralRef(e)) => {
                    let text = resolve_reference(&e)?;
                    self.push_text(&text);
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(XmpError::ParseError(format!("XML parsing error: {}", e)));
                }
                _ => {}
            }
            buf.clear();
        }

        if let Some(open) = self.stack.last() {
            return Err(XmpError::ParseError(format!(
                "Unclosed element '{}'",
                open.name
            )));
        }
        root.ok_or_else(|| XmpError::ParseError("No root element".to_string()))
    }

    /// Build an element from a start tag, resolving namespaces
    fn start_element(reader: &NsReader<&[u8]>, e: &BytesStart<'_>) -> XmpResult<Element> {
        let (resolved, local) = reader.resolve_element(e.name());
        let namespace = namespace_uri(resolved)?;
        let mut element = Element::new(namespace, String::from_utf8_lossy(local.as_ref()));

        for attr in e.attributes() {
            let attr = attr.map_err(|err| XmpError::ParseError(format!("Bad attribute: {}", err)))?;
            let key = attr.key.as_ref();
            if key == b"xmlns" || key.starts_with(b"xmlns:") {
                continue;
            }
            let (resolved, local) = reader.resolve_attribute(attr.key);
            let namespace = namespace_uri(resolved)?;
            let raw_value = String::from_utf8_lossy(attr.value.as_ref());
            let value = unescape(&raw_value)
                .map_err(|err| XmpError::ParseError(format!("Bad attribute value: {}", err)))?
                .to_string();
            element.attributes.push(Attribute {
                namespace,
                name: String::from_utf8_lossy(local.as_ref()).to_string(),
                value,
            });
        }
        Ok(element)
    }

    /// Character data outside the root element is ignored
    fn push_text(&mut self, text: &str) {
        if let Some(current) = self.stack.last_mut() {
            current.push_text(text);
        }
    }
}

impl Default for XmpParser {
    fn default() -> Self {
        Self::new()
    }
}

fn namespace_uri(resolved: ResolveResult<'_>) -> XmpResult<Option<String>> {
    match resolved {
        ResolveResult::Bound(Namespace(uri)) => Ok(Some(String::from_utf8_lossy(uri).to_string())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) if prefix == b"xml" => Ok(Some(ns::XML.to_string())),
        ResolveResult::Unknown(prefix) => Err(XmpError::ParseError(format!(
            "Unbound namespace prefix '{}'",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

/// Resolve the body of an `&...;` reference
fn resolve_reference(reference: &BytesRef<'_>) -> XmpResult<String> {
    let name = String::from_utf8_lossy(reference.as_ref());
    let resolved = reference.resolve_char_ref().map_err(|err| {
        XmpError::ParseError(format!("Invalid character reference '&{};': {}", name, err))
    })?;
    if let Some(c) = resolved {
        return Ok(c.to_string());
    }
    resolve_predefined_entity(&name)
        .map(|s| s.to_string())
        .ok_or_else(|| XmpError::ParseError(format!("Unknown entity '&{};'", name)))
}
