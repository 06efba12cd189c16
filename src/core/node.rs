//! XMP document tree
//!
//! This module defines the node types produced by the parser:
//! - Element: a namespace-resolved XML element with attributes and children
//! - Node: either a child element or a run of character data
//! - XmpDocument: the parsed `rdf:RDF` fragment

use crate::core::error::{XmpError, XmpResult};
use crate::core::namespace::NamespaceMap;
use crate::core::parser::XmpParser;
use crate::core::xpath::{parse_path, select};

/// A namespace-resolved attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Namespace URI, if the attribute name carried a bound prefix
    pub namespace: Option<String>,
    /// Local part of the attribute name
    pub name: String,
    /// Unescaped attribute value
    pub value: String,
}

/// A child of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A nested element
    Element(Element),
    /// Character data (text, CDATA, or a resolved entity reference)
    Text(String),
}

/// A namespace-resolved XML element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Namespace URI of the element, if any
    pub namespace: Option<String>,
    /// Local part of the element name
    pub name: String,
    /// Attributes, excluding namespace declarations
    pub attributes: Vec<Attribute>,
    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Element {
    /// Create a new element with no attributes or children
    pub fn new(namespace: Option<String>, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Check whether this element has the given namespace URI and local name
    pub fn is(&self, namespace: &str, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == Some(namespace)
    }

    /// Iterate over child elements, skipping text
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Get an attribute value by namespace URI and local name
    pub fn attribute(&self, namespace: &str, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name && a.namespace.as_deref() == Some(namespace))
            .map(|a| a.value.as_str())
    }

    /// Concatenated character data of this element and all descendants
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }

    /// Append character data, merging with a trailing text node
    pub(crate) fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Node::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(Node::Text(text.to_string()));
        }
    }
}

/// A parsed `rdf:RDF` fragment
///
/// Queries are evaluated relative to the root element, so
/// `rdf:Description/dc:title` selects the `dc:title` children of every
/// `rdf:Description` directly under `rdf:RDF`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmpDocument {
    root: Element,
}

impl XmpDocument {
    /// Parse a raw fragment into a document
    pub fn parse(xml: &str) -> XmpResult<Self> {
        let root = XmpParser::new().parse(xml)?;
        Ok(Self { root })
    }

    /// The root element (normally `rdf:RDF`)
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Select all elements matching `path`, in document order
    pub fn select<'a>(
        &'a self,
        path: &str,
        namespaces: &NamespaceMap,
    ) -> XmpResult<Vec<&'a Element>> {
        let path = parse_path(path)?;
        select(&self.root, &path, namespaces)
    }

    /// Select the first element matching `path`
    pub fn select_first<'a>(
        &'a self,
        path: &str,
        namespaces: &NamespaceMap,
    ) -> XmpResult<Option<&'a Element>> {
        Ok(self.select(path, namespaces)?.into_iter().next())
    }

    /// Read the attribute named by the trailing `@prefix:name` step of `path`
    ///
    /// The first matching element carrying the attribute wins.
    pub fn attribute<'a>(
        &'a self,
        path: &str,
        namespaces: &NamespaceMap,
    ) -> XmpResult<Option<&'a str>> {
        let path = parse_path(path)?;
        let Some((elements, attr)) = path.split_attribute() else {
            return Err(XmpError::BadXPath(
                "Path does not end in an attribute step".to_string(),
            ));
        };
        let (uri, local) = namespaces.resolve(attr)?;
        let found = select(&self.root, &elements, namespaces)?
            .into_iter()
            .find_map(|e| e.attribute(uri, local));
        Ok(found)
    }
}

impl std::str::FromStr for XmpDocument {
    type Err = XmpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
