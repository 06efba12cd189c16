//! XPath path handling for XMP queries
//!
//! This module parses the small XPath subset the field extractors need
//! and evaluates it against an [`Element`] tree.

use crate::core::error::{XmpError, XmpResult};
use crate::core::namespace::NamespaceMap;
use crate::core::node::Element;
use std::fmt;

/// Parse an XPath-like path expression
///
/// Supports formats like:
/// - `rdf:Description/xap:Rating` - child steps
/// - `rdf:Alt/*` - any child element
/// - `rdf:Alt/*[1]` - first child element (1-based)
/// - `rdf:Description/@MicrosoftPhoto:Rating` - trailing attribute step
pub fn parse_path(path: &str) -> XmpResult<PathComponents> {
    let mut components = Vec::new();
    let mut current = String::new();
    let mut in_brackets = false;
    let mut in_attribute = false;

    for ch in path.chars() {
        match ch {
            '[' => {
                if in_brackets || in_attribute {
                    return Err(XmpError::BadXPath("Unexpected '['".to_string()));
                }
                if !current.is_empty() {
                    components.push(PathComponent::Name(current.clone()));
                    current.clear();
                }
                in_brackets = true;
            }
            ']' => {
                if !in_brackets {
                    return Err(XmpError::BadXPath("Unexpected ']'".to_string()));
                }
                let index = current.parse::<usize>().map_err(|_| {
                    XmpError::BadXPath(format!("Invalid index: {}", current))
                })?;
                if index == 0 {
                    return Err(XmpError::BadXPath("Indices are 1-based".to_string()));
                }
                components.push(PathComponent::Index(index));
                current.clear();
                in_brackets = false;
            }
            '/' => {
                if in_brackets || in_attribute {
                    return Err(XmpError::BadXPath("Unexpected '/'".to_string()));
                }
                if !current.is_empty() {
                    components.push(PathComponent::Name(current.clone()));
                    current.clear();
                }
            }
            '@' => {
                if !current.is_empty() || in_brackets || in_attribute {
                    return Err(XmpError::BadXPath("Unexpected '@'".to_string()));
                }
                in_attribute = true;
            }
            _ => {
                if !in_brackets || ch.is_ascii_digit() {
                    current.push(ch);
                } else {
                    return Err(XmpError::BadXPath(format!(
                        "Invalid character in index: {}",
                        ch
                    )));
                }
            }
        }
    }

    if in_brackets {
        return Err(XmpError::BadXPath("Unclosed bracket".to_string()));
    }

    if in_attribute {
        if current.is_empty() {
            return Err(XmpError::BadXPath("Empty attribute name".to_string()));
        }
        components.push(PathComponent::Attribute(current));
    } else if !current.is_empty() {
        components.push(PathComponent::Name(current));
    }

    if components.is_empty() {
        return Err(XmpError::BadXPath("Empty path".to_string()));
    }

    Ok(PathComponents { components })
}

/// Evaluate element steps of `path` starting from `root`
///
/// Results are in document order. An attribute step is rejected; use
/// [`PathComponents::split_attribute`] first.
pub fn select<'a>(
    root: &'a Element,
    path: &PathComponents,
    namespaces: &NamespaceMap,
) -> XmpResult<Vec<&'a Element>> {
    let mut context = vec![root];
    let mut steps = path.components.iter().peekable();

    while let Some(step) = steps.next() {
        let name = match step {
            PathComponent::Name(name) => name,
            PathComponent::Index(_) => {
                return Err(XmpError::BadXPath("Index without a step".to_string()))
            }
            PathComponent::Attribute(name) => {
                return Err(XmpError::BadXPath(format!(
                    "Attribute step '@{}' cannot select elements",
                    name
                )))
            }
        };
        let index = match steps.peek() {
            Some(PathComponent::Index(i)) => {
                let i = *i;
                steps.next();
                Some(i)
            }
            _ => None,
        };

        let test = NameTest::new(name, namespaces)?;
        let mut next = Vec::new();
        for element in context {
            let mut matching = element.child_elements().filter(|e| test.matches(e));
            match index {
                Some(i) => next.extend(matching.nth(i - 1)),
                None => next.extend(matching),
            }
        }
        if next.is_empty() {
            return Ok(next);
        }
        context = next;
    }

    Ok(context)
}

enum NameTest<'a> {
    Any,
    Named { namespace: &'a str, name: &'a str },
}

impl<'a> NameTest<'a> {
    fn new(step: &'a str, namespaces: &'a NamespaceMap) -> XmpResult<Self> {
        if step == "*" {
            return Ok(NameTest::Any);
        }
        let (namespace, name) = namespaces.resolve(step)?;
        Ok(NameTest::Named { namespace, name })
    }

    fn matches(&self, element: &Element) -> bool {
        match self {
            NameTest::Any => true,
            NameTest::Named { namespace, name } => element.is(namespace, name),
        }
    }
}

/// A component of an XPath expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathComponent {
    /// A child element step, `prefix:name` or `*`
    Name(String),
    /// A 1-based position filter on the preceding step
    Index(usize),
    /// A trailing attribute step, `prefix:name` without the `@`
    Attribute(String),
}

/// Parsed path components
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathComponents {
    pub components: Vec<PathComponent>,
}

impl PathComponents {
    /// Split a trailing attribute step off the element steps
    pub fn split_attribute(&self) -> Option<(PathComponents, &str)> {
        let (last, rest) = self.components.split_last()?;
        match last {
            PathComponent::Attribute(name) if !rest.is_empty() => Some((
                PathComponents {
                    components: rest.to_vec(),
                },
                name.as_str(),
            )),
            _ => None,
        }
    }
}

impl fmt::Display for PathComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, comp) in self.components.iter().enumerate() {
            match comp {
                PathComponent::Name(name) => {
                    if i > 0 {
                        f.write_str("/")?;
                    }
                    f.write_str(name)?;
                }
                PathComponent::Index(idx) => write!(f, "[{}]", idx)?,
                PathComponent::Attribute(name) => write!(f, "/@{}", name)?,
            }
        }
        Ok(())
    }
}
