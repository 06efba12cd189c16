//! Field extractors
//!
//! Four fixed queries against a parsed [`XmpDocument`]: rating, tags,
//! title and authors. Every extractor returns a [`Field`] that records
//! whether the value was found, missing, or present but unusable. The
//! public accessors collapse the last two into `None`.

use crate::core::error::{XmpError, XmpResult};
use crate::core::namespace::NamespaceMap;
use crate::core::node::XmpDocument;

/// `xap:Rating` as a child element of a description
pub const RATING_PATH: &str = "rdf:Description/xap:Rating";
/// `xap:Rating` in attribute shorthand form
pub const RATING_ATTR_PATH: &str = "rdf:Description/@xap:Rating";
/// Windows Photo Gallery rating on a 0-100 scale
pub const MICROSOFT_RATING_PATH: &str = "rdf:Description/@MicrosoftPhoto:Rating";
/// Keyword bag
pub const TAGS_PATH: &str = "rdf:Description/dc:subject/rdf:Bag";
/// Title alternatives
pub const TITLE_PATH: &str = "rdf:Description/dc:title/rdf:Alt";
/// Creator sequence
pub const AUTHORS_PATH: &str = "rdf:Description/dc:creator/rdf:Seq";

/// Highest rating on the XMP star scale
pub const MAX_RATING: u8 = 5;

/// Outcome of a single field query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    /// The field was found and converted
    Value(T),
    /// The document has no such field
    Absent,
    /// The field exists but could not be queried or converted
    Malformed(String),
}

impl<T> Field<T> {
    /// Collapse into an option, dropping the reason for a missing value
    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Value(v) => Some(v),
            Field::Absent | Field::Malformed(_) => None,
        }
    }

    /// Check whether a value was extracted
    pub fn is_value(&self) -> bool {
        matches!(self, Field::Value(_))
    }

    /// Use `other` when this field is absent; malformed values are kept
    fn or_else_absent(self, other: impl FnOnce() -> Field<T>) -> Field<T> {
        match self {
            Field::Absent => other(),
            found => found,
        }
    }
}

impl<T> From<XmpResult<Option<T>>> for Field<T> {
    fn from(result: XmpResult<Option<T>>) -> Self {
        match result {
            Ok(Some(v)) => Field::Value(v),
            Ok(None) => Field::Absent,
            Err(e) => Field::Malformed(e.to_string()),
        }
    }
}

/// Star rating, 0-5
///
/// Reads `xap:Rating` (element, then attribute form). When neither is
/// present and `fallback` is set, converts `MicrosoftPhoto:Rating`
/// (0-100) with `floor(value / 100 * 5)`.
pub fn rating(document: &XmpDocument, namespaces: &NamespaceMap, fallback: bool) -> Field<u8> {
    let xap = Field::from(
        document
            .select_first(RATING_PATH, namespaces)
            .and_then(|e| e.map(|e| parse_rating(&e.text_content())).transpose()),
    )
    .or_else_absent(|| {
        Field::from(
            document
                .attribute(RATING_ATTR_PATH, namespaces)
                .and_then(|v| v.map(parse_rating).transpose()),
        )
    });

    if !fallback {
        return xap;
    }
    xap.or_else_absent(|| {
        Field::from(
            document
                .attribute(MICROSOFT_RATING_PATH, namespaces)
                .and_then(|v| v.map(parse_percent_rating).transpose()),
        )
    })
}

/// Keywords from `dc:subject`, in document order
pub fn tags(document: &XmpDocument, namespaces: &NamespaceMap) -> Field<Vec<String>> {
    text_list(document, TAGS_PATH, namespaces)
}

/// First alternative of `dc:title`
///
/// Only the first `rdf:Alt` in document order is consulted; if it has no
/// items the title is absent.
pub fn title(document: &XmpDocument, namespaces: &NamespaceMap) -> Field<String> {
    Field::from(document.select_first(TITLE_PATH, namespaces).map(|alt| {
        alt.and_then(|alt| alt.child_elements().next())
            .map(|item| item.text_content())
    }))
}

/// Creators from `dc:creator`, in document order
pub fn authors(document: &XmpDocument, namespaces: &NamespaceMap) -> Field<Vec<String>> {
    text_list(document, AUTHORS_PATH, namespaces)
}

/// Text of every item in the first container matching `container_path`
///
/// An empty container yields an empty list. Containers in later
/// descriptions are not consulted.
fn text_list(
    document: &XmpDocument,
    container_path: &str,
    namespaces: &NamespaceMap,
) -> Field<Vec<String>> {
    Field::from(document.select_first(container_path, namespaces).map(|container| {
        container.map(|c| c.child_elements().map(|item| item.text_content()).collect())
    }))
}

fn parse_rating(text: &str) -> XmpResult<u8> {
    let value = text
        .trim()
        .parse::<i64>()
        .map_err(|_| XmpError::BadValue(format!("Rating '{}' is not an integer", text.trim())))?;
    check_rating(value)
}

fn parse_percent_rating(text: &str) -> XmpResult<u8> {
    let percent = text.trim().parse::<i64>().map_err(|_| {
        XmpError::BadValue(format!("Rating '{}' is not an integer", text.trim()))
    })?;
    if !(0..=100).contains(&percent) {
        return Err(XmpError::BadValue(format!(
            "Percent rating {} is outside 0-100",
            percent
        )));
    }
    // Integer division is floor for non-negative values.
    check_rating(percent * i64::from(MAX_RATING) / 100)
}

fn check_rating(value: i64) -> XmpResult<u8> {
    u8::try_from(value)
        .ok()
        .filter(|v| *v <= MAX_RATING)
        .ok_or_else(|| XmpError::BadValue(format!("Rating {} is outside 0-5", value)))
}
