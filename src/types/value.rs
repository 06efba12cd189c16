//! Extracted field values
//!
//! This module defines the values handed back to the indexing host.

use crate::core::error::XmpError;
use std::fmt;

/// A single extracted metadata value
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FieldValue {
    /// Star rating, 0-5
    Rating(u8),
    /// Ordered list of strings (tags, authors)
    List(Vec<String>),
    /// Single string (title)
    Text(String),
}

impl FieldValue {
    /// Get the value as a rating, if it is one
    pub fn as_rating(&self) -> Option<u8> {
        match self {
            FieldValue::Rating(r) => Some(*r),
            _ => None,
        }
    }

    /// Get the value as a list, if it is one
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get the value as a string, if it is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Rating(r) => write!(f, "{}", r),
            FieldValue::List(items) => write!(f, "{}", items.join(", ")),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u8> for FieldValue {
    fn from(r: u8) -> Self {
        FieldValue::Rating(r)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

/// Field names an indexing host can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FieldKind {
    Rating,
    Tags,
    Title,
    Authors,
}

impl FieldKind {
    /// All fields, in the order [`ImageMetadata`] lists them
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Rating,
        FieldKind::Tags,
        FieldKind::Title,
        FieldKind::Authors,
    ];

    /// Lowercase field name
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Rating => "rating",
            FieldKind::Tags => "tags",
            FieldKind::Title => "title",
            FieldKind::Authors => "authors",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for FieldKind {
    type Err = XmpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| XmpError::BadParam(format!("Unknown field '{}'", s)))
    }
}

/// All four fields of one image
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ImageMetadata {
    pub rating: Option<u8>,
    pub tags: Option<Vec<String>>,
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
}

impl ImageMetadata {
    /// Whether no field was found
    pub fn is_empty(&self) -> bool {
        self.rating.is_none()
            && self.tags.is_none()
            && self.title.is_none()
            && self.authors.is_none()
    }

    /// Get one field as a [`FieldValue`]
    pub fn get(&self, kind: FieldKind) -> Option<FieldValue> {
        match kind {
            FieldKind::Rating => self.rating.map(FieldValue::from),
            FieldKind::Tags => self.tags.clone().map(FieldValue::from),
            FieldKind::Title => self.title.clone().map(FieldValue::from),
            FieldKind::Authors => self.authors.clone().map(FieldValue::from),
        }
    }
}
