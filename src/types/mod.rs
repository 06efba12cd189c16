//! Extracted value types
//!
//! This module defines the value types returned by the field accessors.

pub mod value;

pub use value::{FieldKind, FieldValue, ImageMetadata};
