//! XMP Core module
//!
//! This module contains the extraction pipeline: locating the embedded
//! fragment, parsing it, caching the document and querying fields.

pub mod cache;
pub mod error;
pub mod fields;
pub mod locator;
pub mod namespace;
pub mod node;
pub mod parser;
pub mod xpath;

pub use cache::DocumentSlot;
pub use error::{XmpError, XmpResult};
pub use fields::Field;
pub use locator::{locate_fragment, FragmentLocator, RawFragment};
pub use namespace::{ns, NamespaceMap};
pub use node::{Attribute, Element, Node, XmpDocument};
pub use parser::XmpParser;
pub use xpath::{parse_path, PathComponent, PathComponents};
