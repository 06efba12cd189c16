//! # xmpscan
//!
//! Read the rating, tags, title and authors stored in the XMP packet of
//! an image file, for search and filtering in file indexers.
//!
//! The packet is found by scanning the raw bytes for the embedded
//! `<rdf:RDF>...</rdf:RDF>` fragment, so no container format has to be
//! understood. The fragment is parsed once per image and cached.
//!
//! ```rust,no_run
//! use xmpscan::ImageFile;
//!
//! # fn main() -> Result<(), xmpscan::XmpError> {
//! let image = ImageFile::open("photo.jpg")?;
//! let meta = image.metadata();
//! println!("{:?} {:?} {:?} {:?}", meta.rating, meta.tags, meta.title, meta.authors);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod files;
pub mod types;

pub use crate::core::{
    locate_fragment, DocumentSlot, Field, FragmentLocator, NamespaceMap, RawFragment, XmpDocument,
    XmpError, XmpResult,
};
pub use files::{ImageFile, ImageStream, ScanOptions};
pub use types::{FieldKind, FieldValue, ImageMetadata};
