//! Per-image document cache
//!
//! Each image owns one [`DocumentSlot`]. The first field query fills it by
//! locating and parsing the embedded fragment; every later query reuses
//! the stored outcome, including a failed one, so a broken packet is
//! scanned, parsed and reported only once per image.
//!
//! The slot abstracts over single-threaded (`OnceCell`) and multi-threaded
//! (`OnceLock`) storage.

use crate::core::locator::FragmentLocator;
use crate::core::node::XmpDocument;
use std::io::{Read, Seek};

#[cfg(not(feature = "mutli-thread"))]
mod impl_ {
    use crate::core::node::XmpDocument;

    /// Single-threaded compute-once cell
    pub type DocumentCell = std::cell::OnceCell<Option<XmpDocument>>;
}

#[cfg(feature = "mutli-thread")]
mod impl_ {
    use crate::core::node::XmpDocument;

    /// Multi-threaded compute-once cell; concurrent first loads block on one initializer
    pub type DocumentCell = std::sync::OnceLock<Option<XmpDocument>>;
}

use impl_::DocumentCell;

/// Compute-once holder for an image's parsed XMP document
#[derive(Debug, Default)]
pub struct DocumentSlot {
    cell: DocumentCell,
}

impl DocumentSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a load has already run (successfully or not)
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// The cached document, without triggering a load
    pub fn get(&self) -> Option<&XmpDocument> {
        self.cell.get().and_then(Option::as_ref)
    }

    /// Return the cached document, running `load` on first access
    pub fn get_or_load<F>(&self, load: F) -> Option<&XmpDocument>
    where
        F: FnOnce() -> Option<XmpDocument>,
    {
        self.cell.get_or_init(load).as_ref()
    }

    /// Return the cached document, scanning and parsing `stream` on first access
    pub fn get_or_scan<R: Read + Seek>(
        &self,
        stream: &mut R,
        locator: &FragmentLocator,
    ) -> Option<&XmpDocument> {
        self.get_or_load(|| scan_document(stream, locator))
    }
}

/// Locate and parse the fragment in `stream`, logging failures
pub fn scan_document<R: Read + Seek>(
    stream: &mut R,
    locator: &FragmentLocator,
) -> Option<XmpDocument> {
    let fragment = match locator.locate(stream) {
        Ok(Some(fragment)) => fragment,
        Ok(None) => {
            log::debug!("no embedded rdf:RDF fragment found");
            return None;
        }
        Err(e) => {
            log::warn!("failed to read image stream while locating XMP: {}", e);
            return None;
        }
    };

    log::debug!("located rdf:RDF fragment of {} bytes", fragment.as_str().len());
    match XmpDocument::parse(fragment.as_str()) {
        Ok(document) => Some(document),
        Err(e) => {
            log::warn!("failed to parse embedded XMP: {}", e);
            None
        }
    }
}
