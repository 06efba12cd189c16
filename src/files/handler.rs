//! Options for scanning image files
//!
//! This module defines the knobs an indexing host can set when opening
//! an image for metadata extraction.

use crate::core::locator::FragmentLocator;
use crate::core::namespace::NamespaceMap;

/// Options for XMP extraction.
///
/// Use the builder pattern to configure options.
///
/// # Example
///
/// ```rust,no_run
/// use xmpscan::{ImageFile, ScanOptions};
///
/// let options = ScanOptions::default()
///     .max_fragment_len(1 << 20)
///     .fallback_rating(false);
/// let image = ImageFile::open_with("photo.jpg", options)?;
/// println!("{:?}", image.rating());
/// # Ok::<(), xmpscan::XmpError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ScanOptions {
    /// Abandon a fragment longer than this many bytes (default: unbounded)
    pub max_fragment_len: Option<usize>,
    /// Fall back to `MicrosoftPhoto:Rating` when `xap:Rating` is missing (default: on)
    pub fallback_rating: bool,
    /// Prefix bindings used by the field queries
    pub namespaces: &'static NamespaceMap,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_fragment_len: None,
            fallback_rating: true,
            namespaces: NamespaceMap::bindings(),
        }
    }
}

impl ScanOptions {
    /// Give up on fragments longer than `len` bytes.
    ///
    /// Keeps memory bounded when indexing large files whose packet is
    /// missing its closing tag.
    pub fn max_fragment_len(mut self, len: usize) -> Self {
        self.max_fragment_len = Some(len);
        self
    }

    /// Enable or disable the `MicrosoftPhoto:Rating` fallback.
    pub fn fallback_rating(mut self, enabled: bool) -> Self {
        self.fallback_rating = enabled;
        self
    }

    /// Use custom prefix bindings for the field queries.
    ///
    /// The map must outlive every image opened with these options; a
    /// host typically leaks or statically stores one map at startup.
    pub fn namespaces(mut self, namespaces: &'static NamespaceMap) -> Self {
        self.namespaces = namespaces;
        self
    }

    /// The locator configured by these options
    pub fn locator(&self) -> FragmentLocator {
        FragmentLocator::with_max_len(self.max_fragment_len)
    }
}
