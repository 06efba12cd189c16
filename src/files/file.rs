//! Image file API
//!
//! [`ImageFile`] is the per-image holder an indexing host keeps around
//! while it needs metadata: it owns the byte stream and the cached
//! document, and exposes the four field accessors.

use crate::core::cache::{scan_document, DocumentSlot};
use crate::core::error::{XmpError, XmpResult};
use crate::core::fields;
use crate::core::node::XmpDocument;
use crate::files::handler::ScanOptions;
use crate::types::value::{FieldKind, FieldValue, ImageMetadata};
use std::io::Cursor;
use std::path::{Path, PathBuf};

#[cfg(not(feature = "mutli-thread"))]
mod impl_ {
    use std::cell::RefCell;
    use std::io::{Read, Seek};

    /// A readable, seekable image stream
    pub trait ImageStream: Read + Seek {}
    impl<T: Read + Seek> ImageStream for T {}

    pub type StreamCell = RefCell<Box<dyn ImageStream>>;

    pub fn new_stream_cell(stream: Box<dyn ImageStream>) -> StreamCell {
        RefCell::new(stream)
    }

    /// Run `f` with exclusive access to the stream
    pub fn with_stream<F, R>(cell: &StreamCell, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn ImageStream) -> Option<R>,
    {
        let mut guard = cell.borrow_mut();
        f(guard.as_mut())
    }
}

#[cfg(feature = "mutli-thread")]
mod impl_ {
    use std::io::{Read, Seek};
    use std::sync::Mutex;

    /// A readable, seekable image stream that can move between threads
    pub trait ImageStream: Read + Seek + Send {}
    impl<T: Read + Seek + Send> ImageStream for T {}

    pub type StreamCell = Mutex<Box<dyn ImageStream>>;

    pub fn new_stream_cell(stream: Box<dyn ImageStream>) -> StreamCell {
        Mutex::new(stream)
    }

    /// Run `f` with exclusive access to the stream
    /// Returns `None` if the lock is poisoned
    pub fn with_stream<F, R>(cell: &StreamCell, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn ImageStream) -> Option<R>,
    {
        match cell.lock() {
            Ok(mut guard) => f(guard.as_mut()),
            Err(_) => {
                log::warn!("image stream lock poisoned");
                None
            }
        }
    }
}

pub use impl_::ImageStream;
use impl_::{new_stream_cell, with_stream, StreamCell};

/// An image whose embedded XMP can be queried
///
/// The embedded fragment is located and parsed on the first field query
/// and cached for the lifetime of the value. Field accessors never fail:
/// anything missing or malformed comes back as `None`.
///
/// # Example
///
/// ```rust,no_run
/// use xmpscan::ImageFile;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let image = ImageFile::open("photo.jpg")?;
/// if let Some(tags) = image.tags() {
///     println!("tags: {}", tags.join(", "));
/// }
/// println!("rating: {:?}", image.rating());
/// # Ok(())
/// # }
/// ```
pub struct ImageFile {
    stream: StreamCell,
    document: DocumentSlot,
    options: ScanOptions,
    path: Option<PathBuf>,
}

impl ImageFile {
    /// Open an image from a path with default options
    pub fn open<P: AsRef<Path>>(path: P) -> XmpResult<Self> {
        Self::open_with(path, ScanOptions::default())
    }

    /// Open an image from a path
    ///
    /// Fails immediately if the path is empty or the file cannot be opened.
    pub fn open_with<P: AsRef<Path>>(path: P, options: ScanOptions) -> XmpResult<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(XmpError::BadParam("Path cannot be empty".to_string()));
        }
        let file = std::fs::File::open(path)?;
        let mut image = Self::from_reader_with(file, options);
        image.path = Some(path.to_path_buf());
        Ok(image)
    }

    /// Wrap an in-memory copy of the image bytes
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::from_bytes_with(data, ScanOptions::default())
    }

    /// Wrap an in-memory copy of the image bytes with options
    pub fn from_bytes_with(data: impl Into<Vec<u8>>, options: ScanOptions) -> Self {
        Self::from_reader_with(Cursor::new(data.into()), options)
    }

    /// Wrap any readable, seekable stream
    pub fn from_reader<R: ImageStream + 'static>(reader: R) -> Self {
        Self::from_reader_with(reader, ScanOptions::default())
    }

    /// Wrap any readable, seekable stream with options
    pub fn from_reader_with<R: ImageStream + 'static>(reader: R, options: ScanOptions) -> Self {
        Self {
            stream: new_stream_cell(Box::new(reader)),
            document: DocumentSlot::new(),
            options,
            path: None,
        }
    }

    /// The path this image was opened from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The options this image was opened with
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Whether the embedded document has already been looked up
    pub fn is_loaded(&self) -> bool {
        self.document.is_loaded()
    }

    /// The parsed embedded document, loading it on first access
    pub fn document(&self) -> Option<&XmpDocument> {
        self.document.get_or_load(|| {
            let locator = self.options.locator();
            with_stream(&self.stream, |mut stream| scan_document(&mut stream, &locator))
        })
    }

    /// Star rating, 0-5
    pub fn rating(&self) -> Option<u8> {
        let document = self.document()?;
        fields::rating(
            document,
            self.options.namespaces,
            self.options.fallback_rating,
        )
        .into_option()
    }

    /// Keywords, in document order
    pub fn tags(&self) -> Option<Vec<String>> {
        let document = self.document()?;
        fields::tags(document, self.options.namespaces).into_option()
    }

    /// Title (first language alternative)
    pub fn title(&self) -> Option<String> {
        let document = self.document()?;
        fields::title(document, self.options.namespaces).into_option()
    }

    /// Authors, in document order
    pub fn authors(&self) -> Option<Vec<String>> {
        let document = self.document()?;
        fields::authors(document, self.options.namespaces).into_option()
    }

    /// One field by kind
    pub fn get(&self, kind: FieldKind) -> Option<FieldValue> {
        match kind {
            FieldKind::Rating => self.rating().map(FieldValue::from),
            FieldKind::Tags => self.tags().map(FieldValue::from),
            FieldKind::Title => self.title().map(FieldValue::from),
            FieldKind::Authors => self.authors().map(FieldValue::from),
        }
    }

    /// All four fields
    pub fn metadata(&self) -> ImageMetadata {
        ImageMetadata {
            rating: self.rating(),
            tags: self.tags(),
            title: self.title(),
            authors: self.authors(),
        }
    }
}

impl std::fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFile")
            .field("path", &self.path)
            .field("options", &self.options)
            .field("loaded", &self.is_loaded())
            .finish_non_exhaustive()
    }
}
