//! Embedded XMP fragment locator
//!
//! Image files carry their XMP packet somewhere inside otherwise binary
//! data. The locator finds it without knowing anything about the
//! container format: it streams the file once, byte by byte, looking for
//! the literal `<rdf:RDF` start marker and then for the first following
//! `</rdf:RDF>` end marker. Only the fragment itself is held in memory.

use crate::core::error::XmpResult;
use std::io::{BufReader, Read, Seek, SeekFrom};

/// Literal marker opening the fragment
pub const START_MARKER: &[u8] = b"<rdf:RDF";
/// Literal marker closing the fragment
pub const END_MARKER: &[u8] = b"</rdf:RDF>";

/// The located `<rdf:RDF ...>...</rdf:RDF>` text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFragment(String);

impl RawFragment {
    /// The fragment text, markers included
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the fragment and return its text
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Streaming scanner for the embedded fragment
///
/// The scanner has two phases. While scanning, bytes are accumulated
/// from the first `<` until the buffer is as long as [`START_MARKER`];
/// a mismatch then discards the whole buffer and waits for the next `<`.
/// While collecting, every byte is kept and the buffer is checked for
/// [`END_MARKER`] each time a `>` arrives.
///
/// A `<` that falls inside a discarded false start is not reconsidered,
/// so `<rdf:R<rdf:RDF` does not match at either `<`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FragmentLocator {
    max_len: Option<usize>,
}

impl FragmentLocator {
    /// Create a locator with no limit on the fragment length
    pub fn new() -> Self {
        Self::default()
    }

    /// Give up on a fragment once it grows past `max_len` bytes
    pub fn with_max_len(max_len: Option<usize>) -> Self {
        Self { max_len }
    }

    /// Rewind `stream` and scan it for the first complete fragment
    ///
    /// Returns `Ok(None)` when the stream ends before a complete fragment
    /// was seen, or when the fragment exceeds the configured limit.
    pub fn locate<R: Read + Seek>(&self, stream: &mut R) -> XmpResult<Option<RawFragment>> {
        stream.seek(SeekFrom::Start(0))?;
        let reader = BufReader::new(stream);

        let mut buf: Vec<u8> = Vec::new();
        let mut collecting = false;

        for byte in reader.bytes() {
            let byte = byte?;

            if collecting {
                buf.push(byte);
                if byte == b'>' && buf.ends_with(END_MARKER) {
                    return Ok(Some(RawFragment(String::from_utf8_lossy(&buf).into_owned())));
                }
                if let Some(max) = self.max_len.filter(|max| buf.len() > *max) {
                    log::debug!("XMP fragment exceeds {} bytes, giving up", max);
                    return Ok(None);
                }
                continue;
            }

            if buf.is_empty() && byte != b'<' {
                continue;
            }
            buf.push(byte);
            if buf.len() == START_MARKER.len() {
                if buf == START_MARKER {
                    collecting = true;
                } else {
                    buf.clear();
                }
            }
        }

        Ok(None)
    }
}

/// Scan `stream` for the first fragment with no length limit
pub fn locate_fragment<R: Read + Seek>(stream: &mut R) -> XmpResult<Option<RawFragment>> {
    FragmentLocator::new().locate(stream)
}
