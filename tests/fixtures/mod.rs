//! Shared test fixtures
//!
//! Synthetic image files: a few bytes of binary container data around an
//! XMP packet, which is all the fragment locator ever looks at.

#![allow(dead_code)]

use std::io::{Cursor, Read, Seek, SeekFrom};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const FULL_PACKET: &str = r#"<?xpacket begin="" id="W5M0MpCehiHzreSzNTczkc9d"?>
<x:xmpmeta xmlns:x="adobe:ns:meta/">
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description rdf:about=""
      xmlns:xmp="http://ns.adobe.com/xap/1.0/"
      xmlns:MicrosoftPhoto="http://ns.microsoft.com/photo/1.0/"
      MicrosoftPhoto:Rating="20">
    <xmp:Rating>4</xmp:Rating>
  </rdf:Description>
  <rdf:Description rdf:about=""
      xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:title>
      <rdf:Alt>
        <rdf:li xml:lang="x-default">Lighthouse at dusk</rdf:li>
        <rdf:li xml:lang="fr-FR">Phare au crépuscule</rdf:li>
      </rdf:Alt>
    </dc:title>
    <dc:subject>
      <rdf:Bag>
        <rdf:li>sea</rdf:li>
        <rdf:li>coast</rdf:li>
        <rdf:li>Tom &amp; Jerry</rdf:li>
      </rdf:Bag>
    </dc:subject>
    <dc:creator>
      <rdf:Seq>
        <rdf:li>Jane Doe</rdf:li>
        <rdf:li>Ann Example</rdf:li>
      </rdf:Seq>
    </dc:creator>
  </rdf:Description>
</rdf:RDF>
</x:xmpmeta>
<?xpacket end="w"?>"#;

/// Wrap `packet` in JPEG-like binary bytes
pub fn jpeg_with(packet: &str) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE1, 0x01, 0x20];
    data.extend_from_slice(b"http://ns.adobe.com/xap/1.0/\0");
    data.extend_from_slice(packet.as_bytes());
    data.extend_from_slice(&[0xFF, 0xDB, 0x00, 0x43, b'<', b'>', 0x00]);
    data.extend_from_slice(&[0xFF, 0xD9]);
    data
}

/// An `rdf:RDF` fragment holding one description body
pub fn fragment(description: &str) -> String {
    format!(
        r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:xap="http://ns.adobe.com/xap/1.0/"
         xmlns:dc="http://purl.org/dc/elements/1.1/"
         xmlns:MicrosoftPhoto="http://ns.microsoft.com/photo/1.0/">
  <rdf:Description rdf:about=""{}
</rdf:RDF>"#,
        description
    )
}

/// A stream that counts how often it is rewound to the start
pub struct CountingStream {
    inner: Cursor<Vec<u8>>,
    rewinds: Arc<AtomicUsize>,
}

impl CountingStream {
    pub fn new(data: Vec<u8>) -> (Self, Arc<AtomicUsize>) {
        let rewinds = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner: Cursor::new(data),
                rewinds: rewinds.clone(),
            },
            rewinds,
        )
    }
}

impl Read for CountingStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Seek for CountingStream {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        if pos == SeekFrom::Start(0) {
            self.rewinds.fetch_add(1, Ordering::SeqCst);
        }
        self.inner.seek(pos)
    }
}
