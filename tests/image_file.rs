//! Tests for the ImageFile API
//!
//! These tests run the whole pipeline over synthetic image bytes.

#[path = "fixtures/mod.rs"]
mod fixtures;

use fixtures::{fragment, jpeg_with, CountingStream, FULL_PACKET};
use pretty_assertions::assert_eq;
use std::sync::atomic::Ordering;
use xmpscan::{FieldKind, FieldValue, ImageFile, ImageMetadata, ScanOptions, XmpError};

#[test]
fn reads_all_fields() {
    let image = ImageFile::from_bytes(jpeg_with(FULL_PACKET));
    assert_eq!(
        image.metadata(),
        ImageMetadata {
            rating: Some(4),
            tags: Some(vec![
                "sea".to_string(),
                "coast".to_string(),
                "Tom & Jerry".to_string()
            ]),
            title: Some("Lighthouse at dusk".to_string()),
            authors: Some(vec!["Jane Doe".to_string(), "Ann Example".to_string()]),
        }
    );
}

#[test]
fn no_packet_means_no_fields() {
    let image = ImageFile::from_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0, b'<', b'a', 0xFF, 0xD9]);
    assert!(image.metadata().is_empty());
    assert!(image.document().is_none());
    for kind in FieldKind::ALL {
        assert_eq!(image.get(kind), None);
    }
}

#[test]
fn trailing_bytes_do_not_matter() {
    let packet = fragment(r#" xap:Rating="2"/>"#);
    let mut a = jpeg_with(&packet);
    let mut b = a.clone();
    a.extend_from_slice(b"</rdf:RDF> junk <rdf:RDF>");
    b.extend_from_slice(&[0u8; 4096]);
    assert_eq!(ImageFile::from_bytes(a).rating(), Some(2));
    assert_eq!(ImageFile::from_bytes(b).rating(), Some(2));
}

#[test]
fn document_is_loaded_once() {
    let (stream, rewinds) = CountingStream::new(jpeg_with(FULL_PACKET));
    let image = ImageFile::from_reader(stream);

    assert_eq!(rewinds.load(Ordering::SeqCst), 0);
    let first = image.metadata();
    assert_eq!(rewinds.load(Ordering::SeqCst), 1);

    assert_eq!(image.rating(), Some(4));
    assert_eq!(image.tags(), first.tags);
    assert_eq!(image.metadata(), first);
    assert_eq!(rewinds.load(Ordering::SeqCst), 1);
}

#[test]
fn failed_parse_is_not_retried() {
    let (stream, rewinds) =
        CountingStream::new(jpeg_with("<rdf:RDF><rdf:Bag></rdf:Seq></rdf:RDF>"));
    let image = ImageFile::from_reader(stream);
    assert_eq!(image.title(), None);
    assert_eq!(image.tags(), None);
    assert_eq!(image.rating(), None);
    assert_eq!(image.authors(), None);
    assert!(image.is_loaded());
    assert_eq!(rewinds.load(Ordering::SeqCst), 1);
}

#[test]
fn microsoft_rating_fallback() {
    let cases = [("80", Some(4)), ("79", Some(3)), ("100", Some(5)), ("abc", None)];
    for (percent, expected) in cases {
        let packet = fragment(&format!(r#" MicrosoftPhoto:Rating="{}"/>"#, percent));
        let image = ImageFile::from_bytes(jpeg_with(&packet));
        assert_eq!(image.rating(), expected, "MicrosoftPhoto:Rating={}", percent);
    }

    let packet = fragment(r#" MicrosoftPhoto:Rating="80"/>"#);
    let options = ScanOptions::default().fallback_rating(false);
    let image = ImageFile::from_bytes_with(jpeg_with(&packet), options);
    assert_eq!(image.rating(), None);
}

#[test]
fn list_order_is_preserved() {
    let packet = fragment(
        "><dc:subject><rdf:Bag><rdf:li>b</rdf:li><rdf:li>a</rdf:li><rdf:li>c</rdf:li></rdf:Bag></dc:subject>\
         <dc:creator><rdf:Seq><rdf:li>z</rdf:li><rdf:li>y</rdf:li></rdf:Seq></dc:creator></rdf:Description>",
    );
    let image = ImageFile::from_bytes(jpeg_with(&packet));
    assert_eq!(
        image.get(FieldKind::Tags),
        Some(FieldValue::List(vec![
            "b".to_string(),
            "a".to_string(),
            "c".to_string()
        ]))
    );
    assert_eq!(image.authors(), Some(vec!["z".to_string(), "y".to_string()]));
}

#[test]
fn malformed_rating_does_not_hide_other_fields() {
    let packet = fragment(
        "><xap:Rating>lots</xap:Rating>\
         <dc:title><rdf:Alt><rdf:li>Kept</rdf:li></rdf:Alt></dc:title></rdf:Description>",
    );
    let image = ImageFile::from_bytes(jpeg_with(&packet));
    assert_eq!(image.rating(), None);
    assert_eq!(image.title(), Some("Kept".to_string()));
}

#[test]
fn later_descriptions_do_not_fill_empty_containers() {
    let packet = fragment(
        "><dc:subject><rdf:Bag/></dc:subject><dc:title><rdf:Alt/></dc:title></rdf:Description>\
         <rdf:Description><dc:subject><rdf:Bag><rdf:li>x</rdf:li></rdf:Bag></dc:subject>\
         <dc:title><rdf:Alt><rdf:li>Second</rdf:li></rdf:Alt></dc:title></rdf:Description>\
         <rdf:Description><dc:subject><rdf:Bag><rdf:li>y</rdf:li></rdf:Bag></dc:subject></rdf:Description>",
    );
    let image = ImageFile::from_bytes(jpeg_with(&packet));
    assert_eq!(image.tags(), Some(Vec::new()));
    assert_eq!(image.title(), None);
}

#[cfg(not(target_arch = "wasm32"))]
mod native_tests {
    use super::fixtures::{jpeg_with, FULL_PACKET};
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use xmpscan::{ImageFile, XmpError};

    #[test]
    fn open_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&jpeg_with(FULL_PACKET)).unwrap();
        file.flush().unwrap();

        let image = ImageFile::open(file.path()).unwrap();
        assert_eq!(image.path(), Some(file.path()));
        assert_eq!(image.title(), Some("Lighthouse at dusk".to_string()));
    }

    #[test]
    fn file_not_found() {
        let result = ImageFile::open("doesnotexist.jpg");
        assert!(matches!(result, Err(XmpError::IoError(_))));
    }

    #[test]
    fn empty_path() {
        assert!(matches!(ImageFile::open(""), Err(XmpError::BadParam(_))));
    }
}
