//! Namespace bindings for XMP queries
//!
//! Field queries are written with short prefixes (`rdf:Description`,
//! `dc:subject`, ...). Those prefixes are resolved through a fixed
//! [`NamespaceMap`] rather than through whatever prefixes a particular
//! packet happens to declare, so `xmp:Rating` and `xap:Rating` in a file
//! both match a `xap:Rating` query.

use crate::core::error::{XmpError, XmpResult};
use std::collections::HashMap;
use std::sync::OnceLock;

static BINDINGS: OnceLock<NamespaceMap> = OnceLock::new();

/// Namespaces used by the field queries
pub mod ns {
    /// RDF namespace
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// EXIF namespace
    pub const EXIF: &str = "http://ns.adobe.com/exif/1.0/";
    /// Adobe meta namespace (`x:xmpmeta`)
    pub const X: &str = "adobe:ns:meta/";
    /// XMP Basic namespace
    pub const XAP: &str = "http://ns.adobe.com/xap/1.0/";
    /// TIFF namespace
    pub const TIFF: &str = "http://ns.adobe.com/tiff/1.0/";
    /// Dublin Core namespace
    pub const DC: &str = "http://purl.org/dc/elements/1.1/";
    /// Windows Photo Gallery namespace
    pub const MICROSOFT_PHOTO: &str = "http://ns.microsoft.com/photo/1.0/";
    /// XML namespace (for xml:lang, etc.)
    pub const XML: &str = "http://www.w3.org/XML/1998/namespace";
    /// RDF prefix
    pub const RDF_PREFIX: &str = "rdf";
    /// EXIF prefix
    pub const EXIF_PREFIX: &str = "exif";
    /// Adobe meta prefix
    pub const X_PREFIX: &str = "x";
    /// XMP Basic prefix
    pub const XAP_PREFIX: &str = "xap";
    /// TIFF prefix
    pub const TIFF_PREFIX: &str = "tiff";
    /// Dublin Core prefix
    pub const DC_PREFIX: &str = "dc";
    /// Windows Photo Gallery prefix
    pub const MICROSOFT_PHOTO_PREFIX: &str = "MicrosoftPhoto";
    /// XML prefix
    pub const XML_PREFIX: &str = "xml";
}

/// Map of namespace prefix to URI
#[derive(Debug, Clone, Default)]
pub struct NamespaceMap {
    prefix_to_uri: HashMap<String, String>,
}

impl NamespaceMap {
    /// Create a new namespace map with the query namespaces registered
    pub fn new() -> Self {
        let mut map = Self::default();
        for (uri, prefix) in BUILTIN {
            map.prefix_to_uri.insert(prefix.to_string(), uri.to_string());
        }
        map
    }

    /// The process-wide bindings used by the field extractors
    ///
    /// Built on first use and never modified afterwards.
    pub fn bindings() -> &'static NamespaceMap {
        BINDINGS.get_or_init(NamespaceMap::new)
    }

    /// Register a namespace URI with a prefix
    ///
    /// Returns an error if the prefix is already registered to a different URI
    pub fn register(&mut self, uri: &str, prefix: &str) -> XmpResult<()> {
        if uri.is_empty() {
            return Err(XmpError::BadParam("URI cannot be empty".to_string()));
        }
        if prefix.is_empty() {
            return Err(XmpError::BadParam("Prefix cannot be empty".to_string()));
        }
        if let Some(existing_uri) = self.prefix_to_uri.get(prefix) {
            if existing_uri != uri {
                return Err(XmpError::BadParam(format!(
                    "Prefix '{}' is already registered to '{}'",
                    prefix, existing_uri
                )));
            }
            return Ok(());
        }

        self.prefix_to_uri.insert(prefix.to_string(), uri.to_string());
        Ok(())
    }

    /// Get the URI for a namespace prefix
    pub fn get_uri(&self, prefix: &str) -> Option<&str> {
        self.prefix_to_uri.get(prefix).map(|s| s.as_str())
    }

    /// Resolve a `prefix:local` name to `(uri, local)`
    pub fn resolve<'a>(&'a self, qname: &'a str) -> XmpResult<(&'a str, &'a str)> {
        let Some((prefix, local)) = qname.split_once(':') else {
            return Err(XmpError::BadXPath(format!(
                "Name '{}' has no namespace prefix",
                qname
            )));
        };
        let uri = self.get_uri(prefix).ok_or_else(|| {
            XmpError::BadXPath(format!("Unknown namespace prefix '{}'", prefix))
        })?;
        Ok((uri, local))
    }
}

const BUILTIN: [(&str, &str); 8] = [
    (ns::RDF, ns::RDF_PREFIX),
    (ns::EXIF, ns::EXIF_PREFIX),
    (ns::X, ns::X_PREFIX),
    (ns::XAP, ns::XAP_PREFIX),
    (ns::TIFF, ns::TIFF_PREFIX),
    (ns::DC, ns::DC_PREFIX),
    (ns::MICROSOFT_PHOTO, ns::MICROSOFT_PHOTO_PREFIX),
    (ns::XML, ns::XML_PREFIX),
];
