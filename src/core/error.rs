//! Error types for XMP extraction
//!
//! Only invalid arguments ever reach the caller of the public field
//! accessors. Everything else in this enum is produced internally and
//! degraded to "field not present" by the field extractors.

use thiserror::Error;

/// Error types for XMP operations
#[derive(Debug, Error)]
pub enum XmpError {
    /// Bad parameter provided to a function
    #[error("Bad parameter: {0}")]
    BadParam(String),

    /// Bad value (e.g., a rating that is not an integer)
    #[error("Bad value: {0}")]
    BadValue(String),

    /// Bad XPath expression
    #[error("Bad XPath: {0}")]
    BadXPath(String),

    /// Parse error (XML/RDF parsing failed)
    #[error("Parse error: {0}")]
    ParseError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for XMP operations
pub type XmpResult<T> = Result<T, XmpError>;
