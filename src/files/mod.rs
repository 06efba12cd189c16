//! Image file support
//!
//! This module provides the per-image holder used by indexing hosts.
//! The fragment locator does not depend on the container format, so a
//! single type serves JPEG, TIFF, PNG, WebP and any other file that
//! embeds its packet as plain text.

pub mod file;
pub mod handler;

pub use file::{ImageFile, ImageStream};
pub use handler::ScanOptions;
