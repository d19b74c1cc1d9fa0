//! Source file reading
//!
//! Unreadable files are common in a source tree (stray binaries, legacy
//! encodings) and must not stop a scan, so [`read_source`] never fails.

use crate::types::{EventsError, Result};
use std::fs;
use std::path::Path;

/// Decoded text of a candidate file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// UTF-8 content, empty when the file could not be read
    pub content: String,
    /// False when the content was substituted because the read failed
    pub readable: bool,
}

/// Read a file as UTF-8, failing on I/O or decoding errors
pub fn read_utf8(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| EventsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a file as UTF-8, substituting empty content on failure
pub fn read_source(path: &Path) -> SourceFile {
    match read_utf8(path) {
        Ok(content) => SourceFile {
            content,
            readable: true,
        },
        Err(e) => {
            log::warn!("Failed reading file: {:?}, skipping content ({})", path, e);
            SourceFile {
                content: String::new(),
                readable: false,
            }
        }
    }
}
