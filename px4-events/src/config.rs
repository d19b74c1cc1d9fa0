//! Scanner configuration types
//!
//! Minimal configuration needed by the library. Output location and logging
//! are decided by the application layer.

use serde::{Deserialize, Serialize};

/// Default extension of files searched for event declarations
pub const DEFAULT_EXTENSION: &str = ".cpp";

/// Configuration for the source scanner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// File name suffixes eligible when walking a directory (e.g. ".cpp").
    /// Files passed directly as roots bypass this filter.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    vec![DEFAULT_EXTENSION.to_string()]
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

impl ScanConfig {
    /// Create a new scan configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: add an extension to the allowed set
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = normalize_extension(extension.into());
        if !self.extensions.contains(&extension) {
            self.extensions.push(extension);
        }
        self
    }

    /// Builder method: replace the allowed extensions
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| normalize_extension(ext.into()))
            .collect();
        self
    }

    /// Check whether a file name ends with one of the allowed extensions
    pub fn matches_file_name(&self, file_name: &str) -> bool {
        self.extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
    }
}

/// "cpp" and ".cpp" both mean the `.cpp` suffix
fn normalize_extension(extension: String) -> String {
    if extension.starts_with('.') {
        extension
    } else {
        format!(".{extension}")
    }
}
