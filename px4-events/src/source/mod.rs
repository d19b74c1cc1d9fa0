//! Source discovery and reading
//!
//! The walker turns root paths into the list of candidate files, the reader
//! turns each candidate into text. Reading is tolerant: a file that cannot be
//! decoded is handed on as empty content.

pub mod reader;
pub mod walker;

// Re-export source types
pub use reader::{read_source, read_utf8, SourceFile};
pub use walker::SourceWalker;
