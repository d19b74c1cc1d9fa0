//! Parser capability
//!
//! A parser turns the text of one source file into events recorded in the
//! [`EventModel`]. The grammar is up to the implementation; the scanner only
//! relies on this trait.

use crate::model::EventModel;
use crate::types::Result;
use std::path::Path;

pub mod annotation;

pub use annotation::AnnotationParser;

/// What the scanner should do after a file has been parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFlow {
    /// Keep scanning
    Continue,
    /// End the scan now, without error
    Stop,
}

/// Common trait for all event declaration parsers
pub trait EventParser {
    /// Parse one file, recording every event found into `model`
    ///
    /// `content` is empty when the file could not be read. A returned error
    /// aborts the scan.
    fn parse(&mut self, content: &str, path: &Path, model: &mut EventModel) -> Result<ParseFlow>;
}

impl<F> EventParser for F
where
    F: FnMut(&str, &Path, &mut EventModel) -> Result<ParseFlow>,
{
    fn parse(&mut self, content: &str, path: &Path, model: &mut EventModel) -> Result<ParseFlow> {
        self(content, path, model)
    }
}
