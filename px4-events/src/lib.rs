//! PX4 Events Metadata Library
//!
//! Extracts event declarations embedded in source files and compiles them
//! into a single versioned JSON description used by documentation generators
//! and ground stations to decode events.
//!
//! # Architecture
//!
//! The pipeline has three stages:
//! - Discover and read source files ([`SourceScanner`]); unreadable files are
//!   reported and parsed as empty, they never abort a run
//! - Parse each file into the [`EventModel`] through an [`EventParser`];
//!   malformed declarations and duplicate ids abort the run
//! - Serialize the model ([`JsonOutput`]), writing the file only when its
//!   content changes
//!
//! The library does NOT:
//! - Validate event semantics at runtime
//! - Keep any state between runs (every run is a full rescan)
//!
//! Argument handling and logging setup live in the application layer
//! (px4-events-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use px4_events::{AnnotationParser, EventModel, JsonOutput, ScanConfig, SourceScanner};
//! use std::path::{Path, PathBuf};
//!
//! let scanner = SourceScanner::with_config(ScanConfig::new().with_extension(".hpp"));
//! let mut model = EventModel::new();
//! scanner
//!     .scan(&[PathBuf::from("src/modules")], &mut AnnotationParser::new(), &mut model)
//!     .unwrap();
//!
//! JsonOutput::new(&model).save(Path::new("build/events/all_events.json")).unwrap();
//! ```

// Public modules
pub mod config;
pub mod json_output;
pub mod model;
pub mod parser;
pub mod scanner;
pub mod source;
pub mod types;

// Re-export main types for convenience
pub use config::ScanConfig;
pub use json_output::{EventsDocument, JsonOutput, SaveOutcome};
pub use model::{EventGroup, EventModel, ModelStats};
pub use parser::{AnnotationParser, EventParser, ParseFlow};
pub use scanner::{ScanSummary, SourceScanner};
pub use types::{Argument, Event, EventsError, ParseError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: an empty model serializes to an empty component
        let output = JsonOutput::new(&EventModel::new());
        let value = output.to_value().unwrap();
        assert_eq!(value["version"], 2);
        assert_eq!(value["components"]["1"]["namespace"], "px4");
    }
}
