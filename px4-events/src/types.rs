//! Core types for the event metadata library
//!
//! This module defines the event records produced by parsers and the error
//! type shared by every stage of the pipeline (walk, read, parse, emit).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Result type for library operations
pub type Result<T> = std::result::Result<T, EventsError>;

/// A single positional event argument: `(type, name)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    /// Argument type as written in the source (e.g. "uint8")
    #[serde(rename = "type")]
    pub arg_type: String,
    /// Argument name
    pub name: String,
}

impl Argument {
    pub fn new(arg_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            arg_type: arg_type.into(),
            name: name.into(),
        }
    }
}

/// One discovered event declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Identifier, unique within its group by convention only
    pub name: String,
    /// Numeric identifier; must be unique within the owning group
    pub sub_id: u32,
    /// Human-readable message
    pub message: String,
    /// Optional classification
    pub event_type: Option<String>,
    /// Optional long description
    pub description: Option<String>,
    /// Positional arguments, order is significant
    pub arguments: Vec<Argument>,
}

impl Event {
    /// Create an event with only the required fields set
    pub fn new(sub_id: u32, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sub_id,
            message: message.into(),
            event_type: None,
            description: None,
            arguments: Vec::new(),
        }
    }

    /// Builder method: set the classification
    pub fn with_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    /// Builder method: set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method: append an argument
    pub fn with_argument(mut self, arg_type: impl Into<String>, name: impl Into<String>) -> Self {
        self.arguments.push(Argument::new(arg_type, name));
        self
    }
}

/// A malformed event declaration, as reported by a parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line of the offending construct (0 when unknown)
    pub line: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(f, "line {}: {}", self.line, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors that can occur while scanning sources or emitting the JSON output
#[derive(Debug, thiserror::Error)]
pub enum EventsError {
    #[error("No input paths given")]
    NoInputs,

    #[error("Failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory traversal failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Malformed event declaration: {0}")]
    Syntax(#[from] ParseError),

    #[error("Exception while parsing file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<EventsError>,
    },

    #[error(
        "Duplicate event ID {sub_id} in group '{group}' for {name} (message: '{message}'), \
         other event message: '{existing_message}'"
    )]
    DuplicateEventId {
        group: String,
        sub_id: u32,
        name: String,
        message: String,
        existing_name: String,
        existing_message: String,
    },

    #[error("Failed to serialize events JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
