//! JSON output
//!
//! Projects an [`EventModel`] onto the versioned events document and writes
//! it to disk. The file is only rewritten when its content would change, so
//! build systems keyed on timestamps do not see spurious updates.
//!
//! Maps are ordered (groups by name, events by numeric `sub_id`) and optional
//! fields are skipped when absent, so serializing an unchanged model always
//! yields the same bytes.

use crate::model::{EventGroup, EventModel};
use crate::types::{Argument, Event, EventsError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Document format version
pub const FORMAT_VERSION: u32 = 2;

/// Id of the single component in the document
pub const COMPONENT_ID: u32 = 1;

/// Namespace of the single component in the document
pub const NAMESPACE: &str = "px4";

/// Top level of the events document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsDocument {
    pub version: u32,
    pub components: BTreeMap<u32, ComponentJson>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentJson {
    pub namespace: String,
    pub event_groups: BTreeMap<String, EventGroupJson>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventGroupJson {
    pub events: BTreeMap<u32, EventJson>,
}

/// One event as written to the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventJson {
    pub name: String,
    pub message: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<Argument>,
}

impl From<&Event> for EventJson {
    fn from(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            message: event.message.clone(),
            event_type: event.event_type.clone(),
            description: event.description.clone(),
            arguments: event.arguments.clone(),
        }
    }
}

impl From<&EventGroup> for EventGroupJson {
    fn from(group: &EventGroup) -> Self {
        Self {
            events: group
                .events()
                .map(|event| (event.sub_id, EventJson::from(event)))
                .collect(),
        }
    }
}

/// Result of [`JsonOutput::save`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The file was created or replaced
    Written,
    /// The existing file already held the same document and was left untouched
    Unchanged,
}

/// Serializer for a finished event model
#[derive(Debug, Clone)]
pub struct JsonOutput {
    document: EventsDocument,
}

impl JsonOutput {
    /// Build the document for a model
    pub fn new(model: &EventModel) -> Self {
        let event_groups = model
            .groups()
            .map(|(name, group)| (name.to_string(), EventGroupJson::from(group)))
            .collect();

        let component = ComponentJson {
            namespace: NAMESPACE.to_string(),
            event_groups,
        };

        Self {
            document: EventsDocument {
                version: FORMAT_VERSION,
                components: BTreeMap::from([(COMPONENT_ID, component)]),
            },
        }
    }

    pub fn document(&self) -> &EventsDocument {
        &self.document
    }

    /// The document as a generic JSON value
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(&self.document)?)
    }

    /// The document as pretty-printed JSON (two-space indent, no trailing newline)
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.document)?)
    }

    /// Write the document to `path` unless it already holds the same content
    ///
    /// An existing file that cannot be read or is not valid JSON is treated
    /// as absent and overwritten.
    pub fn save(&self, path: &Path) -> Result<SaveOutcome> {
        if path.is_file() {
            let current = self.to_value()?;
            match read_existing(path) {
                Ok(existing) if existing == current => {
                    log::info!("Output unchanged, not writing: {:?}", path);
                    return Ok(SaveOutcome::Unchanged);
                }
                Ok(_) => log::debug!("Output content changed: {:?}", path),
                Err(e) => log::warn!("Existing output is not a valid document, rewriting: {}", e),
            }
        }

        let text = self.to_json_string()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| EventsError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, text).map_err(|source| EventsError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("Wrote events JSON: {:?}", path);
        Ok(SaveOutcome::Written)
    }
}

fn read_existing(path: &Path) -> Result<Value> {
    let bytes = fs::read(path).map_err(|source| EventsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nav_model() -> EventModel {
        let mut model = EventModel::new();
        model
            .add_event(
                "nav",
                Event::new(1, "wp_reached", "Waypoint reached").with_argument("uint8", "index"),
            )
            .unwrap();
        model
    }

    #[test]
    fn test_empty_model_document() {
        let output = JsonOutput::new(&EventModel::new());
        assert_eq!(
            output.to_json_string().unwrap(),
            "{\n  \"version\": 2,\n  \"components\": {\n    \"1\": {\n      \"namespace\": \"px4\",\n      \"event_groups\": {}\n    }\n  }\n}"
        );
    }

    #[test]
    fn test_event_projection() {
        let value = JsonOutput::new(&nav_model()).to_value().unwrap();
        assert_eq!(
            value["components"]["1"]["event_groups"]["nav"]["events"]["1"],
            json!({
                "name": "wp_reached",
                "message": "Waypoint reached",
                "arguments": [{"type": "uint8", "name": "index"}]
            })
        );
    }

    #[test]
    fn test_optional_fields_omitted() {
        let mut model = EventModel::new();
        model.add_event("g", Event::new(9, "bare", "Bare event")).unwrap();

        let value = JsonOutput::new(&model).to_value().unwrap();
        let event = value["components"]["1"]["event_groups"]["g"]["events"]["9"]
            .as_object()
            .unwrap();
        let keys: Vec<&str> = event.keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 2);
        assert!(event.contains_key("name"));
        assert!(event.contains_key("message"));
    }

    #[test]
    fn test_all_fields_and_field_order() {
        let mut model = EventModel::new();
        model
            .add_event(
                "g",
                Event::new(2, "full", "Full event")
                    .with_type("error")
                    .with_description("Details")
                    .with_argument("int", "a")
                    .with_argument("float", "b"),
            )
            .unwrap();

        let text = JsonOutput::new(&model).to_json_string().unwrap();
        let name = text.find("\"name\": \"full\"").unwrap();
        let message = text.find("\"message\"").unwrap();
        let kind = text.find("\"type\": \"error\"").unwrap();
        let description = text.find("\"description\"").unwrap();
        let arguments = text.find("\"arguments\"").unwrap();
        assert!(name < message && message < kind && kind < description && description < arguments);

        let arg_a = text.find("\"name\": \"a\"").unwrap();
        let arg_b = text.find("\"name\": \"b\"").unwrap();
        assert!(arg_a < arg_b);
    }

    #[test]
    fn test_argument_order_preserved() {
        let mut model = EventModel::new();
        model
            .add_event(
                "g",
                Event::new(1, "e", "E")
                    .with_argument("int", "z")
                    .with_argument("float", "a"),
            )
            .unwrap();

        let value = JsonOutput::new(&model).to_value().unwrap();
        assert_eq!(
            value["components"]["1"]["event_groups"]["g"]["events"]["1"]["arguments"],
            json!([{"type": "int", "name": "z"}, {"type": "float", "name": "a"}])
        );
    }

    #[test]
    fn test_event_keys_in_numeric_order() {
        let mut model = EventModel::new();
        for id in [10, 2, 1] {
            model.add_event("g", Event::new(id, format!("e{id}"), "m")).unwrap();
        }
        let text = JsonOutput::new(&model).to_json_string().unwrap();
        let one = text.find("\"e1\"").unwrap();
        let two = text.find("\"e2\"").unwrap();
        let ten = text.find("\"e10\"").unwrap();
        assert!(one < two && two < ten);
    }

    #[test]
    fn test_serialization_is_stable() {
        let model = nav_model();
        let first = JsonOutput::new(&model).to_json_string().unwrap();
        let second = JsonOutput::new(&model).to_json_string().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_document_round_trip() {
        let output = JsonOutput::new(&nav_model());
        let parsed: EventsDocument = serde_json::from_str(&output.to_json_string().unwrap()).unwrap();
        assert_eq!(&parsed, output.document());
    }

    #[test]
    fn test_save_skips_identical_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        let output = JsonOutput::new(&nav_model());

        assert_eq!(output.save(&path).unwrap(), SaveOutcome::Written);
        let written = fs::read_to_string(&path).unwrap();
        let modified = fs::metadata(&path).unwrap().modified().unwrap();

        assert_eq!(output.save(&path).unwrap(), SaveOutcome::Unchanged);
        assert_eq!(fs::read_to_string(&path).unwrap(), written);
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), modified);
    }

    #[test]
    fn test_save_compares_structure_not_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        let output = JsonOutput::new(&nav_model());

        // Same document, different formatting
        let compact = serde_json::to_string(output.document()).unwrap();
        fs::write(&path, &compact).unwrap();

        assert_eq!(output.save(&path).unwrap(), SaveOutcome::Unchanged);
        assert_eq!(fs::read_to_string(&path).unwrap(), compact);
    }

    #[test]
    fn test_save_rewrites_changed_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        JsonOutput::new(&EventModel::new()).save(&path).unwrap();

        let output = JsonOutput::new(&nav_model());
        assert_eq!(output.save(&path).unwrap(), SaveOutcome::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), output.to_json_string().unwrap());
    }

    #[test]
    fn test_save_rewrites_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        fs::write(&path, "{ not json").unwrap();

        let output = JsonOutput::new(&nav_model());
        assert_eq!(output.save(&path).unwrap(), SaveOutcome::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), output.to_json_string().unwrap());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build/generated/events.json");

        assert_eq!(JsonOutput::new(&nav_model()).save(&path).unwrap(), SaveOutcome::Written);
        assert!(path.is_file());
    }
}
