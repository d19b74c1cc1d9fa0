//! Comment annotation parser
//!
//! Recognizes event declarations written as blocks of `// @` directives:
//!
//! ```text
//! // @event nav 1 wp_reached
//! // @message Waypoint reached
//! // @type info
//! // @description Emitted when the vehicle reaches a mission item.
//! // @arg uint8 index
//! ```
//!
//! A block starts at an `@event` line and ends at the first line that is not
//! a directive. `@description` may be repeated; its lines are joined with
//! newlines. `@arg` may be repeated and keeps its order.

use crate::model::EventModel;
use crate::parser::{EventParser, ParseFlow};
use crate::types::{Argument, Event, ParseError, Result};
use std::path::Path;

/// Line-oriented parser for `// @event` comment blocks
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationParser;

impl AnnotationParser {
    pub fn new() -> Self {
        Self
    }
}

/// Event block being collected
struct PendingEvent {
    line: usize,
    group: String,
    sub_id: u32,
    name: String,
    message: Option<String>,
    event_type: Option<String>,
    description: Vec<String>,
    arguments: Vec<Argument>,
}

impl PendingEvent {
    fn finish(self, model: &mut EventModel) -> Result<()> {
        let message = self.message.ok_or_else(|| {
            ParseError::new(self.line, format!("event '{}' has no @message", self.name))
        })?;

        let event = Event {
            name: self.name,
            sub_id: self.sub_id,
            message,
            event_type: self.event_type,
            description: if self.description.is_empty() {
                None
            } else {
                Some(self.description.join("\n"))
            },
            arguments: self.arguments,
        };
        model.add_event(&self.group, event)
    }
}

/// Split `// @keyword value` into `(keyword, value)`
fn directive(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim_start().strip_prefix("//")?.trim_start().strip_prefix('@')?;
    let (keyword, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    Some((keyword, value.trim()))
}

fn parse_header(line: usize, value: &str) -> Result<PendingEvent> {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    let [group, sub_id, name] = tokens.as_slice() else {
        return Err(ParseError::new(line, "expected '@event <group> <sub_id> <name>'").into());
    };
    let sub_id = sub_id
        .parse::<u32>()
        .map_err(|_| ParseError::new(line, format!("invalid event id '{sub_id}'")))?;

    Ok(PendingEvent {
        line,
        group: group.to_string(),
        sub_id,
        name: name.to_string(),
        message: None,
        event_type: None,
        description: Vec::new(),
        arguments: Vec::new(),
    })
}

fn set_once(slot: &mut Option<String>, line: usize, keyword: &str, value: &str) -> Result<()> {
    if slot.is_some() {
        return Err(ParseError::new(line, format!("duplicate @{keyword}")).into());
    }
    if value.is_empty() {
        return Err(ParseError::new(line, format!("empty @{keyword}")).into());
    }
    *slot = Some(value.to_string());
    Ok(())
}

impl EventParser for AnnotationParser {
    fn parse(&mut self, content: &str, path: &Path, model: &mut EventModel) -> Result<ParseFlow> {
        let mut pending: Option<PendingEvent> = None;
        let mut found = 0usize;

        for (idx, text) in content.lines().enumerate() {
            let line = idx + 1;

            let Some((keyword, value)) = directive(text) else {
                if let Some(event) = pending.take() {
                    event.finish(model)?;
                    found += 1;
                }
                continue;
            };

            if keyword == "event" {
                if let Some(event) = pending.take() {
                    event.finish(model)?;
                    found += 1;
                }
                pending = Some(parse_header(line, value)?);
                continue;
            }

            let Some(event) = pending.as_mut() else {
                // Other tools use `// @` comments too; only our own keywords are errors here
                if matches!(keyword, "message" | "type" | "description" | "arg") {
                    return Err(
                        ParseError::new(line, format!("@{keyword} outside of an @event block")).into(),
                    );
                }
                continue;
            };

            match keyword {
                "message" => set_once(&mut event.message, line, keyword, value)?,
                "type" => set_once(&mut event.event_type, line, keyword, value)?,
                "description" if value.is_empty() => {}
                "description" => event.description.push(value.to_string()),
                "arg" => {
                    let tokens: Vec<&str> = value.split_whitespace().collect();
                    let [arg_type, name] = tokens.as_slice() else {
                        return Err(ParseError::new(line, "expected '@arg <type> <name>'").into());
                    };
                    event.arguments.push(Argument::new(*arg_type, *name));
                }
                other => {
                    return Err(ParseError::new(line, format!("unknown directive '@{other}'")).into());
                }
            }
        }

        if let Some(event) = pending.take() {
            event.finish(model)?;
            found += 1;
        }

        if found > 0 {
            log::debug!("Found {} event(s) in {:?}", found, path);
        }
        Ok(ParseFlow::Continue)
    }
}
