//! Event model
//!
//! Accumulates the events recorded by a parser across every scanned file into
//! named groups. Within a group, events are keyed by `sub_id`, and reusing a
//! `sub_id` is rejected rather than overwritten.

use crate::types::{Event, EventsError, Result};
use std::collections::btree_map::{BTreeMap, Entry};

/// A named bucket of events sharing one `sub_id` namespace
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventGroup {
    events: BTreeMap<u32, Event>,
}

impl EventGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an event by its `sub_id`
    pub fn get(&self, sub_id: u32) -> Option<&Event> {
        self.events.get(&sub_id)
    }

    /// Iterate events in ascending `sub_id` order
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.values()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn insert(&mut self, group: &str, event: Event) -> Result<()> {
        match self.events.entry(event.sub_id) {
            Entry::Occupied(existing) => {
                let existing = existing.get();
                Err(EventsError::DuplicateEventId {
                    group: group.to_string(),
                    sub_id: event.sub_id,
                    name: event.name,
                    message: event.message,
                    existing_name: existing.name.clone(),
                    existing_message: existing.message.clone(),
                })
            }
            Entry::Vacant(slot) => {
                slot.insert(event);
                Ok(())
            }
        }
    }
}

/// The full scan result: group name -> group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventModel {
    groups: BTreeMap<String, EventGroup>,
}

impl EventModel {
    /// Create a new empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event into a group, creating the group on first use
    ///
    /// Fails with [`EventsError::DuplicateEventId`] if the group already holds
    /// an event with the same `sub_id`. The event inserted first is the one
    /// reported as existing.
    pub fn add_event(&mut self, group: &str, event: Event) -> Result<()> {
        log::trace!("Adding event {} ({}) to group '{}'", event.name, event.sub_id, group);

        if let Some(existing) = self.groups.get_mut(group) {
            return existing.insert(group, event);
        }

        let mut new_group = EventGroup::new();
        new_group.insert(group, event)?;
        self.groups.insert(group.to_string(), new_group);
        Ok(())
    }

    /// Get a group by name
    pub fn group(&self, name: &str) -> Option<&EventGroup> {
        self.groups.get(name)
    }

    /// Iterate groups in ascending name order
    pub fn groups(&self) -> impl Iterator<Item = (&str, &EventGroup)> {
        self.groups.iter().map(|(name, group)| (name.as_str(), group))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Get model statistics
    pub fn stats(&self) -> ModelStats {
        ModelStats {
            num_groups: self.groups.len(),
            num_events: self.groups.values().map(EventGroup::len).sum(),
        }
    }
}

/// Model statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModelStats {
    /// Number of distinct groups
    pub num_groups: usize,
    /// Total number of events over all groups
    pub num_events: usize,
}
