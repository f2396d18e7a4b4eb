use crate::{
    command::CommandId,
    event::{Event, EventId, EventPayload},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt};

/// Routing label attached to an event, e.g. the aggregate type or a
/// dependent-view stream. Opaque to the engine: it is attached, never read.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Tag {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// Provenance and routing information attached to every stamped event.
///
/// `aggregate_id` is the rendered string form so metadata stays uniform
/// across aggregate types at the storage and routing boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub aggregate_id: String,
    pub command_id: CommandId,
    pub event_id: EventId,
    pub recorded_at: DateTime<Utc>,
    pub tags: BTreeSet<Tag>,
}

/// Stamps event drafts with metadata for one `handle` invocation.
///
/// Crate-internal: only the engine stamps events, after the rejection rules
/// have passed. Everything except the event id and timestamp is fixed at
/// construction; those two are generated fresh per draft and are the only
/// non-deterministic outputs of the whole engine.
#[derive(Debug, Clone)]
pub(crate) struct Stamper {
    aggregate_id: String,
    command_id: CommandId,
    tags: BTreeSet<Tag>,
}

impl Stamper {
    pub(crate) fn new(aggregate_id: String, command_id: CommandId, tags: BTreeSet<Tag>) -> Self {
        Self {
            aggregate_id,
            command_id,
            tags,
        }
    }

    pub(crate) fn stamp<E: EventPayload>(&self, payload: E) -> Event<E> {
        let metadata = Metadata {
            aggregate_id: self.aggregate_id.clone(),
            command_id: self.command_id,
            event_id: EventId::new(),
            recorded_at: Utc::now(),
            tags: self.tags.clone(),
        };
        Event::new(payload, metadata)
    }
}
