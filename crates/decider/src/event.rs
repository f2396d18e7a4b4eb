use crate::{
    id::{Id, IdKind},
    message::Message,
    metadata::Metadata,
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventIdKind;

impl IdKind for EventIdKind {
    const PREFIX: &'static str = "evt";
}

/// Unique identity of a stamped event, generated at emission time.
pub type EventId = Id<EventIdKind>;

/// The business payload of an event, before metadata is attached.
///
/// Drafts carry no identity or timestamp: the emission rules that produce
/// them stay deterministic and testable by plain equality.
pub trait EventPayload: Message + fmt::Debug + Clone + Send + Sync + 'static {
    fn event_type(&self) -> &'static str;
}

/// A stamped event: an accepted, immutable fact plus its metadata.
///
/// Only the engine's stamping step constructs these, so every `Event` in
/// existence has passed its aggregate's rejection rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event<E: EventPayload> {
    payload: E,
    metadata: Metadata,
}

impl<E: EventPayload> Event<E> {
    pub(crate) fn new(payload: E, metadata: Metadata) -> Self {
        Self { payload, metadata }
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn event_type(&self) -> &'static str {
        self.payload.event_type()
    }

    pub fn into_parts(self) -> (E, Metadata) {
        (self.payload, self.metadata)
    }
}

impl<E: EventPayload + PartialEq> PartialEq for Event<E> {
    fn eq(&self, other: &Self) -> bool {
        self.payload == other.payload && self.metadata == other.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{command::CommandId, metadata::Stamper};
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeSet;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    enum LampEvent {
        SwitchedOn,
        SwitchedOff,
    }

    impl Message for LampEvent {
        fn name(&self) -> &'static str {
            match self {
                LampEvent::SwitchedOn => "SwitchedOn",
                LampEvent::SwitchedOff => "SwitchedOff",
            }
        }
    }

    impl EventPayload for LampEvent {
        fn event_type(&self) -> &'static str {
            self.name()
        }
    }

    fn stamped(payload: LampEvent) -> Event<LampEvent> {
        Stamper::new("lamp-1".to_string(), CommandId::new(), BTreeSet::new()).stamp(payload)
    }

    #[test]
    fn event_type_comes_from_the_payload() {
        assert_eq!(stamped(LampEvent::SwitchedOn).event_type(), "SwitchedOn");
        assert_eq!(stamped(LampEvent::SwitchedOff).event_type(), "SwitchedOff");
    }

    #[test]
    fn into_parts_returns_payload_and_metadata() {
        let event = stamped(LampEvent::SwitchedOn);
        let event_id = event.metadata().event_id;

        let (payload, metadata) = event.into_parts();
        assert_eq!(payload, LampEvent::SwitchedOn);
        assert_eq!(metadata.event_id, event_id);
    }

    #[test]
    fn stamped_event_serde_round_trip() {
        let event = stamped(LampEvent::SwitchedOff);
        let json = serde_json::to_string(&event).unwrap();
        let back: Event<LampEvent> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
