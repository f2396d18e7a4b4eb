use crate::{command::Command, event::EventPayload, id::IdKind};
use std::fmt;
use thiserror::Error;

/// Lifecycle phase of an aggregate instance, derived from whether prior
/// state exists. Determines which rejection and emission rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Construction,
    Update,
}

impl Phase {
    pub fn of<T>(state: Option<&T>) -> Self {
        match state {
            None => Phase::Construction,
            Some(_) => Phase::Update,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Construction => f.write_str("construction"),
            Phase::Update => f.write_str("update"),
        }
    }
}

/// Why a command was refused. A business outcome, surfaced to the caller
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionReason(String);

impl RejectionReason {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RejectionReason {
    fn from(reason: &str) -> Self {
        Self::new(reason)
    }
}

/// The event drafts one emission rule produces, as a single event or a
/// set of events. The engine folds either shape in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Emit<E> {
    One(E),
    Many(Vec<E>),
}

impl<E> Emit<E> {
    pub fn one(event: E) -> Self {
        Emit::One(event)
    }

    pub fn many(events: Vec<E>) -> Self {
        Emit::Many(events)
    }

    pub fn into_drafts(self) -> Vec<E> {
        match self {
            Emit::One(event) => vec![event],
            Emit::Many(events) => events,
        }
    }
}

impl<E> From<E> for Emit<E> {
    fn from(event: E) -> Self {
        Emit::One(event)
    }
}

impl<E> From<Vec<E>> for Emit<E> {
    fn from(events: Vec<E>) -> Self {
        Emit::Many(events)
    }
}

/// An event presented to `fold` in the wrong phase. A defect in the caller
/// or the rule tables, so folding fails fast instead of no-opping.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FoldError {
    #[error("update event {event_type} folded over absent state")]
    AbsentState { event_type: &'static str },
    #[error("construction event {event_type} folded over present state")]
    PresentState { event_type: &'static str },
}

/// The behavior of one aggregate type, implemented on its state type.
///
/// All three functions are pure. `None` state routes to construction rules,
/// `Some` to update rules.
pub trait Behavior: Sized + Clone + fmt::Debug + Send + Sync + 'static {
    /// Aggregate type name; becomes the type tag on every stamped event.
    const TYPE: &'static str;

    type Kind: IdKind;
    type Command: Command<Kind = Self::Kind>;
    type Event: EventPayload;

    /// Decides whether the command must fail before any event is produced.
    /// Rejection is opt-in per command variant; the default accepts
    /// everything.
    fn reject(state: Option<&Self>, command: &Self::Command) -> Option<RejectionReason> {
        let _ = (state, command);
        None
    }

    /// Maps an accepted command to its event drafts. `None` means no rule
    /// covers this command in the current phase; the engine surfaces that as
    /// an unhandled-command failure.
    fn emit(state: Option<&Self>, command: &Self::Command) -> Option<Emit<Self::Event>>;

    /// Applies one event to prior state. Construction events require absent
    /// input, update events require present input. Deterministic: replaying
    /// the same events reproduces the same state.
    fn fold(state: Option<Self>, event: &Self::Event) -> Result<Self, FoldError>;

    /// Left fold of an event sequence, in the order produced. Empty input
    /// leaves the state as given.
    fn fold_all<'a, I>(state: Option<Self>, events: I) -> Result<Option<Self>, FoldError>
    where
        I: IntoIterator<Item = &'a Self::Event>,
    {
        let mut state = state;
        for event in events {
            state = Some(Self::fold(state.take(), event)?);
        }
        Ok(state)
    }
}
