//! Decider is a pure behavior engine for event-sourced aggregates.
//!
//! An aggregate's state is derived solely by folding its own event history.
//! [`Engine::handle`] takes the current state (or none) and a command, runs
//! rejection rules, emission rules, metadata stamping, and folding, and
//! returns the new state with the ordered stamped events.
//!
//! The engine is stateless across calls and performs no I/O. The caller
//! supplies the prior state before each call and persists the returned
//! events and state afterwards.
//!
//! Aggregate authors implement [`Behavior`] on their state type. The
//! [`harness`] module provides a Given-When-Then harness for testing
//! behaviors.

pub mod behavior;
pub mod command;
pub mod engine;
pub mod event;
pub mod harness;
pub mod id;
pub mod message;
pub mod metadata;

pub use behavior::{Behavior, Emit, FoldError, Phase, RejectionReason};
pub use command::{Command, CommandId, CommandIdKind};
pub use engine::{CommandFailure, Engine, Outcome};
pub use event::{Event, EventId, EventIdKind, EventPayload};
pub use harness::TestHarness;
pub use id::{Id, IdError, IdKind};
pub use message::Message;
pub use metadata::{Metadata, Tag};
