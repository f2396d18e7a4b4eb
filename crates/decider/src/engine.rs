use crate::{
    behavior::{Behavior, FoldError, Phase, RejectionReason},
    command::Command,
    event::Event,
    message::Message,
    metadata::{Stamper, Tag},
};
use std::{collections::BTreeSet, marker::PhantomData};
use thiserror::Error;
use tracing::{debug, warn};

/// Why a `handle` call produced no events and no new state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandFailure {
    /// A rejection rule refused the command. Expected and recoverable.
    #[error("command rejected: {0}")]
    Rejected(RejectionReason),

    /// No emission rule covers this command in this phase. A configuration
    /// defect, not a user error.
    #[error("no emission rule for command {command} in {phase} phase")]
    Unhandled { command: &'static str, phase: Phase },

    /// An emitted event could not be folded: invariant violation in the
    /// rule tables, fatal for this invocation.
    #[error(transparent)]
    InvalidFold(#[from] FoldError),
}

/// The new present state plus the ordered, stamped events produced by one
/// accepted command.
#[derive(Debug)]
pub struct Outcome<B: Behavior> {
    pub state: B,
    pub events: Vec<Event<B::Event>>,
}

/// The behavior engine for one aggregate type.
///
/// Stateless across calls: the caller supplies the prior state and must
/// serialize commands per aggregate instance. Distinct instances can be
/// handled fully in parallel.
#[derive(Debug, Clone)]
pub struct Engine<B: Behavior> {
    tags: BTreeSet<Tag>,
    behavior: PhantomData<B>,
}

impl<B: Behavior> Engine<B> {
    /// Creates an engine tagged with the aggregate's own type tag.
    pub fn new() -> Self {
        Self {
            tags: BTreeSet::from([Tag::new(B::TYPE)]),
            behavior: PhantomData,
        }
    }

    /// Adds a cross-cutting routing tag, e.g. a dependent-view stream.
    /// Attached to every event this engine stamps, never interpreted here.
    #[must_use]
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.insert(tag);
        self
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// Runs one command: rejection rules, then emission rules, then stamping
    /// and folding each event in order.
    ///
    /// On any failure the caller's prior state is untouched and no event
    /// exists.
    pub fn handle(
        &self,
        state: Option<&B>,
        command: B::Command,
    ) -> Result<Outcome<B>, CommandFailure> {
        let phase = Phase::of(state);

        if let Some(reason) = B::reject(state, &command) {
            debug!(
                aggregate_id = %command.aggregate_id(),
                command = command.name(),
                %phase,
                %reason,
                "command rejected"
            );
            return Err(CommandFailure::Rejected(reason));
        }

        let drafts = match B::emit(state, &command) {
            Some(emit) => emit.into_drafts(),
            None => {
                warn!(
                    aggregate_id = %command.aggregate_id(),
                    command = command.name(),
                    %phase,
                    "no emission rule matched"
                );
                return Err(CommandFailure::Unhandled {
                    command: command.name(),
                    phase,
                });
            }
        };

        let stamper = Stamper::new(
            command.aggregate_id().to_string(),
            command.command_id(),
            self.tags.clone(),
        );

        let mut drafts = drafts.into_iter();
        let Some(first) = drafts.next() else {
            // A matched rule that emits nothing is indistinguishable from a
            // missing rule as far as the caller is concerned.
            warn!(
                aggregate_id = %command.aggregate_id(),
                command = command.name(),
                %phase,
                "emission rule matched but produced no drafts"
            );
            return Err(CommandFailure::Unhandled {
                command: command.name(),
                phase,
            });
        };

        let fold_defect = |err: FoldError| {
            warn!(
                aggregate_id = %command.aggregate_id(),
                command = command.name(),
                %phase,
                %err,
                "fold invariant violated"
            );
            CommandFailure::InvalidFold(err)
        };

        let first = stamper.stamp(first);
        let mut new_state = B::fold(state.cloned(), first.payload()).map_err(fold_defect)?;
        let mut events = Vec::with_capacity(drafts.len() + 1);
        events.push(first);

        for draft in drafts {
            let event = stamper.stamp(draft);
            new_state = B::fold(Some(new_state), event.payload()).map_err(fold_defect)?;
            events.push(event);
        }

        Ok(Outcome {
            state: new_state,
            events,
        })
    }
}

impl<B: Behavior> Default for Engine<B> {
    fn default() -> Self {
        Self::new()
    }
}
