use crate::{
    id::{Id, IdKind},
    message::Message,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommandIdKind;

impl IdKind for CommandIdKind {
    const PREFIX: &'static str = "cmd";
}

/// Correlation id for one logical command instance, supplied by the caller.
/// The engine trusts it is unique and copies it verbatim into the causation
/// field of every event the command produces.
pub type CommandId = Id<CommandIdKind>;

/// An intent to change one aggregate instance. Commands never mutate state
/// themselves; they are validated and either rejected or turned into events.
pub trait Command: Message + Send + Sync + 'static {
    type Kind: IdKind;

    /// The aggregate instance this command targets.
    fn aggregate_id(&self) -> Id<Self::Kind>;

    /// The caller-supplied correlation id.
    fn command_id(&self) -> CommandId;
}
