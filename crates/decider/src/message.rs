/// Named payloads flowing through the engine: commands and event drafts.
///
/// The name is the variant's short identifier, used in log fields and in the
/// unhandled-command failure so a misconfigured aggregate is diagnosable
/// without Debug-printing the whole value.
pub trait Message {
    fn name(&self) -> &'static str;
}
