//! Effects produced by state transitions

use super::state::AnswerSet;

/// Effects to be executed by the runtime after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the answers to the report service.
    ///
    /// Carries the snapshot taken at the `Submitting` transition; the
    /// executor must never re-read live state when performing the call.
    Submit { answers: AnswerSet },
}
