use thiserror::Error;

use crate::automaton::{AutomatonKind, StateId};

/// Errors that are raised when an operation is invoked on an automaton which does not satisfy
/// the operation's preconditions. These are usage errors, the algorithms themselves cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    /// The operation is only defined for deterministic automata.
    #[error("operation requires a DFA, but the automaton is classified as {kind}")]
    NotDeterministic {
        /// The kind that the automaton was classified as.
        kind: AutomatonKind,
    },
    /// The automaton does not have a designated initial state.
    #[error("automaton has no initial state")]
    MissingInitialState,
    /// The automaton does not have a single accepting state.
    #[error("automaton has no accepting states")]
    NoAcceptingStates,
    /// A state was referenced which is not part of the automaton.
    #[error("state {0} does not exist in the automaton")]
    UnknownState(StateId),
}
