//! Library for editing and simulating finite automata over characters, aimed at teaching
//! formal-language theory.
//!
//! The central type is [`Automaton`], which stores an ordered collection of [`State`]s and an
//! ordered collection of [`Transition`]s. A transition connects an origin state with a target
//! state and is labeled with a set of symbols. One symbol, [`EPSILON`], is reserved and denotes
//! the empty word, a transition labeled with it can be taken without consuming any input.
//! There is at most one transition object per ordered pair of origin and target, adding a
//! transition between a pair that is already connected merely extends the symbol set of the
//! existing edge.
//!
//! Everything that can be derived from the structure, i.e. the alphabet, the transition function,
//! the epsilon-closures of all states and the [`AutomatonKind`], is computed on demand and cached
//! inside the automaton. Every structural mutation throws the caches away, so a derived value can
//! never be stale.
//!
//! On top of the model, the crate implements
//! - simulation of (epsilon-)nondeterministic automata on finite inputs, see [`Automaton::accepts`]
//!   and [`Automaton::run`],
//! - the subset construction in [`Automaton::determinize`],
//! - Myhill-Nerode minimization through table filling in [`Automaton::minimize`], which uses the
//!   shortlex enumerator [`SigmaStarEnumerator`] to bound its search for distinguishing words,
//! - the structural operations [`Automaton::union`], [`Automaton::concatenation`],
//!   [`Automaton::kleene_star`], [`Automaton::complement`] as well as the removal of inaccessible
//!   and useless states.
//!
//! None of the operations that produce an automaton modify their input, they always work on a
//! deep copy.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use fsmlab::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        acceptance::{Run, Step},
        automaton::{
            Automaton, AutomatonBuilder, AutomatonKind, Delta, State, StateId, StateSet,
            Transition, EPSILON,
        },
        determinization::SubsetConstruction,
        enumeration::SigmaStarEnumerator,
        error::AutomatonError,
        math,
        math::{Bijection, Map, Partition},
        naming::alphabetic_label,
        Show,
    };
}

/// This module contains some definitions of mathematical objects which are used throughout the crate and
/// do not really fit to the top level.
pub mod math;

/// Defines the error type that is shared by all fallible operations.
pub mod error;
pub use error::AutomatonError;

/// Defines the automaton model together with its derived caches.
pub mod automaton;
pub use automaton::{
    Automaton, AutomatonBuilder, AutomatonKind, State, StateId, StateSet, Transition, EPSILON,
};

/// Epsilon-closures and the simulation of automata on finite words.
pub mod acceptance;

/// Forward and backward reachability analysis on automata.
pub mod reachability;

/// The subset construction, which turns an arbitrary automaton into an equivalent DFA.
pub mod determinization;

/// Generation of presentation labels for states.
pub mod naming;

/// Lazy enumeration of all words over an alphabet in shortlex order.
pub mod enumeration;
pub use enumeration::SigmaStarEnumerator;

/// Myhill-Nerode minimization of DFAs.
pub mod minimization;

/// Structural operations that combine or transform automata.
pub mod operations;

/// Implements the generation of random automata and words.
#[cfg(feature = "random")]
pub mod random;

/// Helper trait which can be used to display states, transitions and such.
pub trait Show {
    /// Returns a human readable representation of `self`, for a state that should be
    /// for example q0, q1, q2, ... and for a set of states it should be {q0, q1}.
    /// This is mainly used for debugging purposes.
    fn show(&self) -> String;
}
