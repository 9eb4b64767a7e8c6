use tracing::debug;

use super::imported;
use crate::{Automaton, AutomatonError, EPSILON};

impl Automaton {
    /// Builds an automaton accepting the concatenation of the language of `self` with the
    /// language of `other`, i.e. all words `uv` such that `self` accepts `u` and `other`
    /// accepts `v`. Both operands need an initial state and at least one accepting state.
    ///
    /// Copies of both operands are placed side by side. Every copy of an accepting state of
    /// `self` loses its acceptance and instead gets an epsilon transition to the copy of the
    /// initial state of `other`. The initial state of the result is the copy of the initial
    /// state of `self`, the accepting states are those of `other`.
    pub fn concatenation(&self, other: &Automaton) -> Result<Automaton, AutomatonError> {
        let left_initial = self.require_initial_and_accepting()?;
        let right_initial = other.require_initial_and_accepting()?;

        let mut out = Automaton::new();
        let left = out.import(self);
        let right = out.import(other);

        let bridge = imported(&right, right_initial);
        for q in self.accepting_states() {
            let copy = imported(&left, q);
            out.mark_accepting(copy, false);
            out.merge_transition(copy, [EPSILON], bridge);
        }
        out.mark_initial(imported(&left, left_initial));

        debug!(
            "concatenation of automata with {} and {} states",
            self.size(),
            other.size()
        );
        Ok(out)
    }
}
