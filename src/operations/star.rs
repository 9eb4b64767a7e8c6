use tracing::debug;

use crate::{Automaton, AutomatonError, StateId, EPSILON};

impl Automaton {
    /// Builds an automaton accepting the Kleene star of the language of `self`, that is the
    /// empty word and every concatenation of words accepted by `self`. Needs an initial state
    /// and at least one accepting state.
    ///
    /// A copy of `self` receives a fresh state that is both initial and accepting, together with
    /// an epsilon transition from it to the old initial state. Every previously accepting state
    /// gets an epsilon transition back to the fresh state and loses its acceptance, so the fresh
    /// state is the only accepting one.
    pub fn kleene_star(&self) -> Result<Automaton, AutomatonError> {
        let initial = self.require_initial_and_accepting()?;

        let mut out = self.clone();
        let accepting: Vec<StateId> = out.accepting_states().collect();
        let hub = out.add_state_with(true, None);
        out.merge_transition(hub, [EPSILON], initial);
        for q in accepting {
            out.mark_accepting(q, false);
            out.merge_transition(q, [EPSILON], hub);
        }
        out.mark_initial(hub);

        debug!("kleene star of automaton with {} states", self.size());
        Ok(out)
    }
}
