use tracing::{debug, trace};

use crate::{Automaton, StateId, StateSet};

impl Automaton {
    fn without_states_outside(&self, keep: &StateSet) -> Automaton {
        let mut out = self.clone();
        let doomed: Vec<StateId> = out.state_ids().filter(|q| !keep.contains(q)).collect();
        for q in doomed {
            out.remove_state(q);
        }
        out
    }

    /// Returns a copy of `self` without the states that cannot be reached from the initial
    /// state. If there is no initial state, every state is inaccessible.
    pub fn remove_inaccessible_states(&self) -> Automaton {
        self.without_states_outside(&self.accessible_states())
    }

    /// Returns a copy of `self` without the states from which no accepting state can be reached.
    pub fn remove_useless_states(&self) -> Automaton {
        self.without_states_outside(&self.productive_states())
    }

    /// Returns a copy of `self` that contains only states which are both accessible and
    /// productive. Removing states can leave others inaccessible or useless, so the removal is
    /// repeated until a round does not find anything to remove.
    pub fn remove_inaccessible_and_useless_states(&self) -> Automaton {
        let mut out = self.clone();
        let mut round = 0;
        loop {
            let accessible = out.accessible_states();
            let productive = out.productive_states();
            let keep: StateSet = accessible.intersection(&productive).copied().collect();
            if keep.len() == out.size() {
                break;
            }
            round += 1;
            trace!(
                "round {round} removes {} states",
                out.size() - keep.len()
            );
            out = out.without_states_outside(&keep);
        }
        debug!(
            "pruned automaton from {} to {} states in {round} rounds",
            self.size(),
            out.size()
        );
        out
    }
}
