use std::collections::BTreeSet;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    math::{Map, Partition},
    Automaton, AutomatonError, StateId,
};

mod distinguish;

impl Automaton {
    /// Minimizes `self`, which has to be a DFA with an initial state, using the table-filling
    /// algorithm that follows from the Myhill-Nerode theorem.
    ///
    /// First, all inaccessible states are removed. Then every unordered pair of remaining states
    /// is considered and all pairs are eliminated where
    /// 1. exactly one of the two states is accepting,
    /// 2. some symbol leads the two states into states that disagree on acceptance, or
    /// 3. a longer distinguishing word exists, see [`Automaton::distinguishing_word`].
    ///
    /// If no pair survives, the DFA is already minimal and the pruned copy is returned as is.
    /// Otherwise the surviving pairs are merged into equivalence classes. Every class becomes one
    /// state, whose custom label is the concatenation of the custom labels of its members (or
    /// the set of its members if none of them has a custom label), all other states are copied.
    /// The transitions are obtained by mapping the endpoints of every original transition to
    /// their representatives, where parallel edges merge their symbols.
    pub fn minimize(&self) -> Result<Automaton, AutomatonError> {
        self.require_dfa()?;
        self.require_initial()?;

        let pruned = self.remove_inaccessible_states();
        let alphabet: Vec<char> = pruned.alphabet().iter().copied().collect();
        let leads_to_acceptance = |q: StateId, sym: char| {
            pruned
                .successors(q, sym)
                .is_some_and(|targets| pruned.any_accepting(targets))
        };

        let ids: Vec<StateId> = pruned.state_ids().collect();
        let candidates: Vec<(StateId, StateId)> =
            ids.iter().copied().tuple_combinations().collect();
        let total = candidates.len();

        let candidates: Vec<_> = candidates
            .into_iter()
            .filter(|(p, q)| pruned.is_accepting(*p) == pruned.is_accepting(*q))
            .collect();
        trace!(
            "{} of {total} pairs agree on acceptance",
            candidates.len()
        );

        let candidates: Vec<_> = candidates
            .into_iter()
            .filter(|(p, q)| {
                alphabet
                    .iter()
                    .all(|sym| leads_to_acceptance(*p, *sym) == leads_to_acceptance(*q, *sym))
            })
            .collect();
        trace!("{} pairs agree on all words of length one", candidates.len());

        let surviving: Vec<_> = candidates
            .into_iter()
            .filter(|(p, q)| match pruned.distinguishing_word(*p, *q) {
                Some(word) => {
                    trace!("{p} and {q} are distinguished by {word}");
                    false
                }
                None => true,
            })
            .collect();

        if surviving.is_empty() {
            debug!("DFA with {} states is already minimal", pruned.size());
            return Ok(pruned);
        }

        let mut classes = Partition::default();
        for (p, q) in surviving {
            classes.join(p, q);
        }
        let minimized = pruned.quotient(&classes);
        debug!(
            "minimized DFA from {} to {} states",
            self.size(),
            minimized.size()
        );
        Ok(minimized)
    }

    /// Builds the automaton in which every class of `classes` is collapsed into a single state.
    /// States that do not occur in any class are copied.
    fn quotient(&self, classes: &Partition<StateId>) -> Automaton {
        let mut out = Automaton::new();
        let mut representative: Map<StateId, StateId> = Map::default();

        for state in self.states() {
            if representative.contains_key(&state.id()) {
                continue;
            }
            match classes.class_of(&state.id()) {
                Some(class) => {
                    let id = out.add_state_with(state.is_accepting(), Some(self.class_label(class)));
                    representative.extend(class.iter().map(|q| (*q, id)));
                }
                None => {
                    let id = out.add_state_with(
                        state.is_accepting(),
                        state.custom_label().map(String::from),
                    );
                    representative.insert(state.id(), id);
                }
            }
        }

        if let Some(initial) = self.initial() {
            out.mark_initial(representative[&initial]);
        }
        for t in self.transitions() {
            out.merge_transition(
                representative[&t.origin()],
                t.symbols().iter().copied(),
                representative[&t.target()],
            );
        }
        out
    }

    fn class_label(&self, class: &BTreeSet<StateId>) -> String {
        let custom: Vec<&str> = class
            .iter()
            .filter_map(|q| self.state(*q)?.custom_label())
            .collect();
        if custom.is_empty() {
            self.show_set(class)
        } else {
            custom.concat()
        }
    }
}
