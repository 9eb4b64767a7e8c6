use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::{
    math::Bijection, naming::alphabetic_label, Automaton, AutomatonError, StateId, StateSet,
};

/// Represents the subset construction applied to an automaton. The result is a DFA whose states
/// each stand for a set of states of the original automaton, which the construction keeps
/// track of so that the correspondence can be inspected.
#[derive(Debug, Clone)]
pub struct SubsetConstruction {
    dfa: Automaton,
    subsets: Bijection<StateId, StateSet>,
}

impl SubsetConstruction {
    /// Runs the subset construction on `aut`, which needs to have an initial state.
    ///
    /// The construction starts with the epsilon-closure of the initial state and explores, for
    /// every discovered set and every symbol of the alphabet, the union of the epsilon-closures
    /// of all successors on that symbol. Sets are compared by value, each one is minted as a
    /// new state exactly once. As there are only finitely many subsets of the original states,
    /// the exploration terminates. Empty successor sets are not represented, so the resulting
    /// DFA may be partial.
    pub fn new(aut: &Automaton) -> Result<Self, AutomatonError> {
        let initial = aut.require_initial()?;
        let alphabet: Vec<char> = aut.alphabet().iter().copied().collect();

        let mut construction = Self {
            dfa: Automaton::new(),
            subsets: Bijection::new(),
        };
        let mut worklist = VecDeque::new();

        let start = construction.mint(aut, aut.closure_of(initial));
        construction.dfa.mark_initial(start);
        worklist.push_back(start);

        while let Some(current) = worklist.pop_front() {
            let Some(set) = construction.subsets.get_by_left(&current).cloned() else {
                continue;
            };
            for sym in &alphabet {
                let reached = aut.step(&set, *sym);
                if reached.is_empty() {
                    continue;
                }
                let target = match construction.subsets.get_by_right(&reached) {
                    Some(known) => *known,
                    None => {
                        let fresh = construction.mint(aut, reached);
                        worklist.push_back(fresh);
                        fresh
                    }
                };
                construction.dfa.merge_transition(current, [*sym], target);
            }
        }

        debug!(
            "subset construction turned {} states into {}",
            aut.size(),
            construction.dfa.size()
        );
        Ok(construction)
    }

    fn mint(&mut self, aut: &Automaton, set: StateSet) -> StateId {
        let label = alphabetic_label(self.subsets.len());
        let id = self.dfa.add_state_with(aut.any_accepting(&set), label);
        trace!("minted {id} for {}", aut.show_set(&set));
        self.subsets.insert(id, set);
        id
    }

    /// Returns the set of original states that the state `id` of the DFA represents.
    pub fn subset_of(&self, id: StateId) -> Option<&StateSet> {
        self.subsets.get_by_left(&id)
    }

    /// Returns the state of the DFA that represents `set`, if the set was discovered.
    pub fn state_for(&self, set: &StateSet) -> Option<StateId> {
        self.subsets.get_by_right(set).copied()
    }

    /// Gives access to the constructed DFA.
    pub fn dfa(&self) -> &Automaton {
        &self.dfa
    }

    /// Consumes `self` and returns the constructed DFA.
    pub fn into_automaton(self) -> Automaton {
        self.dfa
    }
}

impl Automaton {
    /// Builds a DFA that accepts the same language as `self` using the subset construction, see
    /// [`SubsetConstruction::new`]. The result is not necessarily minimal. Fails if `self` does
    /// not have an initial state.
    pub fn determinize(&self) -> Result<Automaton, AutomatonError> {
        SubsetConstruction::new(self).map(SubsetConstruction::into_automaton)
    }

    /// Creates a [`SubsetConstruction`] for `self`.
    pub fn subset_construction(&self) -> Result<SubsetConstruction, AutomatonError> {
        SubsetConstruction::new(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test_log::test]
    fn subset_construction() {
        let nfa = AutomatonBuilder::default()
            .with_transitions([
                (0, 'a', 0),
                (0, 'a', 1),
                (0, 'b', 1),
                (1, 'b', 1),
                (1, 'a', 0),
            ])
            .into_automaton(0);
        assert_eq!(nfa.kind(), AutomatonKind::Nfa);

        let construction = nfa.subset_construction().unwrap();
        let dfa = construction.dfa();
        assert_eq!(dfa.kind(), AutomatonKind::Dfa);
        assert_eq!(dfa.size(), 3);
        assert_eq!(
            construction.subset_of(dfa.initial().unwrap()),
            Some(&StateSet::from([StateId(0)]))
        );
        assert!(construction
            .state_for(&StateSet::from([StateId(0), StateId(1)]))
            .is_some());
        assert_eq!(dfa.state(StateId(0)).unwrap().label(), "A");
        assert_eq!(dfa.state(StateId(1)).unwrap().default_label(), "q1");
    }

    #[test_log::test]
    fn third_symbol_from_the_end() {
        let nfa = AutomatonBuilder::default()
            .with_accepting([3])
            .with_transitions([
                (0, 'a', 0),
                (0, 'b', 0),
                (0, 'a', 1),
                (1, 'a', 2),
                (1, 'b', 2),
                (2, 'a', 3),
                (2, 'b', 3),
            ])
            .into_automaton(0);
        let dfa = nfa.determinize().unwrap();
        assert_eq!(dfa.size(), 8);
        assert!(dfa.is_total());
        for word in SigmaStarEnumerator::new(['a', 'b'], 0).take(127) {
            assert_eq!(nfa.accepts(&word), dfa.accepts(&word), "differs on {word}");
        }
        // the input is left untouched
        assert_eq!(nfa.kind(), AutomatonKind::Nfa);
        assert_eq!(nfa.size(), 4);
    }

    #[test_log::test]
    fn epsilon_nfa_is_determinized() {
        let enfa = AutomatonBuilder::default()
            .with_accepting([3])
            .with_transitions([
                (0, EPSILON, 1),
                (0, EPSILON, 2),
                (1, 'a', 1),
                (1, 'b', 3),
                (2, 'b', 2),
                (2, 'a', 3),
            ])
            .into_automaton(0);
        let dfa = enfa.determinize().unwrap();
        assert_eq!(dfa.kind(), AutomatonKind::Dfa);
        assert!(dfa.accepts("aab"));
        assert!(dfa.accepts("bba"));
        assert!(dfa.accepts("b"));
        assert!(!dfa.accepts("ab a"));
        assert!(!dfa.accepts(""));
        for word in SigmaStarEnumerator::new(['a', 'b'], 0).take(63) {
            assert_eq!(enfa.accepts(&word), dfa.accepts(&word), "differs on {word}");
        }
    }

    #[test_log::test]
    fn missing_initial_state() {
        let aut = AutomatonBuilder::default()
            .with_transitions([(0, 'a', 0)])
            .into_automaton_without_initial();
        assert!(matches!(
            aut.determinize(),
            Err(AutomatonError::MissingInitialState)
        ));
    }

    #[cfg(feature = "random")]
    #[test_log::test]
    fn random_nfas_keep_their_language() {
        for _ in 0..25 {
            let nfa = crate::random::generate_random_nfa(2, 5, 0.3, 0.1);
            let dfa = nfa.determinize().unwrap();
            assert_eq!(dfa.kind(), AutomatonKind::Dfa);
            let alphabet: Vec<char> = nfa.alphabet().iter().copied().collect();
            for word in SigmaStarEnumerator::new(alphabet, 0).take(100) {
                assert_eq!(nfa.accepts(&word), dfa.accepts(&word), "differs on {word}");
            }
        }
    }
}
