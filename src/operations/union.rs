use tracing::debug;

use super::imported;
use crate::{Automaton, AutomatonError, EPSILON};

impl Automaton {
    /// Builds an automaton accepting the union of the languages of `self` and `other`. Both
    /// operands need an initial state and at least one accepting state.
    ///
    /// The result consists of a fresh initial state, copies of both operands and a fresh
    /// accepting state. The new initial state has epsilon transitions to the copies of both
    /// original initial states and every copy of an originally accepting state has an epsilon
    /// transition to the new accepting state, which is the only accepting state. The states are
    /// numbered sequentially, starting with the new initial state.
    pub fn union(&self, other: &Automaton) -> Result<Automaton, AutomatonError> {
        let operands = [
            (self, self.require_initial_and_accepting()?),
            (other, other.require_initial_and_accepting()?),
        ];

        let mut out = Automaton::new();
        let start = out.add_state();
        let mappings = operands.map(|(operand, _)| out.import(operand));
        let accept = out.add_state_with(true, None);

        for ((operand, initial), mapping) in operands.iter().zip(&mappings) {
            out.merge_transition(start, [EPSILON], imported(mapping, *initial));
            for q in operand.accepting_states() {
                let copy = imported(mapping, q);
                out.mark_accepting(copy, false);
                out.merge_transition(copy, [EPSILON], accept);
            }
        }
        out.mark_initial(start);

        debug!(
            "union of automata with {} and {} states has {} states",
            self.size(),
            other.size(),
            out.size()
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use crate::{operations::tests::*, prelude::*};

    #[test_log::test]
    fn union_accepts_either_language() {
        let left = crate::tests::ends_with_one();
        let right = contains_double_zero();
        let union = left.union(&right).unwrap();

        assert_eq!(union.kind(), AutomatonKind::EpsilonNfa);
        assert_eq!(union.size(), left.size() + right.size() + 2);
        assert_eq!(union.accepting_states().count(), 1);
        assert_eq!(union.initial(), Some(StateId(0)));

        for word in SigmaStarEnumerator::new(['0', '1'], 0).take(255) {
            assert_eq!(
                union.accepts(&word),
                left.accepts(&word) || right.accepts(&word),
                "differs on {word}"
            );
        }
        // operands are untouched
        assert_eq!(left.accepting_states().count(), 1);
        assert_eq!(left.kind(), AutomatonKind::Dfa);
    }

    #[test_log::test]
    fn union_over_different_alphabets() {
        let union = exactly_ab().union(&only_bs()).unwrap();
        assert!(union.accepts(""));
        assert!(union.accepts("ab"));
        assert!(union.accepts("bbb"));
        assert!(!union.accepts("abb"));
    }

    #[test_log::test]
    fn union_preconditions() {
        let no_accepting = AutomatonBuilder::default()
            .with_transitions([(0, 'a', 0)])
            .into_automaton(0);
        assert!(matches!(
            exactly_ab().union(&no_accepting),
            Err(AutomatonError::NoAcceptingStates)
        ));
        let no_initial = AutomatonBuilder::default()
            .with_accepting([0])
            .into_automaton_without_initial();
        assert!(matches!(
            no_initial.union(&exactly_ab()),
            Err(AutomatonError::MissingInitialState)
        ));
    }

    #[cfg(feature = "random")]
    #[test_log::test]
    fn random_unions() {
        for _ in 0..10 {
            let left = crate::random::generate_random_nfa(2, 4, 0.4, 0.1);
            let right = crate::random::generate_random_nfa(2, 4, 0.4, 0.1);
            if left.accepting_states().next().is_none()
                || right.accepting_states().next().is_none()
            {
                continue;
            }
            let union = left.union(&right).unwrap();
            for word in SigmaStarEnumerator::new(['a', 'b'], 0).take(63) {
                assert_eq!(
                    union.accepts(&word),
                    left.accepts(&word) || right.accepts(&word)
                );
            }
        }
    }
}
