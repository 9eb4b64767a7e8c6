//! Every operation takes its operands by reference and builds a fresh automaton, the operands
//! are never modified. The constructions for union, concatenation and Kleene star are the
//! usual ones due to Thompson, gluing the operands together with epsilon transitions, so their
//! results are in general epsilon-NFAs.

use crate::{math::Bijection, StateId};

mod union;

mod concatenation;

mod star;

mod complement;
pub use complement::SINK_LABEL;

mod prune;

/// Looks up the identifier that the copy of `q` received when it was imported.
fn imported(mapping: &Bijection<StateId, StateId>, q: StateId) -> StateId {
    *mapping
        .get_by_left(&q)
        .expect("every state of an imported automaton has a copy")
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    /// Accepts exactly the word `ab`.
    pub(super) fn exactly_ab() -> Automaton {
        AutomatonBuilder::default()
            .with_accepting([2])
            .with_transitions([(0, 'a', 1), (1, 'b', 2)])
            .into_automaton(0)
    }

    /// Accepts all words consisting only of `b`s, including the empty word.
    pub(super) fn only_bs() -> Automaton {
        AutomatonBuilder::default()
            .with_accepting([0])
            .with_transitions([(0, 'b', 0)])
            .into_automaton(0)
    }

    /// Accepts all words over `{0, 1}` that contain `00`.
    pub(super) fn contains_double_zero() -> Automaton {
        AutomatonBuilder::default()
            .with_accepting([2])
            .with_transitions([
                (0, '0', 1),
                (0, '1', 0),
                (1, '0', 2),
                (1, '1', 0),
                (2, '0', 2),
                (2, '1', 2),
            ])
            .into_automaton(0)
    }

    #[test_log::test]
    fn operations_chain() {
        // (ab)* b*
        let aut = exactly_ab()
            .kleene_star()
            .unwrap()
            .concatenation(&only_bs())
            .unwrap();
        let dfa = aut.determinize().unwrap();
        let min = dfa.minimize().unwrap();
        for word in ["", "ab", "abab", "b", "abbb", "ababb"] {
            assert!(aut.accepts(word), "{word} should be accepted");
            assert!(min.accepts(word), "{word} should be accepted");
        }
        for word in ["a", "ba", "abba", "aab"] {
            assert!(!aut.accepts(word), "{word} should be rejected");
            assert!(!min.accepts(word), "{word} should be rejected");
        }
    }
}
