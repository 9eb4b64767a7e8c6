use tracing::{debug, trace};

use crate::{Automaton, AutomatonError, StateId};

/// The custom label of the sink state that [`Automaton::totalize`] introduces.
pub const SINK_LABEL: &str = "∅";

impl Automaton {
    /// Returns a copy of `self` in which every state has an outgoing transition on every symbol
    /// of the alphabet. All transitions that are missing are redirected to one shared sink
    /// state, which is rejecting and loops on every symbol. If nothing is missing, the copy is
    /// returned without a sink, so totalizing twice adds nothing.
    pub fn totalize(&self) -> Automaton {
        let mut out = self.clone();
        let alphabet: Vec<char> = out.alphabet().iter().copied().collect();
        let missing: Vec<(StateId, char)> = out
            .state_ids()
            .flat_map(|q| alphabet.iter().map(move |sym| (q, *sym)))
            .filter(|(q, sym)| out.successors(*q, *sym).map_or(true, |s| s.is_empty()))
            .collect();
        if missing.is_empty() {
            return out;
        }

        let sink = out.add_state_with(false, Some(SINK_LABEL.to_string()));
        trace!("redirecting {} missing transitions to {sink}", missing.len());
        for (q, sym) in missing {
            out.merge_transition(q, [sym], sink);
        }
        out.merge_transition(sink, alphabet, sink);
        out
    }

    /// Builds a DFA that accepts exactly the words over the alphabet of `self` which `self`
    /// rejects. The DFA is first made total through [`Automaton::totalize`], afterwards every
    /// accepting state becomes rejecting and vice versa. Fails if `self` is not a DFA.
    pub fn complement(&self) -> Result<Automaton, AutomatonError> {
        self.require_dfa()?;
        let mut out = self.totalize();
        let flipped: Vec<(StateId, bool)> = out
            .states()
            .iter()
            .map(|q| (q.id(), !q.is_accepting()))
            .collect();
        for (q, accepting) in flipped {
            out.mark_accepting(q, accepting);
        }
        debug!(
            "complemented DFA with {} states, result has {}",
            self.size(),
            out.size()
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use crate::{operations::tests::*, prelude::*};

    #[test_log::test]
    fn totalization_adds_single_sink() {
        let ab = exactly_ab();
        let total = ab.totalize();
        assert!(total.is_total());
        assert_eq!(total.size(), ab.size() + 1);
        assert_eq!(total.kind(), AutomatonKind::Dfa);
        let sink = total
            .states()
            .iter()
            .find(|q| q.custom_label() == Some(super::SINK_LABEL))
            .unwrap();
        assert!(!sink.is_accepting());
        assert_eq!(total.totalize().size(), total.size());

        let already = crate::tests::ends_with_one();
        assert_eq!(already.totalize().size(), already.size());
    }

    #[test_log::test]
    fn complement_flips_language() {
        let ab = exactly_ab();
        let not_ab = ab.complement().unwrap();
        assert_eq!(not_ab.kind(), AutomatonKind::Dfa);
        for word in SigmaStarEnumerator::new(['a', 'b'], 0).take(63) {
            assert_eq!(not_ab.accepts(&word), !ab.accepts(&word), "differs on {word}");
        }
        assert!(not_ab.accepts(""));
        assert!(not_ab.accepts("abab"));
        assert!(!not_ab.accepts("ab"));
    }

    #[test_log::test]
    fn double_complement_is_identity() {
        for dfa in [exactly_ab(), contains_double_zero(), crate::tests::wiki_dfa()] {
            let twice = dfa.complement().unwrap().complement().unwrap();
            let alphabet: Vec<char> = dfa.alphabet().iter().copied().collect();
            for word in SigmaStarEnumerator::new(alphabet, 0).take(127) {
                assert_eq!(twice.accepts(&word), dfa.accepts(&word), "differs on {word}");
            }
        }
    }

    #[test_log::test]
    fn complement_requires_dfa() {
        let enfa = only_bs().kleene_star().unwrap();
        assert!(matches!(
            enfa.complement(),
            Err(AutomatonError::NotDeterministic {
                kind: AutomatonKind::EpsilonNfa
            })
        ));
    }
}
