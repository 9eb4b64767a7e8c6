use std::fmt::Display;

use tracing::trace;

use crate::{math::Map, Transition, EPSILON};

/// The class of automata that the structure of an [`Automaton`](crate::Automaton)
/// falls into. This is derived from the transitions and never stored independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutomatonKind {
    /// There are no states at all.
    Empty,
    /// Every state has at most one successor on each symbol and there are no epsilon transitions.
    Dfa,
    /// Some state has more than one successor on the same symbol, but there are no epsilon transitions.
    Nfa,
    /// At least one transition is labeled with [`EPSILON`].
    EpsilonNfa,
}

impl AutomatonKind {
    /// Determines the kind of an automaton with `num_states` states and the given `transitions`.
    /// For each origin, the occurrences of each symbol across all outgoing transitions are
    /// counted. Any occurrence of [`EPSILON`] makes the automaton an epsilon-NFA, a symbol that
    /// occurs more than once from the same origin makes it an NFA.
    pub fn classify<'a, I>(num_states: usize, transitions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transition>,
    {
        let mut counts: Map<_, Map<char, usize>> = Map::default();
        for transition in transitions {
            let per_symbol = counts.entry(transition.origin()).or_default();
            for symbol in transition.symbols() {
                *per_symbol.entry(*symbol).or_default() += 1;
            }
        }

        let mut nondeterministic = false;
        for (origin, per_symbol) in &counts {
            if per_symbol.contains_key(&EPSILON) {
                trace!("found epsilon transition leaving {origin}");
                return AutomatonKind::EpsilonNfa;
            }
            if let Some((sym, count)) = per_symbol.iter().find(|(_, count)| **count > 1) {
                trace!("{origin} has {count} transitions on {sym}");
                nondeterministic = true;
            }
        }

        match (nondeterministic, num_states) {
            (true, _) => AutomatonKind::Nfa,
            (false, 0) => AutomatonKind::Empty,
            (false, _) => AutomatonKind::Dfa,
        }
    }

    /// Returns true if `self` is [`AutomatonKind::Dfa`].
    pub fn is_deterministic(&self) -> bool {
        matches!(self, AutomatonKind::Dfa)
    }
}

impl Display for AutomatonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                AutomatonKind::Empty => "empty",
                AutomatonKind::Dfa => "DFA",
                AutomatonKind::Nfa => "NFA",
                AutomatonKind::EpsilonNfa => "ε-NFA",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test_log::test]
    fn classification() {
        assert_eq!(Automaton::new().kind(), AutomatonKind::Empty);

        let mut aut = Automaton::new();
        let q0 = aut.add_state();
        assert_eq!(aut.kind(), AutomatonKind::Dfa);

        let q1 = aut.add_state();
        aut.add_transition(q0, ['a'], q1).unwrap();
        aut.add_transition(q0, ['b'], q0).unwrap();
        assert_eq!(aut.kind(), AutomatonKind::Dfa);

        aut.add_transition(q0, ['a'], q0).unwrap();
        assert_eq!(aut.kind(), AutomatonKind::Nfa);

        aut.add_transition(q1, [EPSILON], q0).unwrap();
        assert_eq!(aut.kind(), AutomatonKind::EpsilonNfa);

        aut.remove_transition(q1, q0);
        assert_eq!(aut.kind(), AutomatonKind::Nfa);

        assert!(!aut.kind().is_deterministic());
        assert!(aut.remove_symbol(q0, 'a', q0));
        assert_eq!(aut.kind(), AutomatonKind::Dfa);
        assert!(aut.kind().is_deterministic());
        assert!(!AutomatonKind::Empty.is_deterministic());
    }
}
