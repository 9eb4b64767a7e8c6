use super::{Automaton, StateId};

/// Helper struct for the declarative construction of automata. It stores a list of transitions,
/// a list of accepting states and a list of custom labels. States are referred to by number and
/// the built automaton contains the states `0` up to the largest number mentioned anywhere, so
/// state `i` of the builder ends up with identifier `StateId(i)`.
///
/// # Example
///
/// We want to create a DFA with two states 0 and 1 over the alphabet `['a', 'b']`. We want to add the following transitions:
/// - From state 0 to state 0 on symbol 'a'
/// - From state 0 to state 1 on symbol 'b'
/// - From state 1 to state 1 on symbol 'a'
/// - From state 1 to state 0 on symbol 'b'
///
/// Further, state 0 should be initial and state 1 should be accepting. This can be done as follows
/// ```
/// use fsmlab::prelude::*;
///
/// let dfa = AutomatonBuilder::default()
///     .with_accepting([1])
///     .with_transitions([(0, 'a', 0), (0, 'b', 1), (1, 'a', 1), (1, 'b', 0)])
///     .into_automaton(0); // 0 is the initial state
/// assert!(dfa.accepts("ab"));
/// assert_eq!(dfa.kind(), AutomatonKind::Dfa);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AutomatonBuilder {
    transitions: Vec<(usize, char, usize)>,
    accepting: Vec<usize>,
    labels: Vec<(usize, String)>,
    min_states: usize,
}

impl AutomatonBuilder {
    /// Adds a list of transitions given as `(origin, symbol, target)` triples. Use
    /// [`EPSILON`](crate::EPSILON) as symbol for epsilon transitions.
    pub fn with_transitions<I>(mut self, iter: I) -> Self
    where
        I: IntoIterator<Item = (usize, char, usize)>,
    {
        self.transitions.extend(iter);
        self
    }

    /// Marks the given states as accepting.
    pub fn with_accepting<I: IntoIterator<Item = usize>>(mut self, iter: I) -> Self {
        self.accepting.extend(iter);
        self
    }

    /// Assigns a custom label to state `idx`.
    pub fn with_label<S: Into<String>>(mut self, idx: usize, label: S) -> Self {
        self.labels.push((idx, label.into()));
        self
    }

    /// Ensures that at least `count` states are created, even if some of them are not mentioned
    /// by any transition.
    pub fn with_states(mut self, count: usize) -> Self {
        self.min_states = self.min_states.max(count);
        self
    }

    fn num_states(&self, initial: Option<usize>) -> usize {
        self.transitions
            .iter()
            .flat_map(|(p, _, q)| [*p, *q])
            .chain(self.accepting.iter().copied())
            .chain(self.labels.iter().map(|(q, _)| *q))
            .chain(initial)
            .map(|q| q + 1)
            .max()
            .unwrap_or(0)
            .max(self.min_states)
    }

    fn build(self, initial: Option<usize>) -> Automaton {
        let mut aut = Automaton::new();
        for i in 0..self.num_states(initial) {
            let label = self
                .labels
                .iter()
                .rev()
                .find_map(|(q, l)| (*q == i).then(|| l.clone()));
            aut.add_state_with(self.accepting.contains(&i), label);
        }
        for (p, sym, q) in self.transitions {
            aut.merge_transition(StateId(p), [sym], StateId(q));
        }
        if let Some(initial) = initial {
            aut.mark_initial(StateId(initial));
        }
        aut
    }

    /// Builds the automaton with `initial` as its initial state.
    pub fn into_automaton(self, initial: usize) -> Automaton {
        self.build(Some(initial))
    }

    /// Builds the automaton without designating an initial state.
    pub fn into_automaton_without_initial(self) -> Automaton {
        self.build(None)
    }
}
