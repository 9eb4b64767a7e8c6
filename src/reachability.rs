use std::collections::VecDeque;

use bit_set::BitSet;

use crate::{math::Map, Automaton, StateId, StateSet};

impl Automaton {
    /// Returns all states that can be reached from a state in `origins` through any sequence of
    /// transitions, epsilon transitions included. The origins themselves are part of the result
    /// as long as they exist.
    pub fn reachable_from<I>(&self, origins: I) -> StateSet
    where
        I: IntoIterator<Item = StateId>,
    {
        let mut seen = BitSet::with_capacity(self.size());
        let mut queue: VecDeque<StateId> = origins
            .into_iter()
            .filter(|q| self.contains(*q))
            .filter(|q| seen.insert(q.index()))
            .collect();

        let mut reached = StateSet::new();
        while let Some(q) = queue.pop_front() {
            reached.insert(q);
            for t in self.transitions_from(q) {
                if seen.insert(t.target().index()) {
                    queue.push_back(t.target());
                }
            }
        }
        reached
    }

    /// Returns all states from which a state in `targets` can be reached, i.e. the states that
    /// are reachable from `targets` when following transitions backwards.
    pub fn coreachable_to<I>(&self, targets: I) -> StateSet
    where
        I: IntoIterator<Item = StateId>,
    {
        let mut predecessors: Map<StateId, Vec<StateId>> = Map::default();
        for t in self.transitions() {
            predecessors.entry(t.target()).or_default().push(t.origin());
        }

        let mut seen = BitSet::with_capacity(self.size());
        let mut queue: VecDeque<StateId> = targets
            .into_iter()
            .filter(|q| self.contains(*q))
            .filter(|q| seen.insert(q.index()))
            .collect();

        let mut reached = StateSet::new();
        while let Some(q) = queue.pop_front() {
            reached.insert(q);
            for p in predecessors.get(&q).into_iter().flatten() {
                if seen.insert(p.index()) {
                    queue.push_back(*p);
                }
            }
        }
        reached
    }

    /// The states that can be reached from the initial state. Without an initial state, no
    /// state is accessible.
    pub fn accessible_states(&self) -> StateSet {
        self.reachable_from(self.initial())
    }

    /// The states from which an accepting state can be reached.
    pub fn productive_states(&self) -> StateSet {
        self.coreachable_to(self.accepting_states().collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test_log::test]
    fn forward_and_backward() {
        let aut = AutomatonBuilder::default()
            .with_accepting([2])
            .with_transitions([(0, 'a', 1), (1, EPSILON, 2), (3, 'b', 0), (2, 'a', 4)])
            .into_automaton(0);

        assert_eq!(
            aut.accessible_states(),
            StateSet::from([StateId(0), StateId(1), StateId(2), StateId(4)])
        );
        assert_eq!(
            aut.productive_states(),
            StateSet::from([StateId(0), StateId(1), StateId(2), StateId(3)])
        );
        assert!(aut.reachable_from([StateId(17)]).is_empty());
        assert!(AutomatonBuilder::default()
            .with_transitions([(0, 'a', 1)])
            .into_automaton_without_initial()
            .accessible_states()
            .is_empty());
    }
}
