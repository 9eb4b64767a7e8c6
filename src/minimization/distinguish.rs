use crate::{Automaton, SigmaStarEnumerator, StateId};

impl Automaton {
    /// The maximal length of a word that needs to be checked in order to decide whether two
    /// states of `self` (assumed to be deterministic) are equivalent. If two states of a DFA
    /// with `n` states can be distinguished at all, then there is a distinguishing word of
    /// length at most `n - 2`. A partial DFA is treated as if its missing transitions led to
    /// an additional rejecting sink, so it counts as having one more state.
    pub fn distinguishability_bound(&self) -> usize {
        let effective = self.size() + usize::from(!self.is_total());
        effective.saturating_sub(2)
    }

    /// Searches for a word of length at least two on which the runs starting in `left` and
    /// `right` disagree, i.e. one of them accepts and the other one rejects. Candidates are
    /// produced in shortlex order by a [`SigmaStarEnumerator`] and the search gives up once
    /// the words become longer than [`Automaton::distinguishability_bound`], so the first
    /// witness is returned if one exists.
    ///
    /// Shorter words are not examined, checking those is cheap and is expected to have
    /// happened before.
    pub fn distinguishing_word(&self, left: StateId, right: StateId) -> Option<String> {
        let bound = self.distinguishability_bound();
        let mut words = SigmaStarEnumerator::new(self.alphabet().iter().copied(), 2);
        while words.next_length() <= bound {
            let word = words.next()?;
            if self.accepts_from(left, &word) != self.accepts_from(right, &word) {
                return Some(word);
            }
        }
        None
    }

    /// Returns true if there is a word of length at least two that separates `left` from
    /// `right`. See [`Automaton::distinguishing_word`].
    pub fn is_distinguishable(&self, left: StateId, right: StateId) -> bool {
        self.distinguishing_word(left, right).is_some()
    }
}
