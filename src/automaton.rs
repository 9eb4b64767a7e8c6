use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::{error::AutomatonError, math::Bijection, Show};

mod state;
pub use state::{State, StateId};

mod transition;
pub use transition::{Transition, EPSILON};

mod kind;
pub use kind::AutomatonKind;

mod cache;
use cache::DerivedCache;

mod builder;
pub use builder::AutomatonBuilder;

mod table;

/// A set of states, ordered by their identifiers. Two sets are equal if and only if they contain
/// the same states.
pub type StateSet = BTreeSet<StateId>;

/// The alphabet of an automaton, i.e. all symbols other than [`EPSILON`] that appear on at least
/// one transition, in ascending order.
pub type Alphabet = BTreeSet<char>;

/// The transition function of an automaton. It maps an origin state to a map that associates each
/// symbol (possibly [`EPSILON`]) with the set of states that can be reached through a single
/// transition on that symbol. Origins without outgoing transitions do not appear.
pub type Delta = BTreeMap<StateId, BTreeMap<char, StateSet>>;

/// A finite automaton over characters. It consists of an ordered collection of [`State`]s and
/// an ordered collection of [`Transition`]s, at most one of the states is initial.
///
/// States are kept in an arena and addressed through their [`StateId`], transitions only store
/// identifiers of their endpoints. It is guaranteed that every endpoint of a transition is a state
/// of the automaton and that there is at most one transition for each ordered pair of states.
///
/// The alphabet, the transition function, the epsilon-closures and the [`AutomatonKind`] are
/// computed lazily and cached. Any structural modification (adding or removing states and
/// transitions, changing the initial state) discards the cache. As the cache uses interior
/// mutability, an automaton cannot be shared between threads.
///
/// Cloning produces a deep copy in which every state keeps its identifier, so identifiers of
/// `self` remain valid in the copy. To move the states of one automaton into another, or to
/// renumber them, use [`Automaton::import`] or [`Automaton::relabel`], which return the table
/// mapping old to new identifiers.
#[derive(Debug, Clone, Default)]
pub struct Automaton {
    states: Vec<State>,
    transitions: Vec<Transition>,
    initial: Option<StateId>,
    next_id: usize,
    cache: DerivedCache,
}

impl Automaton {
    /// Creates a new automaton without any states.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new [`AutomatonBuilder`].
    pub fn builder() -> AutomatonBuilder {
        AutomatonBuilder::default()
    }

    fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    fn position(&self, id: StateId) -> Option<usize> {
        self.states.iter().position(|q| q.id() == id)
    }

    fn ensure_contains(&self, id: StateId) -> Result<usize, AutomatonError> {
        self.position(id).ok_or(AutomatonError::UnknownState(id))
    }

    /// Adds a new state that is neither initial nor accepting and returns its identifier.
    pub fn add_state(&mut self) -> StateId {
        let id = StateId(self.next_id);
        self.next_id += 1;
        self.states.push(State::new(id));
        self.invalidate();
        id
    }

    /// Adds a new state with the given acceptance flag and custom label.
    pub fn add_state_with(&mut self, accepting: bool, custom_label: Option<String>) -> StateId {
        let id = StateId(self.next_id);
        self.next_id += 1;
        let mut state = State::new(id);
        state.accepting = accepting;
        state.set_custom_label(custom_label);
        self.states.push(state);
        self.invalidate();
        id
    }

    /// Adds a transition from `origin` to `target` on the given `symbols`. If the two states are
    /// already connected by a transition, the symbols are added to that transition instead of
    /// creating a second one. An empty set of symbols does not connect anything and leaves the
    /// automaton unchanged.
    pub fn add_transition<I>(
        &mut self,
        origin: StateId,
        symbols: I,
        target: StateId,
    ) -> Result<(), AutomatonError>
    where
        I: IntoIterator<Item = char>,
    {
        self.ensure_contains(origin)?;
        self.ensure_contains(target)?;
        self.merge_transition(origin, symbols, target);
        Ok(())
    }

    /// Inserts or extends a transition between endpoints that are known to exist.
    pub(crate) fn merge_transition<I>(&mut self, origin: StateId, symbols: I, target: StateId)
    where
        I: IntoIterator<Item = char>,
    {
        debug_assert!(self.contains(origin) && self.contains(target));
        let symbols: BTreeSet<char> = symbols.into_iter().collect();
        if symbols.is_empty() {
            trace!("ignoring transition from {origin} to {target} without symbols");
            return;
        }
        match self
            .transitions
            .iter_mut()
            .find(|t| t.origin() == origin && t.target() == target)
        {
            Some(existing) => existing.symbols_mut().extend(symbols),
            None => self
                .transitions
                .push(Transition::new(origin, symbols, target)),
        }
        self.invalidate();
    }

    /// Removes the state with the given identifier together with all transitions that touch it.
    /// If the state was initial, the automaton no longer has an initial state afterwards.
    /// Returns the removed state, or `None` if no such state exists.
    pub fn remove_state(&mut self, id: StateId) -> Option<State> {
        let pos = self.position(id)?;
        let state = self.states.remove(pos);
        let before = self.transitions.len();
        self.transitions
            .retain(|t| t.origin() != id && t.target() != id);
        trace!(
            "removed {} and {} adjacent transitions",
            state.show(),
            before - self.transitions.len()
        );
        if self.initial == Some(id) {
            self.initial = None;
        }
        self.invalidate();
        Some(state)
    }

    /// Removes the transition from `origin` to `target` and returns it, if it exists.
    pub fn remove_transition(&mut self, origin: StateId, target: StateId) -> Option<Transition> {
        let pos = self
            .transitions
            .iter()
            .position(|t| t.origin() == origin && t.target() == target)?;
        self.invalidate();
        let removed = self.transitions.remove(pos);
        trace!("removed transition {}", removed.show());
        Some(removed)
    }

    /// Removes `symbol` from the transition leading from `origin` to `target`. If no symbol
    /// remains, the transition itself is removed. Returns true if the symbol was present.
    pub fn remove_symbol(&mut self, origin: StateId, symbol: char, target: StateId) -> bool {
        let Some(pos) = self
            .transitions
            .iter()
            .position(|t| t.origin() == origin && t.target() == target)
        else {
            return false;
        };
        if !self.transitions[pos].symbols_mut().remove(&symbol) {
            return false;
        }
        if self.transitions[pos].symbols().is_empty() {
            self.transitions.remove(pos);
        }
        self.invalidate();
        true
    }

    /// Makes the state `id` the unique initial state.
    pub fn set_initial(&mut self, id: StateId) -> Result<(), AutomatonError> {
        self.ensure_contains(id)?;
        self.mark_initial(id);
        Ok(())
    }

    /// Marks a state that is known to exist as the unique initial state.
    pub(crate) fn mark_initial(&mut self, id: StateId) {
        debug_assert!(self.contains(id));
        for state in self.states.iter_mut() {
            state.initial = state.id() == id;
        }
        self.initial = Some(id);
        self.invalidate();
    }

    /// Removes the designation of an initial state.
    pub fn clear_initial(&mut self) {
        for state in self.states.iter_mut() {
            state.initial = false;
        }
        self.initial = None;
        self.invalidate();
    }

    /// Sets whether the state `id` is accepting.
    pub fn set_accepting(&mut self, id: StateId, accepting: bool) -> Result<(), AutomatonError> {
        let pos = self.ensure_contains(id)?;
        self.states[pos].accepting = accepting;
        Ok(())
    }

    /// Sets the acceptance flag of a state that is known to exist.
    pub(crate) fn mark_accepting(&mut self, id: StateId, accepting: bool) {
        if let Some(pos) = self.position(id) {
            self.states[pos].accepting = accepting;
        }
    }

    /// Sets or removes the custom label of state `id`.
    pub fn set_custom_label(
        &mut self,
        id: StateId,
        label: Option<String>,
    ) -> Result<(), AutomatonError> {
        let pos = self.ensure_contains(id)?;
        self.states[pos].set_custom_label(label);
        Ok(())
    }

    /// Returns the states of `self` in the order in which they were added.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Returns an iterator over the identifiers of all states.
    pub fn state_ids(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states.iter().map(|q| q.id())
    }

    /// Returns the transitions of `self` in the order in which they were added.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Returns an iterator over all transitions leaving `origin`.
    pub fn transitions_from(&self, origin: StateId) -> impl Iterator<Item = &Transition> + '_ {
        self.transitions
            .iter()
            .filter(move |t| t.origin() == origin)
    }

    /// Returns the transition from `origin` to `target`, if it exists.
    pub fn transition(&self, origin: StateId, target: StateId) -> Option<&Transition> {
        self.transitions
            .iter()
            .find(|t| t.origin() == origin && t.target() == target)
    }

    /// Returns the state with the given identifier.
    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.iter().find(|q| q.id() == id)
    }

    /// Returns true if a state with identifier `id` exists.
    pub fn contains(&self, id: StateId) -> bool {
        self.position(id).is_some()
    }

    /// The number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Returns true if there are no states.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The initial state, if one has been designated.
    pub fn initial(&self) -> Option<StateId> {
        self.initial
    }

    /// Returns the initial state or an error if there is none.
    pub(crate) fn require_initial(&self) -> Result<StateId, AutomatonError> {
        self.initial.ok_or(AutomatonError::MissingInitialState)
    }

    /// Returns the initial state, provided that there is one and that at least one state is
    /// accepting. These are the preconditions of the structural operations.
    pub(crate) fn require_initial_and_accepting(&self) -> Result<StateId, AutomatonError> {
        let initial = self.require_initial()?;
        if self.accepting_states().next().is_none() {
            return Err(AutomatonError::NoAcceptingStates);
        }
        Ok(initial)
    }

    /// Returns true if `id` is an accepting state.
    pub fn is_accepting(&self, id: StateId) -> bool {
        self.state(id).map(|q| q.is_accepting()).unwrap_or(false)
    }

    /// Returns an iterator over the identifiers of all accepting states.
    pub fn accepting_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states
            .iter()
            .filter(|q| q.is_accepting())
            .map(|q| q.id())
    }

    /// Returns true if at least one state of `set` is accepting.
    pub fn any_accepting<'a, I: IntoIterator<Item = &'a StateId>>(&self, set: I) -> bool {
        set.into_iter().any(|q| self.is_accepting(*q))
    }

    /// Classifies `self` as empty, DFA, NFA or epsilon-NFA. See [`AutomatonKind::classify`].
    pub fn kind(&self) -> AutomatonKind {
        self.cache
            .kind(|| AutomatonKind::classify(self.states.len(), &self.transitions))
    }

    /// Returns the [`AutomatonKind`] if `self` is a DFA and an error otherwise.
    pub(crate) fn require_dfa(&self) -> Result<(), AutomatonError> {
        let kind = self.kind();
        if kind.is_deterministic() {
            Ok(())
        } else {
            Err(AutomatonError::NotDeterministic { kind })
        }
    }

    /// The set of all non-epsilon symbols that appear on some transition.
    pub fn alphabet(&self) -> &Alphabet {
        self.cache.alphabet(|| {
            self.transitions
                .iter()
                .flat_map(|t| t.symbols().iter().copied())
                .filter(|sym| *sym != EPSILON)
                .collect()
        })
    }

    /// The transition function, see [`Delta`].
    pub fn delta(&self) -> &Delta {
        self.cache.delta(|| {
            let mut delta = Delta::new();
            for t in &self.transitions {
                let per_symbol = delta.entry(t.origin()).or_default();
                for sym in t.symbols() {
                    per_symbol.entry(*sym).or_default().insert(t.target());
                }
            }
            delta
        })
    }

    /// Returns the set of states reachable from `origin` through a single transition on `symbol`.
    pub fn successors(&self, origin: StateId, symbol: char) -> Option<&StateSet> {
        self.delta().get(&origin)?.get(&symbol)
    }

    /// Returns the epsilon-closures of all states, see [`Automaton::closure_of`].
    pub fn epsilon_closures(&self) -> &BTreeMap<StateId, StateSet> {
        self.cache
            .closures(|| crate::acceptance::compute_epsilon_closures(self))
    }

    /// Returns true if every state has an outgoing transition on every symbol of the alphabet.
    pub fn is_total(&self) -> bool {
        let alphabet = self.alphabet();
        self.state_ids().all(|q| {
            alphabet
                .iter()
                .all(|sym| self.successors(q, *sym).is_some_and(|s| !s.is_empty()))
        })
    }

    /// Copies all states and transitions of `other` into `self`. The copied states receive fresh
    /// identifiers in `self`, the returned bijection maps every identifier of `other` to the
    /// identifier of its copy. Accepting flags and labels are copied along, the copies are never
    /// initial and the initial state of `self` is left untouched.
    pub fn import(&mut self, other: &Automaton) -> Bijection<StateId, StateId> {
        let mut mapping = Bijection::new();
        for state in &other.states {
            let id = StateId(self.next_id);
            self.next_id += 1;
            let mut copy = state.with_id(id);
            copy.initial = false;
            self.states.push(copy);
            mapping.insert(state.id(), id);
        }
        for t in &other.transitions {
            let origin = *mapping
                .get_by_left(&t.origin())
                .expect("every endpoint is a state of the automaton");
            let target = *mapping
                .get_by_left(&t.target())
                .expect("every endpoint is a state of the automaton");
            self.transitions.push(t.remap(origin, target));
        }
        self.invalidate();
        mapping
    }

    /// Produces a copy of `self` in which the states are renumbered `q0, q1, ...` in their current
    /// order. Returns the copy together with the mapping from old to new identifiers.
    pub fn relabel(&self) -> (Automaton, Bijection<StateId, StateId>) {
        let mut out = Automaton::new();
        let mapping = out.import(self);
        if let Some(&id) = self.initial.and_then(|q| mapping.get_by_left(&q)) {
            out.mark_initial(id);
        }
        (out, mapping)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test_log::test]
    fn transitions_merge_per_pair() {
        let mut aut = Automaton::new();
        let q0 = aut.add_state();
        let q1 = aut.add_state();
        aut.add_transition(q0, ['a'], q1).unwrap();
        aut.add_transition(q0, ['b', 'c'], q1).unwrap();
        aut.add_transition(q1, ['a'], q0).unwrap();
        assert_eq!(aut.transitions().len(), 2);
        assert_eq!(
            aut.transition(q0, q1).unwrap().symbols(),
            &std::collections::BTreeSet::from(['a', 'b', 'c'])
        );
        assert_eq!(
            aut.add_transition(q0, ['a'], StateId(7)),
            Err(AutomatonError::UnknownState(StateId(7)))
        );
    }

    #[test_log::test]
    fn empty_symbol_sets_do_not_connect_states() {
        let mut dfa = AutomatonBuilder::default()
            .with_accepting([1])
            .with_transitions([(0, 'a', 1), (1, 'a', 1)])
            .into_automaton(0);
        let island = dfa.add_state_with(true, None);
        dfa.add_transition(StateId(0), std::iter::empty(), island)
            .unwrap();
        assert_eq!(dfa.transitions().len(), 2);
        assert!(dfa.transition(StateId(0), island).is_none());
        assert!(!dfa.accessible_states().contains(&island));
        assert_eq!(dfa.remove_inaccessible_states().size(), 2);
        assert_eq!(dfa.minimize().unwrap().size(), 2);
    }

    #[test_log::test]
    fn removing_states_cascades() {
        let mut aut = AutomatonBuilder::default()
            .with_accepting([2])
            .with_transitions([(0, 'a', 1), (1, 'b', 2), (2, 'a', 0), (0, 'c', 2)])
            .into_automaton(0);
        assert_eq!(aut.initial(), Some(StateId(0)));

        let removed = aut.remove_state(StateId(0)).unwrap();
        assert!(removed.is_initial());
        assert_eq!(aut.initial(), None);
        assert_eq!(aut.transitions().len(), 1);
        assert!(aut
            .transitions()
            .iter()
            .all(|t| t.origin() != StateId(0) && t.target() != StateId(0)));
        assert!(aut.remove_state(StateId(0)).is_none());

        // identifiers are not reused
        assert_eq!(aut.add_state(), StateId(3));
    }

    #[test_log::test]
    fn caches_are_recomputed_after_mutation() {
        let mut aut = AutomatonBuilder::default()
            .with_transitions([(0, 'a', 1)])
            .into_automaton(0);
        assert_eq!(aut.alphabet().len(), 1);
        assert!(!aut.cache.is_cold());

        aut.add_transition(StateId(1), ['b'], StateId(0)).unwrap();
        assert!(aut.cache.is_cold());
        assert_eq!(aut.alphabet().iter().collect::<String>(), "ab");
        assert_eq!(
            aut.successors(StateId(1), 'b'),
            Some(&StateSet::from([StateId(0)]))
        );

        aut.add_transition(StateId(1), [EPSILON], StateId(0)).unwrap();
        assert_eq!(aut.alphabet().len(), 2);
        assert_eq!(
            aut.closure_of(StateId(1)),
            StateSet::from([StateId(0), StateId(1)])
        );
        aut.remove_transition(StateId(1), StateId(0));
        assert_eq!(aut.closure_of(StateId(1)), StateSet::from([StateId(1)]));
    }

    #[test_log::test]
    fn clone_is_independent() {
        let original = crate::tests::ends_with_one();
        let mut copy = original.clone();
        copy.remove_state(StateId(1));
        copy.add_transition(StateId(0), ['x'], StateId(0)).unwrap();
        assert_eq!(original.size(), 2);
        assert_eq!(original.transitions().len(), 4);
        assert!(!original.alphabet().contains(&'x'));
        assert!(original.accepts("01"));
    }

    #[test_log::test]
    fn relabeling_compacts_identifiers() {
        let mut aut = crate::tests::ends_with_one();
        let fresh = aut.add_state_with(true, Some("extra".into()));
        aut.add_transition(StateId(1), ['2'], fresh).unwrap();
        aut.remove_state(StateId(0));

        let (relabeled, mapping) = aut.relabel();
        assert_eq!(
            relabeled.state_ids().collect::<Vec<_>>(),
            vec![StateId(0), StateId(1)]
        );
        assert_eq!(mapping.get_by_left(&fresh), Some(&StateId(1)));
        assert_eq!(relabeled.state(StateId(1)).unwrap().label(), "extra");
        assert!(relabeled.transition(StateId(0), StateId(1)).is_some());
        assert_eq!(relabeled.initial(), None);
    }

    #[test_log::test]
    fn totality() {
        assert!(crate::tests::ends_with_one().is_total());
        let partial = AutomatonBuilder::default()
            .with_transitions([(0, 'a', 1), (1, 'b', 0)])
            .into_automaton(0);
        assert!(!partial.is_total());
    }
}
