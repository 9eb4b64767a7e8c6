use std::{cell::OnceCell, collections::BTreeMap};

use super::{Alphabet, AutomatonKind, Delta, StateId, StateSet};

/// Holds everything that can be derived from the structure of an automaton. Each entry is
/// computed on first access and stays valid until [`DerivedCache::invalidate`] is called,
/// which the automaton does on every structural mutation.
#[derive(Debug, Clone, Default)]
pub(crate) struct DerivedCache {
    kind: OnceCell<AutomatonKind>,
    alphabet: OnceCell<Alphabet>,
    delta: OnceCell<Delta>,
    closures: OnceCell<BTreeMap<StateId, StateSet>>,
}

impl DerivedCache {
    pub(crate) fn invalidate(&mut self) {
        self.kind.take();
        self.alphabet.take();
        self.delta.take();
        self.closures.take();
    }

    pub(crate) fn kind<F: FnOnce() -> AutomatonKind>(&self, compute: F) -> AutomatonKind {
        *self.kind.get_or_init(compute)
    }

    pub(crate) fn alphabet<F: FnOnce() -> Alphabet>(&self, compute: F) -> &Alphabet {
        self.alphabet.get_or_init(compute)
    }

    pub(crate) fn delta<F: FnOnce() -> Delta>(&self, compute: F) -> &Delta {
        self.delta.get_or_init(compute)
    }

    pub(crate) fn closures<F>(&self, compute: F) -> &BTreeMap<StateId, StateSet>
    where
        F: FnOnce() -> BTreeMap<StateId, StateSet>,
    {
        self.closures.get_or_init(compute)
    }

    /// Returns true if no derived value is currently held.
    #[cfg(test)]
    pub(crate) fn is_cold(&self) -> bool {
        self.kind.get().is_none()
            && self.alphabet.get().is_none()
            && self.delta.get().is_none()
            && self.closures.get().is_none()
    }
}
